//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON watch-plan documents
//! - Screen entries: an incomplete entry is reported and skipped, the
//!   remaining entries keep processing
//! - Produce the `TemplateSpec` list the registry is built from
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let specs = ConfigLoader::load_from_path(Path::new("watch.toml")).unwrap();
//! println!("templates: {}", specs.len());
//! ```

mod parser;
mod screen;

pub use contracts::{TemplateEntry, TemplateSpec, WatchPlan};
pub use parser::ConfigFormat;
pub use screen::EntryFault;

use contracts::ContractError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load a watch plan from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a watch plan from a file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    /// Skipped entries are logged; use [`ConfigLoader::load_with_faults`]
    /// to inspect them programmatically.
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    pub fn load_from_path(path: &Path) -> Result<Vec<TemplateSpec>, ContractError> {
        Ok(Self::load_with_faults(path)?.0)
    }

    /// Load a watch plan, returning both the usable specs and the entries
    /// that were screened out
    pub fn load_with_faults(
        path: &Path,
    ) -> Result<(Vec<TemplateSpec>, Vec<EntryFault>), ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load a watch plan from a string
    ///
    /// # Errors
    /// - Parse failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<(Vec<TemplateSpec>, Vec<EntryFault>), ContractError> {
        let plan = parser::parse(content, format)?;
        Ok(screen::screen(plan))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }
}
