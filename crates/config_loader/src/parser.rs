//! Document parsing
//!
//! Supports TOML (primary) and JSON formats.

use contracts::{ContractError, TemplateEntry, WatchPlan};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a TOML watch plan
pub fn parse_toml(content: &str) -> Result<WatchPlan, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a JSON watch plan
///
/// Accepts both the wrapped document shape (`{"templates": [...]}`, with
/// `config` as a historical alias) and a bare top-level array of entries.
pub fn parse_json(content: &str) -> Result<WatchPlan, ContractError> {
    if let Ok(templates) = serde_json::from_str::<Vec<TemplateEntry>>(content) {
        return Ok(WatchPlan { templates });
    }

    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a watch plan in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<WatchPlan, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}
