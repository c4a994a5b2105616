//! WatchPlan - Config Loader output
//!
//! Describes the full trigger-to-template mapping: per-template trigger
//! variables, the template source, the output target and its lifecycle flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parsed configuration document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchPlan {
    /// Template entries in declaration order
    ///
    /// The historical document shape used a top-level `config` key; both are
    /// accepted on input.
    #[serde(alias = "config")]
    pub templates: Vec<TemplateEntry>,
}

/// One template entry as written in the configuration document.
///
/// `template` and `target` stay optional at the parse layer so that a single
/// incomplete entry can be reported and skipped without failing the whole
/// document. The screening pass in the config loader turns surviving entries
/// into [`TemplateSpec`] values with the required fields present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Trigger variable names (required, non-empty)
    #[serde(default)]
    pub trigger: Vec<String>,

    /// Template source file (required)
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Output destination: a file path for `fd`, a queue name for `mq` (required)
    #[serde(default)]
    pub target: Option<PathBuf>,

    /// Output kind
    #[serde(default, rename = "type")]
    pub kind: TargetKind,

    /// Keep the destination open between renders
    #[serde(default)]
    pub keep_open: bool,

    /// Append to the target instead of truncating (meaningful for `fd` only)
    #[serde(default)]
    pub append: bool,
}

/// Screened template entry, required fields guaranteed present
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSpec {
    /// Trigger variable names
    pub trigger: Vec<String>,
    /// Template source file
    pub template: PathBuf,
    /// Output destination
    pub target: PathBuf,
    /// Output kind
    pub kind: TargetKind,
    /// Keep the destination open between renders
    pub keep_open: bool,
    /// Append instead of truncating
    pub append: bool,
}

/// Output kind of a template entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Regular file or stream target
    #[default]
    Fd,
    /// Message queue target
    Mq,
}
