//! Layered error definitions
//!
//! Categorized by source: config / provider / sink / render

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Provider Errors =====
    /// Provider connection error
    #[error("provider connection error: {message}")]
    ProviderConnection { message: String },

    /// Trigger variable could not be resolved
    #[error("trigger variable not found: {name}")]
    TriggerNotFound { name: String },

    /// Change-notification registration failed
    #[error("notification setup for '{name}' failed: {message}")]
    Notification { name: String, message: String },

    // ===== Sink Errors =====
    /// Target (file or queue) could not be opened
    #[error("cannot open sink '{target}': {message}")]
    SinkOpen { target: String, message: String },

    /// Message send to the queue target failed
    #[error("send to sink '{target}' failed: {message}")]
    SinkSend { target: String, message: String },

    // ===== Render Errors =====
    /// Template source could not be read
    #[error("cannot read template '{path}': {message}")]
    TemplateRead { path: String, message: String },

    /// The rendering engine failed
    #[error("render of '{template}' failed: {message}")]
    Render { template: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create provider connection error
    pub fn provider_connection(message: impl Into<String>) -> Self {
        Self::ProviderConnection {
            message: message.into(),
        }
    }

    /// Create unresolved-trigger error
    pub fn trigger_not_found(name: impl Into<String>) -> Self {
        Self::TriggerNotFound { name: name.into() }
    }

    /// Create notification registration error
    pub fn notification(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Notification {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create sink open error
    pub fn sink_open(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkOpen {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create sink send error
    pub fn sink_send(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkSend {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create template read error
    pub fn template_read(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TemplateRead {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create render error
    pub fn render(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            template: template.into(),
            message: message.into(),
        }
    }
}
