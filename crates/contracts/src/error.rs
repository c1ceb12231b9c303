//! Layered error definitions
//!
//! Categorized by source: config / transport / remote / validation

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum RelayError {
    // ===== Configuration Errors =====
    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Sink Errors =====
    /// Network/DNS/timeout failure talking to a sink
    #[error("sink '{sink}' transport error: {message}")]
    Transport { sink: String, message: String },

    /// Sink reachable but responded with a failure
    #[error("sink '{sink}' rejected the request: {detail}")]
    RemoteRejection { sink: String, detail: String },

    /// Sink has no usable credentials; nothing was attempted
    #[error("sink '{sink}' is not configured")]
    NotConfigured { sink: String },

    // ===== Request Errors =====
    /// Required request field missing or empty
    #[error("validation error at '{field}': {message}")]
    Validation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl RelayError {
    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create transport error
    pub fn transport(sink: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create remote rejection error
    pub fn remote_rejection(sink: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::RemoteRejection {
            sink: sink.into(),
            detail: detail.into(),
        }
    }

    /// Create not-configured error
    pub fn not_configured(sink: impl Into<String>) -> Self {
        Self::NotConfigured { sink: sink.into() }
    }

    /// Create request validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Human-oriented detail string used when converting to a failed outcome
    pub fn outcome_detail(&self) -> String {
        match self {
            Self::Transport { message, .. } => message.clone(),
            Self::RemoteRejection { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}
