//! Error types for the sequential testing engine.
//!
//! Every failure is raised synchronously at the point of violation and
//! propagated to the caller; nothing is retried internally. Each variant
//! carries a stable numeric code and a category for grouping:
//!
//! ```text
//! 10-19  parameter   construction-time validation
//! 20-29  input       update-time observation checks
//! 30-39  operation   unsupported operation for a family/rule
//! 40-49  config      configuration loading
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, StcpError>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Invalid construction parameters.
    Parameter,
    /// Observation outside the model's domain.
    Input,
    /// Operation not supported by the model or rule.
    Operation,
    /// Configuration loading or parsing.
    Config,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Parameter => write!(f, "parameter"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Operation => write!(f, "operation"),
            ErrorCategory::Config => write!(f, "config"),
        }
    }
}

/// Unified error type for the engine.
#[derive(Error, Debug)]
pub enum StcpError {
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: String, message: String },

    #[error("invalid input for {model}: {message}")]
    InvalidInput { model: String, message: String },

    #[error("{operation} is not supported by {model}")]
    UnsupportedOperation { operation: String, model: String },

    #[error("length mismatch for {what}: {left} != {right}")]
    LengthMismatch {
        what: String,
        left: usize,
        right: usize,
    },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {format} config: {message}")]
    Parse { format: String, message: String },
}

impl StcpError {
    pub(crate) fn invalid_parameter(name: &str, message: impl Into<String>) -> Self {
        StcpError::InvalidParameter {
            name: name.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(model: &str, message: impl Into<String>) -> Self {
        StcpError::InvalidInput {
            model: model.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(operation: &str, model: &str) -> Self {
        StcpError::UnsupportedOperation {
            operation: operation.to_string(),
            model: model.to_string(),
        }
    }

    pub(crate) fn length_mismatch(what: &str, left: usize, right: usize) -> Self {
        StcpError::LengthMismatch {
            what: what.to_string(),
            left,
            right,
        }
    }

    /// Stable numeric code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            StcpError::InvalidParameter { .. } => 10,
            StcpError::LengthMismatch { .. } => 11,
            StcpError::InvalidInput { .. } => 20,
            StcpError::UnsupportedOperation { .. } => 30,
            StcpError::Io { .. } => 40,
            StcpError::Parse { .. } => 41,
        }
    }

    /// Category for grouping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            StcpError::InvalidParameter { .. } | StcpError::LengthMismatch { .. } => {
                ErrorCategory::Parameter
            }
            StcpError::InvalidInput { .. } => ErrorCategory::Input,
            StcpError::UnsupportedOperation { .. } => ErrorCategory::Operation,
            StcpError::Io { .. } | StcpError::Parse { .. } => ErrorCategory::Config,
        }
    }
}
