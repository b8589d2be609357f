//! Error types for orgmap-core.

use thiserror::Error;

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur while building the organization graph.
///
/// Field extraction and graph construction are total, so the only failure
/// is a record source that could not deliver its records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The record source rejected or failed a request.
    #[error("{}", source_unavailable_message(.status, .message))]
    SourceUnavailable {
        /// Upstream HTTP status, if a response was received at all.
        status: Option<u16>,
        /// Upstream response body or transport error description.
        message: String,
    },
}

impl GraphError {
    /// Create a `SourceUnavailable` error for a non-success upstream response.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        GraphError::SourceUnavailable {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create a `SourceUnavailable` error for a failure with no upstream response.
    pub fn transport(message: impl Into<String>) -> Self {
        GraphError::SourceUnavailable {
            status: None,
            message: message.into(),
        }
    }

    /// Upstream status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GraphError::SourceUnavailable { status, .. } => *status,
        }
    }
}

fn source_unavailable_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Source unavailable ({}): {}", code, message),
        None => format!("Source unavailable: {}", message),
    }
}
