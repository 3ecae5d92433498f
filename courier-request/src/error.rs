//! Request assembly error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for request assembly.
pub type Result<T> = std::result::Result<T, RequestError>;

/// Request assembly errors.
///
/// Every variant is fatal to the build that produced it.
#[derive(Debug, Error)]
pub enum RequestError {
    /// A file-backed field could not be opened or read to the end.
    #[error("Failed to read file {}: {source}", path.display())]
    FileRead {
        /// Path named by the field.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A raw JSON field does not hold valid JSON text.
    #[error("Invalid JSON fragment in field '{field}': {source}")]
    InvalidJsonFragment {
        /// Name of the offending field.
        field: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The same key was supplied more than once for a JSON body.
    #[error("Duplicate JSON key '{name}'")]
    DuplicateJsonKey {
        /// The colliding key.
        name: String,
    },

    /// The assembled JSON object failed to serialize.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A header name is not a valid HTTP token.
    #[error("Invalid header name: {name}")]
    InvalidHeaderName {
        /// The rejected name.
        name: String,
    },

    /// A header value contains bytes not allowed in HTTP headers.
    #[error("Invalid value for header '{name}'")]
    InvalidHeaderValue {
        /// Name of the header carrying the value.
        name: String,
    },

    /// The `Host` override is not a valid authority for the request URL.
    #[error("Invalid host override: {value}")]
    InvalidHost {
        /// The rejected value.
        value: String,
    },

    /// Conversion into a transport request failed.
    #[error("Transport conversion error: {0}")]
    Transport(String),
}

impl RequestError {
    /// Check if this error came from reading a file-backed field.
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileRead { .. })
    }

    /// Get the field or header name this error refers to, if any.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::InvalidJsonFragment { field, .. } => Some(field),
            Self::DuplicateJsonKey { name }
            | Self::InvalidHeaderName { name }
            | Self::InvalidHeaderValue { name } => Some(name),
            _ => None,
        }
    }
}
