//! Error types for eventsheet.
//!
//! Row-level problems (a missing header, a malformed line) are not errors:
//! they are reported through [`crate::parser::ParseReport`] and the parse
//! carries on.

use thiserror::Error;

/// Errors that can occur in eventsheet operations.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Could not load '{resource}': {reason}")]
    ResourceUnavailable { resource: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source not found: {0}")]
    UnknownSource(String),

    #[error("Schema not found: {0}")]
    UnknownSchema(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetError {
    pub fn unavailable(resource: impl Into<String>, reason: impl ToString) -> Self {
        SheetError::ResourceUnavailable {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for eventsheet operations.
pub type SheetResult<T> = Result<T, SheetError>;
