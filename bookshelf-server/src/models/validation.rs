//! Validation error types

use std::fmt;

/// Request input that could not be turned into a domain value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// JSON body missing, unparseable, or of the wrong shape
    MalformedBody { reason: String },

    /// Path segment is not an integer id
    InvalidId { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBody { reason } => write!(f, "malformed request body: {}", reason),
            Self::InvalidId { value } => write!(f, "invalid id '{}': must be an integer", value),
        }
    }
}

impl std::error::Error for ValidationError {}
