//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The nil UUID is reserved and never identifies a stored contact.
    NilId,

    /// The provided text is not a UUID.
    InvalidId(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NilId => write!(f, "ID cannot be the nil UUID"),
            Self::InvalidId(id) => write!(f, "Invalid contact ID: {}", id),
        }
    }
}

impl std::error::Error for ValidationError {}
