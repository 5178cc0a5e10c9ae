//! Validation error types

use thiserror::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors produced by validators.
///
/// Variants carry the offending quantities so callers can build their own
/// messages; the `Display` text is usable as-is in form error lists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("value is {length} characters long, minimum is {min}")]
    TooShort { length: usize, min: usize },

    #[error("value is {length} characters long, maximum is {max}")]
    TooLong { length: usize, max: usize },

    #[error("{value} is below the minimum of {min}")]
    TooSmall { value: String, min: String },

    #[error("{value} is above the maximum of {max}")]
    TooLarge { value: String, max: String },

    #[error("{0}")]
    PatternMismatch(String),

    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    #[error("{0} is not a valid URL")]
    InvalidUrl(String),

    #[error("{0}")]
    WeakPassword(String),

    #[error("{0}")]
    Custom(String),
}
