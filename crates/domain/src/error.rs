//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A required form field is missing or blank.
    #[error("{0} is required.")]
    MissingField(&'static str),

    /// The password and its confirmation differ.
    #[error("Passwords do not match.")]
    PasswordMismatch,

    /// The password is shorter than the accepted minimum.
    #[error("Password must be at least {min} characters.")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },

    /// The user did not accept the terms.
    #[error("Please accept the terms.")]
    ConsentRequired,

    /// A coordinate is outside its valid range.
    #[error("invalid location: {0}")]
    InvalidLocation(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
