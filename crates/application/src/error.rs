//! Application error types

use thiserror::Error;

use sambharalu_domain::{DomainError, ResponseBody};

use crate::candidates::Tried;

/// Errors returned by the public client operations.
///
/// Every message is meant to be shown to the user as-is; fallback errors
/// end with the list of attempted endpoints.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Every candidate answered 404/405 (or not at all).
    #[error("{operation} endpoint not found on API. Tried: {tried}")]
    EndpointNotFound {
        /// Operation name.
        operation: &'static str,
        /// Attempts in order.
        tried: Tried,
    },

    /// A candidate answered 401/403.
    #[error("{operation} rejected by server ({status}): invalid credentials or not allowed. Tried: {tried}")]
    Rejected {
        /// Operation name.
        operation: &'static str,
        /// 401 or 403.
        status: u16,
        /// Decoded rejection body.
        body: ResponseBody,
        /// Attempts in order.
        tried: Tried,
    },

    /// No candidate produced an HTTP answer.
    #[error("{operation} failed: API unreachable. Tried: {tried}")]
    Unreachable {
        /// Operation name.
        operation: &'static str,
        /// Attempts in order.
        tried: Tried,
    },

    /// Candidates answered, but never with something usable.
    #[error("{operation} failed: server gave no usable answer. Tried: {tried}")]
    Unrecognized {
        /// Operation name.
        operation: &'static str,
        /// Attempts in order.
        tried: Tried,
    },

    /// Input was rejected before anything was sent.
    #[error("{0}")]
    InvalidInput(#[from] DomainError),
}

impl ClientError {
    /// Returns the attempts behind a fallback error.
    #[must_use]
    pub const fn tried(&self) -> Option<&Tried> {
        match self {
            Self::EndpointNotFound { tried, .. }
            | Self::Rejected { tried, .. }
            | Self::Unreachable { tried, .. }
            | Self::Unrecognized { tried, .. } => Some(tried),
            Self::InvalidInput(_) => None,
        }
    }

    /// Returns true for a credentials or permission rejection.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
