//! # API Error Types
//!
//! What callers of the API boundary see when an operation fails.
//!
//! Validation failures are always recovered into a typed result returned to
//! the caller; they never propagate as panics or abort unrelated requests.

use thiserror::Error;

use vela_core::ValidationError;
use vela_db::DbError;

/// Errors returned by the API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A business rule was violated. Carries the first failure encountered
    /// in the operation's documented check order.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The entity store could not be reached (pool exhausted, connection
    /// lost). Reported once per invocation; the caller decides whether to
    /// retry.
    #[error("transport unavailable: {0}")]
    TransportUnavailable(String),

    /// Anything else. Should not occur in normal operation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        if err.is_transport() {
            ApiError::TransportUnavailable(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================
