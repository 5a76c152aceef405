//! # Error Types
//!
//! Domain-specific error types for vela-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vela-core errors (this file)                                           │
//! │  └── ValidationError  - business rule violations                        │
//! │                                                                         │
//! │  vela-db errors (separate crate)                                        │
//! │  └── DbError          - database operation failures                     │
//! │                                                                         │
//! │  vela-api errors (separate crate)                                       │
//! │  └── ApiError         - what API callers see                            │
//! │                                                                         │
//! │  Flow: ValidationError → ApiError → caller                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (email, ids, values)
//! 3. Errors are enum variants, never bare strings
//! 4. Each variant maps to one specific rule violation

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Business rule violations.
///
/// Each mutation reports exactly one of these per attempt: the first failure
/// encountered, evaluated in the operation's documented check order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Another customer already has this email.
    #[error("email '{email}' already exists")]
    DuplicateEmail { email: String },

    /// Phone is present but matches neither `+<10-15 digits>` nor
    /// `NNN-NNN-NNNN`.
    #[error("phone '{phone}' has invalid format")]
    InvalidPhoneFormat { phone: String },

    /// Price must be strictly positive.
    #[error("price must be positive, got {price_cents}")]
    InvalidPrice { price_cents: i64 },

    /// Stock must be non-negative.
    #[error("stock cannot be negative, got {stock}")]
    InvalidStock { stock: i64 },

    /// An order must reference at least one product.
    #[error("order must contain at least one product")]
    EmptyProductList,

    /// The referenced customer does not exist.
    #[error("unknown customer: {id}")]
    UnknownCustomer { id: String },

    /// One or more referenced products do not exist.
    /// Lists exactly the ids that failed to resolve.
    #[error("unknown product id(s): {}", .ids.join(", "))]
    UnknownProduct { ids: Vec<String> },

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type CoreResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::DuplicateEmail {
            email: "seed@example.com".to_string(),
        };
        assert_eq!(err.to_string(), "email 'seed@example.com' already exists");

        let err = ValidationError::UnknownProduct {
            ids: vec!["p-404".to_string(), "p-500".to_string()],
        };
        assert_eq!(err.to_string(), "unknown product id(s): p-404, p-500");
    }

    #[test]
    fn test_required_message() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }
}
