//! # Validation Module
//!
//! Input validation rules for Vela CRM.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE - pure business rule checks                       │
//! │  Layer 2: Mutation engine - store reads (uniqueness, reference          │
//! │           resolution) feeding results back into the pure checks         │
//! │  Layer 3: Database - UNIQUE / CHECK / FK constraints as the backstop    │
//! │                                                                         │
//! │  Defense in depth: the engine check gives a friendly typed error,       │
//! │  the storage constraint holds the invariant under concurrent writers.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure: checks that need store state (email
//! uniqueness, id resolution) take the already-read results as arguments.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex_lite::Regex;

use crate::error::{CoreResult, ValidationError};
use crate::MAX_NAME_LEN;

/// Accepted phone shapes: `+<10-15 digits>` or `NNN-NNN-NNNN`.
const PHONE_PATTERN: &str = r"^(\+\d{10,15}|\d{3}-\d{3}-\d{4})$";

fn phone_regex() -> &'static Regex {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    PHONE_RE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is valid"))
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer or product display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
pub fn validate_name(name: &str) -> CoreResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an optional phone number.
///
/// ## Rules
/// - Absent or empty is valid
/// - Otherwise must match `+<10-15 digits>` or `NNN-NNN-NNNN`
///
/// ## Example
/// ```rust
/// use vela_core::validation::validate_phone;
///
/// assert!(validate_phone(Some("+1234567890")).is_ok());
/// assert!(validate_phone(Some("123-456-7890")).is_ok());
/// assert!(validate_phone(None).is_ok());
/// assert!(validate_phone(Some("12345")).is_err());
/// ```
pub fn validate_phone(phone: Option<&str>) -> CoreResult<()> {
    let phone = match phone {
        Some(p) if !p.is_empty() => p,
        _ => return Ok(()),
    };

    if !phone_regex().is_match(phone) {
        return Err(ValidationError::InvalidPhoneFormat {
            phone: phone.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price in cents.
///
/// ## Rules
/// - Must be strictly positive (free products are not a thing here)
pub fn validate_price(price_cents: i64) -> CoreResult<()> {
    if price_cents <= 0 {
        return Err(ValidationError::InvalidPrice { price_cents });
    }

    Ok(())
}

/// Validates a stock level.
///
/// ## Rules
/// - Must be non-negative (zero is valid: out of stock)
pub fn validate_stock(stock: i64) -> CoreResult<()> {
    if stock < 0 {
        return Err(ValidationError::InvalidStock { stock });
    }

    Ok(())
}

// =============================================================================
// Reference Validators
// =============================================================================

/// Validates that an order references at least one product.
pub fn validate_product_list(product_ids: &[String]) -> CoreResult<()> {
    if product_ids.is_empty() {
        return Err(ValidationError::EmptyProductList);
    }

    Ok(())
}

/// Validates that every requested product id resolved against the store.
///
/// `resolved` is the set of ids the store actually returned. The error lists
/// exactly the ids that are missing, preserving request order.
pub fn validate_product_refs(requested: &[String], resolved: &HashSet<String>) -> CoreResult<()> {
    let missing: Vec<String> = requested
        .iter()
        .filter(|id| !resolved.contains(*id))
        .cloned()
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::UnknownProduct { ids: missing });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
