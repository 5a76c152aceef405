//! # vela-core: Pure Business Logic for Vela CRM
//!
//! This crate is the heart of Vela CRM. It contains the domain types and the
//! validation rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vela CRM Architecture                            │
//! │                                                                         │
//! │  Clients / Sweeps                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  vela-api (mutation + batch engine, typed requests)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ★ vela-core (THIS CRATE) ★                                             │
//! │       types · money · validation · errors                               │
//! │       NO I/O • NO DATABASE • PURE FUNCTIONS                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  vela-db (SQLite repositories, migrations)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, Order, OrderItem)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vela_core::Money` instead of
// `use vela_core::money::Money`

pub use error::{CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a customer or product display name.
pub const MAX_NAME_LEN: usize = 100;

/// Default restock threshold: products with stock below this are low-stock.
pub const DEFAULT_RESTOCK_THRESHOLD: i64 = 10;

/// Default restock target: low-stock products are raised to this floor.
pub const DEFAULT_RESTOCK_TARGET: i64 = 10;

/// Default reminder window in days: pending orders older than this are stale.
pub const DEFAULT_REMINDER_WINDOW_DAYS: i64 = 7;
