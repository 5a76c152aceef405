//! # vela-db: Database Layer for Vela CRM
//!
//! This crate provides database access for the Vela CRM system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vela CRM Data Flow                               │
//! │                                                                         │
//! │  vela-api (mutation engine, queries)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      vela-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌──────────────┐    │   │
//! │  │   │   Database    │   │  Repositories  │   │  Migrations  │    │   │
//! │  │   │   (pool.rs)   │◄──│ customer.rs    │   │  (embedded)  │    │   │
//! │  │   │               │   │ product.rs     │   │ 001_init.sql │    │   │
//! │  │   │               │   │ order.rs       │   │              │    │   │
//! │  │   └───────────────┘   └────────────────┘   └──────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (WAL mode, foreign keys on)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (customer, product, order)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vela_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/vela.db")).await?;
//! let customer = db.customers().find_by_email("seed@example.com").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::order::{OrderRepository, StaleOrder};
pub use repository::product::ProductRepository;
