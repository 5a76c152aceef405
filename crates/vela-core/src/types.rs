//! # Domain Types
//!
//! Core domain types used throughout Vela CRM.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Product     │   │      Order      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  name           │   │  customer_id    │       │
//! │  │  email (unique) │   │  price_cents    │   │  total_cents    │       │
//! │  │  phone?         │   │  stock          │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │                 │
//! │                                              ┌────────┴────────┐       │
//! │                                              │    OrderItem    │       │
//! │                                              │  price snapshot │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order totals are derived: the sum of the item price snapshots taken at
//! creation time. Changing a product price later never changes an order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Email address. Globally unique across all customers.
    pub email: String,

    /// Optional phone number, `+<10-15 digits>` or `NNN-NNN-NNNN`.
    pub phone: Option<String>,

    /// When the customer was created.
    pub created_at: DateTime<Utc>,

    /// When the customer was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Price in cents (smallest currency unit). Always strictly positive.
    pub price_cents: i64,

    /// Current stock level. Never negative.
    pub stock: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// True if the stock level is below the given threshold.
    #[inline]
    pub fn is_below(&self, threshold: i64) -> bool {
        self.stock < threshold
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// Orders are created as `Pending`; transitions are owned by other parts of
/// the system and never performed by the mutation engine or the sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, not yet fulfilled.
    Pending,
    /// Order cancelled.
    Cancelled,
    /// Order fulfilled.
    Completed,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
            OrderStatus::Completed => write!(f, "completed"),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order placed by a customer for one or more products.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The owning customer.
    pub customer_id: String,

    /// Derived total in cents: the sum of the item price snapshots.
    /// Never accepted as client input.
    pub total_cents: i64,

    /// When the order was placed. Defaults to request time if omitted.
    pub order_date: DateTime<Utc>,

    /// Current status.
    pub status: OrderStatus,

    /// When the order row was created.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A product reference within an order.
///
/// Uses the snapshot pattern: the product price is copied here at order
/// creation, so order history survives later price changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// Unit price in cents at order creation (frozen).
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
