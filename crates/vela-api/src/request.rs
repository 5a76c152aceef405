//! # Request/Response Types
//!
//! The typed payloads accepted and returned by the API boundary.
//!
//! A request is a named operation with typed arguments; a response is a
//! typed payload. Callers get exactly one of: the created entity plus a
//! success message, or a specific error - never a silent no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vela_core::{Customer, Order, Product};

// =============================================================================
// Mutation Inputs
// =============================================================================

/// Input for creating a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Input for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    /// Price in cents. Must be strictly positive.
    pub price_cents: i64,
    /// Initial stock. Defaults to 0 when omitted.
    #[serde(default)]
    pub stock: Option<i64>,
}

/// Input for creating an order.
///
/// There is no total field: order totals are derived from the referenced
/// products at creation time and never accepted as input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderInput {
    pub customer_id: String,
    pub product_ids: Vec<String>,
    /// Defaults to request time when omitted.
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
}

// =============================================================================
// Requests
// =============================================================================

/// A named query or mutation with typed arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum Request {
    /// Trivial liveness query; touches no domain data.
    Hello,

    /// Create a single customer.
    CreateCustomer(CustomerInput),

    /// Create a batch of customers with per-record isolation.
    BulkCreateCustomers(Vec<CustomerInput>),

    /// Create a single product.
    CreateProduct(ProductInput),

    /// Create an order for a customer over a set of products.
    CreateOrder(OrderInput),

    /// List products with stock below the threshold.
    LowStockProducts { threshold: i64 },

    /// Raise every product below `threshold` to `target` stock.
    RestockLowStock { threshold: i64, target: i64 },

    /// List pending orders older than the given number of days.
    PendingOrdersOlderThan { days: i64 },

    /// Look up a customer by exact email.
    CustomerByEmail { email: String },
}

// =============================================================================
// Responses
// =============================================================================

/// One entry of a reminder query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReminder {
    pub order_id: String,
    pub customer_email: String,
}

/// Outcome of a batch customer creation.
///
/// `created` and `errors` partition the input by outcome: every record
/// appears in exactly one of the two lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkCreateResult {
    pub created: Vec<Customer>,
    pub errors: Vec<BulkError>,
}

/// A single failed record in a batch, tagged with its 1-based position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkError {
    pub index: usize,
    pub message: String,
}

/// A typed result payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Response {
    /// Greeting from the liveness query.
    Hello { greeting: String },

    /// Customer created.
    CustomerCreated { customer: Customer, message: String },

    /// Batch creation finished (possibly with partial failures).
    BulkCustomersCreated(BulkCreateResult),

    /// Product created.
    ProductCreated { product: Product, message: String },

    /// Order created with its derived total.
    OrderCreated { order: Order, message: String },

    /// Product listing.
    Products(Vec<Product>),

    /// Restock outcome: the raised products (empty = nothing qualified).
    ProductsRestocked { products: Vec<Product>, message: String },

    /// Stale pending orders with their customers' emails.
    StaleOrders(Vec<OrderReminder>),

    /// Customer lookup result.
    Customer(Option<Customer>),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_shape() {
        let request = Request::RestockLowStock {
            threshold: 10,
            target: 10,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["op"], "restock_low_stock");
        assert_eq!(json["args"]["threshold"], 10);
    }

    #[test]
    fn test_customer_input_phone_defaults_to_none() {
        let input: CustomerInput =
            serde_json::from_str(r#"{"name":"Seed User","email":"seed@example.com"}"#).unwrap();
        assert!(input.phone.is_none());
    }

    #[test]
    fn test_bulk_result_default_is_empty() {
        let result = BulkCreateResult::default();
        assert!(result.created.is_empty());
        assert!(result.errors.is_empty());
    }
}
