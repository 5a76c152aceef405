//! # Mutation Engine
//!
//! Orchestrates validation and store writes for entity creation.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_customer   email uniqueness → phone format → name               │
//! │  create_product    price → stock → name                                 │
//! │  create_order      non-empty list → customer ref → product refs         │
//! │                    → derived total → transactional write                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each operation reports the first failure encountered, in the order
//! above, and writes nothing on failure. No operation retries on its own;
//! the caller decides whether to retry.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{info, warn};

use vela_core::validation::{
    validate_name, validate_phone, validate_price, validate_product_list, validate_product_refs,
    validate_stock,
};
use vela_core::{Customer, Money, Order, OrderItem, OrderStatus, Product, ValidationError};
use vela_db::repository::customer::generate_customer_id;
use vela_db::repository::order::{generate_order_id, generate_order_item_id};
use vela_db::repository::product::generate_product_id;
use vela_db::{Database, DbError};

use crate::error::{ApiError, ApiResult};
use crate::request::{BulkCreateResult, BulkError, CustomerInput, OrderInput, ProductInput};

/// Orchestrates validation + store writes for single and batch creation.
///
/// Cloning is cheap; engines share the underlying pool.
#[derive(Debug, Clone)]
pub struct MutationEngine {
    db: Database,
}

impl MutationEngine {
    /// Creates a new engine over the given database.
    pub fn new(db: Database) -> Self {
        MutationEngine { db }
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Creates a customer.
    ///
    /// Uniqueness is checked before the phone format: a malformed phone on an
    /// already-duplicate email still reports the duplicate. The `UNIQUE`
    /// column constraint remains active underneath as the backstop for
    /// concurrent writers racing past the pre-check.
    pub async fn create_customer(&self, input: &CustomerInput) -> ApiResult<Customer> {
        if self
            .db
            .customers()
            .find_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(ValidationError::DuplicateEmail {
                email: input.email.clone(),
            }
            .into());
        }

        validate_phone(input.phone.as_deref())?;
        validate_name(&input.name)?;

        let now = Utc::now();
        let customer = Customer {
            id: generate_customer_id(),
            name: input.name.trim().to_string(),
            email: input.email.clone(),
            phone: input
                .phone
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(String::from),
            created_at: now,
            updated_at: now,
        };

        self.db
            .customers()
            .insert(&customer)
            .await
            .map_err(|err| match err {
                // Lost the race: another writer inserted the same email
                // between the pre-check and this insert.
                DbError::UniqueViolation { ref field } if field.contains("email") => {
                    ApiError::Validation(ValidationError::DuplicateEmail {
                        email: input.email.clone(),
                    })
                }
                other => other.into(),
            })?;

        info!(id = %customer.id, email = %customer.email, "Customer created");
        Ok(customer)
    }

    /// Creates a batch of customers with per-record isolation.
    ///
    /// Records are processed in input order; a failure on record *i* is
    /// recorded against its 1-based position and processing continues with
    /// record *i+1*. Each record commits in its own transaction, so one bad
    /// row never prevents valid rows from being created.
    pub async fn bulk_create_customers(&self, records: &[CustomerInput]) -> BulkCreateResult {
        let mut result = BulkCreateResult::default();

        for (position, record) in records.iter().enumerate() {
            match self.create_customer(record).await {
                Ok(customer) => result.created.push(customer),
                Err(err) => {
                    warn!(index = position + 1, error = %err, "Batch record rejected");
                    result.errors.push(BulkError {
                        index: position + 1,
                        message: err.to_string(),
                    });
                }
            }
        }

        info!(
            created = result.created.len(),
            failed = result.errors.len(),
            "Batch customer creation finished"
        );
        result
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Creates a product. Stock defaults to 0 when omitted.
    pub async fn create_product(&self, input: &ProductInput) -> ApiResult<Product> {
        validate_price(input.price_cents)?;

        let stock = input.stock.unwrap_or(0);
        validate_stock(stock)?;
        validate_name(&input.name)?;

        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            name: input.name.trim().to_string(),
            price_cents: input.price_cents,
            stock,
            created_at: now,
            updated_at: now,
        };

        self.db.products().insert(&product).await?;

        info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Raises every product with stock below `threshold` to `target` and
    /// returns the updated subset. An empty result is a success: nothing
    /// qualified. Running twice in a row with unchanged inputs yields an
    /// empty result the second time.
    pub async fn restock_low_stock(&self, threshold: i64, target: i64) -> ApiResult<Vec<Product>> {
        let updated = self.db.products().restock_below(threshold, target).await?;

        if !updated.is_empty() {
            info!(count = updated.len(), target, "Low-stock products restocked");
        }
        Ok(updated)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Creates an order for a customer over a set of products.
    ///
    /// The total is derived: the sum of the resolved products' prices at
    /// this moment, snapshotted into the item rows. Client-supplied totals
    /// are not accepted anywhere in the input. Any validation failure aborts
    /// before the first write; the order and its items commit in a single
    /// transaction.
    pub async fn create_order(&self, input: &OrderInput) -> ApiResult<Order> {
        validate_product_list(&input.product_ids)?;

        let customer = self
            .db
            .customers()
            .get_by_id(&input.customer_id)
            .await?
            .ok_or_else(|| ValidationError::UnknownCustomer {
                id: input.customer_id.clone(),
            })?;

        // Set semantics: a product referenced twice counts once.
        let mut seen = HashSet::new();
        let product_ids: Vec<String> = input
            .product_ids
            .iter()
            .filter(|id| seen.insert((*id).clone()))
            .cloned()
            .collect();

        let products = self.db.products().find_by_ids(&product_ids).await?;
        let resolved: HashSet<String> = products.iter().map(|p| p.id.clone()).collect();
        validate_product_refs(&product_ids, &resolved)?;

        let total: Money = products.iter().map(Product::price).sum();
        let now = Utc::now();

        let order = Order {
            id: generate_order_id(),
            customer_id: customer.id.clone(),
            total_cents: total.cents(),
            order_date: input.order_date.unwrap_or(now),
            status: OrderStatus::Pending,
            created_at: now,
        };

        let items: Vec<OrderItem> = products
            .iter()
            .map(|product| OrderItem {
                id: generate_order_item_id(),
                order_id: order.id.clone(),
                product_id: product.id.clone(),
                price_cents: product.price_cents,
                created_at: now,
            })
            .collect();

        self.db.orders().insert_with_items(&order, &items).await?;

        info!(
            id = %order.id,
            customer_id = %order.customer_id,
            total = %order.total(),
            products = items.len(),
            "Order created"
        );
        Ok(order)
    }
}
