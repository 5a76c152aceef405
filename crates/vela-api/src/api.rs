//! # Api Dispatcher
//!
//! The request/response boundary consumed by external clients and by the
//! periodic sweeps. Sweeps are ordinary API clients on purpose: they
//! exercise the identical validation path and are testable via the same
//! contract as everyone else.

use chrono::{Duration, Utc};
use tracing::debug;

use vela_core::{Customer, Product};
use vela_db::Database;

use crate::engine::MutationEngine;
use crate::error::ApiResult;
use crate::request::{OrderReminder, Request, Response};

/// Greeting returned by the liveness query.
pub const HELLO_GREETING: &str = "Hello, Vela!";

/// The API boundary: one entry point for queries and mutations.
#[derive(Debug, Clone)]
pub struct Api {
    db: Database,
    engine: MutationEngine,
}

impl Api {
    /// Creates an Api over the given database.
    pub fn new(db: Database) -> Self {
        Api {
            engine: MutationEngine::new(db.clone()),
            db,
        }
    }

    /// Direct access to the mutation engine.
    pub fn engine(&self) -> &MutationEngine {
        &self.engine
    }

    /// Executes a named request and returns its typed response.
    pub async fn execute(&self, request: Request) -> ApiResult<Response> {
        debug!(?request, "Executing request");

        match request {
            Request::Hello => {
                let greeting = self.hello().await?;
                Ok(Response::Hello { greeting })
            }

            Request::CreateCustomer(input) => {
                let customer = self.engine.create_customer(&input).await?;
                Ok(Response::CustomerCreated {
                    customer,
                    message: "Customer created successfully".to_string(),
                })
            }

            Request::BulkCreateCustomers(records) => {
                let result = self.engine.bulk_create_customers(&records).await;
                Ok(Response::BulkCustomersCreated(result))
            }

            Request::CreateProduct(input) => {
                let product = self.engine.create_product(&input).await?;
                Ok(Response::ProductCreated {
                    product,
                    message: "Product created successfully".to_string(),
                })
            }

            Request::CreateOrder(input) => {
                let order = self.engine.create_order(&input).await?;
                let message = format!("Order created successfully (total {})", order.total());
                Ok(Response::OrderCreated { order, message })
            }

            Request::LowStockProducts { threshold } => {
                let products = self.low_stock_products(threshold).await?;
                Ok(Response::Products(products))
            }

            Request::RestockLowStock { threshold, target } => {
                let products = self.engine.restock_low_stock(threshold, target).await?;
                let message = format!("{} product(s) restocked", products.len());
                Ok(Response::ProductsRestocked { products, message })
            }

            Request::PendingOrdersOlderThan { days } => {
                let reminders = self.pending_orders_older_than(days).await?;
                Ok(Response::StaleOrders(reminders))
            }

            Request::CustomerByEmail { email } => {
                let customer = self.customer_by_email(&email).await?;
                Ok(Response::Customer(customer))
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Trivial liveness query: a bare store round-trip, no domain data.
    pub async fn hello(&self) -> ApiResult<String> {
        self.db.ping().await?;
        Ok(HELLO_GREETING.to_string())
    }

    /// Lists products with stock below the threshold.
    pub async fn low_stock_products(&self, threshold: i64) -> ApiResult<Vec<Product>> {
        Ok(self.db.products().find_below_stock(threshold).await?)
    }

    /// Lists pending orders placed more than `days` days ago, paired with
    /// their customers' emails. Read-only.
    pub async fn pending_orders_older_than(&self, days: i64) -> ApiResult<Vec<OrderReminder>> {
        let cutoff = Utc::now() - Duration::days(days);
        let stale = self.db.orders().find_pending_older_than(cutoff).await?;

        Ok(stale
            .into_iter()
            .map(|row| OrderReminder {
                order_id: row.order_id,
                customer_email: row.customer_email,
            })
            .collect())
    }

    /// Looks up a customer by exact email.
    pub async fn customer_by_email(&self, email: &str) -> ApiResult<Option<Customer>> {
        Ok(self.db.customers().find_by_email(email).await?)
    }
}
