//! # Order Repository
//!
//! Database operations for orders and their product references.
//!
//! ## Atomicity
//! An order and its item rows are written in a single transaction: either
//! the whole order commits or nothing does. Foreign keys are on, so a
//! product deleted between validation and commit fails the transaction
//! instead of leaving a dangling reference.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use vela_core::{Order, OrderItem};

const ORDER_COLUMNS: &str = "id, customer_id, total_cents, order_date, status, created_at";

/// A pending order that has outlived the reminder window.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StaleOrder {
    pub order_id: String,
    pub customer_email: String,
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Inserts an order together with its item rows, atomically.
    pub async fn insert_with_items(&self, order: &Order, items: &[OrderItem]) -> DbResult<()> {
        debug!(
            id = %order.id,
            customer_id = %order.customer_id,
            items = items.len(),
            "Inserting order"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, total_cents, order_date, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(order.total_cents)
        .bind(order.order_date)
        .bind(order.status)
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, product_id, price_cents, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(item.price_cents)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Gets all item rows for an order, in insertion order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, price_cents, created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Finds pending orders with an order date strictly before `cutoff`,
    /// joined with the owning customer's email.
    ///
    /// Read-only: the reminder sweep never mutates order rows.
    pub async fn find_pending_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> DbResult<Vec<StaleOrder>> {
        let stale = sqlx::query_as::<_, StaleOrder>(
            r#"
            SELECT o.id AS order_id, c.email AS customer_email
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            WHERE o.status = 'pending' AND o.order_date < ?1
            ORDER BY o.order_date
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(stale)
    }

    /// Counts all orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new order ID.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}

/// Helper to generate a new order item ID.
pub fn generate_order_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::customer::generate_customer_id;
    use crate::repository::product::generate_product_id;
    use chrono::Duration;
    use vela_core::{Customer, OrderStatus, Product};

    async fn seed_customer(db: &Database, email: &str) -> Customer {
        let now = Utc::now();
        let customer = Customer {
            id: generate_customer_id(),
            name: "Seed User".to_string(),
            email: email.to_string(),
            phone: None,
            created_at: now,
            updated_at: now,
        };
        db.customers().insert(&customer).await.unwrap();
        customer
    }

    async fn seed_product(db: &Database, name: &str, price_cents: i64) -> Product {
        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            name: name.to_string(),
            price_cents,
            stock: 5,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        product
    }

    fn order_for(customer_id: &str, total_cents: i64, age_days: i64, status: OrderStatus) -> Order {
        let now = Utc::now();
        Order {
            id: generate_order_id(),
            customer_id: customer_id.to_string(),
            total_cents,
            order_date: now - Duration::days(age_days),
            status,
            created_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_with_items_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = seed_customer(&db, "seed@example.com").await;
        let phone = seed_product(&db, "Phone", 500).await;
        let tablet = seed_product(&db, "Tablet", 800).await;

        let order = order_for(&customer.id, 1300, 0, OrderStatus::Pending);
        let items: Vec<OrderItem> = [&phone, &tablet]
            .iter()
            .map(|p| OrderItem {
                id: generate_order_item_id(),
                order_id: order.id.clone(),
                product_id: p.id.clone(),
                price_cents: p.price_cents,
                created_at: order.created_at,
            })
            .collect();

        db.orders().insert_with_items(&order, &items).await.unwrap();

        let stored = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(stored.total_cents, 1300);
        assert_eq!(stored.status, OrderStatus::Pending);

        let stored_items = db.orders().get_items(&order.id).await.unwrap();
        assert_eq!(stored_items.len(), 2);
        let snapshot_total: i64 = stored_items.iter().map(|i| i.price_cents).sum();
        assert_eq!(snapshot_total, 1300);
    }

    #[tokio::test]
    async fn test_unknown_product_fails_whole_transaction() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = seed_customer(&db, "seed@example.com").await;

        let order = order_for(&customer.id, 500, 0, OrderStatus::Pending);
        let items = vec![OrderItem {
            id: generate_order_item_id(),
            order_id: order.id.clone(),
            product_id: "p-404".to_string(),
            price_cents: 500,
            created_at: order.created_at,
        }];

        // FK violation on the item row rolls the order row back too
        assert!(db.orders().insert_with_items(&order, &items).await.is_err());
        assert!(db.orders().get_by_id(&order.id).await.unwrap().is_none());
        assert_eq!(db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_pending_older_than() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = seed_customer(&db, "seed@example.com").await;

        let stale = order_for(&customer.id, 500, 8, OrderStatus::Pending);
        let done = order_for(&customer.id, 800, 8, OrderStatus::Completed);
        let fresh = order_for(&customer.id, 800, 2, OrderStatus::Pending);

        for order in [&stale, &done, &fresh] {
            db.orders().insert_with_items(order, &[]).await.unwrap();
        }

        let cutoff = Utc::now() - Duration::days(7);
        let found = db.orders().find_pending_older_than(cutoff).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].order_id, stale.id);
        assert_eq!(found[0].customer_email, "seed@example.com");
    }
}
