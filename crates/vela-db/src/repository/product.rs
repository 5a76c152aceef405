//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD plus resolution of product id sets for order creation
//! - Low-stock scan and the restock batch (select + raise in one transaction)
//!
//! The restock batch raises stock to a floor, never lowers it, so repeated
//! runs with unchanged inputs converge to an empty update set.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use vela_core::Product;

const PRODUCT_COLUMNS: &str = "id, name, price_cents, stock, created_at, updated_at";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Resolves a set of product ids to product rows.
    ///
    /// Returns only the products that exist; callers compare the result
    /// against the requested set to detect unknown ids.
    pub async fn find_by_ids(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb = sqlx::QueryBuilder::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id IN ("
        ));
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let products = qb
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price_cents, stock, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists products with stock below the given threshold.
    pub async fn find_below_stock(&self, threshold: i64) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE stock < ?1 ORDER BY name"
        ))
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Raises every product with `stock < threshold` to `target` and returns
    /// the updated rows.
    ///
    /// Stock only ever moves up: products already at or above `target` are
    /// left alone even when they are below `threshold`. Select and updates
    /// share one transaction so a concurrent writer cannot observe a
    /// half-applied batch.
    pub async fn restock_below(&self, threshold: i64, target: i64) -> DbResult<Vec<Product>> {
        debug!(threshold, target, "Restocking low-stock products");

        let mut tx = self.pool.begin().await?;

        let low: Vec<Product> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE stock < ?1 AND stock < ?2 ORDER BY name"
        ))
        .bind(threshold)
        .bind(target)
        .fetch_all(&mut *tx)
        .await?;

        let now = Utc::now();
        let mut updated = Vec::with_capacity(low.len());

        for mut product in low {
            sqlx::query("UPDATE products SET stock = ?2, updated_at = ?3 WHERE id = ?1")
                .bind(&product.id)
                .bind(target)
                .bind(now)
                .execute(&mut *tx)
                .await?;

            product.stock = target;
            product.updated_at = now;
            updated.push(product);
        }

        tx.commit().await?;

        debug!(count = updated.len(), "Restock batch committed");
        Ok(updated)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn product(name: &str, price_cents: i64, stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: generate_product_id(),
            name: name.to_string(),
            price_cents,
            stock,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_by_ids_partial_resolution() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let phone = product("Phone", 500, 5);
        repo.insert(&phone).await.unwrap();

        let ids = vec![phone.id.clone(), "p-404".to_string()];
        let resolved = repo.find_by_ids(&ids).await.unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, phone.id);

        assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_restock_raises_to_target() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&product("Tablet", 800, 3)).await.unwrap();
        repo.insert(&product("Phone", 500, 12)).await.unwrap();

        let updated = repo.restock_below(10, 10).await.unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].name, "Tablet");
        assert_eq!(updated[0].stock, 10);

        // Second run with unchanged inputs is a no-op
        assert!(repo.restock_below(10, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_restock_never_lowers_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        // Below threshold but already above target: left alone
        let p = product("Cable", 300, 7);
        repo.insert(&p).await.unwrap();

        let updated = repo.restock_below(10, 5).await.unwrap();
        assert!(updated.is_empty());

        let stored = repo.get_by_id(&p.id).await.unwrap().unwrap();
        assert_eq!(stored.stock, 7);
    }

    #[tokio::test]
    async fn test_find_below_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&product("Tablet", 800, 3)).await.unwrap();
        repo.insert(&product("Phone", 500, 12)).await.unwrap();

        let low = repo.find_below_stock(10).await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Tablet");
    }
}
