//! # Customer Repository
//!
//! Database operations for customers.
//!
//! The `UNIQUE` index on `customers.email` enforces global email uniqueness
//! at the storage layer; `insert` surfaces a violation as
//! `DbError::UniqueViolation` so the engine can translate it into its typed
//! duplicate-email error.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use vela_core::Customer;

const CUSTOMER_COLUMNS: &str = "id, name, email, phone, created_at, updated_at";

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Finds a customer by email (case-sensitive exact match as stored).
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a new customer.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - email already exists
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, email = %customer.email, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, phone, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts customers with the given email (0 or 1 by invariant).
    pub async fn count_by_email(&self, email: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE email = ?1")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts all customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

}

/// Helper to generate a new customer ID.
pub fn generate_customer_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;

    fn customer(email: &str) -> Customer {
        let now = Utc::now();
        Customer {
            id: generate_customer_id(),
            name: "Seed User".to_string(),
            email: email.to_string(),
            phone: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_email() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        repo.insert(&customer("seed@example.com")).await.unwrap();

        let found = repo.find_by_email("seed@example.com").await.unwrap();
        assert_eq!(found.unwrap().name, "Seed User");

        assert!(repo.find_by_email("missing@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_email_backstop() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        repo.insert(&customer("seed@example.com")).await.unwrap();
        let err = repo.insert(&customer("seed@example.com")).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { ref field } if field.contains("email")));
        assert_eq!(repo.count_by_email("seed@example.com").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_email_match_is_case_sensitive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        repo.insert(&customer("Seed@Example.com")).await.unwrap();
        assert!(repo.find_by_email("seed@example.com").await.unwrap().is_none());
    }
}
