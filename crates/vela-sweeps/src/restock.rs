//! # Restock Sweep
//!
//! Raises the stock of under-threshold products to a configured floor.
//!
//! Goes through the API mutation rather than the store, so the restock is
//! subject to the same transaction discipline as any client write. Stock
//! increases are monotonic: re-running immediately is a no-op.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use vela_api::{Api, ApiError, Request, Response};
use vela_core::Product;

use crate::error::SweepResult;
use crate::sink::{emit, Sink};

/// Periodic inventory restock pass.
pub struct RestockSweep {
    api: Api,
    sink: Arc<dyn Sink>,
    threshold: i64,
    target: i64,
}

impl RestockSweep {
    /// Creates a sweep raising products below `threshold` to `target`.
    pub fn new(api: Api, sink: Arc<dyn Sink>, threshold: i64, target: i64) -> Self {
        RestockSweep {
            api,
            sink,
            threshold,
            target,
        }
    }

    /// Runs one restock pass and returns the products that were raised.
    ///
    /// An empty result is a success (nothing qualified). A store that
    /// cannot be reached at all fails the whole invocation once, with a
    /// transport error.
    pub async fn run(&self) -> SweepResult<Vec<Product>> {
        let response = self
            .api
            .execute(Request::RestockLowStock {
                threshold: self.threshold,
                target: self.target,
            })
            .await
            .map_err(|err| {
                error!(error = %err, "Restock sweep could not reach the API");
                err
            })?;

        let products = match response {
            Response::ProductsRestocked { products, .. } => products,
            other => {
                return Err(ApiError::Internal(format!(
                    "unexpected restock response: {other:?}"
                ))
                .into())
            }
        };

        let stamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
        for product in &products {
            emit(
                &*self.sink,
                &format!(
                    "{} - Restocked {}: stock now {}",
                    stamp, product.name, product.stock
                ),
            );
        }

        info!(count = products.len(), "Restock sweep finished");
        Ok(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweepError;
    use crate::sink::MemorySink;
    use vela_api::ProductInput;
    use vela_db::{Database, DbConfig};

    async fn seed_api() -> Api {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let api = Api::new(db);
        for (name, price_cents, stock) in [("Phone", 500, 5), ("Tablet", 800, 3), ("Desk", 9900, 50)]
        {
            api.engine()
                .create_product(&ProductInput {
                    name: name.to_string(),
                    price_cents,
                    stock: Some(stock),
                })
                .await
                .unwrap();
        }
        api
    }

    #[tokio::test]
    async fn test_restock_logs_one_line_per_product() {
        let api = seed_api().await;
        let sink = Arc::new(MemorySink::new());
        let sweep = RestockSweep::new(api, sink.clone(), 10, 10);

        let raised = sweep.run().await.unwrap();
        assert_eq!(raised.len(), 2);
        assert!(raised.iter().all(|p| p.stock == 10));

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().any(|l| l.contains("Phone: stock now 10")));
        assert!(lines.iter().any(|l| l.contains("Tablet: stock now 10")));

        // Second pass: nothing qualifies, nothing logged.
        let again = sweep.run().await.unwrap();
        assert!(again.is_empty());
        assert_eq!(sink.lines().len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_once_with_transport_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let api = Api::new(db.clone());
        db.close().await;

        let sweep = RestockSweep::new(api, Arc::new(MemorySink::new()), 10, 10);
        let err = sweep.run().await.unwrap_err();

        assert!(matches!(
            err,
            SweepError::Api(ApiError::TransportUnavailable(_))
        ));
    }
}
