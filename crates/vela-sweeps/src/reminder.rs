//! # Reminder Sweep
//!
//! Scans for pending orders that have outlived the reminder window and
//! emits one notification line per match. Read-only: no order is mutated.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use vela_api::{Api, ApiError, OrderReminder, Request, Response};

use crate::error::SweepResult;
use crate::sink::{emit, Sink};

/// Periodic stale-order reminder scan.
pub struct ReminderSweep {
    api: Api,
    sink: Arc<dyn Sink>,
    window_days: i64,
}

impl ReminderSweep {
    /// Creates a sweep flagging pending orders older than `window_days`.
    pub fn new(api: Api, sink: Arc<dyn Sink>, window_days: i64) -> Self {
        ReminderSweep {
            api,
            sink,
            window_days,
        }
    }

    /// Runs one scan, emitting a line per stale order, and returns the
    /// matches.
    pub async fn run(&self) -> SweepResult<Vec<OrderReminder>> {
        let response = self
            .api
            .execute(Request::PendingOrdersOlderThan {
                days: self.window_days,
            })
            .await
            .map_err(|err| {
                error!(error = %err, "Reminder sweep could not reach the API");
                err
            })?;

        let reminders = match response {
            Response::StaleOrders(reminders) => reminders,
            other => {
                return Err(ApiError::Internal(format!(
                    "unexpected reminder response: {other:?}"
                ))
                .into())
            }
        };

        let stamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
        for reminder in &reminders {
            emit(
                &*self.sink,
                &format!(
                    "{} - Order ID: {}, Customer Email: {}",
                    stamp, reminder.order_id, reminder.customer_email
                ),
            );
        }

        info!(count = reminders.len(), "Reminder sweep finished");
        Ok(reminders)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use chrono::Duration;
    use vela_api::{CustomerInput, OrderInput, ProductInput};
    use vela_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_reminders_emit_one_line_per_stale_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let api = Api::new(db);

        let customer = api
            .engine()
            .create_customer(&CustomerInput {
                name: "Seed User".to_string(),
                email: "seed@example.com".to_string(),
                phone: None,
            })
            .await
            .unwrap();
        let product = api
            .engine()
            .create_product(&ProductInput {
                name: "Phone".to_string(),
                price_cents: 500,
                stock: Some(5),
            })
            .await
            .unwrap();

        let stale = api
            .engine()
            .create_order(&OrderInput {
                customer_id: customer.id.clone(),
                product_ids: vec![product.id.clone()],
                order_date: Some(Utc::now() - Duration::days(8)),
            })
            .await
            .unwrap();

        // Inside the window: not reported.
        api.engine()
            .create_order(&OrderInput {
                customer_id: customer.id,
                product_ids: vec![product.id],
                order_date: None,
            })
            .await
            .unwrap();

        let sink = Arc::new(MemorySink::new());
        let sweep = ReminderSweep::new(api, sink.clone(), 7);

        let reminders = sweep.run().await.unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].order_id, stale.id);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(&format!("Order ID: {}", stale.id)));
        assert!(lines[0].contains("Customer Email: seed@example.com"));
    }

    #[tokio::test]
    async fn test_no_stale_orders_is_success_with_no_lines() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sink = Arc::new(MemorySink::new());
        let sweep = ReminderSweep::new(Api::new(db), sink.clone(), 7);

        let reminders = sweep.run().await.unwrap();
        assert!(reminders.is_empty());
        assert!(sink.lines().is_empty());
    }
}
