//! # Heartbeat Probe
//!
//! Confirms the API boundary is responsive, independent of the domain data.
//!
//! The probe appends an alive line to its sink every tick, then issues the
//! trivial `Hello` query under a bounded timeout. Failures are data
//! ([`ProbeOutcome::Unresponsive`]), never control flow: nothing thrown
//! here ever reaches the scheduler loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use vela_api::{Api, Request};

use crate::sink::{emit, Sink};

// =============================================================================
// Probe Outcome
// =============================================================================

/// Result of one heartbeat probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The API answered the liveness query in time.
    Responsive,
    /// Transport failure, error response, or timeout - with the cause.
    Unresponsive { reason: String },
}

impl ProbeOutcome {
    /// True when the probe succeeded.
    pub fn is_responsive(&self) -> bool {
        matches!(self, ProbeOutcome::Responsive)
    }
}

// =============================================================================
// Heartbeat Probe
// =============================================================================

/// Periodic liveness probe against the API boundary.
pub struct HeartbeatProbe {
    api: Api,
    sink: Arc<dyn Sink>,
    timeout: Duration,
}

impl HeartbeatProbe {
    /// Creates a probe with the given round-trip bound.
    pub fn new(api: Api, sink: Arc<dyn Sink>, timeout: Duration) -> Self {
        HeartbeatProbe { api, sink, timeout }
    }

    /// Runs one probe. Never returns an error.
    pub async fn probe(&self) -> ProbeOutcome {
        // The alive line records that the probe itself ran, whatever the
        // endpoint then says.
        let stamp = Utc::now().format("%d/%m/%Y-%H:%M:%S");
        emit(&*self.sink, &format!("{} CRM is alive", stamp));

        let outcome = match tokio::time::timeout(self.timeout, self.api.execute(Request::Hello))
            .await
        {
            Ok(Ok(_)) => ProbeOutcome::Responsive,
            Ok(Err(err)) => ProbeOutcome::Unresponsive {
                reason: err.to_string(),
            },
            Err(_) => ProbeOutcome::Unresponsive {
                reason: format!("probe timed out after {:?}", self.timeout),
            },
        };

        match &outcome {
            ProbeOutcome::Responsive => debug!("API endpoint responsive"),
            ProbeOutcome::Unresponsive { reason } => {
                warn!(%reason, "API endpoint unresponsive");
            }
        }

        outcome
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use vela_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_probe_responsive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sink = Arc::new(MemorySink::new());
        let probe = HeartbeatProbe::new(Api::new(db), sink.clone(), Duration::from_secs(5));

        let outcome = probe.probe().await;

        assert!(outcome.is_responsive());
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("CRM is alive"));
    }

    #[tokio::test]
    async fn test_probe_unresponsive_is_data_not_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sink = Arc::new(MemorySink::new());
        let probe = HeartbeatProbe::new(Api::new(db.clone()), sink.clone(), Duration::from_secs(5));

        db.close().await;

        let outcome = probe.probe().await;
        match outcome {
            ProbeOutcome::Unresponsive { reason } => {
                assert!(reason.contains("transport unavailable"));
            }
            ProbeOutcome::Responsive => panic!("probe against a closed store must not succeed"),
        }

        // The alive line is still written.
        assert_eq!(sink.lines().len(), 1);
    }
}
