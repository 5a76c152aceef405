//! # vela-sweeps: Periodic Sweeps for Vela CRM
//!
//! The background side of the system: a liveness heartbeat, an inventory
//! restock pass and a stale-order reminder scan, each re-entering the
//! [`vela_api::Api`] boundary on its own fixed interval.
//!
//! ## Sweep Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SweepAgent Architecture                         │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                          SweepAgent                              │  │
//! │  │  • One tokio interval loop per sweep                             │  │
//! │  │  • Per-tick errors are logged, never abort the loop              │  │
//! │  │  • Graceful shutdown via channels                                │  │
//! │  └───────┬───────────────────┬───────────────────┬──────────────────┘  │
//! │          ▼                   ▼                   ▼                      │
//! │  ┌──────────────┐    ┌──────────────┐    ┌──────────────┐              │
//! │  │ Heartbeat    │    │ Restock      │    │ Reminder     │              │
//! │  │ Probe        │    │ Sweep        │    │ Sweep        │              │
//! │  │ (every 5min) │    │ (daily)      │    │ (daily)      │              │
//! │  └──────┬───────┘    └──────┬───────┘    └──────┬───────┘              │
//! │         └───────────────────┼───────────────────┘                      │
//! │                             ▼                                          │
//! │                    vela-api (same boundary as external clients)        │
//! │                             │                                          │
//! │                             ▼                                          │
//! │                    append-only sinks (one line per event)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Interval values, thresholds and sink paths are configuration
//! ([`config::SweepConfig`]), not logic.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod agent;
pub mod config;
pub mod error;
pub mod heartbeat;
pub mod reminder;
pub mod restock;
pub mod sink;

// =============================================================================
// Re-exports
// =============================================================================

pub use agent::SweepAgent;
pub use config::SweepConfig;
pub use error::{SweepError, SweepResult};
pub use heartbeat::{HeartbeatProbe, ProbeOutcome};
pub use reminder::ReminderSweep;
pub use restock::RestockSweep;
pub use sink::{FileSink, MemorySink, Sink};
