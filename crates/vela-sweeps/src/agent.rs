//! # Sweep Agent
//!
//! Drives the three sweeps on their configured intervals.
//!
//! ## Loop Discipline
//! One tokio task per sweep, each with its own interval and shutdown
//! channel. A tick that fails is logged and the loop keeps going; the same
//! sweep never overlaps itself (the next tick waits for the previous run),
//! while different sweeps interleave freely - they touch disjoint
//! invariants.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use vela_api::Api;

use crate::config::SweepConfig;
use crate::error::SweepResult;
use crate::heartbeat::HeartbeatProbe;
use crate::reminder::ReminderSweep;
use crate::restock::RestockSweep;
use crate::sink::FileSink;

/// Orchestrates the periodic sweeps over one API handle.
pub struct SweepAgent {
    config: SweepConfig,
    api: Api,
    shutdown_txs: Vec<mpsc::Sender<()>>,
    tasks: Vec<JoinHandle<()>>,
}

impl SweepAgent {
    /// Creates an agent; fails on inconsistent configuration.
    pub fn new(config: SweepConfig, api: Api) -> SweepResult<Self> {
        config.validate()?;

        Ok(SweepAgent {
            config,
            api,
            shutdown_txs: Vec::new(),
            tasks: Vec::new(),
        })
    }

    /// Spawns the sweep loops. Calling start twice is a no-op.
    pub fn start(&mut self) {
        if !self.tasks.is_empty() {
            return;
        }

        info!(
            heartbeat_secs = self.config.heartbeat.interval_secs,
            restock_secs = self.config.restock.interval_secs,
            reminder_secs = self.config.reminders.interval_secs,
            "Starting sweep agent"
        );

        // Heartbeat
        let probe = HeartbeatProbe::new(
            self.api.clone(),
            Arc::new(FileSink::new(&self.config.heartbeat.log_path)),
            Duration::from_secs(self.config.heartbeat.probe_timeout_secs),
        );
        let (tx, rx) = mpsc::channel(1);
        self.shutdown_txs.push(tx);
        self.tasks.push(tokio::spawn(Self::heartbeat_loop(
            probe,
            Duration::from_secs(self.config.heartbeat.interval_secs),
            rx,
        )));

        // Restock
        let restock = RestockSweep::new(
            self.api.clone(),
            Arc::new(FileSink::new(&self.config.restock.log_path)),
            self.config.restock.threshold,
            self.config.restock.target,
        );
        let (tx, rx) = mpsc::channel(1);
        self.shutdown_txs.push(tx);
        self.tasks.push(tokio::spawn(Self::restock_loop(
            restock,
            Duration::from_secs(self.config.restock.interval_secs),
            rx,
        )));

        // Reminders
        let reminder = ReminderSweep::new(
            self.api.clone(),
            Arc::new(FileSink::new(&self.config.reminders.log_path)),
            self.config.reminders.window_days,
        );
        let (tx, rx) = mpsc::channel(1);
        self.shutdown_txs.push(tx);
        self.tasks.push(tokio::spawn(Self::reminder_loop(
            reminder,
            Duration::from_secs(self.config.reminders.interval_secs),
            rx,
        )));

        info!("Sweep agent started");
    }

    /// Signals every loop to stop and waits for them to finish.
    pub async fn shutdown(&mut self) {
        info!("Shutting down sweep agent");

        for tx in self.shutdown_txs.drain(..) {
            let _ = tx.send(()).await;
        }

        for task in self.tasks.drain(..) {
            let _ = task.await;
        }

        info!("Sweep agent stopped");
    }

    async fn heartbeat_loop(
        probe: HeartbeatProbe,
        period: Duration,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        info!("Heartbeat loop starting");

        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    // Outcome is data; the probe logs it itself.
                    let _ = probe.probe().await;
                }

                _ = shutdown_rx.recv() => {
                    info!("Heartbeat loop shutting down");
                    break;
                }
            }
        }
    }

    async fn restock_loop(
        sweep: RestockSweep,
        period: Duration,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        info!("Restock loop starting");

        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(err) = sweep.run().await {
                        error!(error = %err, "Restock sweep failed");
                    }
                }

                _ = shutdown_rx.recv() => {
                    info!("Restock loop shutting down");
                    break;
                }
            }
        }
    }

    async fn reminder_loop(
        sweep: ReminderSweep,
        period: Duration,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        info!("Reminder loop starting");

        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(err) = sweep.run().await {
                        error!(error = %err, "Reminder sweep failed");
                    }
                }

                _ = shutdown_rx.recv() => {
                    info!("Reminder loop shutting down");
                    break;
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vela_db::{Database, DbConfig};

    fn temp_log(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("vela_agent_{}_{}.log", name, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_agent_runs_each_sweep_once_on_start() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let api = Api::new(db);

        let mut config = SweepConfig::default();
        config.heartbeat.log_path = temp_log("heartbeat");
        config.restock.log_path = temp_log("restock");
        config.reminders.log_path = temp_log("reminders");

        let mut agent = SweepAgent::new(config.clone(), api).unwrap();
        agent.start();

        // First interval tick fires immediately; give the loops a moment.
        tokio::time::sleep(Duration::from_millis(200)).await;
        agent.shutdown().await;

        // Heartbeat wrote its alive line even with an empty domain.
        let heartbeat = std::fs::read_to_string(&config.heartbeat.log_path).unwrap();
        assert!(heartbeat.contains("CRM is alive"));

        let _ = std::fs::remove_file(&config.heartbeat.log_path);
        let _ = std::fs::remove_file(&config.restock.log_path);
        let _ = std::fs::remove_file(&config.reminders.log_path);
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut config = SweepConfig::default();
        config.restock.target = -1;

        assert!(SweepAgent::new(config, Api::new(db)).is_err());
    }
}
