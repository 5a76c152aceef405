//! # Sweep Configuration
//!
//! Interval values, thresholds and sink paths for the periodic sweeps.
//! All of it is configuration, none of it is logic: the sweeps read these
//! numbers, they never hard-code them.
//!
//! ## Configuration File Format
//! ```toml
//! # sweeps.toml
//! [heartbeat]
//! interval_secs = 300
//! probe_timeout_secs = 5
//! log_path = "/var/log/vela/heartbeat.log"
//!
//! [restock]
//! interval_secs = 86400
//! threshold = 10
//! target = 10
//! log_path = "/var/log/vela/restock.log"
//!
//! [reminders]
//! interval_secs = 86400
//! window_days = 7
//! log_path = "/var/log/vela/reminders.log"
//! ```
//!
//! Every field has a default, so a missing file or an empty table is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{SweepError, SweepResult};

// =============================================================================
// Section Defaults
// =============================================================================

fn default_heartbeat_interval() -> u64 {
    300
}

fn default_probe_timeout() -> u64 {
    5
}

fn default_heartbeat_log() -> PathBuf {
    PathBuf::from("/tmp/vela_heartbeat.log")
}

fn default_daily_interval() -> u64 {
    86_400
}

fn default_threshold() -> i64 {
    vela_core::DEFAULT_RESTOCK_THRESHOLD
}

fn default_target() -> i64 {
    vela_core::DEFAULT_RESTOCK_TARGET
}

fn default_restock_log() -> PathBuf {
    PathBuf::from("/tmp/vela_restock.log")
}

fn default_window_days() -> i64 {
    vela_core::DEFAULT_REMINDER_WINDOW_DAYS
}

fn default_reminder_log() -> PathBuf {
    PathBuf::from("/tmp/vela_reminders.log")
}

// =============================================================================
// Sections
// =============================================================================

/// Heartbeat probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatConfig {
    /// Seconds between probes.
    #[serde(default = "default_heartbeat_interval")]
    pub interval_secs: u64,

    /// Upper bound on a single probe round-trip.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Append-only sink for alive lines.
    #[serde(default = "default_heartbeat_log")]
    pub log_path: PathBuf,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        HeartbeatConfig {
            interval_secs: default_heartbeat_interval(),
            probe_timeout_secs: default_probe_timeout(),
            log_path: default_heartbeat_log(),
        }
    }
}

/// Restock sweep settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestockConfig {
    /// Seconds between restock passes.
    #[serde(default = "default_daily_interval")]
    pub interval_secs: u64,

    /// Products with stock below this are low-stock.
    #[serde(default = "default_threshold")]
    pub threshold: i64,

    /// Low-stock products are raised to this floor.
    #[serde(default = "default_target")]
    pub target: i64,

    /// Append-only sink for restock lines.
    #[serde(default = "default_restock_log")]
    pub log_path: PathBuf,
}

impl Default for RestockConfig {
    fn default() -> Self {
        RestockConfig {
            interval_secs: default_daily_interval(),
            threshold: default_threshold(),
            target: default_target(),
            log_path: default_restock_log(),
        }
    }
}

/// Reminder sweep settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Seconds between reminder scans.
    #[serde(default = "default_daily_interval")]
    pub interval_secs: u64,

    /// Pending orders older than this many days are stale.
    #[serde(default = "default_window_days")]
    pub window_days: i64,

    /// Append-only sink for reminder lines.
    #[serde(default = "default_reminder_log")]
    pub log_path: PathBuf,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        ReminderConfig {
            interval_secs: default_daily_interval(),
            window_days: default_window_days(),
            log_path: default_reminder_log(),
        }
    }
}

// =============================================================================
// Sweep Config
// =============================================================================

/// Top-level sweep configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub heartbeat: HeartbeatConfig,
    pub restock: RestockConfig,
    pub reminders: ReminderConfig,
}

impl SweepConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> SweepResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: SweepConfig = toml::from_str(&raw)?;
        config.validate()?;

        info!(path = %path.display(), "Sweep config loaded");
        Ok(config)
    }

    /// Loads from a file when it exists, falls back to defaults otherwise.
    pub fn load_or_default(path: &Path) -> SweepResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!(path = %path.display(), "No config file, using defaults");
            Ok(SweepConfig::default())
        }
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> SweepResult<()> {
        if self.heartbeat.interval_secs == 0
            || self.restock.interval_secs == 0
            || self.reminders.interval_secs == 0
        {
            return Err(SweepError::InvalidConfig(
                "sweep intervals must be positive".to_string(),
            ));
        }

        if self.restock.threshold < 0 || self.restock.target < 0 {
            return Err(SweepError::InvalidConfig(
                "restock threshold and target must be non-negative".to_string(),
            ));
        }

        if self.reminders.window_days <= 0 {
            return Err(SweepError::InvalidConfig(
                "reminder window must be at least one day".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SweepConfig::default();
        assert_eq!(config.heartbeat.interval_secs, 300);
        assert_eq!(config.restock.threshold, 10);
        assert_eq!(config.restock.target, 10);
        assert_eq!(config.reminders.window_days, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SweepConfig = toml::from_str(
            r#"
            [restock]
            threshold = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.restock.threshold, 5);
        assert_eq!(config.restock.target, 10);
        assert_eq!(config.heartbeat.interval_secs, 300);
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let config: SweepConfig = toml::from_str(
            r#"
            [heartbeat]
            interval_secs = 0
            "#,
        )
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(SweepError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_negative_window_is_rejected() {
        let config: SweepConfig = toml::from_str(
            r#"
            [reminders]
            window_days = -1
            "#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }
}
