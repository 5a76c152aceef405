//! # Sweep Error Types

use thiserror::Error;

use vela_api::ApiError;

/// Errors surfaced by the sweep layer.
///
/// Sink write failures are deliberately absent: a sweep logs them and moves
/// on, they never escalate to the scheduler or roll back the domain
/// mutation that triggered them.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Configuration is missing or inconsistent.
    #[error("invalid sweep config: {0}")]
    InvalidConfig(String),

    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The API boundary reported an error for the whole invocation
    /// (typically `TransportUnavailable` when the store is down).
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for sweep operations.
pub type SweepResult<T> = Result<T, SweepError>;
