//! Runtime and configuration errors

use thiserror::Error;

use beacon_core::BeaconError;

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tick interval: {0}")]
    InvalidInterval(String),

    #[error(transparent)]
    Beacon(#[from] BeaconError),
}

/// Runtime errors
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Beacon(#[from] BeaconError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
