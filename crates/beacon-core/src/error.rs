//! Error types for BeaconRange

use thiserror::Error;

/// Core BeaconRange errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BeaconError {
    #[error("Invalid range: {value} is outside {min}..={max}")]
    InvalidRange { value: i64, min: u32, max: u32 },

    #[error("Invalid location key: {0}")]
    InvalidLocationKey(String),
}

/// Result type for BeaconRange operations
pub type BeaconResult<T> = Result<T, BeaconError>;
