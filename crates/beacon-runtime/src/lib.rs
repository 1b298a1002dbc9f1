//! BeaconRange Runtime - Host integration around the broadcast registry
//!
//! This crate wires the registry into a host server:
//! 1. Load (or create) the plugin configuration
//! 2. Discover anchors from placement and chunk-load events
//! 3. Handle the `setbeaconrange` command and persist overrides
//! 4. Drive the evaluation step on a fixed cadence
//! 5. Install structured logging

pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod observability;
pub mod plugin;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use command::*;
pub use config::*;
pub use error::*;
pub use events::*;
pub use host::*;
pub use observability::*;
pub use plugin::*;
pub use scheduler::*;
