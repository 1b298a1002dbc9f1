//! BeaconRange Registry - Proximity broadcast scheduling
//!
//! This crate implements the broadcast kernel:
//! - Anchor registration with radius validation
//! - Host capability traits (actor locator, anchor validator, effect source,
//!   effect applier, radius lookup)
//! - The periodic evaluation step with self-healing anchor removal

pub mod host;
pub mod registry;

pub use host::*;
pub use registry::*;
