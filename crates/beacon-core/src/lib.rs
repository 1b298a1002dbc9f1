//! BeaconRange Core - Fundamental types and primitives
//!
//! This crate defines the types shared by the registry and the host glue:
//! - Identifiers (WorldId, ActorId)
//! - Anchor and actor positions, location keys
//! - Radius bounds
//! - Effect templates and block kinds

pub mod actor;
pub mod block;
pub mod effect;
pub mod error;
pub mod id;
pub mod position;
pub mod radius;

pub use actor::*;
pub use block::*;
pub use effect::*;
pub use error::*;
pub use id::*;
pub use position::*;
pub use radius::*;
