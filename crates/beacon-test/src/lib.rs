//! BeaconRange Test Harness - Simulated worlds and end-to-end validation
//!
//! This crate provides:
//! - An in-memory host world implementing every capability
//! - Randomized wandering-actor scenarios checked against a brute-force recount
//! - End-to-end checks for range boundaries, cleanup and persistence

pub mod integration;
pub mod scenario;
pub mod simulator;

pub use integration::*;
pub use scenario::*;
pub use simulator::*;
