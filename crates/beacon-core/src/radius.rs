//! Broadcast radius

use std::fmt;

use crate::{BeaconError, BeaconResult};

/// Smallest radius accepted from the control surface
pub const MIN_RADIUS: u32 = 10;
/// Largest radius accepted from the control surface
pub const MAX_RADIUS: u32 = 200;
/// Radius used when no override is configured
pub const DEFAULT_RADIUS: u32 = 50;

/// Broadcast distance in world units
/// INVARIANT: MIN_RADIUS <= value <= MAX_RADIUS
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Radius(u32);

impl Radius {
    pub const DEFAULT: Radius = Radius(DEFAULT_RADIUS);

    /// Validate a raw radius
    pub fn new(value: i64) -> BeaconResult<Self> {
        if value < i64::from(MIN_RADIUS) || value > i64::from(MAX_RADIUS) {
            return Err(BeaconError::InvalidRange {
                value,
                min: MIN_RADIUS,
                max: MAX_RADIUS,
            });
        }
        Ok(Radius(value as u32))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn squared(self) -> f64 {
        let r = f64::from(self.0);
        r * r
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for Radius {
    type Error = BeaconError;

    fn try_from(value: u32) -> BeaconResult<Self> {
        Radius::new(i64::from(value))
    }
}

impl From<Radius> for u32 {
    fn from(radius: Radius) -> u32 {
        radius.0
    }
}

impl fmt::Debug for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Radius({})", self.0)
    }
}

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
