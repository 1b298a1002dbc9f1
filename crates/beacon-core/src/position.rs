//! Positions and location keys
//!
//! Anchors sit on integer block coordinates; actors move freely and carry
//! floating-point positions. Distances are measured from the anchor block's
//! minimum corner, matching how the host reports block locations.

use std::fmt;
use std::str::FromStr;

use crate::{BeaconError, WorldId};

/// Anchor position - (world, block x, block y, block z)
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorPos {
    pub world: WorldId,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl AnchorPos {
    pub fn new(world: impl Into<WorldId>, x: i32, y: i32, z: i32) -> Self {
        AnchorPos {
            world: world.into(),
            x,
            y,
            z,
        }
    }

    /// Key used for persisted overrides: `world,x,y,z`
    pub fn location_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Debug for AnchorPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Anchor({},{},{},{})", self.world, self.x, self.y, self.z)
    }
}

impl fmt::Display for AnchorPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.world, self.x, self.y, self.z)
    }
}

impl FromStr for AnchorPos {
    type Err = BeaconError;

    /// Parse a location key. The world name may itself contain commas, so
    /// coordinates are taken from the right.
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let invalid = || BeaconError::InvalidLocationKey(key.to_string());

        let mut parts = key.rsplitn(4, ',');
        let z = parts.next().ok_or_else(invalid)?;
        let y = parts.next().ok_or_else(invalid)?;
        let x = parts.next().ok_or_else(invalid)?;
        let world = parts.next().ok_or_else(invalid)?;

        if world.is_empty() {
            return Err(invalid());
        }

        let coord = |s: &str| s.parse::<i32>().map_err(|_| invalid());

        Ok(AnchorPos::new(world, coord(x)?, coord(y)?, coord(z)?))
    }
}

/// Actor position - free-floating coordinates within a world
#[derive(Clone, Debug, PartialEq)]
pub struct ActorPos {
    pub world: WorldId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ActorPos {
    pub fn new(world: impl Into<WorldId>, x: f64, y: f64, z: f64) -> Self {
        ActorPos {
            world: world.into(),
            x,
            y,
            z,
        }
    }

    /// Squared Euclidean distance to an anchor, `None` across worlds
    #[inline]
    pub fn distance_squared_to(&self, anchor: &AnchorPos) -> Option<f64> {
        if self.world != anchor.world {
            return None;
        }
        let dx = self.x - f64::from(anchor.x);
        let dy = self.y - f64::from(anchor.y);
        let dz = self.z - f64::from(anchor.z);
        Some(dx * dx + dy * dy + dz * dz)
    }

    /// Euclidean distance to an anchor, `None` across worlds
    pub fn distance_to(&self, anchor: &AnchorPos) -> Option<f64> {
        self.distance_squared_to(anchor).map(f64::sqrt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_key_roundtrip() {
        let pos = AnchorPos::new("world", 10, 64, -3);
        let key = pos.location_key();
        assert_eq!(key, "world,10,64,-3");
        assert_eq!(key.parse::<AnchorPos>().unwrap(), pos);
    }

    #[test]
    fn test_location_key_world_with_comma() {
        let pos: AnchorPos = "my,world,1,2,3".parse().unwrap();
        assert_eq!(pos.world.as_str(), "my,world");
        assert_eq!((pos.x, pos.y, pos.z), (1, 2, 3));
    }

    #[test]
    fn test_location_key_rejects_garbage() {
        for key in [
            "",
            "world",
            "world,1,2",
            ",1,2,3",
            "world,a,2,3",
            "world,1.5,2,3",
            "world, 1,2,3",
            "world,1,2,3 ",
        ] {
            assert!(
                matches!(key.parse::<AnchorPos>(), Err(BeaconError::InvalidLocationKey(_))),
                "accepted {key:?}"
            );
        }
    }

    #[test]
    fn test_location_key_non_canonical_numbers() {
        // Accepted, but the key written back differs from the input
        for key in ["world,010,64,-3", "world,+10,64,-3", "world,10,64,-03"] {
            let pos: AnchorPos = key.parse().unwrap();
            assert_eq!(pos.location_key(), "world,10,64,-3");
        }
    }

    #[test]
    fn test_distance_same_world() {
        let anchor = AnchorPos::new("world", 0, 0, 0);
        let actor = ActorPos::new("world", 3.0, 4.0, 0.0);
        assert_eq!(actor.distance_squared_to(&anchor), Some(25.0));
        assert_eq!(actor.distance_to(&anchor), Some(5.0));
    }

    #[test]
    fn test_distance_other_world() {
        let anchor = AnchorPos::new("world", 0, 0, 0);
        let actor = ActorPos::new("world_nether", 0.0, 0.0, 0.0);
        assert_eq!(actor.distance_to(&anchor), None);
    }
}
