//! Block kinds reported by the host

use std::fmt;

/// Host material name of a block (e.g. `BEACON`, `STONE`)
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BlockKind(String);

impl BlockKind {
    pub const BEACON: &'static str = "BEACON";

    pub fn new(name: impl Into<String>) -> Self {
        BlockKind(name.into())
    }

    pub fn beacon() -> Self {
        BlockKind::new(Self::BEACON)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Host material names are upper-case; any material whose name mentions
    /// a beacon counts, so modded variants are picked up too.
    pub fn is_beacon(&self) -> bool {
        self.0.contains(Self::BEACON)
    }
}

impl fmt::Debug for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({})", self.0)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_beacon() {
        assert!(BlockKind::beacon().is_beacon());
        assert!(BlockKind::new("REINFORCED_BEACON").is_beacon());
        assert!(!BlockKind::new("STONE").is_beacon());
        assert!(!BlockKind::new("beacon").is_beacon());
    }
}
