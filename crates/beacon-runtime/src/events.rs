//! Host world events that reveal anchors

use beacon_core::{AnchorPos, BlockKind, WorldId};

/// A block was placed in the world
#[derive(Clone, Debug)]
pub struct BlockPlaced {
    pub kind: BlockKind,
    pub position: AnchorPos,
}

impl BlockPlaced {
    pub fn new(kind: BlockKind, position: AnchorPos) -> Self {
        BlockPlaced { kind, position }
    }
}

/// Block with attached state (beacons, chests, ...) inside a chunk
#[derive(Clone, Debug)]
pub struct TileEntity {
    pub kind: BlockKind,
    pub position: AnchorPos,
}

impl TileEntity {
    pub fn new(kind: BlockKind, position: AnchorPos) -> Self {
        TileEntity { kind, position }
    }
}

/// A chunk was loaded, with the tile entities it contains
#[derive(Clone, Debug)]
pub struct ChunkLoaded {
    pub world: WorldId,
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub tile_entities: Vec<TileEntity>,
}

impl ChunkLoaded {
    pub fn new(world: impl Into<WorldId>, chunk_x: i32, chunk_z: i32) -> Self {
        ChunkLoaded {
            world: world.into(),
            chunk_x,
            chunk_z,
            tile_entities: Vec::new(),
        }
    }

    pub fn with_tile_entity(mut self, entity: TileEntity) -> Self {
        self.tile_entities.push(entity);
        self
    }

    /// Positions of the beacons in this chunk
    pub fn beacons(&self) -> impl Iterator<Item = &AnchorPos> {
        self.tile_entities
            .iter()
            .filter(|e| e.kind.is_beacon())
            .map(|e| &e.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_beacons() {
        let chunk = ChunkLoaded::new("world", 0, 0)
            .with_tile_entity(TileEntity::new(BlockKind::beacon(), AnchorPos::new("world", 1, 64, 1)))
            .with_tile_entity(TileEntity::new(BlockKind::new("CHEST"), AnchorPos::new("world", 2, 64, 2)))
            .with_tile_entity(TileEntity::new(BlockKind::beacon(), AnchorPos::new("world", 3, 70, 3)));

        let beacons: Vec<_> = chunk.beacons().collect();
        assert_eq!(beacons.len(), 2);
        assert_eq!(beacons[1], &AnchorPos::new("world", 3, 70, 3));
    }
}
