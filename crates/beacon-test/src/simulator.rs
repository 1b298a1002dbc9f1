//! Simulated world for BeaconRange testing
//!
//! `SimWorld` implements every host capability in memory: actors move around,
//! blocks are placed and broken, and every applied effect is recorded.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use beacon_core::{
    Actor, ActorId, ActorPos, AnchorPos, BlockKind, EffectTemplate, WorldId,
};
use beacon_registry::{ActorLocator, AnchorValidator, EffectApplier, EffectSource};
use beacon_runtime::{BlockPlaced, BlockTargeting, ChunkLoaded, TargetedBlock, TileEntity};

/// Blocks per chunk edge
pub const CHUNK_SIZE: i32 = 16;

/// Block placed in the simulated world
#[derive(Clone, Debug)]
pub struct SimBlock {
    pub kind: BlockKind,
    /// Effect broadcast by a beacon block
    pub effect: Option<EffectTemplate>,
}

/// One recorded applier call
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedEffect {
    pub actor: ActorId,
    pub effect: EffectTemplate,
}

/// In-memory world
#[derive(Default)]
pub struct SimWorld {
    actors: RwLock<HashMap<ActorId, ActorPos>>,
    blocks: RwLock<HashMap<AnchorPos, SimBlock>>,
    /// Block each actor is looking at
    sight: RwLock<HashMap<ActorId, AnchorPos>>,
    applied: Mutex<Vec<AppliedEffect>>,
    locate_calls: AtomicU64,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Actors
    // ------------------------------------------------------------------

    pub fn spawn_actor(&self, id: ActorId, position: ActorPos) {
        self.actors.write().insert(id, position);
    }

    pub fn move_actor(&self, id: ActorId, position: ActorPos) {
        if let Some(current) = self.actors.write().get_mut(&id) {
            *current = position;
        }
    }

    pub fn remove_actor(&self, id: ActorId) {
        self.actors.write().remove(&id);
        self.sight.write().remove(&id);
    }

    pub fn actor_count(&self) -> usize {
        self.actors.read().len()
    }

    /// Spawn `count` actors uniformly inside a cube of half-width `extent`
    /// around the world origin. Ids continue after the highest existing id.
    pub fn scatter_actors(&self, world: &WorldId, count: usize, extent: f64, seed: u64) -> Vec<ActorId> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut actors = self.actors.write();
        let first = actors.keys().map(|id| id.0 + 1).max().unwrap_or(1);

        (0..count as u64)
            .map(|i| {
                let id = ActorId::new(first + i);
                let position = ActorPos::new(
                    world.clone(),
                    rng.gen_range(-extent..=extent),
                    rng.gen_range(0.0..=256.0),
                    rng.gen_range(-extent..=extent),
                );
                actors.insert(id, position);
                id
            })
            .collect()
    }

    /// Move every actor by up to `step` blocks on each axis
    pub fn wander(&self, step: f64, rng: &mut impl Rng) {
        for position in self.actors.write().values_mut() {
            position.x += rng.gen_range(-step..=step);
            position.z += rng.gen_range(-step..=step);
        }
    }

    pub fn look_at(&self, actor: ActorId, block: AnchorPos) {
        self.sight.write().insert(actor, block);
    }

    // ------------------------------------------------------------------
    // Blocks
    // ------------------------------------------------------------------

    /// Place a block and return the event the host would fire
    pub fn place_block(&self, kind: BlockKind, position: AnchorPos) -> BlockPlaced {
        self.blocks.write().insert(
            position.clone(),
            SimBlock {
                kind: kind.clone(),
                effect: None,
            },
        );
        BlockPlaced::new(kind, position)
    }

    /// Place a beacon broadcasting `effect`
    pub fn place_beacon(&self, position: AnchorPos, effect: Option<EffectTemplate>) -> BlockPlaced {
        self.blocks.write().insert(
            position.clone(),
            SimBlock {
                kind: BlockKind::beacon(),
                effect,
            },
        );
        BlockPlaced::new(BlockKind::beacon(), position)
    }

    pub fn break_block(&self, position: &AnchorPos) -> Option<SimBlock> {
        self.blocks.write().remove(position)
    }

    /// Change what a placed beacon broadcasts
    pub fn set_beacon_effect(&self, position: &AnchorPos, effect: Option<EffectTemplate>) {
        if let Some(block) = self.blocks.write().get_mut(position) {
            block.effect = effect;
        }
    }

    /// Chunk-load event for the chunk containing block (x, z)
    pub fn load_chunk(&self, world: &WorldId, chunk_x: i32, chunk_z: i32) -> ChunkLoaded {
        let blocks = self.blocks.read();
        let mut event = ChunkLoaded::new(world.clone(), chunk_x, chunk_z);

        for (position, block) in blocks.iter() {
            let in_chunk = &position.world == world
                && position.x.div_euclid(CHUNK_SIZE) == chunk_x
                && position.z.div_euclid(CHUNK_SIZE) == chunk_z;
            if in_chunk {
                event = event.with_tile_entity(TileEntity::new(block.kind.clone(), position.clone()));
            }
        }
        event
    }

    // ------------------------------------------------------------------
    // Recorded effects
    // ------------------------------------------------------------------

    pub fn applied(&self) -> Vec<AppliedEffect> {
        self.applied.lock().clone()
    }

    /// Take and clear the recorded effects
    pub fn drain_applied(&self) -> Vec<AppliedEffect> {
        std::mem::take(&mut *self.applied.lock())
    }

    pub fn applied_to(&self, actor: ActorId) -> usize {
        self.applied
            .lock()
            .iter()
            .filter(|a| a.actor == actor)
            .count()
    }

    /// How many times the actor list was requested
    pub fn locate_calls(&self) -> u64 {
        self.locate_calls.load(Ordering::Relaxed)
    }
}

impl ActorLocator for SimWorld {
    fn actors(&self) -> Vec<Actor> {
        self.locate_calls.fetch_add(1, Ordering::Relaxed);
        self.actors
            .read()
            .iter()
            .map(|(id, position)| Actor::new(*id, position.clone()))
            .collect()
    }
}

impl AnchorValidator for SimWorld {
    fn is_anchor(&self, position: &AnchorPos) -> bool {
        self.blocks
            .read()
            .get(position)
            .is_some_and(|block| block.kind.is_beacon())
    }
}

impl EffectSource for SimWorld {
    fn effect_at(&self, position: &AnchorPos) -> Option<EffectTemplate> {
        self.blocks
            .read()
            .get(position)
            .and_then(|block| block.effect.clone())
    }
}

impl EffectApplier for SimWorld {
    fn apply(&self, actor: &Actor, effect: &EffectTemplate) {
        self.applied.lock().push(AppliedEffect {
            actor: actor.id,
            effect: effect.clone(),
        });
    }
}

impl BlockTargeting for SimWorld {
    fn targeted_block(&self, actor: ActorId, max_distance: u32) -> Option<TargetedBlock> {
        let position = self.sight.read().get(&actor)?.clone();
        let eye = self.actors.read().get(&actor)?.clone();

        let distance = eye.distance_to(&position)?;
        if distance > f64::from(max_distance) {
            return None;
        }

        let kind = self.blocks.read().get(&position)?.kind.clone();
        Some(TargetedBlock { kind, position })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::EffectKind;

    fn world() -> WorldId {
        WorldId::new("world")
    }

    #[test]
    fn test_scatter_is_seeded() {
        let a = SimWorld::new();
        let b = SimWorld::new();
        a.scatter_actors(&world(), 20, 100.0, 7);
        b.scatter_actors(&world(), 20, 100.0, 7);

        let mut left = a.actors();
        let mut right = b.actors();
        left.sort_by_key(|actor| actor.id);
        right.sort_by_key(|actor| actor.id);
        assert_eq!(left, right);
        assert_eq!(a.actor_count(), 20);
    }

    #[test]
    fn test_scatter_continues_ids() {
        let sim = SimWorld::new();
        sim.spawn_actor(ActorId::new(5), ActorPos::new("world", 0.0, 0.0, 0.0));

        let ids = sim.scatter_actors(&world(), 3, 10.0, 1);
        assert_eq!(ids, vec![ActorId::new(6), ActorId::new(7), ActorId::new(8)]);
    }

    #[test]
    fn test_beacon_validation() {
        let sim = SimWorld::new();
        let pos = AnchorPos::new("world", 0, 64, 0);

        assert!(!sim.is_anchor(&pos));
        sim.place_block(BlockKind::new("STONE"), pos.clone());
        assert!(!sim.is_anchor(&pos));
        sim.place_beacon(pos.clone(), None);
        assert!(sim.is_anchor(&pos));
        sim.break_block(&pos);
        assert!(!sim.is_anchor(&pos));
    }

    #[test]
    fn test_effect_source_follows_beacon() {
        let sim = SimWorld::new();
        let pos = AnchorPos::new("world", 0, 64, 0);
        sim.place_beacon(pos.clone(), None);
        assert_eq!(sim.effect_at(&pos), None);

        let haste = EffectTemplate::new(EffectKind::Haste, 260, 1);
        sim.set_beacon_effect(&pos, Some(haste.clone()));
        assert_eq!(sim.effect_at(&pos), Some(haste));
    }

    #[test]
    fn test_targeting_respects_reach() {
        let sim = SimWorld::new();
        let actor = ActorId::new(1);
        let pos = AnchorPos::new("world", 0, 64, 0);
        sim.place_beacon(pos.clone(), None);
        sim.spawn_actor(actor, ActorPos::new("world", 0.0, 64.0, 8.0));
        sim.look_at(actor, pos.clone());

        assert_eq!(sim.targeted_block(actor, 10).map(|b| b.position), Some(pos.clone()));

        sim.move_actor(actor, ActorPos::new("world", 0.0, 64.0, 30.0));
        assert_eq!(sim.targeted_block(actor, 10), None);
    }

    #[test]
    fn test_load_chunk_collects_blocks() {
        let sim = SimWorld::new();
        sim.place_beacon(AnchorPos::new("world", 1, 64, 1), None);
        sim.place_beacon(AnchorPos::new("world", -1, 64, 1), None);
        sim.place_block(BlockKind::new("CHEST"), AnchorPos::new("world", 15, 64, 15));

        let chunk = sim.load_chunk(&world(), 0, 0);
        assert_eq!(chunk.tile_entities.len(), 2);
        assert_eq!(chunk.beacons().count(), 1);

        let west = sim.load_chunk(&world(), -1, 0);
        assert_eq!(west.beacons().count(), 1);
    }
}
