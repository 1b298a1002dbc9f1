//! In-crate fake host for unit tests

use std::collections::HashMap;

use parking_lot::Mutex;

use beacon_core::{Actor, ActorId, ActorPos, AnchorPos, BlockKind, EffectTemplate};
use beacon_registry::{ActorLocator, AnchorValidator, EffectApplier, EffectSource};

use crate::{BlockTargeting, TargetedBlock};

#[derive(Default)]
pub(crate) struct TestHost {
    actors: Mutex<Vec<Actor>>,
    beacons: Mutex<HashMap<AnchorPos, Option<EffectTemplate>>>,
    targets: Mutex<HashMap<ActorId, TargetedBlock>>,
    pub applied: Mutex<Vec<(ActorId, EffectTemplate)>>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_actor(&self, id: u64, position: ActorPos) {
        self.actors.lock().push(Actor::new(ActorId::new(id), position));
    }

    pub fn place_beacon(&self, position: AnchorPos, effect: Option<EffectTemplate>) {
        self.beacons.lock().insert(position, effect);
    }

    pub fn break_beacon(&self, position: &AnchorPos) {
        self.beacons.lock().remove(position);
    }

    pub fn set_target(&self, actor: ActorId, kind: BlockKind, position: AnchorPos) {
        self.targets
            .lock()
            .insert(actor, TargetedBlock { kind, position });
    }
}

impl ActorLocator for TestHost {
    fn actors(&self) -> Vec<Actor> {
        self.actors.lock().clone()
    }
}

impl AnchorValidator for TestHost {
    fn is_anchor(&self, position: &AnchorPos) -> bool {
        self.beacons.lock().contains_key(position)
    }
}

impl EffectSource for TestHost {
    fn effect_at(&self, position: &AnchorPos) -> Option<EffectTemplate> {
        self.beacons.lock().get(position).cloned().flatten()
    }
}

impl EffectApplier for TestHost {
    fn apply(&self, actor: &Actor, effect: &EffectTemplate) {
        self.applied.lock().push((actor.id, effect.clone()));
    }
}

impl BlockTargeting for TestHost {
    fn targeted_block(&self, actor: ActorId, _max_distance: u32) -> Option<TargetedBlock> {
        self.targets.lock().get(&actor).cloned()
    }
}
