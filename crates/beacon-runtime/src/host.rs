//! Host surface required by the runtime

use beacon_core::{ActorId, AnchorPos, BlockKind};
use beacon_registry::{ActorLocator, AnchorValidator, EffectApplier, EffectSource};

/// Block an actor is looking at
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetedBlock {
    pub kind: BlockKind,
    pub position: AnchorPos,
}

/// Resolves the block in an actor's line of sight
pub trait BlockTargeting {
    /// Nearest solid block within `max_distance` blocks, if any
    fn targeted_block(&self, actor: ActorId, max_distance: u32) -> Option<TargetedBlock>;
}

/// Everything the runtime needs from the host server
pub trait Host:
    ActorLocator + AnchorValidator + EffectSource + EffectApplier + BlockTargeting + Send + Sync
{
}

impl<T> Host for T where
    T: ActorLocator
        + AnchorValidator
        + EffectSource
        + EffectApplier
        + BlockTargeting
        + Send
        + Sync
        + ?Sized
{
}
