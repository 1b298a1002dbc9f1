//! Host capabilities consumed by the registry
//!
//! Every capability is a narrow trait so a host engine, a simulated world, or
//! a plain closure can back it. Closures of the matching shape implement the
//! traits directly.

use beacon_core::{Actor, AnchorPos, EffectTemplate, Radius};

/// Produces the actors currently tracked by the host
pub trait ActorLocator {
    /// Snapshot at call time, not a live view
    fn actors(&self) -> Vec<Actor>;
}

/// Answers whether a beacon structure still occupies a position
pub trait AnchorValidator {
    fn is_anchor(&self, position: &AnchorPos) -> bool;
}

/// Reads the effect currently broadcast by the structure at a position
pub trait EffectSource {
    fn effect_at(&self, position: &AnchorPos) -> Option<EffectTemplate>;
}

/// Applies an effect to an actor; fire-and-forget
pub trait EffectApplier {
    fn apply(&self, actor: &Actor, effect: &EffectTemplate);
}

/// Resolves a persisted radius override for a position
pub trait RadiusLookup {
    fn configured_radius(&self, position: &AnchorPos) -> Option<Radius>;
}

/// Lookup with no overrides; every discovery falls back to the default
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOverrides;

impl RadiusLookup for NoOverrides {
    fn configured_radius(&self, _position: &AnchorPos) -> Option<Radius> {
        None
    }
}

impl<F> ActorLocator for F
where
    F: Fn() -> Vec<Actor>,
{
    fn actors(&self) -> Vec<Actor> {
        self()
    }
}

impl<F> AnchorValidator for F
where
    F: Fn(&AnchorPos) -> bool,
{
    fn is_anchor(&self, position: &AnchorPos) -> bool {
        self(position)
    }
}

impl<F> EffectSource for F
where
    F: Fn(&AnchorPos) -> Option<EffectTemplate>,
{
    fn effect_at(&self, position: &AnchorPos) -> Option<EffectTemplate> {
        self(position)
    }
}

impl<F> EffectApplier for F
where
    F: Fn(&Actor, &EffectTemplate),
{
    fn apply(&self, actor: &Actor, effect: &EffectTemplate) {
        self(actor, effect)
    }
}

impl<F> RadiusLookup for F
where
    F: Fn(&AnchorPos) -> Option<Radius>,
{
    fn configured_radius(&self, position: &AnchorPos) -> Option<Radius> {
        self(position)
    }
}
