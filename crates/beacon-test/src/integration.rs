//! End-to-end checks
//!
//! Each check enables a plugin against a fresh simulated world, drives it
//! through host events and reports whether the observed effects match.

use std::sync::Arc;

use beacon_core::{ActorId, ActorPos, AnchorPos, EffectKind, EffectTemplate};
use beacon_runtime::{BeaconRangePlugin, ConfigStore, PluginConfig, RuntimeResult};

use crate::simulator::SimWorld;

/// Outcome of one named check
#[derive(Clone, Debug)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
}

fn speed() -> EffectTemplate {
    EffectTemplate::new(EffectKind::Speed, 260, 0)
}

fn origin() -> AnchorPos {
    AnchorPos::new("world", 0, 64, 0)
}

fn enabled(config: PluginConfig) -> RuntimeResult<(Arc<SimWorld>, BeaconRangePlugin<SimWorld>)> {
    let world = Arc::new(SimWorld::new());
    let store = ConfigStore::in_memory(config)?;
    let plugin = BeaconRangePlugin::enable(Arc::clone(&world), store);
    Ok((world, plugin))
}

/// Actors at 49 and 51 blocks from a default-range beacon
pub fn check_range_boundary() -> RuntimeResult<bool> {
    let (world, plugin) = enabled(PluginConfig::default())?;
    let near = ActorId::new(1);
    let far = ActorId::new(2);

    let placed = world.place_beacon(origin(), Some(speed()));
    plugin.on_block_placed(&placed);
    world.spawn_actor(near, ActorPos::new("world", 49.0, 64.0, 0.0));
    world.spawn_actor(far, ActorPos::new("world", 51.0, 64.0, 0.0));

    plugin.run_tick();
    Ok(world.applied_to(near) == 1 && world.applied_to(far) == 0)
}

/// A broken beacon stops broadcasting and leaves the registry
pub fn check_broken_beacon_removed() -> RuntimeResult<bool> {
    let (world, plugin) = enabled(PluginConfig::default())?;
    let actor = ActorId::new(1);

    plugin.on_block_placed(&world.place_beacon(origin(), Some(speed())));
    world.spawn_actor(actor, ActorPos::new("world", 5.0, 64.0, 5.0));

    plugin.run_tick();
    world.break_block(&origin());
    let report = plugin.run_tick();

    Ok(world.applied_to(actor) == 1
        && report.anchors_removed == 1
        && !plugin.registry().contains(&origin()))
}

/// An actor inside two beacons' ranges receives both effects
pub fn check_overlapping_beacons() -> RuntimeResult<bool> {
    let (world, plugin) = enabled(PluginConfig::default())?;
    let actor = ActorId::new(1);
    let haste = EffectTemplate::new(EffectKind::Haste, 260, 1);

    plugin.on_block_placed(&world.place_beacon(origin(), Some(speed())));
    plugin.on_block_placed(&world.place_beacon(AnchorPos::new("world", 60, 64, 0), Some(haste.clone())));
    world.spawn_actor(actor, ActorPos::new("world", 30.0, 64.0, 0.0));

    plugin.run_tick();

    let mut received: Vec<_> = world.applied().into_iter().map(|a| a.effect).collect();
    received.sort_by(|a, b| a.kind.name().cmp(b.kind.name()));
    Ok(received == vec![haste, speed()])
}

/// Actors in another world are never in range
pub fn check_other_world() -> RuntimeResult<bool> {
    let (world, plugin) = enabled(PluginConfig::default())?;
    let actor = ActorId::new(1);

    plugin.on_block_placed(&world.place_beacon(origin(), Some(speed())));
    world.spawn_actor(actor, ActorPos::new("world_nether", 0.0, 64.0, 0.0));

    let report = plugin.run_tick();
    Ok(report.effects_applied == 0 && world.applied().is_empty())
}

/// Run every check
pub fn run_checks() -> RuntimeResult<Vec<CheckResult>> {
    Ok(vec![
        CheckResult {
            name: "range_boundary",
            passed: check_range_boundary()?,
        },
        CheckResult {
            name: "broken_beacon_removed",
            passed: check_broken_beacon_removed()?,
        },
        CheckResult {
            name: "overlapping_beacons",
            passed: check_overlapping_beacons()?,
        },
        CheckResult {
            name: "other_world",
            passed: check_other_world()?,
        },
    ])
}
