//! BeaconRange plugin - lifecycle and event wiring

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info};

use beacon_core::{AnchorPos, Radius};
use beacon_registry::{ProximityBroadcastRegistry, RegistryConfig, TickReport};

use crate::{
    command, spawn_tick_loop, BlockPlaced, ChunkLoaded, CommandOutcome, CommandSender,
    ConfigStore, Host, TickLoop, SET_RANGE_COMMAND,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    pub ticks: u64,
    pub ticks_skipped: u64,
    pub effects_applied: u64,
    pub anchors_removed: u64,
    pub anchors_discovered: u64,
    pub last_tick_duration: Duration,
}

/// BeaconRange plugin - the runtime entity a host embeds
pub struct BeaconRangePlugin<H: Host + ?Sized> {
    host: Arc<H>,
    store: Arc<ConfigStore>,
    registry: Arc<ProximityBroadcastRegistry>,
    stats: Mutex<RuntimeStats>,
}

impl<H: Host + ?Sized> BeaconRangePlugin<H> {
    /// Enable the plugin against a host and a loaded configuration
    pub fn enable(host: Arc<H>, store: ConfigStore) -> Self {
        let registry = ProximityBroadcastRegistry::with_config(RegistryConfig {
            default_radius: store.default_radius(),
        });

        info!(
            default_range = %store.default_radius(),
            tick_interval = %humantime::format_duration(store.tick_interval()),
            "Beacon Range Plus enabled!"
        );

        BeaconRangePlugin {
            host,
            store: Arc::new(store),
            registry: Arc::new(registry),
            stats: Mutex::new(RuntimeStats::default()),
        }
    }

    /// Spawn the periodic evaluation driver at the configured interval
    pub fn start(self: &Arc<Self>) -> TickLoop
    where
        H: 'static,
    {
        spawn_tick_loop(Arc::clone(self), self.store.tick_interval())
    }

    /// Stop the driver, if one was started, and report final statistics
    pub async fn disable(&self, tick_loop: Option<TickLoop>) -> RuntimeStats {
        if let Some(tick_loop) = tick_loop {
            tick_loop.shutdown().await;
        }
        let stats = self.stats();
        info!(ticks = stats.ticks, anchors = self.registry.len(), "Beacon Range Plus disabled!");
        stats
    }

    /// A block was placed; beacons are registered
    pub fn on_block_placed(&self, event: &BlockPlaced) -> Option<Radius> {
        if !event.kind.is_beacon() {
            return None;
        }
        Some(self.discover(event.position.clone()))
    }

    /// A chunk was loaded; every beacon in it is registered
    pub fn on_chunk_loaded(&self, event: &ChunkLoaded) -> usize {
        let mut discovered = 0;
        for position in event.beacons() {
            self.discover(position.clone());
            discovered += 1;
        }
        if discovered > 0 {
            debug!(
                world = %event.world,
                chunk_x = event.chunk_x,
                chunk_z = event.chunk_z,
                discovered,
                "beacons discovered in chunk"
            );
        }
        discovered
    }

    fn discover(&self, position: AnchorPos) -> Radius {
        let radius = self
            .registry
            .on_anchor_discovered(position, self.store.as_ref());
        self.stats.lock().anchors_discovered += 1;
        radius
    }

    /// Dispatch a host command
    pub fn handle_command(&self, sender: &CommandSender, name: &str, args: &[&str]) -> CommandOutcome {
        if !name.eq_ignore_ascii_case(SET_RANGE_COMMAND) {
            return CommandOutcome::Unhandled;
        }
        let reply = command::set_range(sender, args, self.host.as_ref(), &self.registry, &self.store);
        CommandOutcome::Handled(reply)
    }

    /// Execute one evaluation step against the host
    pub fn run_tick(&self) -> TickReport {
        let host = self.host.as_ref();
        let report = self.registry.tick(Instant::now(), host, host, host, host);

        let mut stats = self.stats.lock();
        if report.skipped {
            stats.ticks_skipped += 1;
        } else {
            stats.ticks += 1;
            stats.effects_applied += report.effects_applied as u64;
            stats.anchors_removed += report.anchors_removed as u64;
            stats.last_tick_duration = report.duration;
        }
        report
    }

    pub fn registry(&self) -> &Arc<ProximityBroadcastRegistry> {
        &self.registry
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    pub fn stats(&self) -> RuntimeStats {
        self.stats.lock().clone()
    }
}
