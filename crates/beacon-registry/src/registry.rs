//! Proximity broadcast registry
//!
//! Owns the anchor -> radius mapping. Each tick snapshots the mapping, drops
//! anchors whose structure is gone, and fans the live effect of every
//! remaining anchor out to the actors inside its radius.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use beacon_core::{Actor, AnchorPos, BeaconResult, Radius};

use crate::{ActorLocator, AnchorValidator, EffectApplier, EffectSource, RadiusLookup};

/// Registry configuration
#[derive(Clone, Debug, Default)]
pub struct RegistryConfig {
    /// Radius for anchors discovered without an override
    pub default_radius: Radius,
}

/// Outcome of one evaluation step
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Another tick was still running; nothing was evaluated
    pub skipped: bool,
    pub anchors_evaluated: usize,
    pub anchors_removed: usize,
    /// Valid anchors without an effect to broadcast
    pub anchors_inactive: usize,
    pub effects_applied: usize,
    pub duration: Duration,
}

impl TickReport {
    fn skipped() -> Self {
        TickReport {
            skipped: true,
            ..Default::default()
        }
    }
}

/// Releases the in-progress flag, also on unwind
struct TickGuard<'a>(&'a AtomicBool);

impl Drop for TickGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Proximity broadcast registry
///
/// All methods take `&self`; the mapping sits behind a single mutex that is
/// never held while host capabilities run, so callbacks may register or
/// unregister anchors freely.
pub struct ProximityBroadcastRegistry {
    anchors: Mutex<HashMap<AnchorPos, Radius>>,
    /// Set while a tick runs
    ticking: AtomicBool,
    last_tick: Mutex<Option<Instant>>,
    config: RegistryConfig,
}

impl ProximityBroadcastRegistry {
    /// Create a registry with the built-in default radius
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry with custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        ProximityBroadcastRegistry {
            anchors: Mutex::new(HashMap::new()),
            ticking: AtomicBool::new(false),
            last_tick: Mutex::new(None),
            config,
        }
    }

    /// Insert or overwrite an anchor's radius
    ///
    /// Fails with `InvalidRange` outside `MIN_RADIUS..=MAX_RADIUS` without
    /// touching the mapping. Returns the radius previously registered.
    pub fn register(&self, position: AnchorPos, radius: u32) -> BeaconResult<Option<Radius>> {
        let radius = Radius::try_from(radius)?;
        Ok(self.insert(position, radius))
    }

    /// Remove an anchor; absent anchors are not an error
    pub fn unregister(&self, position: &AnchorPos) -> Option<Radius> {
        let removed = self.anchors.lock().remove(position);
        if removed.is_some() {
            debug!(anchor = %position, "anchor unregistered");
        }
        removed
    }

    /// Register an anchor found in the world
    ///
    /// The radius is always re-resolved, so a rediscovered anchor takes the
    /// persisted override (or the default) even if it was registered before.
    pub fn on_anchor_discovered<L>(&self, position: AnchorPos, lookup: &L) -> Radius
    where
        L: RadiusLookup + ?Sized,
    {
        let radius = lookup
            .configured_radius(&position)
            .unwrap_or(self.config.default_radius);
        self.insert(position, radius);
        radius
    }

    fn insert(&self, position: AnchorPos, radius: Radius) -> Option<Radius> {
        debug!(anchor = %position, %radius, "anchor registered");
        self.anchors.lock().insert(position, radius)
    }

    /// Run one evaluation step
    ///
    /// Never fails. A call made while another tick is still running returns a
    /// report marked `skipped` and does nothing.
    pub fn tick<L, V, S, A>(
        &self,
        now: Instant,
        locator: &L,
        validator: &V,
        source: &S,
        applier: &A,
    ) -> TickReport
    where
        L: ActorLocator + ?Sized,
        V: AnchorValidator + ?Sized,
        S: EffectSource + ?Sized,
        A: EffectApplier + ?Sized,
    {
        let Some(_guard) = self.begin_tick() else {
            warn!("tick still in progress, skipping");
            return TickReport::skipped();
        };

        let start = Instant::now();
        *self.last_tick.lock() = Some(now);

        let snapshot = self.anchors();
        let mut report = TickReport::default();
        let mut located: Option<Vec<Actor>> = None;

        for (position, radius) in snapshot {
            report.anchors_evaluated += 1;

            if !validator.is_anchor(&position) {
                if self.anchors.lock().remove(&position).is_some() {
                    debug!(anchor = %position, "anchor structure gone, removed");
                    report.anchors_removed += 1;
                }
                continue;
            }

            let Some(effect) = source.effect_at(&position) else {
                report.anchors_inactive += 1;
                continue;
            };

            let actors = located.get_or_insert_with(|| locator.actors());
            let limit = radius.squared();

            for actor in actors.iter() {
                let in_range = actor
                    .position
                    .distance_squared_to(&position)
                    .is_some_and(|d2| d2 <= limit);

                if in_range {
                    applier.apply(actor, &effect);
                    report.effects_applied += 1;
                }
            }
        }

        report.duration = start.elapsed();
        trace!(
            evaluated = report.anchors_evaluated,
            removed = report.anchors_removed,
            inactive = report.anchors_inactive,
            applied = report.effects_applied,
            "tick complete"
        );
        report
    }

    fn begin_tick(&self) -> Option<TickGuard<'_>> {
        self.ticking
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| TickGuard(&self.ticking))
    }

    /// Radius registered for a position
    pub fn radius(&self, position: &AnchorPos) -> Option<Radius> {
        self.anchors.lock().get(position).copied()
    }

    pub fn contains(&self, position: &AnchorPos) -> bool {
        self.anchors.lock().contains_key(position)
    }

    pub fn len(&self) -> usize {
        self.anchors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.lock().is_empty()
    }

    /// Snapshot of all registered anchors
    pub fn anchors(&self) -> Vec<(AnchorPos, Radius)> {
        self.anchors
            .lock()
            .iter()
            .map(|(position, radius)| (position.clone(), *radius))
            .collect()
    }

    pub fn default_radius(&self) -> Radius {
        self.config.default_radius
    }

    /// `now` passed to the most recent tick that ran
    pub fn last_tick(&self) -> Option<Instant> {
        *self.last_tick.lock()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking.load(Ordering::Acquire)
    }
}

impl Default for ProximityBroadcastRegistry {
    fn default() -> Self {
        Self::new()
    }
}
