//! Randomized scenario harness
//!
//! A scenario scatters beacons and actors over a simulated world, lets the
//! actors wander, breaks beacons at random and runs the evaluation step once
//! per round. After every round the recorded effects are checked against a
//! brute-force recount of who was in range.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use beacon_core::{AnchorPos, EffectKind, EffectTemplate, WorldId};
use beacon_registry::{ActorLocator, AnchorValidator, EffectSource};
use beacon_runtime::{BeaconRangePlugin, ConfigStore, PluginConfig, RuntimeResult};

use crate::simulator::SimWorld;

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Clone, Debug)]
pub struct ScenarioConfig {
    pub world: WorldId,
    pub beacons: usize,
    pub actors: usize,
    /// Half-width of the square everything is scattered in
    pub extent: f64,
    pub rounds: u32,
    /// Max blocks an actor moves per axis each round
    pub wander_step: f64,
    /// Chance per round that one random beacon is broken
    pub break_chance: f64,
    pub default_range: u32,
    pub seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            world: WorldId::new("world"),
            beacons: 10,
            actors: 50,
            extent: 200.0,
            rounds: 20,
            wander_step: 8.0,
            break_chance: 0.1,
            default_range: 50,
            seed: 42,
        }
    }
}

impl ScenarioConfig {
    pub fn minimal() -> Self {
        Self {
            beacons: 2,
            actors: 5,
            extent: 60.0,
            rounds: 5,
            ..Default::default()
        }
    }

    pub fn standard() -> Self {
        Self::default()
    }

    pub fn stress() -> Self {
        Self {
            beacons: 100,
            actors: 500,
            extent: 1000.0,
            rounds: 50,
            break_chance: 0.3,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_default_range(mut self, range: u32) -> Self {
        self.default_range = range;
        self
    }
}

// ============================================================================
// RESULT
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct ScenarioResult {
    pub rounds: u32,
    pub effects_applied: u64,
    pub beacons_broken: u64,
    pub anchors_removed: u64,
    /// Rounds where the applied effects did not match the recount
    pub violations: Vec<String>,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

// ============================================================================
// SCENARIO
// ============================================================================

/// A plugin enabled against a simulated world
pub struct Scenario {
    pub world: Arc<SimWorld>,
    pub plugin: Arc<BeaconRangePlugin<SimWorld>>,
    config: ScenarioConfig,
    rng: StdRng,
}

impl Scenario {
    /// Build a scenario with an in-memory configuration
    pub fn new(config: ScenarioConfig) -> RuntimeResult<Self> {
        let store = ConfigStore::in_memory(PluginConfig::default().with_default_range(config.default_range))?;
        Ok(Self::with_store(config, store))
    }

    /// Build a scenario around an existing configuration store
    pub fn with_store(config: ScenarioConfig, store: ConfigStore) -> Self {
        let world = Arc::new(SimWorld::new());
        let plugin = Arc::new(BeaconRangePlugin::enable(Arc::clone(&world), store));
        let rng = StdRng::seed_from_u64(config.seed);

        let mut scenario = Self {
            world,
            plugin,
            config,
            rng,
        };
        scenario.populate();
        scenario
    }

    fn populate(&mut self) {
        let world = self.config.world.clone();
        let extent = self.config.extent as i32;

        for i in 0..self.config.beacons {
            let position = AnchorPos::new(
                world.clone(),
                self.rng.gen_range(-extent..=extent),
                self.rng.gen_range(1..=255),
                self.rng.gen_range(-extent..=extent),
            );
            // Every fifth beacon has no effect configured
            let effect = (i % 5 != 4).then(|| random_effect(&mut self.rng));
            let event = self.world.place_beacon(position, effect);
            self.plugin.on_block_placed(&event);
        }

        let seed = self.rng.gen();
        self.world
            .scatter_actors(&world, self.config.actors, self.config.extent, seed);
    }

    /// Run every configured round
    pub fn run(&mut self) -> ScenarioResult {
        let mut result = ScenarioResult::default();

        for round in 0..self.config.rounds {
            self.step(round, &mut result);
        }

        debug!(
            rounds = result.rounds,
            applied = result.effects_applied,
            violations = result.violations.len(),
            "scenario finished"
        );
        result
    }

    fn step(&mut self, round: u32, result: &mut ScenarioResult) {
        self.world.wander(self.config.wander_step, &mut self.rng);

        if self.rng.gen_bool(self.config.break_chance) {
            let anchors = self.plugin.registry().anchors();
            if !anchors.is_empty() {
                let (position, _) = &anchors[self.rng.gen_range(0..anchors.len())];
                self.world.break_block(position);
                result.beacons_broken += 1;
            }
        }

        let expected = self.expected_effects();
        self.world.drain_applied();
        let report = self.plugin.run_tick();
        let applied = self.world.drain_applied().len();

        if applied != expected || report.effects_applied != expected {
            result.violations.push(format!(
                "round {round}: expected {expected} effects, host saw {applied}, report said {}",
                report.effects_applied
            ));
        }

        result.rounds += 1;
        result.effects_applied += applied as u64;
        result.anchors_removed += report.anchors_removed as u64;
    }

    /// Brute-force count of the effects the next tick should apply
    pub fn expected_effects(&self) -> usize {
        let actors = self.world.actors();

        self.plugin
            .registry()
            .anchors()
            .iter()
            .filter(|(position, _)| self.world.is_anchor(position))
            .filter(|(position, _)| self.world.effect_at(position).is_some())
            .map(|(position, radius)| {
                actors
                    .iter()
                    .filter_map(|actor| actor.position.distance_squared_to(position))
                    .filter(|d2| *d2 <= radius.squared())
                    .count()
            })
            .sum()
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }
}

fn random_effect(rng: &mut StdRng) -> EffectTemplate {
    const KINDS: [EffectKind; 6] = [
        EffectKind::Speed,
        EffectKind::Haste,
        EffectKind::Resistance,
        EffectKind::JumpBoost,
        EffectKind::Strength,
        EffectKind::Regeneration,
    ];
    let kind = KINDS[rng.gen_range(0..KINDS.len())].clone();
    EffectTemplate::new(kind, 260, rng.gen_range(0..=1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_minimal_scenario() {
        let mut scenario = Scenario::new(ScenarioConfig::minimal()).unwrap();
        let result = scenario.run();
        assert!(result.passed(), "{:?}", result.violations);
        assert_eq!(result.rounds, 5);
    }

    #[test]
    fn test_standard_scenario() {
        let mut scenario = Scenario::new(ScenarioConfig::standard()).unwrap();
        let result = scenario.run();
        assert!(result.passed(), "{:?}", result.violations);
        assert_eq!(result.anchors_removed, result.beacons_broken);
    }

    #[test]
    fn test_scenarios_across_seeds() {
        for seed in 0..8 {
            let config = ScenarioConfig::standard().with_seed(seed).with_default_range(120);
            let mut scenario = Scenario::new(config).unwrap();
            let result = scenario.run();
            assert!(result.passed(), "seed {seed}: {:?}", result.violations);
        }
    }

    #[test]
    fn test_populate_registers_every_beacon() {
        let scenario = Scenario::new(ScenarioConfig::standard()).unwrap();
        assert_eq!(scenario.world.actor_count(), 50);
        // Random placements may collide
        assert!(scenario.plugin.registry().len() <= 10);
        assert!(!scenario.plugin.registry().is_empty());
    }

    #[test]
    fn test_stress_scenario() {
        let mut scenario = Scenario::new(ScenarioConfig::stress()).unwrap();
        assert_eq!(scenario.world.actor_count(), 500);

        let result = scenario.run();
        assert!(result.passed(), "{:?}", result.violations);
        assert_eq!(result.rounds, 50);
        assert_eq!(result.anchors_removed, result.beacons_broken);
    }

    #[test]
    fn test_invalid_default_range_is_rejected() {
        assert!(Scenario::new(ScenarioConfig::minimal().with_default_range(5)).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_scenario_matches_recount(seed in any::<u64>(), range in 10u32..=200) {
            let config = ScenarioConfig::minimal().with_seed(seed).with_default_range(range);
            let mut scenario = Scenario::new(config).unwrap();
            let result = scenario.run();
            prop_assert!(result.passed(), "{:?}", result.violations);
        }
    }
}
