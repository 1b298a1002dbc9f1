//! Run the plugin against a simulated world in real time

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use beacon_runtime::{init_logging, ConfigStore, LoggingConfig, PluginConfig};
use beacon_test::{run_checks, Scenario, ScenarioConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("Usage: beacon-sim [seconds] [config.json]");
        println!("Example: beacon-sim 30 plugins/BeaconRangePlus/config.json");
        return Ok(());
    }

    let json = std::env::var("BEACON_LOG_JSON").is_ok_and(|v| v == "1");
    let logging = if json { LoggingConfig::json() } else { LoggingConfig::default() };
    init_logging(&logging)?;

    let seconds: u64 = match args.get(1) {
        Some(s) => s.parse()?,
        None => 20,
    };
    let store = match args.get(2) {
        Some(path) => ConfigStore::open(path)?,
        None => ConfigStore::in_memory(PluginConfig::default().with_tick_interval(Duration::from_secs(1)))?,
    };

    for check in run_checks()? {
        if check.passed {
            info!(check = check.name, "check passed");
        } else {
            warn!(check = check.name, "check FAILED");
        }
    }

    let scenario = Scenario::with_store(ScenarioConfig::standard(), store);
    let tick_loop = scenario.plugin.start();
    let mut rng = StdRng::seed_from_u64(scenario.config().seed);

    let mut moves = tokio::time::interval(Duration::from_millis(500));
    let deadline = tokio::time::sleep(Duration::from_secs(seconds));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = moves.tick() => scenario.world.wander(2.0, &mut rng),
            _ = &mut deadline => break,
        }
    }

    let stats = scenario.plugin.disable(Some(tick_loop)).await;
    println!("ticks:              {}", stats.ticks);
    println!("ticks skipped:      {}", stats.ticks_skipped);
    println!("effects applied:    {}", stats.effects_applied);
    println!("anchors discovered: {}", stats.anchors_discovered);
    println!("anchors removed:    {}", stats.anchors_removed);
    println!("last tick:          {:?}", stats.last_tick_duration);

    Ok(())
}
