//! Periodic evaluation driver

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, trace, warn};

use crate::{BeaconRangePlugin, Host};

/// Handle to a running tick loop
pub struct TickLoop {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl TickLoop {
    /// Signal the loop to stop and wait for it to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            warn!("tick loop ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawn a task that runs the evaluation step every `period`
///
/// The first tick fires immediately. Periods missed while a tick overran are
/// dropped rather than replayed. `period` must be non-zero.
pub fn spawn_tick_loop<H>(plugin: Arc<BeaconRangePlugin<H>>, period: Duration) -> TickLoop
where
    H: Host + ?Sized + 'static,
{
    let (tx, mut rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = plugin.run_tick();
                    trace!(applied = report.effects_applied, "scheduled tick");
                }
                changed = rx.changed() => {
                    if changed.is_err() || *rx.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("tick loop stopped");
    });

    TickLoop {
        shutdown: tx,
        handle,
    }
}
