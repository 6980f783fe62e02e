use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::state::AppState;

/// Reload the dataset every `every` until the task is aborted.
///
/// A failed reload is logged and the previous snapshot stays in effect.
pub fn spawn_periodic_reload(state: Arc<AppState>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the initial load already ran.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match state.sdk.reload().await {
                Ok(status) => info!(
                    "periodic reload: {} products, {} purchases, {} sales (generation {})",
                    status.products, status.purchases, status.sales, status.generation
                ),
                Err(e) => warn!(
                    "periodic reload failed, still serving generation {}: {e}",
                    state.sdk.status().generation
                ),
            }
        }
    })
}
