//! Periodic sweep of expired challenges, idle request logs and expired
//! blacklist entries.

use crate::facade::SecurityFacade;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Runs [`SecurityFacade::purge_stale`] every `interval`, forever.
///
/// The first sweep happens immediately. Missed ticks are skipped rather
/// than replayed.
pub async fn maintenance_task(facade: Arc<SecurityFacade>, interval: Duration) {
    let mut sweep = tokio::time::interval(interval);
    sweep.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        sweep.tick().await;
        facade.purge_stale();
    }
}
