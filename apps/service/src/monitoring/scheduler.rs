use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::prober::Prober;
use super::store::StatusStore;
use super::types::Target;

/// What a target's scheduler does when a tick fires while its previous check
/// is still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Start the new check anyway. Results land in completion order, so a
    /// slow early check may overwrite a faster later one.
    #[default]
    Allow,
    /// Run checks one at a time and drop the ticks missed meanwhile.
    Skip,
}

/// Drives periodic checks, one task per target, writing into the store.
pub struct MonitoringScheduler {
    prober: Prober,
    store: Arc<StatusStore>,
    policy: OverlapPolicy,
    cancel: CancellationToken,
}

impl MonitoringScheduler {
    pub fn new(prober: Prober, store: Arc<StatusStore>, cancel: CancellationToken) -> Self {
        Self { prober, store, policy: OverlapPolicy::default(), cancel }
    }

    pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Spawn the periodic driver for `target`.
    ///
    /// The first check runs immediately, then once per `target.interval` until
    /// the cancellation token fires. Cancelling also aborts in-flight checks
    /// without recording them.
    pub fn schedule_target(&self, target: Target) -> JoinHandle<()> {
        let prober = self.prober.clone();
        let store = self.store.clone();
        let cancel = self.cancel.clone();
        let policy = self.policy;

        tokio::spawn(async move {
            let target = Arc::new(target);
            debug!(
                name = %target.name,
                interval_ms = target.interval.as_millis() as u64,
                ?policy,
                "Scheduler started"
            );

            match policy {
                OverlapPolicy::Allow => run_overlapping(prober, store, target.clone(), cancel).await,
                OverlapPolicy::Skip => run_serialized(prober, store, target.clone(), cancel).await,
            }

            debug!(name = %target.name, "Scheduler stopped");
        })
    }

    /// Schedule every target in `targets`.
    pub fn schedule_targets(&self, targets: Vec<Target>) -> Vec<JoinHandle<()>> {
        targets
            .into_iter()
            .map(|target| self.schedule_target(target))
            .collect()
    }
}

async fn run_check(prober: &Prober, store: &StatusStore, target: &Target) {
    let outcome = prober.check(target).await;
    store.update(&target.name, &outcome, Utc::now());
}

async fn run_overlapping(
    prober: Prober,
    store: Arc<StatusStore>,
    target: Arc<Target>,
    cancel: CancellationToken,
) {
    let mut timer = interval(target.interval);
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = timer.tick() => {}
        }

        // Reap finished checks so the set only holds outstanding ones.
        while in_flight.try_join_next().is_some() {}

        let (prober, store, target) = (prober.clone(), store.clone(), target.clone());
        in_flight.spawn(async move { run_check(&prober, &store, &target).await });
    }

    in_flight.shutdown().await;
}

async fn run_serialized(
    prober: Prober,
    store: Arc<StatusStore>,
    target: Arc<Target>,
    cancel: CancellationToken,
) {
    let mut timer = interval(target.interval);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            _ = timer.tick() => {}
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            () = run_check(&prober, &store, &target) => {}
        }
    }
}
