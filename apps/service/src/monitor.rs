use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::MonitorError;
use crate::monitoring::validation::validate_target;
use crate::monitoring::{MonitoringScheduler, OverlapPolicy, Prober, Snapshot, StatusStore, Target};

/// Composition root of the monitoring engine.
///
/// Owns the target list, the status store and the running schedulers. Built
/// once, shared with whatever serves requests (typically behind an `Arc`), and
/// read through [`Monitor::snapshot`].
pub struct Monitor {
    targets: Vec<Target>,
    store: Arc<StatusStore>,
    prober: Prober,
    policy: OverlapPolicy,
    cancel: CancellationToken,
    handles: Mutex<Vec<JoinHandle<()>>>,
    started: AtomicBool,
}

impl Monitor {
    /// Build a monitor probing over HTTP.
    pub fn new(targets: Vec<Target>) -> Result<Self, MonitorError> {
        Self::with_prober(targets, Prober::http()?)
    }

    /// Build a monitor with a caller-supplied prober.
    pub fn with_prober(targets: Vec<Target>, prober: Prober) -> Result<Self, MonitorError> {
        Self::validate(&targets)?;

        let store = Arc::new(StatusStore::new(&targets));

        Ok(Self {
            targets,
            store,
            prober,
            policy: OverlapPolicy::default(),
            cancel: CancellationToken::new(),
            handles: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
        })
    }

    pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn validate(targets: &[Target]) -> Result<(), MonitorError> {
        let mut seen = HashSet::with_capacity(targets.len());

        for target in targets {
            validate_target(target).map_err(|reason| MonitorError::InvalidTarget {
                name: target.name.clone(),
                reason,
            })?;

            if !seen.insert(target.name.as_str()) {
                return Err(MonitorError::DuplicateTargetName(target.name.clone()));
            }
        }

        Ok(())
    }

    /// Spawn one scheduler per target and return without waiting for checks.
    ///
    /// Must be called from within a Tokio runtime. Only the first call does
    /// anything; later ones fail with [`MonitorError::AlreadyStarted`].
    pub fn start(&self) -> Result<(), MonitorError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(MonitorError::AlreadyStarted);
        }

        let scheduler =
            MonitoringScheduler::new(self.prober.clone(), self.store.clone(), self.cancel.clone())
                .with_overlap_policy(self.policy);

        let handles = scheduler.schedule_targets(self.targets.clone());
        info!(targets = handles.len(), policy = ?self.policy, "Monitoring started");

        self.handles.lock().unwrap_or_else(PoisonError::into_inner).extend(handles);
        Ok(())
    }

    /// Stop every scheduler, aborting in-flight checks, and wait for them.
    pub async fn shutdown(&self) {
        self.cancel.cancel();

        let handles = {
            let mut guard = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *guard)
        };
        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Scheduler task ended abnormally: {e}");
            }
        }

        info!("Monitoring stopped");
    }

    /// Point-in-time copy of every target's latest status.
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

/// `true` iff every status in `snapshot` is healthy. An empty snapshot is
/// healthy.
pub fn overall_healthy(snapshot: &Snapshot) -> bool {
    snapshot.values().all(|status| status.healthy)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::monitoring::{CheckError, Checker, Outcome};

    struct StaticChecker(u16);

    #[async_trait::async_trait]
    impl Checker for StaticChecker {
        async fn get(&self, _url: &str, _timeout: Duration) -> Result<u16, CheckError> {
            Ok(self.0)
        }
    }

    fn target(name: &str) -> Target {
        Target::new(
            name,
            format!("http://{name}.local/"),
            Duration::from_secs(30),
            Duration::from_secs(5),
        )
    }

    fn monitor(names: &[&str], code: u16) -> Result<Monitor, MonitorError> {
        let targets = names.iter().map(|name| target(name)).collect();
        Monitor::with_prober(targets, Prober::new(Arc::new(StaticChecker(code))))
    }

    #[test]
    fn test_duplicate_target_name_is_rejected() {
        let result = monitor(&["api", "db", "api"], 200);
        assert!(matches!(result, Err(MonitorError::DuplicateTargetName(name)) if name == "api"));
    }

    #[test]
    fn test_invalid_target_is_rejected() {
        let targets = vec![Target::new(
            "api",
            "ftp://api.local/",
            Duration::from_secs(1),
            Duration::from_secs(1),
        )];
        let result = Monitor::new(targets);
        assert!(matches!(result, Err(MonitorError::InvalidTarget { name, .. }) if name == "api"));
    }

    #[test]
    fn test_snapshot_before_start_is_all_unhealthy() {
        let monitor = monitor(&["api", "db"], 200).unwrap();

        let snapshot = monitor.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.values().all(|status| !status.healthy));
        assert!(!overall_healthy(&snapshot));
        assert!(!monitor.is_started());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_is_rejected() {
        let monitor = monitor(&["api"], 200).unwrap();

        monitor.start().unwrap();
        assert!(matches!(monitor.start(), Err(MonitorError::AlreadyStarted)));
        assert_eq!(monitor.handles.lock().unwrap().len(), 1);

        monitor.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_reports_each_target() {
        let monitor = monitor(&["api", "db"], 503).unwrap();

        monitor.start().unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let snapshot = monitor.snapshot();
        for status in snapshot.values() {
            assert!(!status.healthy);
            assert_eq!(status.error, "HTTP 503");
            assert!(status.last_checked.is_some());
        }

        monitor.shutdown().await;
        assert!(monitor.handles.lock().unwrap().is_empty());
    }

    #[test]
    fn test_overall_healthy() {
        let monitor = monitor(&["api", "db"], 200).unwrap();
        monitor.store.update("api", &Outcome::success(5), Utc::now());
        assert!(!overall_healthy(&monitor.snapshot()));

        monitor.store.update("db", &Outcome::success(9), Utc::now());
        assert!(overall_healthy(&monitor.snapshot()));

        assert!(overall_healthy(&Snapshot::new()));
    }
}
