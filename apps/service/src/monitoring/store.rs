use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::types::{Outcome, Snapshot, Status, Target};

/// Latest status of every target.
///
/// The key set is fixed when the store is built, so the map itself is never
/// mutated and needs no lock. Each entry carries its own lock: writers to
/// different targets never wait on each other, and readers only ever wait for
/// the single entry being copied.
#[derive(Debug)]
pub struct StatusStore {
    entries: HashMap<String, RwLock<Status>>,
}

impl StatusStore {
    /// One unchecked entry per target. Later duplicates of a name are ignored;
    /// the monitor rejects them before getting here.
    pub fn new(targets: &[Target]) -> Self {
        let mut entries = HashMap::with_capacity(targets.len());
        for target in targets {
            entries
                .entry(target.name.clone())
                .or_insert_with(|| RwLock::new(Status::pending(target)));
        }

        Self { entries }
    }

    /// Replace the status of `name` with `outcome` as one indivisible write.
    ///
    /// Returns `false`, leaving the store untouched, when `name` is unknown.
    pub fn update(&self, name: &str, outcome: &Outcome, checked_at: DateTime<Utc>) -> bool {
        let Some(entry) = self.entries.get(name) else {
            debug!(name, "Ignoring update for unknown target");
            return false;
        };

        // A poisoned entry still holds a whole status: every write replaces all
        // fields before the guard is released.
        let mut status = entry.write().unwrap_or_else(PoisonError::into_inner);
        status.apply(outcome, checked_at);
        true
    }

    /// Independent copy of every status.
    ///
    /// Each entry is copied under its own read lock, so no status is ever torn;
    /// the view is not atomic across entries.
    pub fn snapshot(&self) -> Snapshot {
        self.entries
            .iter()
            .map(|(name, entry)| {
                let status = entry.read().unwrap_or_else(PoisonError::into_inner);
                (name.clone(), status.clone())
            })
            .collect()
    }

    /// Copy of a single status.
    pub fn get(&self, name: &str) -> Option<Status> {
        self.entries
            .get(name)
            .map(|entry| entry.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
