use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error recorded for a target whose first check has not completed yet.
pub const NOT_CHECKED_YET: &str = "not checked yet";

/// Point-in-time copy of every status, keyed and ordered by target name.
pub type Snapshot = BTreeMap<String, Status>;

/// A monitored endpoint. Never mutated once the monitor is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Unique identifier, also the key into the status store
    pub name: String,

    /// Fully-qualified URL hit with a GET on every tick
    pub url: String,

    /// Period between two checks
    pub interval: Duration,

    /// Upper bound for a single check attempt
    pub timeout: Duration,
}

impl Target {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        interval: Duration,
        timeout: Duration,
    ) -> Self {
        Self { name: name.into(), url: url.into(), interval, timeout }
    }
}

/// Result of a single probe, not yet written to the store.
///
/// Fields are private so that `healthy` can never disagree with `error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    healthy: bool,
    response_time_ms: u64,
    error: String,
}

impl Outcome {
    /// A successful check that took `response_time_ms`.
    pub fn success(response_time_ms: u64) -> Self {
        Self { healthy: true, response_time_ms, error: String::new() }
    }

    /// A failed check. An empty `error` is replaced with a generic cause.
    pub fn failure(response_time_ms: u64, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.is_empty() {
            error.push_str("unknown error");
        }

        Self { healthy: false, response_time_ms, error }
    }

    pub fn healthy(&self) -> bool {
        self.healthy
    }

    pub fn response_time_ms(&self) -> u64 {
        self.response_time_ms
    }

    /// Empty when healthy.
    pub fn error(&self) -> &str {
        &self.error
    }
}

/// Latest observed health of one target, as served to readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub name: String,
    pub url: String,
    pub healthy: bool,
    pub response_time_ms: u64,
    /// `None` until the first check completes
    pub last_checked: Option<DateTime<Utc>>,
    pub error: String,
}

impl Status {
    /// Initial, unchecked status for `target`.
    pub fn pending(target: &Target) -> Self {
        Self {
            name: target.name.clone(),
            url: target.url.clone(),
            healthy: false,
            response_time_ms: 0,
            last_checked: None,
            error: NOT_CHECKED_YET.to_string(),
        }
    }

    /// Overwrite every mutable field from `outcome`.
    ///
    /// `last_checked` never moves backwards, even if the wall clock does or an
    /// older check completes late.
    pub(crate) fn apply(&mut self, outcome: &Outcome, checked_at: DateTime<Utc>) {
        self.healthy = outcome.healthy;
        self.response_time_ms = outcome.response_time_ms;
        self.error.clone_from(&outcome.error);
        self.last_checked = Some(match self.last_checked {
            Some(previous) if previous > checked_at => previous,
            _ => checked_at,
        });
    }
}
