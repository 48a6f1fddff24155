//! Concurrent HTTP endpoint health monitoring.
//!
//! A [`Monitor`] owns a fixed set of [`Target`]s, drives one periodic checker
//! per target and keeps the latest [`Status`] of each in a concurrent store.
//! Presentation layers only ever read it through [`Monitor::snapshot`].

pub mod config;
pub mod error;
pub mod monitor;
pub mod monitoring;

pub use error::MonitorError;
pub use monitor::{Monitor, overall_healthy};
pub use monitoring::{OverlapPolicy, Outcome, Prober, Snapshot, Status, Target};
