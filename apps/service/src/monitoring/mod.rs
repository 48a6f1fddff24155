//! Monitoring engine module - runs the periodic checks behind the monitor
//!
//! This module is responsible for:
//! - Issuing bounded-time HTTP checks and classifying their outcome
//! - Scheduling one periodic driver per target
//! - Holding the latest status of every target

pub mod checker;
pub mod prober;
pub mod scheduler;
pub mod store;
pub mod types;
pub mod validation;

pub use checker::{CheckError, Checker, HttpChecker};
pub use prober::Prober;
pub use scheduler::{MonitoringScheduler, OverlapPolicy};
pub use store::StatusStore;
pub use types::{Outcome, Snapshot, Status, Target};
