use thiserror::Error;

/// Errors raised while building or starting a [`Monitor`](crate::Monitor).
///
/// Per-check failures never show up here; they are recorded as target status.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("duplicate target name: {0}")]
    DuplicateTargetName(String),

    #[error("invalid target `{name}`: {reason}")]
    InvalidTarget { name: String, reason: String },

    #[error("monitor already started")]
    AlreadyStarted,

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
