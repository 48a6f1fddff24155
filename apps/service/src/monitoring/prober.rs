use std::sync::Arc;

use tokio::time::{Instant, timeout};
use tracing::{info, warn};

use super::checker::{CheckError, Checker, HttpChecker};
use super::types::{Outcome, Target};

/// Runs one bounded-time check against a target and classifies the result.
///
/// The prober never touches shared state; writing the outcome is the
/// scheduler's job.
#[derive(Clone)]
pub struct Prober {
    checker: Arc<dyn Checker>,
}

impl Prober {
    pub fn new(checker: Arc<dyn Checker>) -> Self {
        Self { checker }
    }

    /// Prober over the default `reqwest` transport.
    pub fn http() -> Result<Self, reqwest::Error> {
        Ok(Self::new(Arc::new(HttpChecker::new()?)))
    }

    /// Check `target` once.
    ///
    /// The request is dropped, and so cancelled, once `target.timeout`
    /// elapses, whatever the checker does with the timeout it is given.
    pub async fn check(&self, target: &Target) -> Outcome {
        let start = Instant::now();

        let result = timeout(target.timeout, self.checker.get(&target.url, target.timeout))
            .await
            .unwrap_or(Err(CheckError::Timeout(target.timeout)));

        let elapsed_ms = start.elapsed().as_millis() as u64;
        let outcome = classify(result, elapsed_ms);

        if outcome.healthy() {
            info!(
                name = %target.name,
                url = %target.url,
                healthy = true,
                response_time_ms = outcome.response_time_ms(),
                "check completed"
            );
        } else {
            warn!(
                name = %target.name,
                url = %target.url,
                healthy = false,
                response_time_ms = outcome.response_time_ms(),
                error = outcome.error(),
                "check completed"
            );
        }

        outcome
    }
}

fn classify(result: Result<u16, CheckError>, elapsed_ms: u64) -> Outcome {
    match result {
        Ok(code) if (200..300).contains(&code) => Outcome::success(elapsed_ms),
        Ok(code) => Outcome::failure(elapsed_ms, format!("HTTP {code}")),
        // No response arrived, so there is no meaningful latency to report.
        Err(error @ CheckError::Timeout(_)) => Outcome::failure(0, error.to_string()),
        Err(error) => Outcome::failure(elapsed_ms, error.to_string()),
    }
}
