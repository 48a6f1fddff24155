use std::error::Error as StdError;
use std::time::Duration;

use thiserror::Error;

/// Transport-level failure of a single GET.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Transport(String),
}

/// Transport capability used by the prober: one bounded-time GET.
#[async_trait::async_trait]
pub trait Checker: Send + Sync {
    /// Issue a GET to `url` and return the response status code.
    ///
    /// Implementations should give up after `timeout`; the prober enforces the
    /// bound regardless.
    async fn get(&self, url: &str, timeout: Duration) -> Result<u16, CheckError>;
}

/// HTTP/HTTPS checker backed by a shared `reqwest` client
pub struct HttpChecker {
    client: reqwest::Client,
}

impl HttpChecker {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("healthmon/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Checker for HttpChecker {
    async fn get(&self, url: &str, timeout: Duration) -> Result<u16, CheckError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        Ok(response.status().as_u16())
    }
}

fn classify(error: reqwest::Error, timeout: Duration) -> CheckError {
    if error.is_timeout() {
        CheckError::Timeout(timeout)
    } else if error.is_connect() {
        CheckError::Connect(root_cause(&error))
    } else {
        CheckError::Transport(root_cause(&error))
    }
}

/// `reqwest` errors only print their outermost layer ("error sending request
/// for url"); the innermost source is the part worth showing.
fn root_cause(error: &(dyn StdError + 'static)) -> String {
    let mut current = error;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
