//! Target validation run once, when the monitor is built.
//!
//! Rejects anything that would make a scheduler misbehave (zero intervals
//! panic the timer, unparsable URLs fail every check) so configuration
//! mistakes surface at startup rather than as a permanently red target.

use url::Url;

use super::types::Target;

/// Validate a single target, returning a human-readable reason on failure
pub fn validate_target(target: &Target) -> Result<(), String> {
    if target.name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }

    validate_url(&target.url)?;

    if target.interval.is_zero() {
        return Err("interval must be greater than zero".to_string());
    }

    if target.timeout.is_zero() {
        return Err("timeout must be greater than zero".to_string());
    }

    // Allowed, but under the overlapping policy it means several checks of
    // this target can be in flight at once.
    if target.timeout > target.interval {
        tracing::warn!(
            name = %target.name,
            timeout_ms = target.timeout.as_millis() as u64,
            interval_ms = target.interval.as_millis() as u64,
            "Timeout is longer than the check interval"
        );
    }

    Ok(())
}

/// Validate URL format and scheme
fn validate_url(target: &str) -> Result<(), String> {
    let url = Url::parse(target).map_err(|e| format!("invalid URL `{target}`: {e}"))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported URL scheme: {other}")),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("URL has no host: {target}"));
    }

    if url.port() == Some(0) {
        return Err("port 0 is not valid".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn target(name: &str, url: &str, interval_ms: u64, timeout_ms: u64) -> Target {
        Target::new(
            name,
            url,
            Duration::from_millis(interval_ms),
            Duration::from_millis(timeout_ms),
        )
    }

    #[test]
    fn test_validate_url() {
        // Valid
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://127.0.0.1:8080/ok").is_ok());

        // Invalid - wrong scheme
        assert!(validate_url("ftp://example.com").is_err());

        // Invalid - format
        assert!(validate_url("example.com").is_err());
        assert!(validate_url("http://example.com:0/").is_err());
    }

    #[test]
    fn test_validate_target_durations() {
        assert!(validate_target(&target("svc", "https://example.com", 30_000, 5_000)).is_ok());

        // Timeout longer than interval is only a warning
        assert!(validate_target(&target("svc", "https://example.com", 1_000, 5_000)).is_ok());

        assert!(validate_target(&target("svc", "https://example.com", 0, 5_000)).is_err());
        assert!(validate_target(&target("svc", "https://example.com", 1_000, 0)).is_err());
    }

    #[test]
    fn test_validate_target_name() {
        let err = validate_target(&target("  ", "https://example.com", 1_000, 500)).unwrap_err();
        assert!(err.contains("name"));
    }
}
