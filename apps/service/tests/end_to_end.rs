//! End-to-end tests: a real monitor checking `wiremock` stub servers over HTTP.

use std::time::Duration;

use healthmon_service::{Monitor, MonitorError, OverlapPolicy, Status, Target, overall_healthy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Stub server answering `GET /ok` with `response`.
async fn stub(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

fn target(server: &MockServer, interval: Duration, timeout: Duration) -> Target {
    Target::new("svc", format!("{}/ok", server.uri()), interval, timeout)
}

/// Poll until `name` has been checked at least once, or give up after `limit`.
async fn first_check(monitor: &Monitor, name: &str, limit: Duration) -> Status {
    let deadline = tokio::time::Instant::now() + limit;
    loop {
        let status = monitor.snapshot().remove(name).expect("target missing from snapshot");
        if status.last_checked.is_some() || tokio::time::Instant::now() >= deadline {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

#[tokio::test]
async fn test_healthy_target() {
    let _ = tracing_subscriber::fmt::try_init();
    let server = stub(ResponseTemplate::new(200)).await;

    let monitor = Monitor::new(vec![target(&server, Duration::from_secs(1), Duration::from_secs(1))])
        .expect("valid monitor");
    assert!(!monitor.snapshot()["svc"].healthy);

    monitor.start().expect("first start");
    let status = first_check(&monitor, "svc", Duration::from_secs(3)).await;

    assert!(status.healthy, "unexpected status: {status:?}");
    assert_eq!(status.error, "");
    assert!(overall_healthy(&monitor.snapshot()));

    monitor.shutdown().await;
}

#[tokio::test]
async fn test_server_error_target() {
    let server = stub(ResponseTemplate::new(500)).await;

    let monitor = Monitor::new(vec![target(&server, Duration::from_secs(1), Duration::from_secs(1))])
        .expect("valid monitor");
    monitor.start().expect("first start");
    let status = first_check(&monitor, "svc", Duration::from_secs(3)).await;

    assert!(!status.healthy);
    assert_eq!(status.error, "HTTP 500");
    assert!(status.last_checked.is_some());
    assert!(!overall_healthy(&monitor.snapshot()));

    monitor.shutdown().await;
}

#[tokio::test]
async fn test_slow_target_times_out() {
    let server = stub(ResponseTemplate::new(200).set_delay(Duration::from_secs(2))).await;

    let monitor = Monitor::new(vec![target(
        &server,
        Duration::from_secs(5),
        Duration::from_millis(500),
    )])
    .expect("valid monitor");
    monitor.start().expect("first start");
    let status = first_check(&monitor, "svc", Duration::from_secs(3)).await;

    assert!(!status.healthy);
    assert_eq!(status.error, "timed out after 500ms");
    assert_eq!(status.response_time_ms, 0);

    monitor.shutdown().await;
}

#[tokio::test]
async fn test_unreachable_target_does_not_affect_others() {
    let healthy = stub(ResponseTemplate::new(204)).await;
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_addr = listener.local_addr().unwrap();
    drop(listener);

    let monitor = Monitor::new(vec![
        Target::new(
            "dead",
            format!("http://{dead_addr}/ok"),
            Duration::from_secs(1),
            Duration::from_secs(1),
        ),
        Target::new(
            "alive",
            format!("{}/ok", healthy.uri()),
            Duration::from_secs(1),
            Duration::from_secs(1),
        ),
    ])
    .expect("valid monitor")
    .with_overlap_policy(OverlapPolicy::Skip);
    monitor.start().expect("first start");

    let dead = first_check(&monitor, "dead", Duration::from_secs(3)).await;
    let alive = first_check(&monitor, "alive", Duration::from_secs(3)).await;

    assert!(!dead.healthy);
    assert!(dead.error.starts_with("connection failed"), "got {:?}", dead.error);
    assert!(alive.healthy);
    assert!(!overall_healthy(&monitor.snapshot()));

    monitor.shutdown().await;
}

#[tokio::test]
async fn test_duplicate_names_start_nothing() {
    let server = stub(ResponseTemplate::new(200)).await;

    let result = Monitor::new(vec![
        target(&server, Duration::from_secs(1), Duration::from_secs(1)),
        target(&server, Duration::from_secs(2), Duration::from_secs(1)),
    ]);
    assert!(matches!(result, Err(MonitorError::DuplicateTargetName(name)) if name == "svc"));

    tokio::time::sleep(Duration::from_millis(200)).await;
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}
