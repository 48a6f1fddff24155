use actix_web::{HttpResponse, Responder, get, web};
use healthmon_service::{Monitor, Snapshot};
use prometheus::{Encoder, IntGaugeVec, Opts, Registry, TEXT_FORMAT, TextEncoder};
use tracing::error;

macros_utils::routes! {
    route metrics_route,
}

const LABELS: [&str; 2] = ["service", "url"];

/// Prometheus text exposition of the current snapshot.
#[get("/metrics")]
pub async fn metrics_route(monitor: web::Data<Monitor>) -> impl Responder {
    match render(&monitor.snapshot()) {
        Ok(body) => HttpResponse::Ok().content_type(TEXT_FORMAT).body(body),
        Err(e) => {
            error!("Failed to render metrics: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn gauge(registry: &Registry, name: &str, help: &str) -> prometheus::Result<IntGaugeVec> {
    let gauge = IntGaugeVec::new(Opts::new(name, help), &LABELS)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

/// Statuses are read from a fresh registry on every scrape: the snapshot is
/// the source of truth and there is nothing to accumulate between scrapes.
fn render(snapshot: &Snapshot) -> prometheus::Result<String> {
    let registry = Registry::new();
    let up = gauge(&registry, "service_up", "Whether the service is up (1) or down (0)")?;
    let response_time =
        gauge(&registry, "service_response_time_ms", "Response time in milliseconds")?;
    let last_checked = gauge(
        &registry,
        "service_last_checked_timestamp_seconds",
        "Unix time of the last completed check",
    )?;

    for status in snapshot.values() {
        let labels = [status.name.as_str(), status.url.as_str()];
        up.with_label_values(&labels).set(i64::from(status.healthy));
        response_time
            .with_label_values(&labels)
            .set(i64::try_from(status.response_time_ms).unwrap_or(i64::MAX));
        if let Some(checked_at) = status.last_checked {
            last_checked.with_label_values(&labels).set(checked_at.timestamp());
        }
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
