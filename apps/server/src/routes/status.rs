use actix_web::{HttpResponse, Responder, get, web};
use healthmon_service::{Monitor, Snapshot, overall_healthy};
use serde::Serialize;

macros_utils::routes! {
    route status_route,
}

#[derive(Serialize)]
struct StatusResponse {
    healthy: bool,
    services: Snapshot,
}

/// Every target's latest status. Answers 503 while any target is unhealthy
/// so that the endpoint can be used directly as an upstream health check.
#[get("/status")]
pub async fn status_route(monitor: web::Data<Monitor>) -> impl Responder {
    let services = monitor.snapshot();
    let healthy = overall_healthy(&services);

    let mut response =
        if healthy { HttpResponse::Ok() } else { HttpResponse::ServiceUnavailable() };
    response.json(StatusResponse { healthy, services })
}
