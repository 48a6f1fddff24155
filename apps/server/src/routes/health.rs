use actix_web::{HttpResponse, Responder, get};

macros_utils::routes! {
    route health_route,
}

/// Liveness of the monitor process itself, independent of any target.
#[get("/health")]
pub async fn health_route() -> impl Responder {
    HttpResponse::Ok().body("OK")
}
