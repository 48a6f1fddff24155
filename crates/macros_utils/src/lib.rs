//! Small declarative macros shared by the healthmon HTTP apps.

#[cfg(feature = "actix")]
#[doc(hidden)]
pub use actix_web as __actix_web;

/// Generate a `routes` function registering every listed handler.
///
/// Each handler must be an actix-web service, typically a function annotated
/// with one of the method attributes (`#[get("/...")]`, ...). The generated
/// function is meant to be passed to `App::configure` or `ServiceConfig::configure`.
///
/// ```ignore
/// macros_utils::routes! {
///     route health_route,
///     route status_route,
/// }
/// ```
#[cfg(feature = "actix")]
#[macro_export]
macro_rules! routes {
    ($(route $handler:ident),* $(,)?) => {
        pub fn routes(cfg: &mut $crate::__actix_web::web::ServiceConfig) {
            $(cfg.service($handler);)*
        }
    };
}
