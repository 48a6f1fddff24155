use actix_web::web::ServiceConfig;

mod dashboard;
mod health;
mod metrics;
mod status;

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.configure(dashboard::routes)
        .configure(health::routes)
        .configure(status::routes)
        .configure(metrics::routes);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::time::Duration;

    use actix_web::web;
    use healthmon_service::{Monitor, Target};

    /// Unstarted monitor over `names`, every target still pending.
    pub fn monitor(names: &[&str]) -> web::Data<Monitor> {
        let targets = names
            .iter()
            .map(|name| {
                Target::new(
                    *name,
                    format!("http://{name}.local/"),
                    Duration::from_secs(30),
                    Duration::from_secs(5),
                )
            })
            .collect();
        web::Data::new(Monitor::new(targets).unwrap())
    }
}
