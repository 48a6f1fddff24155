#![warn(clippy::all, clippy::pedantic)]

use std::net::SocketAddr;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use healthmon_service::Monitor;
use healthmon_service::config::Config;
use tracing::info;

mod cli;
mod error;
mod routes;

use cli::Cli;
use error::AppError;
use logger::init_tracing;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::from_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    if cli.print_config {
        println!("{config}");
        return Ok(());
    }

    let monitor = Monitor::new(config.targets())?.with_overlap_policy(config.scheduler.overlap);
    let monitor = web::Data::new(monitor);
    monitor.start()?;

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;
    let result = run_server(monitor.clone(), addr).await;

    monitor.shutdown().await;
    result
}

async fn run_server(monitor: web::Data<Monitor>, addr: SocketAddr) -> Result<(), AppError> {
    info!(%addr, targets = monitor.targets().len(), "Starting health monitor");
    info!("Dashboard: http://{addr}/  Status API: /status  Metrics: /metrics");

    HttpServer::new(move || App::new().app_data(monitor.clone()).configure(routes::routes))
        .bind(addr)?
        .run()
        .await?;

    Ok(())
}
