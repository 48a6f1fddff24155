use std::io::Error as IoError;

use healthmon_service::MonitorError;
use healthmon_service::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0:#}")]
    Io(#[from] IoError),
    #[error("Address parsing error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Monitor error: {0}")]
    Monitor(#[from] MonitorError),
}
