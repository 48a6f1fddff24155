use std::path::PathBuf;

use clap::Parser;
use healthmon_service::config::Config;

/// Concurrent HTTP endpoint health monitor
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Configuration file, created with defaults when missing
    /// [default: $XDG_CONFIG_HOME/healthmon/config.toml]
    #[arg(short, long, env = "HEALTHMON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on, overriding `server.bind`
    #[arg(long, env = "HEALTHMON_BIND")]
    pub bind: Option<String>,

    /// Port to listen on, overriding `server.port`
    #[arg(short, long, env = "HEALTHMON_PORT")]
    pub port: Option<u16>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.server.bind.clone_from(bind);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
