//! Command line flags. Values given here override the config file.

use std::path::PathBuf;

use clap::Parser;
use maglev_common::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "maglev-web", version, about = "Levitation force predictor web form")]
pub struct Cli {
    /// Path to maglev.toml
    #[arg(short, long, env = "MAGLEV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose logging and error details in responses
    #[arg(long)]
    pub debug: bool,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Cli {
    pub fn apply(&self, config: &mut AppConfig) {
        if self.debug {
            config.server.debug = true;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
