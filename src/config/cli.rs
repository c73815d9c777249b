use super::toml_config::{MonitoringConfig, RefreshConfig};
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Command line of the `football-site` refresh binary. Flags given here win
/// over the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "football-site")]
#[command(about = "Fetch fixtures, validate them and publish the results site")]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "football-site.toml")]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log memory and CPU usage per stage")]
    pub monitor: bool,

    /// Override fetch.min_success_rate
    #[arg(long)]
    pub min_success_rate: Option<f64>,

    /// Override output.path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Run every stage but keep the written files in memory
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON and log as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl CliConfig {
    pub fn apply_overrides(&self, config: &mut RefreshConfig) {
        if let Some(rate) = self.min_success_rate {
            tracing::info!("🔧 min_success_rate overridden to: {}", rate);
            config.fetch.min_success_rate = rate;
        }
        if let Some(output) = &self.output {
            tracing::info!("🔧 output path overridden to: {}", output);
            config.output.path = output.clone();
        }
        if self.monitor {
            config.monitoring = Some(MonitoringConfig { enabled: true });
        }
    }
}
