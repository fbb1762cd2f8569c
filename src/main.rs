use std::path::PathBuf;

use clap::Parser;

use fpl_proxy::config::{loader, validate_config, ConfigError, ProxyConfig};
use fpl_proxy::lifecycle::startup;
use fpl_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "fpl-proxy")]
#[command(about = "Serve the dashboard locally and proxy /api/ to the FPL API", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on, keeping the configured host
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory to serve static files from
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Upstream API base URL (no trailing slash)
    #[arg(short, long)]
    upstream: Option<String>,
}

impl Cli {
    fn has_overrides(&self) -> bool {
        self.port.is_some() || self.root.is_some() || self.upstream.is_some()
    }

    fn apply(&self, config: &mut ProxyConfig) {
        if let Some(port) = self.port {
            let host = config
                .listener
                .bind_address
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            config.listener.bind_address = format!("{host}:{port}");
        }
        if let Some(root) = &self.root {
            config.assets.root = root.clone();
        }
        if let Some(upstream) = &self.upstream {
            config.upstream.base_url = upstream.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) if !cli.has_overrides() => loader::load_config(path)?,
        file => {
            let mut config = match file {
                Some(path) => loader::read_config(path)?,
                None => ProxyConfig::default(),
            };
            // Overrides go in before validation so a bad flag is reported too.
            cli.apply(&mut config);
            validate_config(&config).map_err(ConfigError::Validation)?;
            config
        }
    };

    logging::init(&config.observability.log_level);
    tracing::info!("fpl-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await
}
