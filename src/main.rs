//! balancer-console
//!
//! Terminal dashboard for a load balancer's runtime modification API.
//!
//! # Architecture Overview
//!
//! ```text
//!   stdin ──▶ console::command ──▶ console::app ──▶ client::mutation ──PUT/DELETE──▶ ┐
//!                                      │  ▲                                            │
//!                                      │  └──── MutationOutcome (200 → restart) ◀──────┤
//!                                      ▼                                               │  balancer
//!                              poller::session ──tick/restart──▶ client::fetcher ──GET──▶ /backends
//!                                 │       ▲                            │               │
//!                                 │       └──── FetchResult ◀──────────┘               ┘
//!                                 ├─ ok  ──▶ render::table ──▶ render::surface (stdout)
//!                                 └─ err ──▶ poller::gate  ──▶ alert (stderr), timer off
//! ```

use std::path::PathBuf;

use clap::Parser;
use balancer_console::client::HttpBackendApi;
use balancer_console::config::loader::{load_config, ConfigError};
use balancer_console::config::validation::validate_config;
use balancer_console::config::ConsoleConfig;
use balancer_console::console::spawn_line_reader;
use balancer_console::lifecycle::{signals, Shutdown};
use balancer_console::observability::{logging, metrics};
use balancer_console::render::TerminalSurface;
use balancer_console::Console;

#[derive(Parser)]
#[command(name = "balancer-console")]
#[command(about = "Watch and edit a load balancer's backend list", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Balancer host (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Modification API port (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Poll interval in milliseconds (overrides config).
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Log level (overrides config).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut ConsoleConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.polling.interval_ms = interval_ms;
        }
        if let Some(log_level) = self.log_level {
            config.observability.log_level = log_level;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ConsoleConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability.log_level);

    tracing::info!("balancer-console v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        metrics::install_exporter(config.observability.metrics_address.parse()?)?;
    }

    let base_url = config.server.base_url()?;
    let api = HttpBackendApi::new(&base_url, config.polling.request_timeout())?;

    tracing::info!(
        endpoint = %api.endpoint(),
        interval_ms = config.polling.interval_ms,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::forward_ctrl_c(shutdown.clone());

    let mut console = Console::new(api, Box::new(TerminalSurface::stdio()), config.polling.interval());
    console.start();
    console.run(spawn_line_reader(std::io::stdin()), shutdown.signal()).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
