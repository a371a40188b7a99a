//! pinproxy: a reverse-forwarding gateway in front of one fixed upstream.
//!
//! # Architecture Overview
//!
//! ```text
//!   client ──▶ http server ──▶ dispatch
//!                                 │
//!          ┌──────────────────────┼──────────────────────┐
//!          ▼                      ▼                      ▼
//!    pass-through            CONNECT               rewrite-and-relay
//!    (marker header)         405                   probe ─▶ relay
//!          │                                             │
//!          ▼                                             ▼
//!    declared destination                          pinned upstream
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use pinproxy::config::{load_config, validate_config, ConfigError, GatewayConfig};
use pinproxy::observability::{logging, metrics};
use pinproxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "pinproxy")]
#[command(about = "Reverse-forwarding gateway pinned to a single upstream", long_about = None)]
struct Cli {
    /// TOML configuration file. Compiled-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init(&config.observability);
    tracing::info!("pinproxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        probe_timeout_secs = config.timeouts.probe_secs,
        relay_timeout_secs = config.timeouts.relay_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");
    tracing::info!(upstream = %config.upstream.default_endpoint_url(), "Target server");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown.trigger_on_signal());

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
