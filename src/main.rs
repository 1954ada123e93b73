//! Demo server for the request routers.
//!
//! Serves the `/items` tree from [`request_mux::demo`]:
//!
//! ```text
//! curl -H 'Accept: application/json' localhost:8080/items
//! curl -X PUT -H 'Content-Type: application/xml' localhost:8080/items
//! curl -X OPTIONS -i localhost:8080/items
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use request_mux::config::{load_config, ServerConfig};
use request_mux::http::server::shutdown_signal;
use request_mux::observability::{logging, metrics};
use request_mux::{demo, HttpServer};

#[derive(Parser, Debug)]
#[command(name = "request-mux")]
#[command(about = "Serve the content-negotiation demo", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind.to_string();
    }

    logging::init_logging(&config.observability)?;
    tracing::info!("request-mux v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let server = HttpServer::new(config).mount("/items", demo::items());
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
