//! Edge Origin Router
//!
//! A reverse proxy built with Tokio and Axum that fronts a page origin
//! and one or more CDN origins behind a single host.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │                 EDGE ROUTER                    │
//!                        │                                                │
//!   Client Request       │  ┌────────┐   ┌────────────┐   ┌───────────┐  │
//!   ─────────────────────┼─▶│  http  │──▶│ classifier │──▶│  registry │  │
//!                        │  │ server │   │(asset/page)│   │ (origins) │  │
//!                        │  └────────┘   └────────────┘   └─────┬─────┘  │
//!                        │                                      │        │
//!                        │                                      ▼        │
//!   Client Response      │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │     Origin
//!   ◀────────────────────┼──│ rewrite │◀──│ verify   │◀──│ upstream  │◀─┼──── Servers
//!                        │  │ (html)  │   │ (c-type) │   │  client   │  │
//!                        │  └─────────┘   └──────────┘   └───────────┘  │
//!                        │                                                │
//!                        │  Cross-cutting: config, observability,         │
//!                        │  lifecycle (shutdown), header policy           │
//!                        └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_router::config::{self, RouterConfig};
use edge_router::http::HttpServer;
use edge_router::lifecycle::Shutdown;

#[derive(Parser, Debug)]
#[command(name = "edge-router", about = "Edge request router for multi-origin sites")]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => RouterConfig::default(),
    };
    config::apply_env_overrides(&mut config);
    config::loader::finalize(&config)?;

    edge_router::observability::logging::init_tracing(&config.observability.log_level);

    tracing::info!("edge-router v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        primary_origin = %config.origins.primary.url,
        fallback_origin = %config.origins.fallback.url,
        cdn_mappings = config.origins.cdn.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            edge_router::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
