//! static-pages: serve a directory for local development.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ axum router ──▶ Resolver::handle
//!                                        │
//!                       for each source (root plain first, then configured):
//!                         exact ──▶ +.html ──▶ /index.html
//!                                        │
//!                                        ▼
//!     Client Response ◀── response.rs ◀── Content (file path or zip entry)
//!                                        │
//!                                 nothing matched
//!                                        ▼
//!                                  <root>/404.html
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use static_pages::config::Cli;
use static_pages::http::HttpServer;
use static_pages::lifecycle::{signals, Shutdown};
use static_pages::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(&config.observability.log_filter);
    tracing::info!("static-pages v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        root = %config.site.root.display(),
        archives = config.site.archives,
        extra_sources = config.site.sources.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address already checked by validation.
        let addr: std::net::SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_ctrl_c(Arc::clone(&shutdown)));

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
