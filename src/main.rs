//! # HN Scraper
//!
//! A small HTTP service that scrapes the Hacker News listing into structured
//! article records and serves them as JSON.
//!
//! ## Usage
//!
//! ```sh
//! hn_scraper --port 8000
//! curl http://127.0.0.1:8000/3      # articles from pages 1..=3
//! curl http://127.0.0.1:8000/cache  # which pages are memoized
//! ```
//!
//! ## Architecture
//!
//! Each request flows through the same pipeline:
//! 1. **Validation**: The page count must be within `1..=max_pages`
//! 2. **Cache check**: Pages already fetched in this process are reused
//! 3. **Fetching**: Missing pages are downloaded one at a time, ascending
//! 4. **Parsing**: Article rows are extracted; malformed rows are skipped
//! 5. **Output**: Pages are concatenated in order and returned as JSON
//!
//! The cache lives as long as the process and is never written to disk.

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cache;
mod cli;
mod error;
mod models;
mod routes;
mod scraper;
mod scrapers;
mod utils;

use cli::Cli;
use scraper::Scraper;
use scrapers::HttpFetcher;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("hn_scraper starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = args.scraper_config()?;
    let fetcher = HttpFetcher::new(&config)?;
    let scraper = Arc::new(Scraper::new(fetcher, config.max_pages));
    info!(
        base_url = %config.base_url,
        max_pages = config.max_pages,
        timeout = ?config.timeout,
        "Scraper initialized"
    );

    let app = routes::router(scraper);

    let bind_addr = args.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(%bind_addr, "Hacker News Scraper API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}
