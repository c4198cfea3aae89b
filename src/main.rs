//! # Tengri News
//!
//! A small scraping service that serves recent air-pollution news from
//! [Tengri News](https://tengrinews.kz) as JSON.
//!
//! ## Usage
//!
//! ```sh
//! tengri_news --port 8000
//! curl 'http://127.0.0.1:8000/news/air-pollution?limit=5'
//! ```
//!
//! ## Architecture
//!
//! Requests flow one way:
//! 1. **Query**: the HTTP handler applies the `limit` to the cached articles
//! 2. **Cache**: serves the last scrape for 30 minutes, refreshing lazily
//! 3. **Listing**: fetches the tag page and discovers article links
//! 4. **Details**: fetches each article page (4 at a time) for date, description, body and image

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cache;
mod cli;
mod client;
mod error;
mod models;
mod scrapers;
#[cfg(test)]
mod test_support;
mod utils;

use api::AppState;
use cache::NewsCache;
use cli::Cli;
use scrapers::tengri::TengriScraper;

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

    info!("tengri_news starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let client = client::build_client(Duration::from_secs(args.fetch_timeout_secs))?;
    let scraper = TengriScraper::new(client, args.source_config(), args.concurrency);
    info!(
        listing_url = %scraper.config().listing_url,
        concurrency = args.concurrency,
        "Scraper configured"
    );

    let ttl = Duration::from_secs(args.cache_ttl_minutes.saturating_mul(60));
    let state = AppState {
        cache: Arc::new(NewsCache::new(scraper, ttl)),
        default_limit: args.default_limit,
    };
    let app = api::router(state);

    let bind_addr = args.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, ttl_minutes = args.cache_ttl_minutes, "News server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
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
