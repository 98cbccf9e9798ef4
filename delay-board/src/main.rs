use std::error::Error;
use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use delay_board::cache::{CacheConfig, DelayCache};
use delay_board::feed::{FeedClient, FeedConfig, MockFeed, VehicleFeed};
use delay_board::web::{AppState, create_router};

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());

    // A saved response file replaces the live feed (for development)
    if let Ok(path) = std::env::var("FEED_MOCK_FILE") {
        let feed = MockFeed::from_file(&path)?;
        info!(%path, vehicles = feed.len(), "using mock feed");
        return serve(feed, addr, &static_dir).await;
    }

    let mut feed_config = FeedConfig::new();
    if let Ok(url) = std::env::var("FEED_URL") {
        feed_config = feed_config.with_endpoint(url);
    }
    if let Ok(secs) = std::env::var("FEED_TIMEOUT_SECS") {
        feed_config = feed_config.with_timeout(secs.parse()?);
    }
    info!(endpoint = %feed_config.endpoint, "using live feed");

    let feed = FeedClient::new(feed_config)?;
    serve(feed, addr, &static_dir).await
}

async fn serve<F: VehicleFeed>(
    feed: F,
    addr: SocketAddr,
    static_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let cache = DelayCache::new(feed, CacheConfig::default());
    let app = create_router(AppState::new(cache), static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Delay board listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
