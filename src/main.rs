use std::sync::Arc;

use sports_ics::cache::FeedCache;
use sports_ics::config::Config;
use sports_ics::espn::EspnClient;
use sports_ics::handler;
use tracing::info;
use tracing_subscriber::EnvFilter;

type Error = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Structured JSON logging; RUST_LOG overrides the default level
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .try_init();

    let config = Config::from_env()?;
    let client = EspnClient::new(config.espn_base_url.clone(), config.upstream_timeout);
    let cache = Arc::new(FeedCache::new(client, config.refresh_interval));
    let app = handler::router(cache);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, base_url = %config.espn_base_url, "Serving calendar feeds");
    axum::serve(listener, app).await?;
    Ok(())
}
