//! greyhound HTTP server
//!
//! Serves the proxy, page views and sitemap over the live upstream.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use greyhound_predictor::{
    error::{AppError, Result},
    models::{Config, LoggingConfig},
    server::{AppState, router},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing; `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "greyhound_predictor={level},tower_http={level}",
            level = logging.level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    let mut config = Config::load_or_default(&config_path);
    config.apply_env_overrides();
    init_tracing(&config.logging);
    config.validate()?;

    tracing::info!("Upstream: {}", config.upstream.base_url);
    tracing::info!("Publishing site index under {}", config.site.base_url);

    let state = Arc::new(AppState::from_config(&config)?);
    let app = router(state);

    let host = config
        .server
        .host
        .parse()
        .map_err(|e| AppError::config(format!("server.host: {e}")))?;
    let addr = SocketAddr::new(host, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
