// src/server/mod.rs

//! HTTP surface: proxy, page views, site index.
//!
//! Handlers hold no state between requests beyond the immutable
//! [`AppState`]; every request drives its own upstream calls.

mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::error::Result;
use crate::models::Config;
use crate::services::{HttpUpstream, Upstream};

/// Immutable per-process context shared by all handlers.
pub struct AppState {
    pub upstream: Arc<dyn Upstream>,
    /// Public origin that site index entries are published under
    pub site_origin: Url,
    /// `max-age` advertised on track schedules
    pub schedule_max_age_secs: u64,
    /// Concurrent schedule fetches per index build
    pub max_concurrent: usize,
}

impl AppState {
    /// Build state with an HTTP upstream from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            upstream: Arc::new(HttpUpstream::from_config(&config.upstream)?),
            site_origin: config.site.origin()?,
            schedule_max_age_secs: config.site.schedule_max_age_secs,
            max_concurrent: config.upstream.max_concurrent,
        })
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/proxy/{*path}", get(routes::proxy))
        .route("/api/views/home", get(routes::home))
        .route("/api/views/track/{name}", get(routes::track))
        .route("/api/views/race/{id}", get(routes::race))
        .route("/sitemap.xml", get(routes::sitemap))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
