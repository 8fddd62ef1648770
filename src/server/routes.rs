//! Route handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::pipeline::{SiteIndexBuilder, load_home, load_race, load_track};
use crate::server::AppState;
use crate::services::forward;
use crate::utils::url::join_segments;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/proxy/{*path}`: relay an upstream resource.
pub async fn proxy(State(state): State<Arc<AppState>>, Path(path): Path<String>) -> Response {
    let path = join_segments(path.split('/'));
    let reply = forward(state.upstream.as_ref(), &path).await;

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(CACHE_CONTROL, HeaderValue::from_static("no-store"))],
        Json(reply.body),
    )
        .into_response()
}

pub async fn home(State(state): State<Arc<AppState>>) -> Response {
    Json(load_home(state.upstream.as_ref()).await).into_response()
}

pub async fn track(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> Response {
    let view = load_track(state.upstream.as_ref(), &name).await;
    let cache = format!("public, max-age={}", state.schedule_max_age_secs);

    let mut response = Json(view).into_response();
    if let Ok(value) = HeaderValue::from_str(&cache) {
        response.headers_mut().insert(CACHE_CONTROL, value);
    }
    response
}

pub async fn race(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    Json(load_race(state.upstream.as_ref(), &id).await).into_response()
}

/// `GET /sitemap.xml`: rebuilt from the live upstream on every request.
pub async fn sitemap(State(state): State<Arc<AppState>>) -> Response {
    let index = SiteIndexBuilder::new(state.upstream.as_ref(), &state.site_origin)
        .with_concurrency(state.max_concurrent)
        .build()
        .await;

    (
        [(CONTENT_TYPE, HeaderValue::from_static("application/xml"))],
        index.to_xml(),
    )
        .into_response()
}
