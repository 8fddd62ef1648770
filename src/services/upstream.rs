// src/services/upstream.rs

//! Upstream race-data client.
//!
//! Issues read-only GET requests against a fixed origin and hands back the
//! parsed JSON body. Nothing is memoized here: every call goes to origin.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::UpstreamConfig;
use crate::utils::http::create_async_client;
use crate::utils::url::resource_url;

/// Upstream resource path for today's meetings.
pub const TODAY_PATH: &str = "races/today";

/// Upstream resource path for a track's schedule.
pub fn track_path(track_id: &str) -> String {
    format!("track/{track_id}")
}

/// Upstream resource path for a race card.
pub fn race_path(race_id: &str) -> String {
    format!("race/{race_id}")
}

/// Read-only access to the race-data service.
///
/// Implementations return the parsed body on 2xx, [`AppError::Upstream`] on
/// any other status and [`AppError::Transport`] when the service could not be
/// reached or the body was not JSON. Parseable JSON of the wrong shape is not
/// an error at this layer.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// GET a relative resource path.
    async fn fetch(&self, path: &str) -> Result<Value>;
}

/// [`Upstream`] backed by a reqwest client.
#[derive(Clone)]
pub struct HttpUpstream {
    client: Client,
    origin: Url,
    deadline: Option<Duration>,
}

impl HttpUpstream {
    /// Create an upstream over an existing client and origin.
    pub fn new(client: Client, origin: Url) -> Self {
        Self {
            client,
            origin,
            deadline: None,
        }
    }

    /// Build the client and origin from configuration.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let client = create_async_client(config)?;
        Ok(Self::new(client, config.origin()?))
    }

    /// Override the client timeout for calls made through this handle.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(&self, path: &str) -> Result<Value> {
        let url = resource_url(&self.origin, path).map_err(|e| AppError::transport(path, e))?;
        log::debug!("GET {url}");

        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(deadline) = self.deadline {
            request = request.timeout(deadline);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::transport(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(status.as_u16(), path));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::transport(path, e))?;
        serde_json::from_slice(&body).map_err(|e| AppError::transport(path, e))
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use std::net::SocketAddr;

    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use serde_json::json;

    use super::*;

    async fn spawn_stub() -> SocketAddr {
        let app = Router::new()
            .route(
                "/api/races/today",
                get(|| async { axum::Json(json!({ "meetings": [] })) }),
            )
            .route("/api/race/missing", get(|| async { StatusCode::NOT_FOUND }))
            .route("/api/garbage", get(|| async { "<html>oops</html>" }))
            .route(
                "/api/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    axum::Json(json!({}))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn upstream_for(addr: SocketAddr) -> HttpUpstream {
        let config = UpstreamConfig {
            base_url: format!("http://{addr}/api/"),
            timeout_secs: 5,
            ..UpstreamConfig::default()
        };
        HttpUpstream::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success_returns_json() {
        let addr = spawn_stub().await;
        let body = upstream_for(addr).fetch(TODAY_PATH).await.unwrap();
        assert_eq!(body, json!({ "meetings": [] }));
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_upstream_error() {
        let addr = spawn_stub().await;
        let err = upstream_for(addr)
            .fetch(&race_path("missing"))
            .await
            .unwrap_err();
        match err {
            AppError::Upstream { status, path } => {
                assert_eq!(status, 404);
                assert_eq!(path, "race/missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_unparsable_body_is_transport_error() {
        let addr = spawn_stub().await;
        let err = upstream_for(addr).fetch("garbage").await.unwrap_err();
        assert!(matches!(err, AppError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_transport_error() {
        let addr = spawn_stub().await;
        let upstream = upstream_for(addr).with_deadline(Duration::from_millis(100));
        let err = upstream.fetch("slow").await.unwrap_err();
        assert!(matches!(err, AppError::Transport { ref path, .. } if path == "slow"));
    }

    #[tokio::test]
    async fn test_fetch_refused_connection_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = upstream_for(addr).fetch(TODAY_PATH).await.unwrap_err();
        assert!(matches!(err, AppError::Transport { .. }));
    }
}
