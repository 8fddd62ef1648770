// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::Result;
use crate::models::UpstreamConfig;

/// Create a configured asynchronous HTTP client.
///
/// The timeout covers the whole request (connect, send, body) and applies to
/// every upstream call made through the client.
pub fn create_async_client(config: &UpstreamConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}
