// src/services/proxy.rs

//! Pass-through proxy over the upstream.
//!
//! Relays the upstream body on success and collapses every failure into one
//! of two generic error bodies, so upstream error payloads never reach the
//! caller.

use serde_json::{Value, json};

use crate::services::Upstream;

/// Body message when the upstream answered with a non-2xx status.
pub const BACKEND_ERROR: &str = "Backend error";

/// Body message when the upstream could not be reached or read.
pub const INTERNAL_ERROR: &str = "Internal Server Error fetching from backend";

/// Status and JSON body to relay to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: u16,
    pub body: Value,
}

impl ProxyReply {
    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }
}

/// Forward `path` verbatim to the upstream and translate the outcome.
pub async fn forward<U>(upstream: &U, path: &str) -> ProxyReply
where
    U: Upstream + ?Sized,
{
    match upstream.fetch(path).await {
        Ok(body) => ProxyReply { status: 200, body },
        Err(e) => match e.upstream_status() {
            Some(status) => {
                log::error!("Backend returned {} for {}", status, path);
                ProxyReply::error(status, BACKEND_ERROR)
            }
            None => {
                log::error!("Proxy request error for {}: {}", path, e);
                ProxyReply::error(500, INTERNAL_ERROR)
            }
        },
    }
}
