//! Service layer for the race-data pipeline.
//!
//! - Upstream race-data access (`Upstream`, `HttpUpstream`)
//! - Proxy façade over the upstream (`forward`)

#[cfg(test)]
pub(crate) mod fake;
mod proxy;
mod upstream;

pub use proxy::{BACKEND_ERROR, INTERNAL_ERROR, ProxyReply, forward};
pub use upstream::{HttpUpstream, TODAY_PATH, Upstream, race_path, track_path};
