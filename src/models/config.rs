//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Race-data service connection settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Public site settings used for index publication
    #[serde(default)]
    pub site: SiteConfig,

    /// HTTP server bind settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply operational overrides from the environment.
    ///
    /// The upstream origin is not overridable here.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(timeout) = std::env::var("UPSTREAM_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.upstream.timeout_secs = secs;
            }
        }

        if let Ok(concurrent) = std::env::var("MAX_CONCURRENT") {
            if let Ok(n) = concurrent.parse() {
                self.upstream.max_concurrent = n;
            }
        }

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.upstream.user_agent.trim().is_empty() {
            return Err(AppError::validation("upstream.user_agent is empty"));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(AppError::validation("upstream.timeout_secs must be > 0"));
        }
        if self.upstream.max_concurrent == 0 {
            return Err(AppError::validation("upstream.max_concurrent must be > 0"));
        }
        self.upstream.origin()?;
        self.site.origin()?;
        if self.server.port == 0 {
            return Err(AppError::validation("server.port must be > 0"));
        }
        Ok(())
    }
}

/// Race-data service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base location every resource path is resolved against
    #[serde(default = "defaults::upstream_base_url")]
    pub base_url: String,

    /// User-Agent header for upstream requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds, applied uniformly to every call
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent schedule fetches while building the site index
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl UpstreamConfig {
    /// Parsed upstream origin, normalized to end with `/`.
    pub fn origin(&self) -> Result<Url> {
        parse_origin("upstream.base_url", &self.base_url)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::upstream_base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Public site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Public origin that index entries are published under
    #[serde(default = "defaults::site_base_url")]
    pub base_url: String,

    /// Cache window advertised for track schedules
    #[serde(default = "defaults::schedule_max_age")]
    pub schedule_max_age_secs: u64,
}

impl SiteConfig {
    pub fn origin(&self) -> Result<Url> {
        parse_origin("site.base_url", &self.base_url)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::site_base_url(),
            schedule_max_age_secs: defaults::schedule_max_age(),
        }
    }
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::host")]
    pub host: String,

    #[serde(default = "defaults::port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when no `RUST_LOG` is set
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output (server only)
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            json: false,
        }
    }
}

fn parse_origin(field: &str, raw: &str) -> Result<Url> {
    let mut normalized = raw.trim().to_string();
    if normalized.is_empty() {
        return Err(AppError::validation(format!("{field} is empty")));
    }
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized)?;
    if url.cannot_be_a_base() {
        return Err(AppError::validation(format!("{field} is not a base URL")));
    }
    Ok(url)
}

mod defaults {
    // Upstream defaults
    pub fn upstream_base_url() -> String {
        "http://46.225.29.192:8000/api/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; greyhound-predictor/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Site defaults
    pub fn site_base_url() -> String {
        "https://greyhound-predictor.com".into()
    }
    pub fn schedule_max_age() -> u64 {
        60
    }

    // Server defaults
    pub fn host() -> String {
        "0.0.0.0".into()
    }
    pub fn port() -> u16 {
        3000
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
}
