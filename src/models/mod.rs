// src/models/mod.rs

//! Domain models for the race-data pipeline.
//!
//! All entities are request-scoped: they are produced by the normalizer
//! from a single upstream response and never persisted.

mod config;
mod dog;
mod meeting;
mod race;
mod site_index;

// Re-export all public types
pub use config::{Config, LoggingConfig, ServerConfig, SiteConfig, UpstreamConfig};
pub use dog::{Dog, FormEntry, ModelOutput, Sectional};
pub use meeting::Meeting;
pub use race::Race;
pub use site_index::{ChangeFrequency, EntryKind, IndexEntry, SiteIndex};
