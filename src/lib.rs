// src/lib.rs

//! Greyhound race-data pipeline.
//!
//! Proxies and normalizes an upstream race-data service, ranks runners by
//! model win probability, and builds a site index of every live track and
//! race.

pub mod error;
pub mod models;
pub mod pipeline;
#[cfg(feature = "server")]
pub mod server;
pub mod services;
pub mod utils;
