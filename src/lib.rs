//! travelmap - the travel journal's data pipeline
//!
//! Loads raw visited-place records from a JSON fixture (with a local
//! storage fallback), normalizes them, resolves place names to
//! coordinates through a cached and rate-limited Nominatim client and
//! drives an injected map widget to place markers and fit the viewport.

pub mod app;
pub mod args;
pub mod cached_http_client;
pub mod constants;
pub mod data;
pub mod json_extract;
pub mod map;
pub mod services;
