//! archive-stats: one-shot statistics reports over a Cypher REST endpoint.
//!
//! Queries an archival graph database for counts describing its contents
//! (vocabularies, authoritative sets, countries, repositories, documents)
//! and renders them as CSV or JSON report sections. The whole run is
//! synchronous and sequential; every query is a blocking round-trip.

pub mod client;
pub mod config;
pub mod error;
pub mod progress;
pub mod report;
pub mod stats;

// Load env from a simple, standardized location resolution.
// This uses dotenvy::dotenv() which loads .env if present and silently ignores if missing.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}
