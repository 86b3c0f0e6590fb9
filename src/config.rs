//! Runtime configuration, built once at startup and passed by reference
//! into the client instead of living in process-wide state.

use crate::error::{Result, StatsError};

/// Default Cypher REST endpoint of a locally running graph database
pub const DEFAULT_DB_URL: &str = "http://localhost:7474/db/data/cypher";

/// Configuration for one reporting run
#[derive(Debug, Clone)]
pub struct Config {
    /// Cypher REST endpoint URL
    pub db_url: String,
    /// Per-request timeout in seconds. None means requests never time out,
    /// so a hung database hangs the run.
    pub http_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_url: DEFAULT_DB_URL.to_string(),
            http_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults. `.env` files are honored when the caller loaded them
    /// beforehand (see [`crate::load_env`]).
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("ARCHSTATS_DB_URL") {
            let url = url.trim().to_string();
            if url.is_empty() {
                return Err(StatsError::Config {
                    message: "ARCHSTATS_DB_URL is set but empty".to_string(),
                });
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                tracing::warn!(
                    "Database URL '{}' doesn't start with http:// or https://",
                    url
                );
            }
            config.db_url = url;
        }

        if let Ok(secs) = std::env::var("ARCHSTATS_HTTP_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| StatsError::Config {
                message: format!("ARCHSTATS_HTTP_TIMEOUT_SECS must be a number, got '{secs}'"),
            })?;
            config.http_timeout_secs = Some(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_cypher_endpoint() {
        let config = Config::default();
        assert_eq!(config.db_url, DEFAULT_DB_URL);
        assert!(config.http_timeout_secs.is_none());
    }

    // Single test for all env layering so parallel tests never race on the
    // same variables.
    #[test]
    fn env_overrides_are_applied() {
        unsafe {
            std::env::set_var("ARCHSTATS_DB_URL", "http://graph.example.org:7474/db/data/cypher");
            std::env::set_var("ARCHSTATS_HTTP_TIMEOUT_SECS", "15");
        }

        let config = Config::load().unwrap();
        assert_eq!(config.db_url, "http://graph.example.org:7474/db/data/cypher");
        assert_eq!(config.http_timeout_secs, Some(15));

        unsafe {
            std::env::set_var("ARCHSTATS_HTTP_TIMEOUT_SECS", "soon");
        }
        let result = Config::load();
        assert!(matches!(result, Err(StatsError::Config { .. })));

        unsafe {
            std::env::remove_var("ARCHSTATS_DB_URL");
            std::env::remove_var("ARCHSTATS_HTTP_TIMEOUT_SECS");
        }
    }
}
