//! Cypher-over-REST query client.
//!
//! Queries are plain strings POSTed as `{"query": ...}` to the configured
//! endpoint; responses come back as `{"data": [[...], ...]}` where each row
//! wraps either an entity object or a single scalar.

use crate::config::Config;
use crate::error::{Result, StatsError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Wire body accepted by the Cypher REST endpoint
#[derive(Serialize)]
struct CypherStatement<'a> {
    query: &'a str,
}

/// Parsed response body. Each element of `data` is itself a one-element
/// sequence wrapping an entity record or a scalar aggregate.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResult {
    data: Vec<Value>,
}

impl QueryResult {
    pub fn new(data: Vec<Value>) -> Self {
        Self { data }
    }

    /// Number of result rows
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Extract a named attribute from the i-th matched entity, i.e.
    /// `data[i][0]["data"][attr]`.
    pub fn entity_attr(&self, index: usize, attr: &str) -> Result<&str> {
        let row = self.data.get(index).ok_or_else(|| StatsError::Response {
            message: format!("row {} missing from a result of {} rows", index, self.data.len()),
        })?;
        row.get(0)
            .and_then(|entity| entity.get("data"))
            .and_then(|attrs| attrs.get(attr))
            .and_then(Value::as_str)
            .ok_or_else(|| StatsError::Response {
                message: format!("row {index} carries no entity attribute '{attr}'"),
            })
    }

    /// Extract a single scalar aggregate, i.e. `data[0][0]`.
    pub fn scalar(&self) -> Result<i64> {
        self.data
            .first()
            .and_then(|row| row.get(0))
            .and_then(Value::as_i64)
            .ok_or_else(|| StatsError::Response {
                message: "expected a single scalar aggregate".to_string(),
            })
    }
}

/// Seam between the collectors and the database, so collectors can be
/// driven by canned results in tests.
pub trait ExecuteQuery {
    fn execute(&self, query: &str) -> Result<QueryResult>;
}

/// Blocking HTTP client for the Cypher REST endpoint
pub struct CypherClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl CypherClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(format!("archive-stats/{}", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.http_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: config.db_url.clone(),
        })
    }
}

impl ExecuteQuery for CypherClient {
    fn execute(&self, query: &str) -> Result<QueryResult> {
        tracing::debug!(query, "executing cypher query");
        let response = self
            .http
            .post(&self.endpoint)
            .json(&CypherStatement { query })
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Transport {
                message: format!("{} returned HTTP {}", self.endpoint, status),
            });
        }
        let body = response.text()?;
        let result: QueryResult = serde_json::from_str(&body)?;
        tracing::debug!(rows = result.len(), "query returned");
        Ok(result)
    }
}
