//! Authority statistics: historical agents and their descriptions per
//! authoritative set.

use crate::client::ExecuteQuery;
use crate::error::Result;
use crate::progress::Progress;
use crate::report::{ColumnSpec, RowSet};
use crate::stats::queries;
use serde_json::json;

pub fn columns() -> ColumnSpec {
    ColumnSpec::new(
        "Authoritative Sets",
        &[
            ("set_id", "set id"),
            ("num_historicalAgents", "total number of historical agents"),
            ("num_descr", "number of agent descriptions"),
            ("num_distinct_descr_lang", "number of distinct languages for descriptions"),
        ],
    )
}

/// One row per authoritative set, in query result order
pub fn collect(db: &impl ExecuteQuery, progress: &mut Progress) -> Result<RowSet> {
    progress.section("Authoritative Sets");
    let spec = columns();

    let sets = db.execute(queries::ALL_AUTHORITATIVE_SETS)?;
    tracing::debug!(sets = sets.len(), "enumerated authoritative sets");

    let mut rows = RowSet::new();
    for index in 0..sets.len() {
        progress.tick(index + 1, sets.len());
        let set_id = sets.entity_attr(index, "__ID__")?.to_string();

        let num_historical_agents = db
            .execute(&queries::historical_agent_count(&set_id))?
            .scalar()?;
        let num_descr = db
            .execute(&queries::agent_description_count(&set_id))?
            .scalar()?;
        let num_distinct_descr_lang = db
            .execute(&queries::agent_description_language_count(&set_id))?
            .scalar()?;

        rows.push(spec.row(vec![
            json!(set_id),
            json!(num_historical_agents),
            json!(num_descr),
            json!(num_distinct_descr_lang),
        ])?);
    }
    Ok(rows)
}
