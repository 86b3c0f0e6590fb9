//! Country statistics: repository counts per country.

use crate::client::ExecuteQuery;
use crate::error::Result;
use crate::progress::Progress;
use crate::report::{ColumnSpec, RowSet};
use crate::stats::queries;
use serde_json::json;

pub fn columns() -> ColumnSpec {
    ColumnSpec::new(
        "Countries",
        &[
            ("country_id", "country id"),
            ("num_repos", "number of repositories"),
        ],
    )
}

/// One row per country, in query result order
pub fn collect(db: &impl ExecuteQuery, progress: &mut Progress) -> Result<RowSet> {
    progress.section("Countries");
    let spec = columns();

    let countries = db.execute(queries::ALL_COUNTRIES)?;
    tracing::debug!(countries = countries.len(), "enumerated countries");

    let mut rows = RowSet::new();
    for index in 0..countries.len() {
        progress.tick(index + 1, countries.len());
        let country_id = countries.entity_attr(index, "__ID__")?.to_string();

        let num_repos = db.execute(&queries::repository_count(&country_id))?.scalar()?;

        rows.push(spec.row(vec![json!(country_id), json!(num_repos)])?);
    }
    Ok(rows)
}
