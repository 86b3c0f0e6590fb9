//! Repository statistics: document hierarchy counts per repository, both
//! as a standalone lookup and grouped by country.

use crate::client::ExecuteQuery;
use crate::error::Result;
use crate::progress::Progress;
use crate::report::{ColumnSpec, RowSet};
use crate::stats::queries;
use serde_json::{Value, json};

pub fn columns() -> ColumnSpec {
    ColumnSpec::new(
        "Repositories",
        &[
            ("repo_id", "repository id"),
            ("num_topdocs", "number of toplevel documents"),
            ("num_child_docs", "number of descendants of toplevel documents"),
            ("num_endpoint_docs", "number of endpoint documents"),
            ("num_descr", "number of document descriptions"),
        ],
    )
}

pub fn by_country_columns() -> ColumnSpec {
    ColumnSpec::new(
        "Repositories",
        &[
            ("country_id", "country id"),
            ("repo_id", "repository id"),
            ("num_topdocs", "number of toplevel documents"),
            ("num_child_docs", "number of descendants of toplevel documents"),
            ("num_endpoint_docs", "number of endpoint documents"),
            ("num_descr", "number of document descriptions"),
        ],
    )
}

/// Document statistics for a single repository.
///
/// A repository with no top-level documents yields one zero-filled row and
/// skips the descendant queries, which are the expensive ones.
pub fn collect_one(db: &impl ExecuteQuery, repo_id: &str) -> Result<RowSet> {
    let spec = columns();

    let num_topdocs = db
        .execute(&queries::toplevel_document_count(repo_id))?
        .scalar()?;

    let row = if num_topdocs > 0 {
        let num_child_docs = db
            .execute(&queries::descendant_document_count(repo_id))?
            .scalar()?;
        let num_endpoint_docs = db
            .execute(&queries::endpoint_document_count(repo_id))?
            .scalar()?;
        let num_child_descr = db
            .execute(&queries::descendant_description_count(repo_id))?
            .scalar()?;
        let num_top_descr = db
            .execute(&queries::toplevel_description_count(repo_id))?
            .scalar()?;

        spec.row(vec![
            json!(repo_id),
            json!(num_topdocs),
            json!(num_child_docs),
            json!(num_endpoint_docs),
            json!(num_top_descr + num_child_descr),
        ])?
    } else {
        spec.row(vec![json!(repo_id), json!(0), json!(0), json!(0), json!(0)])?
    };

    Ok(vec![row])
}

/// Repository statistics grouped by country.
///
/// Repositories holding no top-level documents are left out of this
/// combined report, unlike [`collect_one`] which reports a zero row for
/// them when queried directly.
pub fn collect_by_country(db: &impl ExecuteQuery, progress: &mut Progress) -> Result<RowSet> {
    progress.section("Repositories");
    let spec = by_country_columns();

    let countries = db.execute(queries::ALL_COUNTRIES)?;
    tracing::debug!(countries = countries.len(), "enumerated countries for repositories");

    let mut rows = RowSet::new();
    for index in 0..countries.len() {
        progress.tick(index + 1, countries.len());
        let country_id = countries.entity_attr(index, "__ID__")?.to_string();

        let repos = db.execute(&queries::repositories_in_country(&country_id))?;
        for repo_index in 0..repos.len() {
            progress.tick(index + 1, countries.len());
            let repo_id = repos.entity_attr(repo_index, "__ID__")?.to_string();

            for mut row in collect_one(db, &repo_id)? {
                let num_topdocs = row.get("num_topdocs").and_then(Value::as_i64).unwrap_or(0);
                if num_topdocs > 0 {
                    row.insert("country_id".to_string(), json!(country_id.clone()));
                    spec.check_row(&row)?;
                    rows.push(row);
                }
            }
        }
    }
    Ok(rows)
}
