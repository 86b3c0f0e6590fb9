//! Vocabulary statistics: concept, hierarchy and description counts per
//! controlled vocabulary.

use crate::client::ExecuteQuery;
use crate::error::Result;
use crate::progress::Progress;
use crate::report::{ColumnSpec, RowSet};
use crate::stats::queries;
use serde_json::json;

pub fn columns() -> ColumnSpec {
    ColumnSpec::new(
        "Vocabularies",
        &[
            ("voc_id", "vocabulary id"),
            ("num_concepts", "total number of concepts"),
            ("num_toplevel", "number of toplevel concepts"),
            ("num_endpoint", "number of endpoint concepts"),
            ("num_descr", "number of concept descriptions"),
            ("num_distinct_descr_lang", "number of distinct languages for descriptions"),
        ],
    )
}

/// One row per vocabulary, in query result order
pub fn collect(db: &impl ExecuteQuery, progress: &mut Progress) -> Result<RowSet> {
    progress.section("Vocabularies");
    let spec = columns();

    let vocs = db.execute(queries::ALL_VOCABULARIES)?;
    tracing::debug!(vocabularies = vocs.len(), "enumerated vocabularies");

    let mut rows = RowSet::new();
    for index in 0..vocs.len() {
        progress.tick(index + 1, vocs.len());
        let voc_id = vocs.entity_attr(index, "__ID__")?.to_string();

        let num_concepts = db.execute(&queries::concept_count(&voc_id))?.scalar()?;
        let num_endpoint = db
            .execute(&queries::endpoint_concept_count(&voc_id))?
            .scalar()?;
        let num_toplevel = db
            .execute(&queries::toplevel_concept_count(&voc_id))?
            .scalar()?;
        let num_descr = db
            .execute(&queries::concept_description_count(&voc_id))?
            .scalar()?;
        let num_distinct_descr_lang = db
            .execute(&queries::concept_description_language_count(&voc_id))?
            .scalar()?;

        rows.push(spec.row(vec![
            json!(voc_id),
            json!(num_concepts),
            json!(num_toplevel),
            json!(num_endpoint),
            json!(num_descr),
            json!(num_distinct_descr_lang),
        ])?);
    }
    Ok(rows)
}
