//! Report rendering: row sets, column specifications, CSV and JSON output.
//!
//! Rows are plain key/value maps; a [`ColumnSpec`] pins down both the row
//! schema and the human-readable rendering, so presentation never dictates
//! data shape. Each section is written as a self-contained chunk appended
//! to the same sink.

use crate::error::{Result, StatsError};
use serde_json::{Map, Value};
use std::io::Write;

/// One report row: column key to scalar value (string or integer)
pub type Row = Map<String, Value>;

/// Ordered rows for one report section, one per entity
pub type RowSet = Vec<Row>;

/// Supported report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Csv,
    Json,
}

/// Section title plus ordered (key, display label) pairs
pub struct ColumnSpec {
    title: String,
    columns: Vec<(String, String)>,
}

impl ColumnSpec {
    pub fn new(title: &str, columns: &[(&str, &str)]) -> Self {
        Self {
            title: title.to_string(),
            columns: columns
                .iter()
                .map(|(key, label)| (key.to_string(), label.to_string()))
                .collect(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Assemble a row from values given in column order
    pub fn row(&self, values: Vec<Value>) -> Result<Row> {
        if values.len() != self.columns.len() {
            return Err(StatsError::Schema {
                message: format!(
                    "section '{}' declares {} columns but got {} values",
                    self.title,
                    self.columns.len(),
                    values.len()
                ),
            });
        }
        let mut row = Row::new();
        for ((key, _), value) in self.columns.iter().zip(values) {
            row.insert(key.clone(), value);
        }
        Ok(row)
    }

    /// A row must carry exactly the declared keys, nothing more or less
    pub fn check_row(&self, row: &Row) -> Result<()> {
        for (key, _) in &self.columns {
            if !row.contains_key(key) {
                return Err(StatsError::Schema {
                    message: format!("section '{}' row is missing key '{}'", self.title, key),
                });
            }
        }
        if row.len() != self.columns.len() {
            return Err(StatsError::Schema {
                message: format!(
                    "section '{}' row carries {} keys, expected {}",
                    self.title,
                    row.len(),
                    self.columns.len()
                ),
            });
        }
        Ok(())
    }
}

/// Write one report section to the sink in the requested format
pub fn write_section(
    out: &mut dyn Write,
    format: Format,
    rows: &RowSet,
    spec: &ColumnSpec,
) -> Result<()> {
    match format {
        Format::Csv => write_csv(out, rows, spec),
        Format::Json => write_json(out, rows, spec),
    }
}

// Title line, label line, one line per row. Values are identifiers and
// integers, so no quoting or delimiter escaping is applied.
fn write_csv(out: &mut dyn Write, rows: &RowSet, spec: &ColumnSpec) -> Result<()> {
    writeln!(out, "{}", spec.title)?;

    let labels: Vec<&str> = spec
        .columns
        .iter()
        .map(|(_, label)| label.as_str())
        .collect();
    writeln!(out, "{}", labels.join(", "))?;

    for row in rows {
        let mut cells = Vec::with_capacity(spec.columns.len());
        for (key, _) in &spec.columns {
            let value = row.get(key).ok_or_else(|| StatsError::Schema {
                message: format!("section '{}' row is missing key '{}'", spec.title, key),
            })?;
            cells.push(display_value(value));
        }
        writeln!(out, "{}", cells.join(", "))?;
    }
    Ok(())
}

// One object per section: {"<title>": [row, ...]}, on a single line.
fn write_json(out: &mut dyn Write, rows: &RowSet, spec: &ColumnSpec) -> Result<()> {
    let mut wrapped = Map::new();
    wrapped.insert(
        spec.title.clone(),
        Value::Array(rows.iter().cloned().map(Value::Object).collect()),
    );
    writeln!(out, "{}", Value::Object(wrapped))?;
    Ok(())
}

/// Strings render bare; everything else renders as its JSON text
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn countries_spec() -> ColumnSpec {
        ColumnSpec::new(
            "Countries",
            &[
                ("country_id", "country id"),
                ("num_repos", "number of repositories"),
            ],
        )
    }

    #[test]
    fn row_assembles_values_in_column_order() {
        let spec = countries_spec();
        let row = spec.row(vec![json!("nl"), json!(3)]).unwrap();
        assert_eq!(row.get("country_id"), Some(&json!("nl")));
        assert_eq!(row.get("num_repos"), Some(&json!(3)));
    }

    #[test]
    fn row_rejects_arity_mismatch() {
        let spec = countries_spec();
        assert!(matches!(
            spec.row(vec![json!("nl")]),
            Err(StatsError::Schema { .. })
        ));
    }

    #[test]
    fn check_row_rejects_missing_and_extra_keys() {
        let spec = countries_spec();

        let mut row = Row::new();
        row.insert("country_id".to_string(), json!("nl"));
        assert!(spec.check_row(&row).is_err());

        row.insert("num_repos".to_string(), json!(3));
        assert!(spec.check_row(&row).is_ok());

        row.insert("stray".to_string(), json!(1));
        assert!(spec.check_row(&row).is_err());
    }

    #[test]
    fn integers_and_strings_render_bare() {
        assert_eq!(display_value(&json!("nl")), "nl");
        assert_eq!(display_value(&json!(12)), "12");
    }
}
