use archive_stats::client::{ExecuteQuery, QueryResult};
use archive_stats::error::{Result, StatsError};
use archive_stats::progress::Progress;
use archive_stats::report::{self, Format};
use archive_stats::stats::{countries, queries, repositories, vocabularies};
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;

/// Canned query results keyed by exact query text, with a log of every
/// query the collectors actually issued.
#[derive(Default)]
struct CannedGraph {
    responses: HashMap<String, QueryResult>,
    log: RefCell<Vec<String>>,
}

impl CannedGraph {
    fn insert(&mut self, query: impl Into<String>, result: QueryResult) {
        self.responses.insert(query.into(), result);
    }

    fn executed(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl ExecuteQuery for CannedGraph {
    fn execute(&self, query: &str) -> Result<QueryResult> {
        self.log.borrow_mut().push(query.to_string());
        self.responses
            .get(query)
            .cloned()
            .ok_or_else(|| StatsError::Response {
                message: format!("no canned response for query: {query}"),
            })
    }
}

fn entity_list(ids: &[&str]) -> QueryResult {
    QueryResult::new(
        ids.iter()
            .map(|id| json!([{ "data": { "__ID__": id } }]))
            .collect(),
    )
}

fn scalar(n: i64) -> QueryResult {
    QueryResult::new(vec![json!([n])])
}

fn quiet() -> Progress {
    Progress::new(false)
}

#[test]
fn empty_repository_yields_a_single_zero_row_and_no_descendant_queries() {
    let mut graph = CannedGraph::default();
    graph.insert(queries::toplevel_document_count("r-empty"), scalar(0));

    let rows = repositories::collect_one(&graph, "r-empty").unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.get("repo_id"), Some(&json!("r-empty")));
    for key in ["num_topdocs", "num_child_docs", "num_endpoint_docs", "num_descr"] {
        assert_eq!(row.get(key), Some(&json!(0)), "{key} should be zero");
    }

    // the expensive descendant queries must not have been issued
    assert_eq!(graph.executed().len(), 1);
}

#[test]
fn populated_repository_sums_toplevel_and_descendant_descriptions() {
    let mut graph = CannedGraph::default();
    graph.insert(queries::toplevel_document_count("r-full"), scalar(2));
    graph.insert(queries::descendant_document_count("r-full"), scalar(5));
    graph.insert(queries::endpoint_document_count("r-full"), scalar(3));
    graph.insert(queries::descendant_description_count("r-full"), scalar(4));
    graph.insert(queries::toplevel_description_count("r-full"), scalar(2));

    let rows = repositories::collect_one(&graph, "r-full").unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.get("num_topdocs"), Some(&json!(2)));
    assert_eq!(row.get("num_child_docs"), Some(&json!(5)));
    assert_eq!(row.get("num_endpoint_docs"), Some(&json!(3)));
    assert_eq!(row.get("num_descr"), Some(&json!(6)));
}

#[test]
fn country_report_drops_empty_repositories() {
    let mut graph = CannedGraph::default();
    graph.insert(queries::ALL_COUNTRIES, entity_list(&["nl", "us"]));
    graph.insert(
        queries::repositories_in_country("nl"),
        entity_list(&["r-full", "r-empty"]),
    );
    graph.insert(queries::repositories_in_country("us"), entity_list(&[]));

    graph.insert(queries::toplevel_document_count("r-full"), scalar(1));
    graph.insert(queries::descendant_document_count("r-full"), scalar(7));
    graph.insert(queries::endpoint_document_count("r-full"), scalar(4));
    graph.insert(queries::descendant_description_count("r-full"), scalar(3));
    graph.insert(queries::toplevel_description_count("r-full"), scalar(1));

    graph.insert(queries::toplevel_document_count("r-empty"), scalar(0));

    let rows = repositories::collect_by_country(&graph, &mut quiet()).unwrap();

    // only the populated repository survives, tagged with its country
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get("country_id"), Some(&json!("nl")));
    assert_eq!(row.get("repo_id"), Some(&json!("r-full")));
    assert!(rows.iter().all(|r| r.get("num_topdocs") != Some(&json!(0))));
}

#[test]
fn standalone_lookup_and_country_report_disagree_on_empty_repositories() {
    let mut graph = CannedGraph::default();
    graph.insert(queries::ALL_COUNTRIES, entity_list(&["nl"]));
    graph.insert(queries::repositories_in_country("nl"), entity_list(&["r-empty"]));
    graph.insert(queries::toplevel_document_count("r-empty"), scalar(0));

    let direct = repositories::collect_one(&graph, "r-empty").unwrap();
    assert_eq!(direct.len(), 1);

    let combined = repositories::collect_by_country(&graph, &mut quiet()).unwrap();
    assert!(combined.is_empty());
}

#[test]
fn vocabulary_collector_assembles_the_declared_columns() {
    let mut graph = CannedGraph::default();
    graph.insert(queries::ALL_VOCABULARIES, entity_list(&["ehri-terms"]));
    graph.insert(queries::concept_count("ehri-terms"), scalar(120));
    graph.insert(queries::endpoint_concept_count("ehri-terms"), scalar(80));
    graph.insert(queries::toplevel_concept_count("ehri-terms"), scalar(12));
    graph.insert(queries::concept_description_count("ehri-terms"), scalar(150));
    graph.insert(
        queries::concept_description_language_count("ehri-terms"),
        scalar(4),
    );

    let rows = vocabularies::collect(&graph, &mut quiet()).unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.get("voc_id"), Some(&json!("ehri-terms")));
    assert_eq!(row.get("num_concepts"), Some(&json!(120)));
    assert_eq!(row.get("num_toplevel"), Some(&json!(12)));
    assert_eq!(row.get("num_endpoint"), Some(&json!(80)));
    assert_eq!(row.get("num_descr"), Some(&json!(150)));
    assert_eq!(row.get("num_distinct_descr_lang"), Some(&json!(4)));
}

#[test]
fn no_vocabularies_still_renders_title_and_header() {
    let mut graph = CannedGraph::default();
    graph.insert(queries::ALL_VOCABULARIES, entity_list(&[]));

    let rows = vocabularies::collect(&graph, &mut quiet()).unwrap();
    assert!(rows.is_empty());

    let mut out = Vec::new();
    report::write_section(&mut out, Format::Csv, &rows, &vocabularies::columns()).unwrap();
    let csv = String::from_utf8(out).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert_eq!(csv.lines().next(), Some("Vocabularies"));
}

#[test]
fn countries_collector_counts_repositories_per_country() {
    let mut graph = CannedGraph::default();
    graph.insert(queries::ALL_COUNTRIES, entity_list(&["nl", "us"]));
    graph.insert(queries::repository_count("nl"), scalar(3));
    graph.insert(queries::repository_count("us"), scalar(12));

    let rows = countries::collect(&graph, &mut quiet()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("country_id"), Some(&json!("nl")));
    assert_eq!(rows[0].get("num_repos"), Some(&json!(3)));
    assert_eq!(rows[1].get("country_id"), Some(&json!("us")));
    assert_eq!(rows[1].get("num_repos"), Some(&json!(12)));
}

#[test]
fn reshaped_follow_up_response_fails_the_run() {
    let mut graph = CannedGraph::default();
    graph.insert(queries::ALL_COUNTRIES, entity_list(&["nl"]));
    // entity wrapper where a scalar aggregate was expected
    graph.insert(queries::repository_count("nl"), entity_list(&["bogus"]));

    let result = countries::collect(&graph, &mut quiet());
    assert!(matches!(result, Err(StatsError::Response { .. })));
}
