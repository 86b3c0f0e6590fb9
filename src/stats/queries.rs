//! Cypher query builders for the archival graph.
//!
//! All identifier interpolation happens here so it stays auditable in one
//! place. The endpoint's query dialect has no parameter binding, so ids go
//! into the query text directly; they are graph-internal identifiers, not
//! untrusted input.

/// All controlled-vocabulary containers
pub const ALL_VOCABULARIES: &str =
    r#"START a = node:entities( __ISA__= "cvocVocabulary") RETURN a"#;

/// All authoritative sets
pub const ALL_AUTHORITATIVE_SETS: &str =
    r#"START a = node:entities( __ISA__= "authoritativeSet") RETURN a"#;

/// All country nodes
pub const ALL_COUNTRIES: &str = r#"START c = node:entities( __ISA__= "country") RETURN c"#;

/// Concepts belonging to a vocabulary
pub fn concept_count(voc_id: &str) -> String {
    format!(
        r#"START concept = node:entities( __ISA__= "cvocConcept") MATCH (concept)-[:inAuthoritativeSet]->(vocabulary) WHERE vocabulary.__ID__= "{voc_id}" RETURN COUNT(concept)"#
    )
}

/// Concepts with no narrower concept: the leaves of the hierarchy
pub fn endpoint_concept_count(voc_id: &str) -> String {
    format!(
        r#"START concept = node:entities( __ISA__= "cvocConcept") MATCH (concept)-[:inAuthoritativeSet]->(vocabulary) WHERE vocabulary.__ID__= "{voc_id}" AND NOT (concept)-[:narrower]->() RETURN COUNT(distinct(concept))"#
    )
}

/// Concepts that are nobody's narrower concept: the roots of the hierarchy
pub fn toplevel_concept_count(voc_id: &str) -> String {
    format!(
        r#"START concept = node:entities( __ISA__= "cvocConcept") MATCH (concept)-[:inAuthoritativeSet]->(vocabulary) WHERE vocabulary.__ID__= "{voc_id}" AND NOT (concept)<-[:narrower]-() RETURN COUNT(distinct(concept))"#
    )
}

/// Descriptions attached to any concept of a vocabulary
pub fn concept_description_count(voc_id: &str) -> String {
    format!(
        r#"START descr = node:entities( __ISA__= "cvocConceptDescription") MATCH (descr)-[:describes]->(concept)-[:inAuthoritativeSet]->(vocabulary) WHERE vocabulary.__ID__= "{voc_id}" RETURN COUNT(descr)"#
    )
}

/// Distinct language codes among a vocabulary's concept descriptions
pub fn concept_description_language_count(voc_id: &str) -> String {
    format!(
        r#"START descr = node:entities( __ISA__= "cvocConceptDescription") MATCH (descr)-[:describes]->(concept)-[:inAuthoritativeSet]->(vocabulary) WHERE vocabulary.__ID__= "{voc_id}" RETURN COUNT(distinct(descr.languageCode))"#
    )
}

/// Historical agents belonging to an authoritative set
pub fn historical_agent_count(set_id: &str) -> String {
    format!(
        r#"START hagent = node:entities( __ISA__= "historicalAgent") MATCH (hagent)-[:inAuthoritativeSet]->(aset) WHERE aset.__ID__= "{set_id}" RETURN COUNT(hagent)"#
    )
}

/// Descriptions describing a set's historical agents
pub fn agent_description_count(set_id: &str) -> String {
    format!(
        r#"START hagent = node:entities( __ISA__= "historicalAgent") MATCH (descr)-[:describes]->(hagent)-[:inAuthoritativeSet]->(aset) WHERE aset.__ID__= "{set_id}" RETURN COUNT(descr)"#
    )
}

/// Distinct language codes among a set's agent descriptions
pub fn agent_description_language_count(set_id: &str) -> String {
    format!(
        r#"START hagent = node:entities( __ISA__= "historicalAgent") MATCH (descr)-[:describes]->(hagent)-[:inAuthoritativeSet]->(aset) WHERE aset.__ID__= "{set_id}" RETURN COUNT(distinct(descr.languageCode))"#
    )
}

/// Distinct repositories linked to a country
pub fn repository_count(country_id: &str) -> String {
    format!(
        r#"START repos = node:entities( __ISA__= "repository") MATCH (repos)-[:hasCountry]->(country) WHERE country.__ID__= "{country_id}" RETURN COUNT(distinct(repos))"#
    )
}

/// The repository entities of a country
pub fn repositories_in_country(country_id: &str) -> String {
    format!(
        r#"START repos = node:entities( __ISA__= "repository") MATCH (repos)-[:hasCountry]->(country) WHERE country.__ID__= "{country_id}" RETURN repos"#
    )
}

/// Documents held directly by a repository, not nested under another document
pub fn toplevel_document_count(repo_id: &str) -> String {
    format!(
        r#"START repo = node:entities( __ID__= "{repo_id}") MATCH (doc)-[:heldBy]->(repo) RETURN COUNT(doc)"#
    )
}

/// All documents transitively under any of a repository's top-level documents
pub fn descendant_document_count(repo_id: &str) -> String {
    format!(
        r#"START repo = node:entities( __ID__= "{repo_id}") MATCH (doc)-[:childOf*]->(topdoc)-[:heldBy]->(repo) RETURN COUNT(distinct(doc))"#
    )
}

/// Descendant documents that have no children themselves
pub fn endpoint_document_count(repo_id: &str) -> String {
    format!(
        r#"START repo = node:entities( __ID__= "{repo_id}") MATCH (doc)-[:childOf*]->(topdoc)-[:heldBy]->(repo) WHERE NOT (doc)<-[:childOf]-() RETURN COUNT(distinct(doc))"#
    )
}

/// Descriptions attached to any descendant document of a repository
pub fn descendant_description_count(repo_id: &str) -> String {
    format!(
        r#"START repo = node:entities( __ID__= "{repo_id}") MATCH (descr)-[:describes]->(doc)-[:childOf*]->(topdoc)-[:heldBy]->(repo) RETURN COUNT(distinct(descr))"#
    )
}

/// Descriptions attached directly to a repository's top-level documents
pub fn toplevel_description_count(repo_id: &str) -> String {
    format!(
        r#"START repo = node:entities( __ID__= "{repo_id}") MATCH (descr)-[:describes]->(doc)-[:heldBy]->(repo) RETURN COUNT(distinct(descr))"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_interpolated_into_the_where_clause() {
        let query = concept_count("ehri-terms");
        assert!(query.contains(r#"vocabulary.__ID__= "ehri-terms""#));
        assert!(query.contains("cvocConcept"));
    }

    #[test]
    fn leaf_and_root_filters_point_in_opposite_directions() {
        assert!(endpoint_concept_count("v").contains("NOT (concept)-[:narrower]->()"));
        assert!(toplevel_concept_count("v").contains("NOT (concept)<-[:narrower]-()"));
    }

    #[test]
    fn repository_queries_start_from_the_id_index() {
        let query = toplevel_document_count("nl-r1");
        assert!(query.contains(r#"node:entities( __ID__= "nl-r1")"#));
        assert!(query.contains("[:heldBy]"));
    }

    #[test]
    fn descendant_queries_walk_child_of_transitively() {
        assert!(descendant_document_count("r").contains("[:childOf*]"));
        assert!(endpoint_document_count("r").contains("NOT (doc)<-[:childOf]-()"));
    }
}
