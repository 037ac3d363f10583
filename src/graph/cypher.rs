//! Cypher statement generation

use crate::schema::{NodeLabel, SENTINEL};

use super::{IndexSpec, RelationshipSpec};

/// Parameter holding the batch of rows for [`create_nodes`]
pub const ROWS_PARAM: &str = "rows";

/// Bulk-create one node per row of `$rows`
pub fn create_nodes(label: NodeLabel) -> String {
    format!(
        "UNWIND ${} AS row CREATE (n:{}) SET n = row",
        ROWS_PARAM, label
    )
}

/// Generate CREATE INDEX for a single or composite index
pub fn create_index(index: &IndexSpec) -> String {
    let properties: Vec<String> = index
        .properties
        .iter()
        .map(|p| format!("n.{}", p))
        .collect();

    format!(
        "CREATE INDEX {} IF NOT EXISTS FOR (n:{}) ON ({})",
        index.name,
        index.label,
        properties.join(", ")
    )
}

/// Create missing edges between nodes whose keys are equal and known
pub fn merge_relationships(rel: &RelationshipSpec) -> String {
    format!(
        "MATCH (a:{from}) \
         MATCH (b:{to}) \
         WHERE a.{from_key} = b.{to_key} AND a.{from_key} <> '{sentinel}' \
         MERGE (a)-[:{name}]->(b)",
        from = rel.from,
        to = rel.to,
        from_key = rel.from_key,
        to_key = rel.to_key,
        sentinel = SENTINEL,
        name = rel.name,
    )
}

pub fn count_nodes(label: NodeLabel) -> String {
    format!("MATCH (n:{}) RETURN count(n) AS total", label)
}

pub fn count_relationships(rel: &RelationshipSpec) -> String {
    format!(
        "MATCH (:{})-[e:{}]->(:{}) RETURN count(e) AS total",
        rel.from, rel.name, rel.to
    )
}

/// Count only the named indexes, not the server's built-in lookup indexes
pub fn count_indexes(indexes: &[IndexSpec]) -> String {
    let names: Vec<String> = indexes.iter().map(|i| format!("'{}'", i.name)).collect();
    format!(
        "SHOW INDEXES YIELD name WHERE name IN [{}] RETURN count(name) AS total",
        names.join(", ")
    )
}
