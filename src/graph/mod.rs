//! Graph database seam
//!
//! The pipeline talks to the graph through [`GraphStore`]. [`Neo4jStore`]
//! sends Cypher over Bolt; [`MemoryGraph`] keeps everything in process with
//! the same create/merge semantics and backs the tests.

pub mod cypher;
mod memory;
mod neo4j;

pub use memory::{MemoryGraph, MemoryNode};
pub use neo4j::Neo4jStore;

use anyhow::Result;

use crate::schema::{NodeLabel, Properties};

/// Index on one or more properties of a label
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSpec {
    pub name: &'static str,
    pub label: NodeLabel,
    pub properties: &'static [&'static str],
}

impl IndexSpec {
    pub const fn new(
        name: &'static str,
        label: NodeLabel,
        properties: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            properties,
        }
    }
}

/// Directed edge type derived from foreign-key equality:
/// `(from:{from}) -[:{name}]-> (to:{to})` where `from.{from_key} = to.{to_key}`
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipSpec {
    pub name: &'static str,
    pub from: NodeLabel,
    pub from_key: &'static str,
    pub to: NodeLabel,
    pub to_key: &'static str,
}

pub trait GraphStore {
    /// Create one node per attribute set, unconditionally
    fn create_nodes(&mut self, label: NodeLabel, batch: &[Properties]) -> Result<()>;

    /// Create the index unless one with the same name exists
    fn ensure_index(&mut self, index: &IndexSpec) -> Result<()>;

    /// Create every matching edge that does not exist yet
    fn merge_relationships(&mut self, rel: &RelationshipSpec) -> Result<()>;

    fn count_nodes(&mut self, label: NodeLabel) -> Result<u64>;

    fn count_relationships(&mut self, rel: &RelationshipSpec) -> Result<u64>;

    /// How many of `indexes` exist in the store; other indexes are ignored
    fn count_indexes(&mut self, indexes: &[IndexSpec]) -> Result<u64>;
}
