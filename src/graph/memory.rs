use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::schema::{NodeLabel, Properties, SENTINEL};

use super::{GraphStore, IndexSpec, RelationshipSpec};

/// A node held by [`MemoryGraph`]
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryNode {
    pub label: NodeLabel,
    pub properties: BTreeMap<&'static str, String>,
}

impl MemoryNode {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(|v| v.as_str())
    }
}

/// In-process graph store with the same semantics as the Neo4j store
#[derive(Debug, Default)]
pub struct MemoryGraph {
    nodes: Vec<MemoryNode>,
    /// (from node, edge name, to node)
    edges: BTreeSet<(usize, &'static str, usize)>,
    indexes: BTreeMap<&'static str, IndexSpec>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes with `label`, in creation order
    pub fn nodes(&self, label: NodeLabel) -> impl Iterator<Item = &MemoryNode> {
        self.nodes.iter().filter(move |n| n.label == label)
    }

    /// Count `name` edges whose target node matches `predicate`
    pub fn incoming(
        &self,
        name: &str,
        predicate: impl Fn(&MemoryNode) -> bool,
    ) -> usize {
        self.edges
            .iter()
            .filter(|(_, edge, to)| *edge == name && predicate(&self.nodes[*to]))
            .count()
    }

    /// Index created under `name`, if any
    pub fn index(&self, name: &str) -> Option<&IndexSpec> {
        self.indexes.get(name)
    }

    fn node_ids(&self, label: NodeLabel) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.label == label)
            .map(|(id, _)| id)
    }
}

impl GraphStore for MemoryGraph {
    fn create_nodes(&mut self, label: NodeLabel, batch: &[Properties]) -> Result<()> {
        self.nodes.extend(batch.iter().map(|properties| MemoryNode {
            label,
            properties: properties.iter().cloned().collect(),
        }));
        Ok(())
    }

    fn ensure_index(&mut self, index: &IndexSpec) -> Result<()> {
        self.indexes
            .entry(index.name)
            .or_insert_with(|| index.clone());
        Ok(())
    }

    fn merge_relationships(&mut self, rel: &RelationshipSpec) -> Result<()> {
        let mut targets: HashMap<&str, Vec<usize>> = HashMap::new();
        for id in self.node_ids(rel.to) {
            if let Some(key) = self.nodes[id].get(rel.to_key) {
                targets.entry(key).or_default().push(id);
            }
        }

        let mut new_edges = Vec::new();
        for from in self.node_ids(rel.from) {
            let key = match self.nodes[from].get(rel.from_key) {
                Some(key) if key != SENTINEL => key,
                _ => continue,
            };
            for &to in targets.get(key).into_iter().flatten() {
                new_edges.push((from, rel.name, to));
            }
        }

        self.edges.extend(new_edges);
        Ok(())
    }

    fn count_nodes(&mut self, label: NodeLabel) -> Result<u64> {
        Ok(self.nodes(label).count() as u64)
    }

    fn count_relationships(&mut self, rel: &RelationshipSpec) -> Result<u64> {
        let count = self
            .edges
            .iter()
            .filter(|(from, name, to)| {
                *name == rel.name
                    && self.nodes[*from].label == rel.from
                    && self.nodes[*to].label == rel.to
            })
            .count();
        Ok(count as u64)
    }

    fn count_indexes(&mut self, indexes: &[IndexSpec]) -> Result<u64> {
        let count = indexes
            .iter()
            .filter(|i| self.indexes.contains_key(i.name))
            .count();
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexes::INDEXES;
    use crate::relations::{BEGIN_ROUTE, END_ROUTE};

    fn airport(id: &str) -> Properties {
        vec![("AirportID", id.to_string())]
    }

    fn route(source: &str, destination: &str) -> Properties {
        vec![
            ("SourceAirportID", source.to_string()),
            ("DestinationAirportID", destination.to_string()),
        ]
    }

    #[test]
    fn test_create_nodes_is_unconditional() {
        let mut graph = MemoryGraph::new();
        graph.create_nodes(NodeLabel::Airport, &[airport("1")]).unwrap();
        graph.create_nodes(NodeLabel::Airport, &[airport("1")]).unwrap();
        assert_eq!(graph.count_nodes(NodeLabel::Airport).unwrap(), 2);
        assert_eq!(graph.count_nodes(NodeLabel::Route).unwrap(), 0);
    }

    #[test]
    fn test_ensure_index_is_idempotent() {
        let mut graph = MemoryGraph::new();
        for index in INDEXES.iter().chain(INDEXES.iter()) {
            graph.ensure_index(index).unwrap();
        }
        assert_eq!(graph.count_indexes(INDEXES).unwrap(), INDEXES.len() as u64);
        assert_eq!(graph.index("airport_id").map(|i| i.label), Some(NodeLabel::Airport));
    }

    #[test]
    fn test_count_indexes_ignores_unlisted_indexes() {
        let mut graph = MemoryGraph::new();
        graph
            .ensure_index(&IndexSpec::new("node_label_lookup", NodeLabel::Route, &["Stops"]))
            .unwrap();
        graph.ensure_index(&INDEXES[0]).unwrap();

        assert_eq!(graph.count_indexes(INDEXES).unwrap(), 1);
        assert_eq!(graph.count_indexes(&INDEXES[1..]).unwrap(), 0);
    }

    #[test]
    fn test_merge_relationships() {
        let mut graph = MemoryGraph::new();
        graph
            .create_nodes(NodeLabel::Airport, &[airport("1"), airport("2")])
            .unwrap();
        graph
            .create_nodes(
                NodeLabel::Route,
                &[route("1", "2"), route("2", "1"), route("1", "99"), route("N/A", "2")],
            )
            .unwrap();

        graph.merge_relationships(&BEGIN_ROUTE).unwrap();
        graph.merge_relationships(&END_ROUTE).unwrap();
        assert_eq!(graph.count_relationships(&BEGIN_ROUTE).unwrap(), 3);
        assert_eq!(graph.count_relationships(&END_ROUTE).unwrap(), 3);

        graph.merge_relationships(&BEGIN_ROUTE).unwrap();
        assert_eq!(graph.count_relationships(&BEGIN_ROUTE).unwrap(), 3);

        let dangling = graph.incoming("END_ROUTE", |n| n.get("AirportID") == Some("99"));
        assert_eq!(dangling, 0);
    }

    #[test]
    fn test_sentinel_keys_never_match() {
        let mut graph = MemoryGraph::new();
        graph.create_nodes(NodeLabel::Airport, &[airport("N/A")]).unwrap();
        graph.create_nodes(NodeLabel::Route, &[route("N/A", "N/A")]).unwrap();

        graph.merge_relationships(&BEGIN_ROUTE).unwrap();
        graph.merge_relationships(&END_ROUTE).unwrap();
        assert_eq!(graph.count_relationships(&BEGIN_ROUTE).unwrap(), 0);
        assert_eq!(graph.count_relationships(&END_ROUTE).unwrap(), 0);
    }
}
