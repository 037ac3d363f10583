use anyhow::Result;
use tracing::info;

use crate::graph::{GraphStore, RelationshipSpec};
use crate::schema::NodeLabel;

pub static BEGIN_ROUTE: RelationshipSpec = RelationshipSpec {
    name: "BEGIN_ROUTE",
    from: NodeLabel::Airport,
    from_key: "AirportID",
    to: NodeLabel::Route,
    to_key: "SourceAirportID",
};

pub static END_ROUTE: RelationshipSpec = RelationshipSpec {
    name: "END_ROUTE",
    from: NodeLabel::Route,
    from_key: "DestinationAirportID",
    to: NodeLabel::Airport,
    to_key: "AirportID",
};

pub static FLOWN_BY: RelationshipSpec = RelationshipSpec {
    name: "FLOWN_BY",
    from: NodeLabel::Route,
    from_key: "AirlineID",
    to: NodeLabel::Airline,
    to_key: "AirlineID",
};

pub static ROUTE_RELATIONSHIPS: &[&RelationshipSpec] = &[&BEGIN_ROUTE, &END_ROUTE, &FLOWN_BY];

/// Edge count of one relationship type after building
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipCount {
    pub name: &'static str,
    pub edges: u64,
}

/// Connect routes to their airports and airline.
///
/// Unmatched keys produce no edge. Existing edges are left alone, so running
/// this twice yields the same counts as running it once.
pub fn build_relationships(store: &mut impl GraphStore) -> Result<Vec<RelationshipCount>> {
    let mut counts = Vec::with_capacity(ROUTE_RELATIONSHIPS.len());

    for rel in ROUTE_RELATIONSHIPS {
        info!("Linking {} -[:{}]-> {}...", rel.from, rel.name, rel.to);
        store.merge_relationships(rel)?;

        let edges = store.count_relationships(rel)?;
        info!(edges, "{} done", rel.name);
        counts.push(RelationshipCount {
            name: rel.name,
            edges,
        });
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraph;
    use crate::schema::Properties;

    fn props(pairs: &[(&'static str, &str)]) -> Properties {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_build_relationships() {
        let mut graph = MemoryGraph::new();
        graph
            .create_nodes(NodeLabel::Airport, &[props(&[("AirportID", "1")]), props(&[("AirportID", "2")])])
            .unwrap();
        graph
            .create_nodes(NodeLabel::Airline, &[props(&[("AirlineID", "10")])])
            .unwrap();
        graph
            .create_nodes(
                NodeLabel::Route,
                &[
                    props(&[("AirlineID", "10"), ("SourceAirportID", "1"), ("DestinationAirportID", "2")]),
                    props(&[("AirlineID", "N/A"), ("SourceAirportID", "2"), ("DestinationAirportID", "3")]),
                ],
            )
            .unwrap();

        let counts = build_relationships(&mut graph).unwrap();
        assert_eq!(
            counts,
            vec![
                RelationshipCount { name: "BEGIN_ROUTE", edges: 2 },
                RelationshipCount { name: "END_ROUTE", edges: 1 },
                RelationshipCount { name: "FLOWN_BY", edges: 1 },
            ]
        );

        assert_eq!(build_relationships(&mut graph).unwrap(), counts);
    }
}
