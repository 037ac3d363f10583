use anyhow::Result;
use tracing::info;

use crate::graph::{GraphStore, IndexSpec};
use crate::schema::NodeLabel;

/// Lookup indexes backing the relationship matches
pub static INDEXES: &[IndexSpec] = &[
    IndexSpec::new("airport_id", NodeLabel::Airport, &["AirportID"]),
    IndexSpec::new("airline_id", NodeLabel::Airline, &["AirlineID"]),
    IndexSpec::new(
        "route_endpoints",
        NodeLabel::Route,
        &["SourceAirportID", "DestinationAirportID", "AirlineID"],
    ),
];

/// Ensure every index exists; safe to call repeatedly
pub fn provision_indexes(store: &mut impl GraphStore) -> Result<()> {
    for index in INDEXES {
        store.ensure_index(index)?;
        info!(label = %index.label, "Index {} ready", index.name);
    }
    Ok(())
}
