use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::info;

use crate::cleaner::{clean_all, CleanStats};
use crate::config::{DataDirs, DataSource};
use crate::graph::GraphStore;
use crate::indexes::{provision_indexes, INDEXES};
use crate::loader::{load_all, LoadCounts};
use crate::relations::{build_relationships, RelationshipCount};

/// What one pipeline run did
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub cleaned: Vec<CleanStats>,
    pub loaded: LoadCounts,
    pub indexes: u64,
    pub relationships: Vec<RelationshipCount>,
    pub elapsed: Duration,
}

/// Inputs of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions<'a> {
    pub dirs: &'a DataDirs,
    pub source: &'a DataSource,
    pub batch_size: usize,
}

/// Clean, load, index and link, in that order.
///
/// The first failure aborts the run; nodes already created stay in the graph.
pub fn run_pipeline(
    store: &mut impl GraphStore,
    options: &PipelineOptions<'_>,
) -> Result<PipelineReport> {
    let start = Instant::now();

    info!("Cleaning raw data in {:?}", options.dirs.raw_dir);
    let cleaned = clean_all(options.dirs)?;

    let loaded = load_all(store, options.source, options.batch_size)?;
    info!(total = loaded.total(), "Bulk load complete");

    provision_indexes(store)?;
    let indexes = store.count_indexes(INDEXES)?;

    let relationships = build_relationships(store)?;

    Ok(PipelineReport {
        cleaned,
        loaded,
        indexes,
        relationships,
        elapsed: start.elapsed(),
    })
}
