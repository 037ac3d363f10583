use anyhow::{Context, Result};
use neo4rs::{query, ConfigBuilder, Database, Graph, Query};
use std::collections::HashMap;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use crate::config::Neo4jConfig;
use crate::schema::{NodeLabel, Properties};

use super::{cypher, GraphStore, IndexSpec, RelationshipSpec};

/// Neo4j over Bolt.
///
/// The driver is async; the store owns a current-thread runtime and blocks on
/// each statement so callers stay synchronous. Every statement borrows a
/// pooled connection only for its own duration.
pub struct Neo4jStore {
    runtime: Runtime,
    graph: Graph,
}

impl Neo4jStore {
    /// Connect and verify the server answers before returning
    pub fn connect(config: &Neo4jConfig) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;

        let mut builder = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.username.as_str())
            .password(config.password.as_str());
        if let Some(database) = &config.database {
            builder = builder.db(Database::from(database.as_str()));
        }
        let graph_config = builder.build().context("Invalid Neo4j configuration")?;

        info!("Connecting to Neo4j at {}...", config.uri);
        let graph = runtime
            .block_on(Graph::connect(graph_config))
            .with_context(|| format!("Failed to connect to Neo4j at {}", config.uri))?;

        let store = Self { runtime, graph };
        store
            .run(query("RETURN 1"))
            .with_context(|| format!("Neo4j at {} is not reachable", config.uri))?;
        info!("Connected to Neo4j");

        Ok(store)
    }

    fn run(&self, statement: Query) -> Result<()> {
        self.runtime.block_on(self.graph.run(statement))?;
        Ok(())
    }

    /// Run a statement returning a single `total` column
    fn fetch_total(&self, statement: &str) -> Result<u64> {
        debug!("{}", statement);
        self.runtime.block_on(async {
            let mut rows = self.graph.execute(query(statement)).await?;
            let total = match rows.next().await? {
                Some(row) => row.get::<i64>("total")?,
                None => 0,
            };
            Ok::<_, anyhow::Error>(total.max(0) as u64)
        })
    }
}

impl GraphStore for Neo4jStore {
    fn create_nodes(&mut self, label: NodeLabel, batch: &[Properties]) -> Result<()> {
        let rows: Vec<HashMap<String, String>> = batch
            .iter()
            .map(|properties| {
                properties
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.clone()))
                    .collect()
            })
            .collect();

        let statement = cypher::create_nodes(label);
        debug!(rows = rows.len(), "{}", statement);
        self.run(query(&statement).param(cypher::ROWS_PARAM, rows))
            .with_context(|| format!("Failed to create {} nodes", label))
    }

    fn ensure_index(&mut self, index: &IndexSpec) -> Result<()> {
        let statement = cypher::create_index(index);
        debug!("{}", statement);
        self.run(query(&statement))
            .with_context(|| format!("Failed to create index {}", index.name))
    }

    fn merge_relationships(&mut self, rel: &RelationshipSpec) -> Result<()> {
        let statement = cypher::merge_relationships(rel);
        debug!("{}", statement);
        self.run(query(&statement))
            .with_context(|| format!("Failed to create {} relationships", rel.name))
    }

    fn count_nodes(&mut self, label: NodeLabel) -> Result<u64> {
        self.fetch_total(&cypher::count_nodes(label))
            .with_context(|| format!("Failed to count {} nodes", label))
    }

    fn count_relationships(&mut self, rel: &RelationshipSpec) -> Result<u64> {
        self.fetch_total(&cypher::count_relationships(rel))
            .with_context(|| format!("Failed to count {} relationships", rel.name))
    }

    fn count_indexes(&mut self, indexes: &[IndexSpec]) -> Result<u64> {
        self.fetch_total(&cypher::count_indexes(indexes))
            .context("Failed to count indexes")
    }
}
