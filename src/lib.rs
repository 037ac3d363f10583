pub mod cleaner;
pub mod cli;
pub mod config;
pub mod download;
pub mod graph;
pub mod indexes;
pub mod loader;
pub mod pipeline;
pub mod relations;
pub mod schema;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use graph::{GraphStore, MemoryGraph, Neo4jStore};
