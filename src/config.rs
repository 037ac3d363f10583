use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_RAW_DIR: &str = "dirty";
pub const DEFAULT_CLEAN_DIR: &str = "clean";
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Neo4j connection parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Neo4jConfig {
    pub uri: String,
    pub username: String,
    pub password: String,
    /// Server default database when unset
    pub database: Option<String>,
}

/// Where the loader reads cleaned files from
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Local(PathBuf),
    /// Base URL; file names are appended
    Remote(String),
}

/// A single cleaned file inside a [`DataSource`]
#[derive(Debug, Clone, PartialEq)]
pub enum DataLocation {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn locate(&self, file_name: &str) -> DataLocation {
        match self {
            DataSource::Local(dir) => DataLocation::Path(dir.join(file_name)),
            DataSource::Remote(base) => {
                DataLocation::Url(format!("{}/{}", base.trim_end_matches('/'), file_name))
            }
        }
    }
}

impl std::fmt::Display for DataLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataLocation::Path(path) => write!(f, "{}", path.display()),
            DataLocation::Url(url) => f.write_str(url),
        }
    }
}

/// Raw and cleaned data directories
#[derive(Debug, Clone, PartialEq)]
pub struct DataDirs {
    pub raw_dir: PathBuf,
    pub clean_dir: PathBuf,
}

impl DataDirs {
    pub fn new(raw_dir: impl Into<PathBuf>, clean_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            clean_dir: clean_dir.into(),
        }
    }

    pub fn raw_path(&self, file_name: &str) -> PathBuf {
        self.raw_dir.join(file_name)
    }

    pub fn clean_path(&self, file_name: &str) -> PathBuf {
        self.clean_dir.join(file_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub neo4j: Neo4jConfig,
    pub dirs: DataDirs,
    pub source: DataSource,
    /// Rows per bulk-create statement
    pub batch_size: usize,
}

impl Config {
    /// Build configuration from the process environment, reading `.env` first
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let neo4j = Neo4jConfig {
            uri: lookup("NEO4J_URI").context("NEO4J_URI must be set")?,
            username: lookup("NEO4J_USERNAME").context("NEO4J_USERNAME must be set")?,
            password: lookup("NEO4J_PASSWORD").context("NEO4J_PASSWORD must be set")?,
            database: lookup("NEO4J_DATABASE").filter(|db| !db.is_empty()),
        };

        let dirs = Self::dirs_from_lookup(&lookup);

        let source = match lookup("FLIGHTGRAPH_SOURCE_URL").filter(|url| !url.is_empty()) {
            Some(url) => DataSource::Remote(url),
            None => DataSource::Local(dirs.clean_dir.clone()),
        };

        let batch_size = match lookup("FLIGHTGRAPH_BATCH_SIZE") {
            Some(value) => {
                let size: usize = value
                    .parse()
                    .with_context(|| format!("FLIGHTGRAPH_BATCH_SIZE is not a number: {}", value))?;
                anyhow::ensure!(size > 0, "FLIGHTGRAPH_BATCH_SIZE must be greater than zero");
                size
            }
            None => DEFAULT_BATCH_SIZE,
        };

        Ok(Self {
            neo4j,
            dirs,
            source,
            batch_size,
        })
    }

    /// Data directories only; the `clean` and `fetch` commands need no database
    pub fn dirs_from_env() -> DataDirs {
        dotenvy::dotenv().ok();
        Self::dirs_from_lookup(|key| std::env::var(key).ok())
    }

    fn dirs_from_lookup<F>(lookup: F) -> DataDirs
    where
        F: Fn(&str) -> Option<String>,
    {
        DataDirs::new(
            lookup("FLIGHTGRAPH_RAW_DIR").unwrap_or_else(|| DEFAULT_RAW_DIR.to_string()),
            lookup("FLIGHTGRAPH_CLEAN_DIR").unwrap_or_else(|| DEFAULT_CLEAN_DIR.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const CREDENTIALS: &[(&str, &str)] = &[
        ("NEO4J_URI", "bolt://localhost:7687"),
        ("NEO4J_USERNAME", "neo4j"),
        ("NEO4J_PASSWORD", "secret"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(CREDENTIALS)).unwrap();
        assert_eq!(config.neo4j.uri, "bolt://localhost:7687");
        assert_eq!(config.neo4j.database, None);
        assert_eq!(config.dirs, DataDirs::new("dirty", "clean"));
        assert_eq!(config.source, DataSource::Local(PathBuf::from("clean")));
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_missing_credentials() {
        let err = Config::from_lookup(lookup(&CREDENTIALS[..2])).unwrap_err();
        assert!(err.to_string().contains("NEO4J_PASSWORD"));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.extend([
            ("NEO4J_DATABASE", "flights"),
            ("FLIGHTGRAPH_RAW_DIR", "/data/raw"),
            ("FLIGHTGRAPH_CLEAN_DIR", "/data/clean"),
            ("FLIGHTGRAPH_SOURCE_URL", "https://example.org/openflights/"),
            ("FLIGHTGRAPH_BATCH_SIZE", "250"),
        ]);
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.neo4j.database.as_deref(), Some("flights"));
        assert_eq!(config.dirs.raw_path("routes.csv"), PathBuf::from("/data/raw/routes.csv"));
        assert_eq!(
            config.source.locate("routes.csv"),
            DataLocation::Url("https://example.org/openflights/routes.csv".to_string())
        );
        assert_eq!(config.batch_size, 250);
    }

    #[test]
    fn test_invalid_batch_size() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("FLIGHTGRAPH_BATCH_SIZE", "lots"));
        assert!(Config::from_lookup(lookup(&pairs)).is_err());

        pairs.pop();
        pairs.push(("FLIGHTGRAPH_BATCH_SIZE", "0"));
        assert!(Config::from_lookup(lookup(&pairs)).is_err());
    }
}
