use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use tracing::info;

use crate::config::{DataLocation, DataSource};
use crate::download::OpenFlightsClient;
use crate::graph::GraphStore;
use crate::schema::{Airline, Airport, GraphRecord, Properties, Route};

/// Nodes created per dataset by [`load_all`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadCounts {
    pub airports: u64,
    pub airlines: u64,
    pub routes: u64,
}

impl LoadCounts {
    pub fn total(&self) -> u64 {
        self.airports + self.airlines + self.routes
    }
}

/// Open a cleaned file for streaming
pub fn open_location(location: &DataLocation) -> Result<Box<dyn Read>> {
    match location {
        DataLocation::Path(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open: {:?}", path))?;
            Ok(Box::new(file))
        }
        DataLocation::Url(url) => {
            let client = OpenFlightsClient::new()?;
            Ok(Box::new(client.open(url)?))
        }
    }
}

/// Stream cleaned CSV rows into the store as nodes of `R::LABEL`
pub fn load_records<R: GraphRecord>(
    store: &mut impl GraphStore,
    input: impl Read,
    batch_size: usize,
    progress: &ProgressBar,
) -> Result<u64> {
    let mut reader = csv::Reader::from_reader(input);
    let mut batch: Vec<Properties> = Vec::with_capacity(batch_size);
    let mut count: u64 = 0;

    for (idx, record) in reader.deserialize::<R>().enumerate() {
        let record = record
            .with_context(|| format!("Failed to parse {} row {}", R::LABEL, idx + 1))?;
        batch.push(record.properties());

        if batch.len() >= batch_size {
            store.create_nodes(R::LABEL, &batch)?;
            count += batch.len() as u64;
            progress.set_position(count);
            batch.clear();
        }
    }

    if !batch.is_empty() {
        store.create_nodes(R::LABEL, &batch)?;
        count += batch.len() as u64;
    }

    progress.set_position(count);
    progress.finish_with_message(format!("{}: {} nodes", R::schema().name, count));

    Ok(count)
}

/// Load one dataset from its location in `source`
pub fn load_dataset<R: GraphRecord>(
    store: &mut impl GraphStore,
    source: &DataSource,
    batch_size: usize,
    progress: &ProgressBar,
) -> Result<u64> {
    let schema = R::schema();
    let location = source.locate(schema.clean_file);
    info!("Loading {} nodes from {}", R::LABEL, location);

    let input = open_location(&location)?;
    let count = load_records::<R>(store, input, batch_size, progress)
        .with_context(|| format!("Failed to load {}", location))?;

    info!(count, "Created {} nodes", R::LABEL);
    Ok(count)
}

/// Load airports, airlines and routes, in that order, with progress bars
pub fn load_all(
    store: &mut impl GraphStore,
    source: &DataSource,
    batch_size: usize,
) -> Result<LoadCounts> {
    let multi = MultiProgress::new();
    let style = ProgressStyle::default_bar()
        .template("{msg:30} [{bar:40.cyan/blue}] {pos}/{len}")
        .context("Invalid progress template")?
        .progress_chars("=>-");

    let bar = |location: DataLocation, name: &'static str| {
        let pb = multi.add(ProgressBar::new(row_count(&location)));
        pb.set_style(style.clone());
        pb.set_message(name);
        pb
    };

    let airports_pb = bar(source.locate(Airport::schema().clean_file), "airports");
    let airports = load_dataset::<Airport>(store, source, batch_size, &airports_pb)?;

    let airlines_pb = bar(source.locate(Airline::schema().clean_file), "airlines");
    let airlines = load_dataset::<Airline>(store, source, batch_size, &airlines_pb)?;

    let routes_pb = bar(source.locate(Route::schema().clean_file), "routes");
    let routes = load_dataset::<Route>(store, source, batch_size, &routes_pb)?;

    Ok(LoadCounts {
        airports,
        airlines,
        routes,
    })
}

/// Data rows in a local file, for sizing the progress bar; 0 if unknown
fn row_count(location: &DataLocation) -> u64 {
    match location {
        DataLocation::Path(path) => File::open(path)
            .map(|f| BufReader::new(f).lines().count().saturating_sub(1) as u64)
            .unwrap_or(0),
        DataLocation::Url(_) => 0,
    }
}
