pub mod client;

pub use client::*;

use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::schema::ALL_DATASETS;

/// Download the raw OpenFlights files into `raw_dir`.
///
/// Files already on disk are kept unless `force` is set. Returns the number
/// of files downloaded.
pub fn fetch_raw_data(raw_dir: &Path, force: bool) -> Result<usize> {
    fs::create_dir_all(raw_dir)
        .with_context(|| format!("Failed to create raw directory: {:?}", raw_dir))?;

    let client = OpenFlightsClient::new()?;
    let multi = MultiProgress::new();
    let style = ProgressStyle::default_bar()
        .template("{msg:12} [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
        .context("Invalid progress template")?
        .progress_chars("=>-");

    let mut fetched = 0;
    for schema in ALL_DATASETS {
        let dest = raw_dir.join(schema.raw_file);
        if dest.exists() && !force {
            info!(dataset = schema.name, "Using existing {:?}", dest);
            continue;
        }

        let pb = multi.add(ProgressBar::new(0));
        pb.set_style(style.clone());
        pb.set_message(schema.name);

        let bytes = client.download_dataset(schema, &dest, &pb)?;
        info!(dataset = schema.name, bytes, "Downloaded {:?}", dest);
        fetched += 1;
    }

    Ok(fetched)
}
