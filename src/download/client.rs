use anyhow::{Context, Result};
use indicatif::ProgressBar;
use reqwest::blocking::{Client, Response};
use std::io::{Read, Write};
use std::path::Path;

use crate::schema::DatasetSchema;

pub const OPENFLIGHTS_BASE_URL: &str =
    "https://raw.githubusercontent.com/jpatokal/openflights/master/data";

pub struct OpenFlightsClient {
    client: Client,
    base_url: String,
}

impl OpenFlightsClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(OPENFLIGHTS_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("flight-graph")
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Upstream URL of a dataset's raw file
    pub fn dataset_url(&self, schema: &DatasetSchema) -> String {
        format!("{}/{}", self.base_url, schema.upstream_file)
    }

    /// Start a GET and return the response body as a reader
    pub fn open(&self, url: &str) -> Result<Response> {
        self.client
            .get(url)
            .send()
            .with_context(|| format!("Failed to request {}", url))?
            .error_for_status()
            .with_context(|| format!("Server rejected request for {}", url))
    }

    /// Download a dataset's raw file to the given path
    pub fn download_dataset(
        &self,
        schema: &DatasetSchema,
        dest: &Path,
        progress: &ProgressBar,
    ) -> Result<u64> {
        let url = self.dataset_url(schema);
        let mut reader = self.open(&url)?;

        if let Some(total) = reader.content_length() {
            progress.set_length(total);
        }

        let mut file = std::fs::File::create(dest)
            .with_context(|| format!("Failed to create destination file: {:?}", dest))?;

        let mut downloaded: u64 = 0;
        let mut buffer = [0u8; 8192];

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .context("Failed to read from response")?;

            if bytes_read == 0 {
                break;
            }

            file.write_all(&buffer[..bytes_read])
                .context("Failed to write to file")?;

            downloaded += bytes_read as u64;
            progress.set_position(downloaded);
        }

        progress.finish_with_message(format!("{}: {}", schema.name, format_bytes(downloaded)));
        Ok(downloaded)
    }
}

/// Format a byte count as a human-readable string
fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_000_000 {
        format!("{:.1} MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1} KB", bytes as f64 / 1_000.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ROUTES;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1500), "1.5 KB");
        assert_eq!(format_bytes(2_400_000), "2.4 MB");
    }

    #[test]
    fn test_dataset_url() {
        let client = OpenFlightsClient::with_base_url("https://mirror.example/data/").unwrap();
        assert_eq!(client.dataset_url(&ROUTES), "https://mirror.example/data/routes.dat");

        let client = OpenFlightsClient::new().unwrap();
        assert!(client.dataset_url(&ROUTES).ends_with("/openflights/master/data/routes.dat"));
    }
}
