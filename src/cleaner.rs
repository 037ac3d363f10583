use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::{self, File};
use std::io::{Read, Write};
use tracing::{info, warn};

use crate::config::DataDirs;
use crate::schema::{ColumnRole, DatasetSchema, ALL_DATASETS, SENTINEL};

/// Outcome of cleaning one dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanStats {
    pub dataset: &'static str,
    pub rows_read: u64,
    pub rows_written: u64,
    pub rows_dropped: u64,
    /// Fields rewritten to the sentinel or to a flag default
    pub values_replaced: u64,
}

/// Clean every dataset from the raw directory into the clean directory
pub fn clean_all(dirs: &DataDirs) -> Result<Vec<CleanStats>> {
    fs::create_dir_all(&dirs.clean_dir)
        .with_context(|| format!("Failed to create clean directory: {:?}", dirs.clean_dir))?;

    ALL_DATASETS
        .iter()
        .map(|schema| clean_file(schema, dirs))
        .collect()
}

/// Clean a single dataset file
pub fn clean_file(schema: &DatasetSchema, dirs: &DataDirs) -> Result<CleanStats> {
    let input_path = dirs.raw_path(schema.raw_file);
    let output_path = dirs.clean_path(schema.clean_file);

    let input = File::open(&input_path)
        .with_context(|| format!("Failed to open raw {} file: {:?}", schema.name, input_path))?;
    let output = File::create(&output_path)
        .with_context(|| format!("Failed to create: {:?}", output_path))?;

    let stats = clean_dataset(schema, input, output)
        .with_context(|| format!("Failed to clean {:?}", input_path))?;

    info!(
        dataset = schema.name,
        rows = stats.rows_written,
        dropped = stats.rows_dropped,
        replaced = stats.values_replaced,
        "Cleaned {:?}",
        output_path
    );

    Ok(stats)
}

/// Clean headerless raw CSV into headed CSV with the schema's kept columns
pub fn clean_dataset<R: Read, W: Write>(
    schema: &DatasetSchema,
    input: R,
    output: W,
) -> Result<CleanStats> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut writer = WriterBuilder::new().from_writer(output);

    writer
        .write_record(schema.kept_columns())
        .context("Failed to write header")?;

    let filter = match &schema.row_filter {
        Some(filter) => {
            let position = schema
                .position(filter.column)
                .with_context(|| format!("Unknown filter column: {}", filter.column))?;
            Some((position, filter.excluded_ids))
        }
        None => None,
    };

    let mut stats = CleanStats {
        dataset: schema.name,
        ..Default::default()
    };

    for (idx, record) in reader.records().enumerate() {
        let line = idx + 1;
        let record = record.with_context(|| format!("Failed to read line {}", line))?;
        stats.rows_read += 1;

        if record.len() > schema.raw_width() {
            bail!(
                "Line {} has {} fields, expected at most {}",
                line,
                record.len(),
                schema.raw_width()
            );
        }

        let fields = normalize_row(schema, &record, &mut stats.values_replaced);

        if let Some((position, excluded)) = filter {
            let id = fields[position].trim().parse::<i64>().ok();
            if id.is_some_and(|id| excluded.contains(&id)) {
                warn!(dataset = schema.name, line, "Dropping placeholder row");
                stats.rows_dropped += 1;
                continue;
            }
        }

        let kept: Vec<&str> = schema
            .columns
            .iter()
            .zip(&fields)
            .filter(|(col, _)| col.is_kept())
            .map(|(_, value)| value.as_str())
            .collect();

        writer
            .write_record(&kept)
            .with_context(|| format!("Failed to write line {}", line))?;
        stats.rows_written += 1;
    }

    writer.flush().context("Failed to flush cleaned output")?;
    Ok(stats)
}

/// Pad to the raw width, replace sentinel tokens, then apply flag defaults
fn normalize_row(schema: &DatasetSchema, record: &StringRecord, replaced: &mut u64) -> Vec<String> {
    schema
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let raw = record.get(i).unwrap_or("");

            let value = if schema.is_sentinel(raw) {
                *replaced += 1;
                SENTINEL
            } else {
                raw
            };

            match col.role {
                ColumnRole::Flag { default } if value != "Y" => {
                    if value != default && value != SENTINEL {
                        *replaced += 1;
                    }
                    default.to_string()
                }
                _ => value.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AIRLINES, AIRPORTS, ROUTES};

    fn clean(schema: &DatasetSchema, raw: &str) -> (String, CleanStats) {
        let mut out = Vec::new();
        let stats = clean_dataset(schema, raw.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_airport_row_drops_unused_columns() {
        let raw = "1,\"Test Intl\",\"Testville\",\"Testland\",\"TST\",\"TEST\",12.34,56.78,100,-5,\"A\",\"Test/Tz\",\"airport\",\"OurAirports\"\n";
        let (out, stats) = clean(&AIRPORTS, raw);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "AirportID,Name,City,Country,IATA,ICAO,Latitude,Longitude");
        assert_eq!(lines[1], "1,Test Intl,Testville,Testland,TST,TEST,12.34,56.78");
        assert_eq!(stats.rows_written, 1);
        assert_eq!(stats.values_replaced, 0);
    }

    #[test]
    fn test_sentinel_tokens_become_na() {
        let raw = "2,\"Nowhere\",\"\",\"Land\",\\N,\"-\",NAN,0.0,0,0,U,\\N,airport,OurAirports\n";
        let (out, stats) = clean(&AIRPORTS, raw);
        assert_eq!(out.lines().nth(1), Some("2,Nowhere,N/A,Land,N/A,N/A,N/A,0.0"));
        // Dropped columns are normalized too
        assert_eq!(stats.values_replaced, 5);
    }

    #[test]
    fn test_tokens_match_whole_field_only() {
        let raw = "3,\"Port-au-Prince\",\"Nan\",\"N\",\"NANA\",\"\",1,2,0,0,U,x,airport,OurAirports\n";
        let (out, _) = clean(&AIRPORTS, raw);
        assert_eq!(out.lines().nth(1), Some("3,Port-au-Prince,Nan,N,NANA,N/A,1,2"));
    }

    #[test]
    fn test_airline_placeholder_row_dropped() {
        let raw = "-1,\"Unknown\",\\N,\"-\",\"N/A\",\\N,\\N,\"Y\"\n\
                   1,\"Private flight\",\\N,\"-\",\"N/A\",\"\",\"\",\"Y\"\n\
                   2,\"135 Airways\",\\N,\"\",\"GNL\",\"GENERAL\",\"Unknown\",\"N\"\n";
        let (out, stats) = clean(&AIRLINES, raw);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "AirlineID,Name,IATA,ICAO,Callsign,Country,Active");
        assert_eq!(lines[1], "1,Private flight,N/A,N/A,N/A,N/A,Y");
        assert_eq!(lines[2], "2,135 Airways,N/A,GNL,GENERAL,N/A,N");
        assert_eq!(stats.rows_read, 3);
        assert_eq!(stats.rows_dropped, 1);
        assert!(!out.lines().any(|l| l.starts_with("-1,")));
    }

    #[test]
    fn test_unknown_kept_outside_airlines() {
        let raw = "4,\"Unknown\",\"Unknown\",\"Unknown\",,,1,2,0,0,U,x,airport,OurAirports\n";
        let (out, _) = clean(&AIRPORTS, raw);
        assert_eq!(out.lines().nth(1), Some("4,Unknown,Unknown,Unknown,N/A,N/A,1,2"));
    }

    #[test]
    fn test_route_codeshare_defaults_to_n() {
        let raw = "2B,410,AER,2965,KZN,2990,,0,CR2\n\
                   2B,410,ASF,2966,KZN,2990,Y,0,CR2\n\
                   ZM,\\N,FRU,2912,OSS,2913,\\N,0,734\n\
                   ZM,19016,OSS,2913,FRU,2912,maybe,1,\n";
        let (out, _) = clean(&ROUTES, raw);
        let codeshares: Vec<&str> = out
            .lines()
            .skip(1)
            .map(|l| l.split(',').nth(6).unwrap())
            .collect();
        assert_eq!(codeshares, vec!["N", "Y", "N", "N"]);
        assert_eq!(out.lines().nth(3), Some("ZM,N/A,FRU,2912,OSS,2913,N,0"));
    }

    #[test]
    fn test_short_row_is_padded() {
        let raw = "2B,410,AER,2965,KZN,2990\n";
        let (out, _) = clean(&ROUTES, raw);
        assert_eq!(out.lines().nth(1), Some("2B,410,AER,2965,KZN,2990,N,N/A"));
    }

    #[test]
    fn test_wide_row_is_rejected() {
        let raw = "2B,410,AER,2965,KZN,2990,,0,CR2,extra\n";
        let err = clean_dataset(&ROUTES, raw.as_bytes(), Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("Line 1"));
    }

    #[test]
    fn test_row_order_and_duplicates_preserved() {
        let raw = "2B,410,AER,2965,KZN,2990,,0,CR2\n\
                   2B,410,AER,2965,KZN,2990,,0,CR2\n\
                   2B,410,ASF,2966,KZN,2990,,0,CR2\n";
        let (out, stats) = clean(&ROUTES, raw);
        let lines: Vec<&str> = out.lines().skip(1).collect();
        assert_eq!(lines[0], lines[1]);
        assert!(lines[2].contains("ASF"));
        assert_eq!(stats.rows_written, 3);
    }
}
