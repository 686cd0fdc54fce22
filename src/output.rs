//! Output formatting and persistence.
//!
//! Supports pretty-printing to the log, JSON files, and CSV append of
//! projected records.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::record::EarthquakeRecord;
use crate::stats::FeedSummary;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a feed summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &FeedSummary) {
    debug!("{:#?}", summary);
}

/// Logs a feed summary as pretty-printed JSON.
pub fn print_json(summary: &FeedSummary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Writes `value` as pretty-printed JSON, replacing any existing file.
pub async fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let body = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "JSON written");
    Ok(())
}

/// Appends records as rows to a CSV file.
///
/// Writes the header row when the file is missing or empty. Blocking.
pub fn append_records(path: &Path, records: &[EarthquakeRecord]) -> Result<()> {
    let needs_header = std::fs::metadata(path).map_or(true, |m| m.len() == 0);
    debug!(path = %path.display(), needs_header, rows = records.len(), "Appending CSV records");

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut writer = WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
