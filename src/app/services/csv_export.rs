//! CSV export of record sets
//!
//! Writes any serializable record slice verbatim: a header row of field
//! names, then one row per record, UTF-8.

use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::info;

use crate::{Error, Result};

/// Write `records` to `destination`, replacing any existing file.
///
/// Returns the number of rows written. An empty slice produces an empty file,
/// since field names come from the first record.
pub fn export_records<T: Serialize>(records: &[T], destination: &Path) -> Result<usize> {
    let file = File::create(destination).map_err(|e| {
        Error::io(
            format!("Failed to create export file {}", destination.display()),
            e,
        )
    })?;

    let file_label = destination.display().to_string();
    let mut writer = csv::Writer::from_writer(file);
    for record in records {
        writer.serialize(record).map_err(|e| {
            Error::csv_parsing(&file_label, "Failed to write record", Some(e))
        })?;
    }
    writer
        .flush()
        .map_err(|e| Error::io(format!("Failed to flush {}", file_label), e))?;

    info!("Exported {} records to {}", records.len(), file_label);
    Ok(records.len())
}
