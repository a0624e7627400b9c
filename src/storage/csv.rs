//! Delimited text output.

use std::path::Path;

use crate::error::Result;
use crate::models::NormalizedRow;
use crate::storage::TableWriter;

/// Writes comma-separated files with a header row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl TableWriter for CsvWriter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write(&self, path: &Path, rows: &[NormalizedRow]) -> Result<()> {
        // Header is written up front so an empty table still gets one.
        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        writer.write_record(NormalizedRow::HEADERS)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
