//! Storage abstractions for exported tables.
//!
//! Every table is written to a temp sibling and renamed into place, so a
//! failed run never leaves a half-written file behind.
//!
//! ## Directory Structure
//!
//! ```text
//! {dir}/
//! ├── tickets.csv                # combined mode
//! ├── tickets.xlsx
//! ├── tickets_incident.csv       # per-resource mode
//! └── tickets_incident.xlsx
//! ```

pub mod csv;
pub mod xlsx;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{NormalizedRow, OutputConfig};

pub use self::csv::CsvWriter;
pub use self::xlsx::XlsxWriter;

/// A tabular file format.
pub trait TableWriter: Send + Sync {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    /// Write a header row and one row per record to `path`.
    fn write(&self, path: &Path, rows: &[NormalizedRow]) -> Result<()>;
}

/// Local filesystem storage backend.
pub struct LocalStorage {
    root_dir: PathBuf,
    writers: Vec<Box<dyn TableWriter>>,
}

impl LocalStorage {
    /// Create a LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, writers: Vec<Box<dyn TableWriter>>) -> Self {
        Self {
            root_dir: root_dir.into(),
            writers,
        }
    }

    /// Create a LocalStorage with the writers enabled in `config`.
    pub fn from_config(config: &OutputConfig) -> Self {
        let mut writers: Vec<Box<dyn TableWriter>> = Vec::new();
        if config.csv {
            writers.push(Box::new(CsvWriter));
        }
        if config.xlsx {
            writers.push(Box::new(XlsxWriter::new(&config.sheet_name)));
        }
        Self::new(&config.dir, writers)
    }

    /// Write `rows` once per writer under `stem`, returning the written paths.
    pub fn write_table(&self, stem: &str, rows: &[NormalizedRow]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.root_dir)?;

        let mut written = Vec::with_capacity(self.writers.len());
        for writer in &self.writers {
            let path = self.root_dir.join(format!("{stem}.{}", writer.extension()));
            let tmp = self
                .root_dir
                .join(format!("{stem}.{}.tmp", writer.extension()));

            if let Err(e) = writer.write(&tmp, rows) {
                let _ = fs::remove_file(&tmp);
                return Err(e);
            }
            fs::rename(&tmp, &path)?;

            log::info!(
                "Successfully exported {} tickets to {}",
                rows.len(),
                path.display()
            );
            written.push(path);
        }
        Ok(written)
    }
}
