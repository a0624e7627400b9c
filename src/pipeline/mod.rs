//! Pipeline entry points for exporter operations.
//!
//! - `run_pipeline`: Fetch every resource from the live API and write the tables
//! - `run_export`: Same, against any page source and storage

pub mod export;

pub use export::{ExportOutcome, ResourceRows, collect_rows, run_export, run_pipeline};
