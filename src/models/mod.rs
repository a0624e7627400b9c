// src/models/mod.rs

//! Domain models for the exporter.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod record;
mod resource;

// Re-export all public types
pub use config::{ApiConfig, Config, Credentials, OutputConfig, TimeConfig};
pub use record::{NormalizedRow, RawRecord};
pub use resource::ResourceSpec;
