//! Service layer for the exporter.
//!
//! This module contains the business logic for:
//! - Paginated retrieval of raw records (`PaginatedFetcher`)
//! - Mapping raw records to export rows (`normalizer`)

pub mod fetcher;
pub mod normalizer;

pub use fetcher::{ApiClient, PageSource, PaginatedFetcher};
pub use normalizer::{normalize, normalize_record, normalize_resource};
