// src/pipeline/export.rs

//! Ticket export pipeline.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::Result;
use crate::models::{Config, Credentials, NormalizedRow, ResourceSpec};
use crate::services::{ApiClient, PageSource, PaginatedFetcher, normalize_resource};
use crate::storage::LocalStorage;
use crate::utils::time::run_timestamp;

/// Normalized rows of one resource type.
#[derive(Debug, Clone)]
pub struct ResourceRows {
    pub spec: ResourceSpec,
    pub rows: Vec<NormalizedRow>,
}

/// Summary of an export run.
#[derive(Debug, Default)]
pub struct ExportOutcome {
    pub run_date: String,
    pub row_count: usize,
    /// Row count per resource tag, in processing order
    pub per_resource: Vec<(String, usize)>,
    pub files: Vec<PathBuf>,
}

/// Fetch and normalize every configured resource, in configuration order.
///
/// The first failing fetch aborts the run; later resources are not requested.
pub async fn collect_rows(
    source: &dyn PageSource,
    config: &Config,
    run_date: &str,
    tz: FixedOffset,
) -> Result<Vec<ResourceRows>> {
    let fetcher = PaginatedFetcher::from_config(source, &config.api)?;

    let mut batches = Vec::with_capacity(config.resources.len());
    for spec in &config.resources {
        let records = fetcher.fetch(&spec.endpoint, &spec.label).await?;
        let rows = normalize_resource(&records, spec, run_date, tz)?;
        log::info!("Normalized {} {}", rows.len(), spec.label);
        batches.push(ResourceRows {
            spec: spec.clone(),
            rows,
        });
    }
    Ok(batches)
}

/// Run the export against `source`, writing through `storage`.
///
/// `started_at` is the job start; it becomes the `RunDate` of every row.
pub async fn run_export(
    config: &Config,
    source: &dyn PageSource,
    storage: &LocalStorage,
    started_at: DateTime<Utc>,
) -> Result<ExportOutcome> {
    config.validate()?;
    let tz = config.time.offset()?;
    let run_date = run_timestamp(started_at, tz);

    let batches = collect_rows(source, config, &run_date, tz).await?;

    let mut outcome = ExportOutcome {
        run_date,
        per_resource: batches
            .iter()
            .map(|b| (b.spec.tag.clone(), b.rows.len()))
            .collect(),
        ..ExportOutcome::default()
    };
    outcome.row_count = outcome.per_resource.iter().map(|(_, n)| n).sum();

    let stem = &config.output.file_stem;
    if config.output.per_resource {
        for batch in &batches {
            if batch.rows.is_empty() {
                log::info!("No {} found", batch.spec.label);
                continue;
            }
            let files = storage.write_table(&format!("{stem}_{}", batch.spec.tag), &batch.rows)?;
            outcome.files.extend(files);
        }
    } else {
        let rows: Vec<NormalizedRow> = batches.into_iter().flat_map(|b| b.rows).collect();
        if rows.is_empty() {
            log::info!("No tickets found");
        } else {
            outcome.files = storage.write_table(stem, &rows)?;
        }
    }

    Ok(outcome)
}

/// Run the full export against the live API.
pub async fn run_pipeline(config: &Config) -> Result<ExportOutcome> {
    let started_at = Utc::now();
    config.validate()?;

    let creds = Credentials::from_env(&config.api)?;
    log::info!("Exporting tickets from {}", creds.host);

    let client = ApiClient::new(&config.api, &creds)?;
    let storage = LocalStorage::from_config(&config.output);

    run_export(config, &client, &storage, started_at).await
}
