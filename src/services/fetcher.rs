// src/services/fetcher.rs

//! Paginated fetcher service.
//!
//! Walks a business object endpoint page by page until the server runs out
//! of records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Credentials, RawRecord};
use crate::utils::http;

/// Source of record pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch up to `top` records of `resource` starting at offset `skip`.
    async fn fetch_page(&self, resource: &str, top: usize, skip: usize) -> Result<Vec<RawRecord>>;
}

/// OData response envelope. Only `value` is used.
#[derive(Debug, Deserialize)]
struct PageEnvelope {
    #[serde(default)]
    value: Vec<RawRecord>,
}

/// Ticketing API client.
pub struct ApiClient {
    client: Client,
    scheme: String,
    host: String,
}

impl ApiClient {
    /// Create a client for the host in `creds`.
    pub fn new(config: &ApiConfig, creds: &Credentials) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(config, creds)?,
            scheme: config.scheme.clone(),
            host: creds.host.clone(),
        })
    }
}

#[async_trait]
impl PageSource for ApiClient {
    async fn fetch_page(&self, resource: &str, top: usize, skip: usize) -> Result<Vec<RawRecord>> {
        let url = http::page_url(&self.scheme, &self.host, resource, top, skip)?;
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(AppError::status(resource, status.as_u16(), truncate(&text, 200)));
        }

        let envelope: PageEnvelope = serde_json::from_str(&text)?;
        Ok(envelope.value)
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Accumulates every page of a resource into one ordered list.
pub struct PaginatedFetcher<'a> {
    source: &'a dyn PageSource,
    page_size: usize,
    delay: Duration,
}

impl<'a> PaginatedFetcher<'a> {
    /// Create a fetcher. `page_size` must be positive.
    pub fn new(source: &'a dyn PageSource, page_size: usize, delay: Duration) -> Result<Self> {
        if page_size == 0 {
            return Err(AppError::validation("page size must be > 0"));
        }
        Ok(Self {
            source,
            page_size,
            delay,
        })
    }

    /// Create a fetcher from the API settings.
    pub fn from_config(source: &'a dyn PageSource, config: &ApiConfig) -> Result<Self> {
        Self::new(
            source,
            config.page_size,
            Duration::from_millis(config.page_delay_ms),
        )
    }

    /// Fetch all records of `resource`, logging progress with `label`.
    ///
    /// Stops on an empty page or on a page shorter than the page size. Any
    /// request failure aborts the whole fetch. An empty result is `Ok`.
    pub async fn fetch(&self, resource: &str, label: &str) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();
        let mut skip = 0;

        loop {
            log::info!("Fetching {} {} to {}...", label, skip, skip + self.page_size);
            let page = self.source.fetch_page(resource, self.page_size, skip).await?;

            if page.is_empty() {
                log::info!("No more {} to fetch", label);
                break;
            }

            let count = page.len();
            records.extend(page);
            log::info!("Retrieved {} {}. Total: {}", count, label, records.len());

            if count < self.page_size {
                break;
            }

            skip += self.page_size;
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        Ok(records)
    }
}
