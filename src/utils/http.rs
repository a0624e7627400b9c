// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Credentials};

/// Header carrying the bare API key.
pub const API_KEY_HEADER: &str = "rest_api_key";

/// Create a configured asynchronous HTTP client.
///
/// The API key is sent both as `Authorization: rest_api_key=<key>` and as a
/// bare `rest_api_key` header on every request.
pub fn create_async_client(config: &ApiConfig, creds: &Credentials) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .default_headers(auth_headers(&creds.api_key)?)
        .build()?;
    Ok(client)
}

fn auth_headers(api_key: &str) -> Result<HeaderMap> {
    let value = |s: String| {
        HeaderValue::from_str(&s)
            .map(|mut v| {
                v.set_sensitive(true);
                v
            })
            .map_err(|e| AppError::config(format!("API key is not a valid header value: {e}")))
    };

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value(format!("rest_api_key={api_key}"))?);
    headers.insert(API_KEY_HEADER, value(api_key.to_string())?);
    Ok(headers)
}

/// Build the OData URL for one page of a business object.
pub fn page_url(scheme: &str, host: &str, resource: &str, top: usize, skip: usize) -> Result<Url> {
    let raw = format!("{scheme}://{host}/api/odata/businessobject/{resource}?$top={top}&$skip={skip}");
    Ok(Url::parse(&raw)?)
}
