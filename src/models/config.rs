//! Application configuration structures.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ResourceSpec;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API endpoint and paging settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Resource types to export, in processing order
    #[serde(default = "ResourceSpec::defaults")]
    pub resources: Vec<ResourceSpec>,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Reference timezone settings
    #[serde(default)]
    pub time: TimeConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.as_ref().display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Config load failed from {:?}: {}. Using defaults.",
                    path.as_ref(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.scheme.trim().is_empty() {
            return Err(AppError::validation("api.scheme is empty"));
        }
        if self.api.page_size == 0 {
            return Err(AppError::validation("api.page_size must be > 0"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.resources.is_empty() {
            return Err(AppError::validation("No resources defined"));
        }
        for spec in &self.resources {
            if spec.endpoint.trim().is_empty()
                || spec.tag.trim().is_empty()
                || spec.id_field.trim().is_empty()
            {
                return Err(AppError::validation(format!(
                    "Resource {:?} needs an endpoint, tag and id_field",
                    spec.endpoint
                )));
            }
        }
        if self.output.xlsx {
            validate_sheet_name(&self.output.sheet_name)?;
        }
        if !self.output.csv && !self.output.xlsx {
            return Err(AppError::validation(
                "At least one of output.csv and output.xlsx must be enabled",
            ));
        }
        self.time.offset()?;
        Ok(())
    }
}

/// Worksheet titles are at most 31 characters, not blank, and avoid `[]:*?/\`.
fn validate_sheet_name(name: &str) -> Result<()> {
    const FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

    if name.trim().is_empty() {
        return Err(AppError::validation("output.sheet_name is empty"));
    }
    if name.chars().count() > 31 {
        return Err(AppError::validation(format!(
            "output.sheet_name {name:?} is longer than 31 characters"
        )));
    }
    if name.contains(FORBIDDEN) {
        return Err(AppError::validation(format!(
            "output.sheet_name {name:?} contains one of []:*?/\\"
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(AppError::validation(format!(
            "output.sheet_name {name:?} cannot start or end with an apostrophe"
        )));
    }
    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            resources: ResourceSpec::defaults(),
            output: OutputConfig::default(),
            time: TimeConfig::default(),
        }
    }
}

/// HTTP client and paging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// URL scheme for the API host
    #[serde(default = "defaults::scheme")]
    pub scheme: String,

    /// Records requested per page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Pause between consecutive page requests in milliseconds
    #[serde(default = "defaults::page_delay")]
    pub page_delay_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Environment variable holding the API host
    #[serde(default = "defaults::host_env")]
    pub host_env: String,

    /// Environment variable holding the API key
    #[serde(default = "defaults::api_key_env")]
    pub api_key_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            scheme: defaults::scheme(),
            page_size: defaults::page_size(),
            page_delay_ms: defaults::page_delay(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
            host_env: defaults::host_env(),
            api_key_env: defaults::api_key_env(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the files are written to
    #[serde(default = "defaults::output_dir")]
    pub dir: PathBuf,

    /// File name without extension
    #[serde(default = "defaults::file_stem")]
    pub file_stem: String,

    /// Worksheet title in the workbook
    #[serde(default = "defaults::sheet_name")]
    pub sheet_name: String,

    /// Write one file pair per resource instead of one combined pair
    #[serde(default)]
    pub per_resource: bool,

    #[serde(default = "defaults::enabled")]
    pub csv: bool,

    #[serde(default = "defaults::enabled")]
    pub xlsx: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            file_stem: defaults::file_stem(),
            sheet_name: defaults::sheet_name(),
            per_resource: false,
            csv: true,
            xlsx: true,
        }
    }
}

/// Reference timezone for run and creation timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Offset from UTC in minutes (America/Bogota is -300)
    #[serde(default = "defaults::utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

impl TimeConfig {
    /// The configured offset as a chrono timezone.
    pub fn offset(&self) -> Result<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "time.utc_offset_minutes out of range: {}",
                    self.utc_offset_minutes
                ))
            })
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: defaults::utc_offset_minutes(),
        }
    }
}

/// API host and key, read from the environment.
#[derive(Clone)]
pub struct Credentials {
    pub host: String,
    pub api_key: String,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env(api: &ApiConfig) -> Result<Self> {
        Self::resolve(api, |key| env::var(key).ok())
    }

    /// Read credentials through an arbitrary variable lookup.
    pub fn resolve(api: &ApiConfig, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::config(format!("Environment variable {key} is not set")))
        };

        Ok(Self {
            host: read(&api.host_env)?,
            api_key: read(&api.api_key_env)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

mod defaults {
    use std::path::PathBuf;

    // API defaults
    pub fn scheme() -> String {
        "https".into()
    }
    pub fn page_size() -> usize {
        100
    }
    pub fn page_delay() -> u64 {
        1000
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        concat!("ticket-exporter/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn host_env() -> String {
        "TICKET_API_HOST".into()
    }
    pub fn api_key_env() -> String {
        "TICKET_API_KEY".into()
    }

    // Output defaults
    pub fn output_dir() -> PathBuf {
        PathBuf::from(".")
    }
    pub fn file_stem() -> String {
        "tickets".into()
    }
    pub fn sheet_name() -> String {
        "Tickets".into()
    }
    pub fn enabled() -> bool {
        true
    }

    // Time defaults
    pub fn utc_offset_minutes() -> i32 {
        -300
    }
}
