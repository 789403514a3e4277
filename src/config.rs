//! Configuration management for the bestseller pipeline.
//!
//! Settings are layered: built-in defaults, then an optional config file
//! (TOML, YAML or JSON), then environment variables, then CLI flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reporting::ReportParams;
use crate::retrieval::{Pacing, RetryPolicy};

/// Default list-overview API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.nytimes.com/svc/books/v3";

/// Default SQLite database path.
pub const DEFAULT_DATABASE_PATH: &str = "data/nyt_bestsellers.db";

/// Default raw-data artifact path.
pub const DEFAULT_RAW_DATA_PATH: &str = "data/nyt_bestsellers_raw.json";

/// Default report output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Config file names probed in the working directory, in order.
const CONFIG_CANDIDATES: &[&str] = &["bestsellers.toml", "bestsellers.yaml", "bestsellers.json"];

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BESTSELLERS_CONFIG";

/// Errors raised while building [`Settings`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("Invalid date for {field}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
    #[error("Start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("No API key configured (set NYT_API_KEY)")]
    MissingApiKey,
    #[error("Invalid setting {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ConfigError> {
        if start > end {
            return Err(ConfigError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Every day in the range, inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.stride(1)
    }

    /// Dates from `start` stepping `step_days` while not past `end`.
    pub fn stride(&self, step_days: usize) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start
            .iter_days()
            .step_by(step_days.max(1))
            .take_while(move |d| *d <= self.end)
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or_default(),
        }
    }
}

/// Parse a `YYYY-MM-DD` date for the named setting.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ConfigError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// API credential for the list-overview endpoint.
    pub api_key: Option<String>,
    /// API base URL (without the `lists/overview.json` suffix).
    pub api_base_url: String,
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Raw-data artifact written by `fetch` and read by `load`.
    pub raw_data_path: PathBuf,
    /// Directory receiving report files.
    pub output_dir: PathBuf,
    /// Calendar range for fetching and the date dimension.
    pub date_range: DateRange,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Connect timeout in seconds.
    pub connect_timeout: u64,
    /// Pause after every request, in seconds.
    pub request_interval_secs: u64,
    /// Days between requested publication dates.
    pub step_days: u32,
    /// Maximum non-rate-limited attempts per date.
    pub max_attempts: u32,
    /// Wait used when a 429 carries no usable Retry-After, in seconds.
    pub rate_limit_wait_secs: u64,
    /// 429s tolerated per date before giving up.
    pub max_rate_limit_waits: u32,
    /// Field delimiter for report files.
    pub delimiter: char,
    /// Year examined by the top-3 longevity report.
    pub top3_year: i32,
    /// Year examined by the rank-1 vs rank-3 report.
    pub rivalry_year: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            raw_data_path: PathBuf::from(DEFAULT_RAW_DATA_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            date_range: DateRange::default(),
            user_agent: format!("bestseller-pipeline/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: 30,
            connect_timeout: 10,
            request_interval_secs: 12,
            step_days: 7,
            max_attempts: 5,
            rate_limit_wait_secs: 60,
            max_rate_limit_waits: 10,
            delimiter: ',',
            top3_year: 2022,
            rivalry_year: 2023,
        }
    }
}

impl Settings {
    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        DateRange::new(self.date_range.start, self.date_range.end)?;
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "max_attempts",
                message: "must be at least 1".to_string(),
            });
        }
        if self.step_days == 0 {
            return Err(ConfigError::Invalid {
                field: "step_days",
                message: "must be at least 1".to_string(),
            });
        }
        if self.delimiter == '"' || self.delimiter == '\n' {
            return Err(ConfigError::Invalid {
                field: "delimiter",
                message: format!("{:?} cannot be used as a delimiter", self.delimiter),
            });
        }
        Ok(())
    }

    /// API key, or an error for commands that need network access.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Retry behaviour for a single date.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            default_rate_limit_wait: Duration::from_secs(self.rate_limit_wait_secs),
            max_rate_limit_waits: self.max_rate_limit_waits,
            ..RetryPolicy::default()
        }
    }

    /// Pacing of the range driver.
    pub fn pacing(&self) -> Pacing {
        Pacing {
            step_days: self.step_days,
            request_interval: Duration::from_secs(self.request_interval_secs),
        }
    }

    /// Parameters for the report queries.
    pub fn report_params(&self) -> ReportParams {
        use chrono::Datelike;
        ReportParams {
            top3_year: self.top3_year,
            first_year: self.date_range.start.year(),
            last_year: self.date_range.end.year(),
            rivalry_year: self.rivalry_year,
        }
    }

    /// Apply environment variable overrides using `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("NYT_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup("NYT_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(path) = lookup("DATABASE_PATH") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("RAW_DATA_PATH") {
            self.raw_data_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("OUTPUT_DIR") {
            self.output_dir = PathBuf::from(path);
        }
        if let Some(start) = lookup("PIPELINE_START_DATE") {
            self.date_range.start = parse_date("PIPELINE_START_DATE", &start)?;
        }
        if let Some(end) = lookup("PIPELINE_END_DATE") {
            self.date_range.end = parse_date("PIPELINE_END_DATE", &end)?;
        }
        Ok(())
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "database")]
    pub database_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_interval_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_wait_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rate_limit_waits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top3_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rivalry_year: Option<i32>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Find a config file: explicit path, then `BESTSELLERS_CONFIG`, then the
    /// working directory. Returns the default config when none exists.
    pub async fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path).await;
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_from_path(Path::new(&path)).await;
        }
        for candidate in CONFIG_CANDIDATES {
            let path = Path::new(candidate);
            if path.exists() {
                return Self::load_from_path(path).await;
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    /// Format is chosen by extension; anything unknown is parsed as JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_err = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents).map_err(|e| parse_err(e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&contents).map_err(|e| parse_err(e.to_string()))?
            }
            _ => serde_json::from_str(&contents).map_err(|e| parse_err(e.to_string()))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Directory relative paths in this config are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent())
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Resolve a path that may be relative to the config file or start with `~`.
    pub fn resolve_path(&self, path_str: &str) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings) -> Result<(), ConfigError> {
        if let Some(ref key) = self.api_key {
            settings.api_key = Some(key.clone());
        }
        if let Some(ref url) = self.api_base_url {
            settings.api_base_url = url.clone();
        }
        if let Some(ref path) = self.database_path {
            settings.database_path = self.resolve_path(path);
        }
        if let Some(ref path) = self.raw_data_path {
            settings.raw_data_path = self.resolve_path(path);
        }
        if let Some(ref path) = self.output_dir {
            settings.output_dir = self.resolve_path(path);
        }
        if let Some(ref start) = self.start_date {
            settings.date_range.start = parse_date("start_date", start)?;
        }
        if let Some(ref end) = self.end_date {
            settings.date_range.end = parse_date("end_date", end)?;
        }
        if let Some(ref ua) = self.user_agent {
            settings.user_agent = ua.clone();
        }
        if let Some(v) = self.request_timeout {
            settings.request_timeout = v;
        }
        if let Some(v) = self.connect_timeout {
            settings.connect_timeout = v;
        }
        if let Some(v) = self.request_interval_secs {
            settings.request_interval_secs = v;
        }
        if let Some(v) = self.step_days {
            settings.step_days = v;
        }
        if let Some(v) = self.max_attempts {
            settings.max_attempts = v;
        }
        if let Some(v) = self.rate_limit_wait_secs {
            settings.rate_limit_wait_secs = v;
        }
        if let Some(v) = self.max_rate_limit_waits {
            settings.max_rate_limit_waits = v;
        }
        if let Some(v) = self.delimiter {
            settings.delimiter = v;
        }
        if let Some(v) = self.top3_year {
            settings.top3_year = v;
        }
        if let Some(v) = self.rivalry_year {
            settings.rivalry_year = v;
        }
        Ok(())
    }
}

/// Options for loading settings, usually from CLI flags.
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    /// Explicit config file path.
    pub config_path: Option<PathBuf>,
    /// Database path override.
    pub database_path: Option<PathBuf>,
    /// Raw-data artifact override.
    pub raw_data_path: Option<PathBuf>,
}

/// Build settings from defaults, config file, process environment and `options`.
pub async fn load_settings(options: LoadOptions) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    let config = Config::discover(options.config_path.as_deref()).await?;
    if let Some(ref path) = config.source_path {
        tracing::info!("Loaded config from {}", path.display());
    }
    config.apply_to_settings(&mut settings)?;
    settings.apply_env(|name| std::env::var(name).ok())?;

    if let Some(path) = options.database_path {
        settings.database_path = path;
    }
    if let Some(path) = options.raw_data_path {
        settings.raw_data_path = path;
    }

    settings.validate()?;
    Ok(settings)
}
