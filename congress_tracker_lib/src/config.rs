//! Pipeline configuration read from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::ingest::{DEFAULT_TIMEOUT_SECS, DEFAULT_WINDOW_DAYS};

pub const ENV_API_TOKEN: &str = "QUIVER_API_TOKEN";
pub const ENV_FEED_URL: &str = "CONGRESS_TRACKER_FEED_URL";
pub const ENV_WINDOW_DAYS: &str = "CONGRESS_TRACKER_WINDOW_DAYS";
pub const ENV_TIMEOUT_SECS: &str = "CONGRESS_TRACKER_TIMEOUT_SECS";
pub const ENV_CACHE_PATH: &str = "CONGRESS_TRACKER_CACHE_PATH";
pub const ENV_LEGISLATOR_FILES: &str = "CONGRESS_TRACKER_LEGISLATOR_FILES";
pub const ENV_COMMITTEE_FILE: &str = "CONGRESS_TRACKER_COMMITTEE_FILE";
pub const ENV_MAX_LEGISLATORS: &str = "CONGRESS_TRACKER_MAX_LEGISLATORS";
pub const ENV_TICKER_SEED: &str = "CONGRESS_TRACKER_TICKER_SEED";

pub const DEFAULT_CACHE_PATH: &str = "ticker_cache.json";
pub const DEFAULT_COMMITTEE_FILE: &str = "committee-membership-current.yaml";
/// Historical first so current terms override it.
pub const DEFAULT_LEGISLATOR_FILES: &[&str] =
    &["legislators-historical.yaml", "legislators-current.yaml"];

/// Errors that stop the process from starting.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("QUIVER_API_TOKEN is not set; the feed credential has no default")]
    MissingToken,
    #[error("{var} must be a valid integer in range, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Resource budgets, input paths, and the feed credential.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub api_token: String,
    pub feed_url: String,
    pub window_days: u32,
    pub timeout_secs: u64,
    pub cache_path: PathBuf,
    /// Later paths override earlier ones for the same legislator.
    pub legislator_paths: Vec<PathBuf>,
    pub committee_path: PathBuf,
    /// Stop building the legislator directory after this many entries.
    /// Files are read in order, so with the default order a budget smaller
    /// than the historical file means current terms are never read and
    /// states reflect historical service.
    pub max_legislators: Option<usize>,
    pub ticker_seed_path: Option<PathBuf>,
}

impl PipelineConfig {
    /// Defaults for everything except the token.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            feed_url: congress_feed_api::BULK_CONGRESS_TRADING_URL.to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            legislator_paths: DEFAULT_LEGISLATOR_FILES.iter().map(PathBuf::from).collect(),
            committee_path: PathBuf::from(DEFAULT_COMMITTEE_FILE),
            max_legislators: None,
            ticker_seed_path: None,
        }
    }

    /// Reads the process environment. Fails when the token is absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads paths and budgets from the process environment, leaving the
    /// token empty. For work that never contacts the feed.
    pub fn local_from_env() -> Result<Self, ConfigError> {
        Self::local_from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = non_blank(&lookup, ENV_API_TOKEN).ok_or(ConfigError::MissingToken)?;
        let mut config = Self::local_from_lookup(lookup)?;
        config.api_token = token;
        Ok(config)
    }

    /// `from_lookup` without the token requirement.
    pub fn local_from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_blank(&lookup, key);
        let mut config = Self::new(String::new());

        if let Some(url) = get(ENV_FEED_URL) {
            config.feed_url = url;
        }
        if let Some(raw) = get(ENV_WINDOW_DAYS) {
            config.window_days = parse_number(ENV_WINDOW_DAYS, &raw)?;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            config.timeout_secs = parse_positive(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(path) = get(ENV_CACHE_PATH) {
            config.cache_path = PathBuf::from(path);
        }
        if let Some(list) = get(ENV_LEGISLATOR_FILES) {
            config.legislator_paths = list
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect();
        }
        if let Some(path) = get(ENV_COMMITTEE_FILE) {
            config.committee_path = PathBuf::from(path);
        }
        if let Some(raw) = get(ENV_MAX_LEGISLATORS) {
            config.max_legislators = Some(parse_number(ENV_MAX_LEGISLATORS, &raw)?);
        }
        config.ticker_seed_path = get(ENV_TICKER_SEED).map(PathBuf::from);

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// A zero timeout would fail every request immediately.
fn parse_positive(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match parse_number(var, raw)? {
        0 => Err(ConfigError::InvalidNumber {
            var,
            value: raw.to_string(),
        }),
        n => Ok(n),
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: raw.to_string(),
    })
}
