//! Dashboard configuration resolved from build-time environment values.
//!
//! A browser bundle has no process environment at run time, so values are
//! captured by `option_env!` when the crate is compiled and parsed here with
//! typed defaults.

use std::time::Duration;

use crate::cache::retry::RetryPolicy;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_STALE_TIME_SECS: u64 = 5 * 60;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_STORAGE_KEY: &str = "app-store";

/// Errors raised while parsing configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A value could not be parsed into the expected type.
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Backend base URL without a trailing slash.
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Default freshness window for cached queries.
    pub stale_time: Duration,
    pub retry: RetryPolicy,
    /// Durable storage key for the preferences snapshot.
    pub storage_key: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            stale_time: Duration::from_secs(DEFAULT_STALE_TIME_SECS),
            retry: RetryPolicy::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
        }
    }
}

/// Raw, unparsed configuration values keyed by variable name.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawConfig<'a> {
    pub api_url: Option<&'a str>,
    pub request_timeout_secs: Option<&'a str>,
    pub stale_time_secs: Option<&'a str>,
    pub max_retries: Option<&'a str>,
    pub storage_key: Option<&'a str>,
}

impl DashboardConfig {
    /// Build typed config from values captured at compile time.
    ///
    /// Optional:
    /// - `DASHBOARD_API_URL`: default `http://localhost:3001/api`
    /// - `DASHBOARD_REQUEST_TIMEOUT_SECS`: default 10
    /// - `DASHBOARD_STALE_TIME_SECS`: default 300
    /// - `DASHBOARD_MAX_RETRIES`: default 3
    /// - `DASHBOARD_STORAGE_KEY`: default `app-store`
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_raw(RawConfig {
            api_url: option_env!("DASHBOARD_API_URL"),
            request_timeout_secs: option_env!("DASHBOARD_REQUEST_TIMEOUT_SECS"),
            stale_time_secs: option_env!("DASHBOARD_STALE_TIME_SECS"),
            max_retries: option_env!("DASHBOARD_MAX_RETRIES"),
            storage_key: option_env!("DASHBOARD_STORAGE_KEY"),
        })
    }

    pub fn from_raw(raw: RawConfig<'_>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_base_url = raw
            .api_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_owned();

        let request_timeout = Duration::from_secs(parse_or(
            "DASHBOARD_REQUEST_TIMEOUT_SECS",
            raw.request_timeout_secs,
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);
        let stale_time =
            Duration::from_secs(parse_or("DASHBOARD_STALE_TIME_SECS", raw.stale_time_secs, DEFAULT_STALE_TIME_SECS)?);
        let max_retries = parse_or("DASHBOARD_MAX_RETRIES", raw.max_retries, DEFAULT_MAX_RETRIES)?;

        let storage_key = raw
            .storage_key
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map_or(defaults.storage_key, str::to_owned);

        Ok(Self {
            api_base_url,
            request_timeout,
            stale_time,
            retry: RetryPolicy { max_retries, ..defaults.retry },
            storage_key,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<&str>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: value.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
