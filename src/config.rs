//! Configuration management for the Last.fm site-data provider.
//!
//! Settings come from environment variables, optionally seeded from `.env`
//! files. They are read once into a [`Config`] that is passed by reference to
//! every feed, so nothing below this module looks at the process environment.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line flags (applied by the binary on top of [`Config`])
//! 2. Environment variables
//! 3. `.env` in the working directory, then in the local data directory
//! 4. Application defaults

use std::{env, path::PathBuf, time::Duration};

use crate::error::ConfigError;

pub const ENV_API_KEY: &str = "LASTFM_API_KEY";
pub const ENV_USERNAME: &str = "LASTFM_USERNAME";
pub const ENV_CACHE_MINUTES: &str = "LASTFM_CACHE_MINUTES";
pub const ENV_HISTORY_PAGES: &str = "LASTFM_HISTORY_PAGES";
pub const ENV_CACHE_DIR: &str = "LASTFM_CACHE_DIR";
pub const ENV_API_URL: &str = "LASTFM_API_URL";
pub const ENV_TIMEOUT_SECONDS: &str = "LASTFM_TIMEOUT_SECONDS";
pub const ENV_RETRIES: &str = "LASTFM_RETRIES";

pub const DEFAULT_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_TTL_MINUTES: u32 = 15;
pub const DEFAULT_HISTORY_PAGES: u32 = 1;
pub const DEFAULT_CACHE_DIR: &str = ".cache";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_RETRIES: u32 = 1;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_TOP_ALBUMS_PERIOD: &str = "1month";
pub const DEFAULT_TOP_ALBUMS_LIMIT: u32 = 10;
pub const DEFAULT_RECENT_LIMIT: u32 = 20;

/// Loads environment variables from `.env` files.
///
/// The site root's `.env` (current working directory) is read first, then
/// `lastfm-sitedata/.env` in the platform-specific local data directory:
/// - Linux: `~/.local/share/lastfm-sitedata/.env`
/// - macOS: `~/Library/Application Support/lastfm-sitedata/.env`
/// - Windows: `%LOCALAPPDATA%/lastfm-sitedata/.env`
///
/// Variables already present in the environment are never overridden, and a
/// missing file is not an error: absent credentials surface later as a
/// [`ConfigError`] on each feed instead of a crash here.
pub fn load_env() {
    let _ = dotenv::dotenv();

    if let Some(mut path) = dirs::data_local_dir() {
        path.push("lastfm-sitedata/.env");
        if path.is_file() {
            let _ = dotenv::from_path(path);
        }
    }
}

/// API key and user, both guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub username: String,
}

/// Runtime settings, constructed once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub ttl_minutes: u32,
    pub history_pages: u32,
    pub cache_dir: PathBuf,
    pub api_url: String,
    pub timeout: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
    pub recent_limit: u32,
    pub top_albums_period: String,
    pub top_albums_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            username: None,
            ttl_minutes: DEFAULT_TTL_MINUTES,
            history_pages: DEFAULT_HISTORY_PAGES,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            recent_limit: DEFAULT_RECENT_LIMIT,
            top_albums_period: DEFAULT_TOP_ALBUMS_PERIOD.to_string(),
            top_albums_limit: DEFAULT_TOP_ALBUMS_LIMIT,
        }
    }
}

impl Config {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    ///
    /// Numeric settings that are missing, unparseable or zero fall back to
    /// their defaults; the history page limit is at least 1.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty(ENV_API_KEY),
            username: non_empty(ENV_USERNAME),
            ttl_minutes: positive(lookup(ENV_CACHE_MINUTES)).unwrap_or(defaults.ttl_minutes),
            history_pages: positive(lookup(ENV_HISTORY_PAGES))
                .unwrap_or(defaults.history_pages)
                .max(1),
            cache_dir: non_empty(ENV_CACHE_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            api_url: non_empty(ENV_API_URL).unwrap_or(defaults.api_url),
            timeout: positive(lookup(ENV_TIMEOUT_SECONDS))
                .map(|s| Duration::from_secs(s as u64))
                .unwrap_or(defaults.timeout),
            retries: lookup(ENV_RETRIES)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(defaults.retries),
            ..defaults
        }
    }

    /// Returns the credentials, or the names of every missing variable.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        match (&self.api_key, &self.username) {
            (Some(api_key), Some(username)) if !api_key.is_empty() && !username.is_empty() => {
                Ok(Credentials {
                    api_key: api_key.clone(),
                    username: username.clone(),
                })
            }
            _ => {
                let mut missing = Vec::new();
                if self.api_key.as_deref().is_none_or(str::is_empty) {
                    missing.push(ENV_API_KEY);
                }
                if self.username.as_deref().is_none_or(str::is_empty) {
                    missing.push(ENV_USERNAME);
                }
                Err(ConfigError::Missing(missing))
            }
        }
    }

    /// The configured username, or an empty string.
    pub fn username_or_empty(&self) -> String {
        self.username.clone().unwrap_or_default()
    }
}

fn positive(value: Option<String>) -> Option<u32> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n >= 1.0)
        .map(|n| n.min(u32::MAX as f64) as u32)
}
