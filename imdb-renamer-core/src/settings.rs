//! Run configuration (paths, retry policy, worker count, sanitizer word list).
//!
//! Settings are read from `~/.config/imdb-renamer/settings.toml` when present,
//! then overridden by command-line flags. The resulting value is passed into
//! each pipeline component at construction.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/102.0.0.0 Safari/537.36";

const DEFAULT_EXTRANEOUS_WORDS: &[&str] = &[
    "COMPLETE", "720p", "1080p", "BRrip", "BluRay", "HDRip", "sujaidr", "pimprg", "YTS", "MX",
    "x264", "x265", "HEVC", "AAC", "WEBRip", "WebDL", "H.264", "H.265", "DVDrip", "BRRip",
];

/// All tunables for a rename run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory whose immediate subfolders are renamed
    pub base_path: Option<PathBuf>,
    /// Append-only run log
    pub log_file: PathBuf,
    /// Attempts on the primary search path before falling back
    pub max_retries: u32,
    /// Pause between primary search attempts
    pub retry_delay_secs: u64,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
    /// User-Agent sent with the Google fallback search
    pub google_user_agent: String,
    /// Cap on candidates fetched and shown per search
    pub max_search_results: usize,
    /// Folders processed concurrently
    pub thread_pool_workers: usize,
    /// Words and tags stripped from folder names (case-insensitive)
    pub extraneous_words: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_path: None,
            log_file: PathBuf::from("imdb_renamer.log"),
            max_retries: 3,
            retry_delay_secs: 10,
            request_timeout_secs: 5,
            google_user_agent: DEFAULT_USER_AGENT.to_string(),
            max_search_results: 10,
            thread_pool_workers: 5,
            extraneous_words: DEFAULT_EXTRANEOUS_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from [`settings_path`] when `None`.
    ///
    /// A missing default file yields the built-in defaults. An explicitly
    /// requested file must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default_path = settings_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolve the base path using a priority chain:
    ///
    /// 1. `base_path` from settings (already overridden by the CLI if given)
    /// 2. Current working directory
    pub fn resolved_base_path(&self) -> PathBuf {
        if let Some(p) = &self.base_path {
            return p.clone();
        }
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Check that a run can start with these settings.
    pub fn validate(&self) -> Result<PathBuf, ConfigError> {
        if self.thread_pool_workers == 0 {
            return Err(ConfigError::invalid(
                "thread_pool_workers",
                "must be at least 1",
            ));
        }
        if self.max_search_results == 0 {
            return Err(ConfigError::invalid(
                "max_search_results",
                "must be at least 1",
            ));
        }

        let base = self.resolved_base_path();
        if !base.exists() {
            return Err(ConfigError::MissingBasePath(base));
        }
        if !base.is_dir() {
            return Err(ConfigError::NotADirectory(base));
        }
        Ok(base)
    }
}

/// Canonical path to the settings file: `~/.config/imdb-renamer/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("imdb-renamer").join("settings.toml")
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
