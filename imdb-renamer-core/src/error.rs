use std::path::PathBuf;

use thiserror::Error;

/// Errors detected while loading or validating configuration.
///
/// These are the only errors that abort a run; they are raised before any
/// folder is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base path does not exist
    #[error("Base path does not exist: {}", .0.display())]
    MissingBasePath(PathBuf),

    /// The base path exists but is not a directory
    #[error("Base path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The base path could not be listed
    #[error("Cannot list base path {}: {source}", path.display())]
    ListBasePath {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file could not be read
    #[error("Failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`Settings`](crate::Settings)
    #[error("Invalid settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A setting has a value the pipeline cannot run with
    #[error("Invalid setting `{key}`: {message}")]
    InvalidValue { key: &'static str, message: String },
}

impl ConfigError {
    pub fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            message: message.into(),
        }
    }
}
