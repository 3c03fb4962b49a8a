use std::path::PathBuf;

use thiserror::Error;

use imdb_renamer_core::ConfigError;
use imdb_renamer_scraper::LookupError;

/// Errors that stop the CLI before or around a run.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Settings could not be loaded or failed validation
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The run log file could not be opened
    #[error("Cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(#[from] LookupError),
}

impl CliError {
    /// Process exit code for this error.
    pub(crate) fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::LogFile { .. } | Self::Client(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let config = CliError::from(ConfigError::MissingBasePath(PathBuf::from("/nope")));
        assert_eq!(config.exit_code(), 2);

        let log = CliError::LogFile {
            path: PathBuf::from("/ro/run.log"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(log.exit_code(), 1);
        assert!(log.to_string().contains("/ro/run.log"));
    }
}
