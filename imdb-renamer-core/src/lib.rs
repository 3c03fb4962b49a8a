//! Shared domain types for the IMDb folder renamer.
//!
//! Every stage of the pipeline (sanitize, search, disambiguate, rename)
//! exchanges these values. None of them are mutated after construction.

use std::fmt;
use std::path::{Path, PathBuf};

pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::Settings;

/// Placeholder used in target names when a year or rating is unavailable.
pub const PLACEHOLDER: &str = "N/A";

/// A movie folder discovered under the base path, paired with its search-ready name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderTask {
    /// Full path to the folder as found on disk
    pub path: PathBuf,
    /// Cleaned title used as the first search query
    pub sanitized_name: String,
    /// Release year parsed from the original folder name, if any
    pub year_hint: Option<u16>,
}

impl FolderTask {
    pub fn new(path: PathBuf, sanitized_name: impl Into<String>, year_hint: Option<u16>) -> Self {
        Self {
            path,
            sanitized_name: sanitized_name.into(),
            year_hint,
        }
    }

    /// The folder's current leaf name.
    pub fn original_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn parent(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

/// One search result that may identify a folder's movie.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub title: String,
    pub year: Option<u16>,
    /// IMDb user rating on a 0-10 scale
    pub rating: Option<f32>,
    /// Number of users who rated the title
    pub votes: u64,
    /// IMDb title id (e.g. "tt0133093")
    pub imdb_id: String,
}

impl Candidate {
    pub fn new(title: impl Into<String>, imdb_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            rating: None,
            votes: 0,
            imdb_id: imdb_id.into(),
        }
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_votes(mut self, votes: u64) -> Self {
        self.votes = votes;
        self
    }

    /// Year as shown to the user and written into target names.
    pub fn year_label(&self) -> String {
        self.year
            .map(|y| y.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    /// Rating formatted to one decimal place, or the placeholder.
    pub fn rating_label(&self) -> String {
        format_rating(self.rating)
    }
}

/// Format a rating to one decimal place, or [`PLACEHOLDER`] when absent.
pub fn format_rating(rating: Option<f32>) -> String {
    match rating {
        Some(r) => format!("{r:.1}"),
        None => PLACEHOLDER.to_string(),
    }
}

/// The result of disambiguating a folder's search results.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    AcceptedCandidate(Candidate),
    /// A title typed by the user that no search round could resolve
    ManualOverride(String),
    Skip,
}

/// Final state of one folder after the pipeline ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Renamed,
    Skipped,
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Renamed => write!(f, "RENAMED"),
            Self::Skipped => write!(f, "SKIPPED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// One line of the run log. Every folder task yields exactly one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RunLogEntry {
    pub folder: PathBuf,
    pub outcome: Outcome,
    /// Target leaf name, if one was computed
    pub new_name: Option<String>,
    /// Skip reason or error message
    pub detail: Option<String>,
    /// True when the rename was only planned, not performed
    pub dry_run: bool,
}

impl RunLogEntry {
    pub fn renamed(folder: PathBuf, new_name: String, dry_run: bool) -> Self {
        Self {
            folder,
            outcome: Outcome::Renamed,
            new_name: Some(new_name),
            detail: None,
            dry_run,
        }
    }

    pub fn skipped(folder: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            folder,
            outcome: Outcome::Skipped,
            new_name: None,
            detail: Some(reason.into()),
            dry_run: false,
        }
    }

    pub fn failed(folder: PathBuf, new_name: Option<String>, error: impl Into<String>) -> Self {
        Self {
            folder,
            outcome: Outcome::Failed,
            new_name,
            detail: Some(error.into()),
            dry_run: false,
        }
    }

    /// Leaf name of the folder this entry describes.
    pub fn folder_name(&self) -> String {
        self.folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.folder.display().to_string())
    }
}

/// Counts of outcomes across a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_entries(entries: &[RunLogEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match entry.outcome {
                Outcome::Renamed => summary.renamed += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.renamed + self.skipped + self.failed
    }
}
