//! Append-only run log: one human-readable line per folder.
//!
//! ```text
//! 2024-05-01 21:14:03 - INFO - [RENAMED] The.Matrix.1999.1080p -> The Matrix (1999) - IMDb- 8.7
//! 2024-05-01 21:14:09 - INFO - [SKIPPED] Home Videos (skipped by user)
//! 2024-05-01 21:14:11 - ERROR - [FAILED] Heat.1995 -> Heat (1995) - IMDb- 8.3: Naming conflict: ...
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use imdb_renamer_core::{Outcome, RunLogEntry};

/// Serialized writer for the run log file. Concurrent appends take a lock
/// so lines never interleave.
#[derive(Debug)]
pub struct RunLogSink {
    file: Option<Mutex<File>>,
}

impl RunLogSink {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(Mutex::new(file)),
        })
    }

    /// A sink that drops everything.
    pub fn disabled() -> Self {
        Self { file: None }
    }

    /// Append one entry. Write failures are logged, not propagated.
    pub fn append(&self, entry: &RunLogEntry) {
        let Some(file) = &self.file else {
            return;
        };
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let line = format_line(entry, &timestamp);
        let result = match file.lock() {
            Ok(mut f) => writeln!(f, "{line}").and_then(|_| f.flush()),
            Err(_) => Err(io::Error::other("run log lock poisoned")),
        };
        if let Err(e) = result {
            log::warn!("Failed to write run log entry: {}", e);
        }
    }
}

/// Render one entry as a log line (without trailing newline).
pub fn format_line(entry: &RunLogEntry, timestamp: &str) -> String {
    let level = match entry.outcome {
        Outcome::Failed => "ERROR",
        _ => "INFO",
    };
    let tag = if entry.dry_run {
        "WOULD RENAME".to_string()
    } else {
        entry.outcome.to_string()
    };
    let original = entry.folder_name();

    let body = match (entry.outcome, &entry.new_name, &entry.detail) {
        (Outcome::Renamed, Some(new), _) => format!("{original} -> {new}"),
        (Outcome::Failed, Some(new), Some(err)) => format!("{original} -> {new}: {err}"),
        (Outcome::Failed, None, Some(err)) => format!("{original}: {err}"),
        (_, _, Some(detail)) => format!("{original} ({detail})"),
        _ => original,
    };
    format!("{timestamp} - {level} - [{tag}] {body}")
}
