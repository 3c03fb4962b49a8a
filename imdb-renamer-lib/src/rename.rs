//! Turning a decision into a folder rename.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use imdb_renamer_core::{
    Candidate, Decision, FolderTask, PLACEHOLDER, RunLogEntry, format_rating,
};

use crate::error::RenameError;
use crate::sanitize::safe_name;

/// Build the canonical leaf name: `Title (Year) - IMDb- Rating`.
pub fn format_target_name(title: &str, year: &str, rating: &str) -> String {
    format!("{title} ({year}) - IMDb- {rating}")
}

/// Target leaf name for a decision, with illegal characters replaced.
/// `None` for [`Decision::Skip`].
pub fn target_name(task: &FolderTask, decision: &Decision) -> Option<String> {
    let name = match decision {
        Decision::AcceptedCandidate(c) => candidate_name(c),
        Decision::ManualOverride(title) => {
            let year = task
                .year_hint
                .map(|y| y.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            format_target_name(title.trim(), &year, &format_rating(None))
        }
        Decision::Skip => return None,
    };
    Some(safe_name(&name))
}

fn candidate_name(c: &Candidate) -> String {
    format_target_name(c.title.trim(), &c.year_label(), &c.rating_label())
}

/// Apply `decision` to the folder in `task`.
///
/// With `dry_run` the filesystem is left untouched but the entry still
/// carries the computed name. Conflicts and permission failures are
/// reported in the entry, never returned.
pub fn apply(task: &FolderTask, decision: &Decision, dry_run: bool) -> RunLogEntry {
    let Some(new_name) = target_name(task, decision) else {
        log::info!("Skipped folder: {}", task.original_name());
        return RunLogEntry::skipped(task.path.clone(), "skipped by user");
    };

    if new_name == task.original_name() {
        return RunLogEntry::skipped(task.path.clone(), "already named");
    }

    let target = task.parent().join(&new_name);
    if dry_run {
        if target.exists() {
            let err = RenameError::NamingConflict { target };
            return RunLogEntry::failed(task.path.clone(), Some(new_name), err.to_string());
        }
        log::info!(
            "Would rename '{}' to '{}'",
            task.path.display(),
            target.display()
        );
        return RunLogEntry::renamed(task.path.clone(), new_name, true);
    }

    match rename_folder(task, target) {
        Ok(target) => {
            log::info!("Renamed '{}' to '{}'", task.path.display(), target.display());
            RunLogEntry::renamed(task.path.clone(), new_name, false)
        }
        Err(e) => {
            log::error!("Failed to rename '{}': {}", task.path.display(), e);
            RunLogEntry::failed(task.path.clone(), Some(new_name), e.to_string())
        }
    }
}

/// Held across the existence check and the rename so two workers can't
/// both claim the same target.
static RENAME_LOCK: Mutex<()> = Mutex::new(());

fn rename_folder(task: &FolderTask, target: PathBuf) -> Result<PathBuf, RenameError> {
    let _guard = RENAME_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    // Never overwrite: fs::rename replaces empty directories on Unix.
    if target.exists() {
        return Err(RenameError::NamingConflict { target });
    }
    match fs::rename(&task.path, &target) {
        Ok(()) => Ok(target),
        Err(e) => Err(RenameError::from_io(target, e)),
    }
}

#[cfg(test)]
#[path = "tests/rename_tests.rs"]
mod tests;
