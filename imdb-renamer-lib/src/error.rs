use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while renaming a single folder.
///
/// These never abort a run; each is recorded in that folder's log entry.
#[derive(Debug, Error)]
pub enum RenameError {
    /// A sibling with the target name already exists
    #[error("Naming conflict: {} already exists", .target.display())]
    NamingConflict { target: PathBuf },

    /// The filesystem refused the rename
    #[error("Permission denied renaming to {}: {source}", .target.display())]
    PermissionDenied {
        target: PathBuf,
        source: std::io::Error,
    },

    /// Any other I/O failure
    #[error("Failed to rename to {}: {source}", .target.display())]
    Io {
        target: PathBuf,
        source: std::io::Error,
    },
}

impl RenameError {
    pub fn from_io(target: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { target, source },
            std::io::ErrorKind::AlreadyExists | std::io::ErrorKind::DirectoryNotEmpty => {
                Self::NamingConflict { target }
            }
            _ => Self::Io { target, source },
        }
    }
}
