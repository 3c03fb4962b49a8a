use std::io;

use imdb_renamer_core::Outcome;
use tempfile::TempDir;

use super::*;

fn setup(name: &str) -> (TempDir, FolderTask) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::create_dir(&path).unwrap();
    let task = FolderTask::new(path, "Movie Name 2023", Some(2023));
    (dir, task)
}

fn movie_name() -> Decision {
    Decision::AcceptedCandidate(
        Candidate::new("Movie Name", "tt0000001")
            .with_year(2023)
            .with_rating(7.5),
    )
}

#[test]
fn test_format_target_name() {
    assert_eq!(
        format_target_name("Movie Name", "2023", "7.5"),
        "Movie Name (2023) - IMDb- 7.5"
    );
}

#[test]
fn test_target_name_from_candidate() {
    let (_dir, task) = setup("Movie.Name.2023.1080p");
    assert_eq!(
        target_name(&task, &movie_name()).as_deref(),
        Some("Movie Name (2023) - IMDb- 7.5")
    );
}

#[test]
fn test_target_name_unrated_and_unsafe() {
    let (_dir, task) = setup("faceoff");
    let decision = Decision::AcceptedCandidate(Candidate::new("Face/Off", "tt0119094").with_year(1997));
    assert_eq!(
        target_name(&task, &decision).as_deref(),
        Some("Face-Off (1997) - IMDb- N-A")
    );
}

#[test]
fn test_target_name_manual_override_uses_folder_year() {
    let (_dir, task) = setup("home.video.2023");
    let decision = Decision::ManualOverride("Home Video".into());
    assert_eq!(
        target_name(&task, &decision).as_deref(),
        Some("Home Video (2023) - IMDb- N-A")
    );
    assert_eq!(target_name(&task, &Decision::Skip), None);
}

#[test]
fn test_apply_renames_in_place() {
    let (dir, task) = setup("Movie.Name.2023.1080p");
    let entry = apply(&task, &movie_name(), false);

    assert_eq!(entry.outcome, Outcome::Renamed);
    assert!(!entry.dry_run);
    assert!(!task.path.exists());
    assert!(dir.path().join("Movie Name (2023) - IMDb- 7.5").is_dir());
}

#[test]
fn test_apply_dry_run_leaves_folder() {
    let (dir, task) = setup("Movie.Name.2023.1080p");
    let entry = apply(&task, &movie_name(), true);

    assert_eq!(entry.outcome, Outcome::Renamed);
    assert!(entry.dry_run);
    assert_eq!(entry.new_name.as_deref(), Some("Movie Name (2023) - IMDb- 7.5"));
    assert!(task.path.is_dir());
    assert!(!dir.path().join("Movie Name (2023) - IMDb- 7.5").exists());
}

#[test]
fn test_apply_conflict_does_not_overwrite() {
    let (dir, task) = setup("Movie.Name.2023.1080p");
    let existing = dir.path().join("Movie Name (2023) - IMDb- 7.5");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("keep.txt"), b"keep").unwrap();

    let entry = apply(&task, &movie_name(), false);
    assert_eq!(entry.outcome, Outcome::Failed);
    assert!(entry.detail.as_deref().unwrap().contains("Naming conflict"));
    assert!(task.path.is_dir());
    assert!(existing.join("keep.txt").is_file());
}

#[test]
fn test_apply_conflict_reported_in_dry_run() {
    let (dir, task) = setup("Movie.Name.2023.1080p");
    fs::create_dir(dir.path().join("Movie Name (2023) - IMDb- 7.5")).unwrap();

    let entry = apply(&task, &movie_name(), true);
    assert_eq!(entry.outcome, Outcome::Failed);
}

#[test]
fn test_apply_skip() {
    let (_dir, task) = setup("whatever");
    let entry = apply(&task, &Decision::Skip, false);
    assert_eq!(entry.outcome, Outcome::Skipped);
    assert!(entry.new_name.is_none());
    assert!(task.path.is_dir());
}

#[test]
fn test_apply_same_name_is_skipped() {
    let (_dir, task) = setup("Movie Name (2023) - IMDb- 7.5");
    let entry = apply(&task, &movie_name(), false);
    assert_eq!(entry.outcome, Outcome::Skipped);
    assert_eq!(entry.detail.as_deref(), Some("already named"));
}

#[test]
fn test_apply_missing_source_fails() {
    let (_dir, task) = setup("gone");
    fs::remove_dir(&task.path).unwrap();
    let entry = apply(&task, &movie_name(), false);
    assert_eq!(entry.outcome, Outcome::Failed);
}

#[test]
fn test_error_classification() {
    let target = PathBuf::from("/m/x");
    let denied = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
    assert!(matches!(
        RenameError::from_io(target.clone(), denied),
        RenameError::PermissionDenied { .. }
    ));
    let exists = io::Error::new(io::ErrorKind::AlreadyExists, "exists");
    assert!(matches!(
        RenameError::from_io(target.clone(), exists),
        RenameError::NamingConflict { .. }
    ));
    let other = io::Error::other("disk on fire");
    assert!(matches!(
        RenameError::from_io(target, other),
        RenameError::Io { .. }
    ));
}

#[test]
fn test_override_without_year_is_recognized_next_run() {
    let task = FolderTask::new(PathBuf::from("/movies/home_video"), "home video", None);
    let name = target_name(&task, &Decision::ManualOverride("Home Video".into())).unwrap();
    assert_eq!(name, "Home Video (N-A) - IMDb- N-A");
    assert!(crate::sanitize::already_properly_named(&name));
}
