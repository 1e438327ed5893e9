use std::fs;
use std::path::PathBuf;

use git2::Repository;
use logledger_git::{CommitOutcome, ExportCommitter, GitError};
use tempfile::TempDir;

/// Helper: init a repository with a test identity and return its dir.
fn init_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
    dir
}

fn write_export(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("access.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn commit_count(dir: &TempDir) -> usize {
    let repo = Repository::open(dir.path()).unwrap();
    let mut walk = repo.revwalk().unwrap();
    walk.push_head().unwrap();
    walk.count()
}

// ============================================================
// Commit creation
// ============================================================

#[test]
fn test_first_commit_on_empty_repository() {
    let dir = init_repo();
    let file = write_export(&dir, "remote_addr\n127.0.0.1\n");

    let committer = ExportCommitter::new(dir.path());
    let outcome = committer.commit_file(&file, Some("initial export")).unwrap();

    match outcome {
        CommitOutcome::Committed { message, .. } => assert_eq!(message, "initial export"),
        CommitOutcome::NothingToCommit => panic!("expected a commit"),
    }
    assert_eq!(commit_count(&dir), 1);
}

#[test]
fn test_generated_message_contains_timestamp() {
    let dir = init_repo();
    let file = write_export(&dir, "header\n");

    let committer = ExportCommitter::new(dir.path());
    let outcome = committer.commit_file(&file, None).unwrap();

    match outcome {
        CommitOutcome::Committed { message, .. } => {
            assert!(message.starts_with("Update nginx CSV export ("));
            assert!(message.ends_with(')'));
        }
        CommitOutcome::NothingToCommit => panic!("expected a commit"),
    }
}

#[test]
fn test_blank_message_falls_back_to_generated() {
    let dir = init_repo();
    let file = write_export(&dir, "header\n");

    let committer = ExportCommitter::new(dir.path());
    let outcome = committer.commit_file(&file, Some("   ")).unwrap();

    match outcome {
        CommitOutcome::Committed { message, .. } => {
            assert!(message.starts_with("Update nginx CSV export ("));
        }
        CommitOutcome::NothingToCommit => panic!("expected a commit"),
    }
}

#[test]
fn test_changed_file_produces_second_commit() {
    let dir = init_repo();
    let file = write_export(&dir, "header\nrow1\n");

    let committer = ExportCommitter::new(dir.path());
    committer.commit_file(&file, Some("first")).unwrap();

    fs::write(&file, "header\nrow1\nrow2\n").unwrap();
    let outcome = committer.commit_file(&file, Some("second")).unwrap();

    assert!(matches!(outcome, CommitOutcome::Committed { .. }));
    assert_eq!(commit_count(&dir), 2);
}

// ============================================================
// Idempotence
// ============================================================

#[test]
fn test_unchanged_file_is_not_committed_twice() {
    let dir = init_repo();
    let file = write_export(&dir, "header\nrow1\n");

    let committer = ExportCommitter::new(dir.path());
    committer.commit_file(&file, Some("first")).unwrap();

    let outcome = committer.commit_file(&file, Some("second")).unwrap();

    assert!(matches!(outcome, CommitOutcome::NothingToCommit));
    assert_eq!(commit_count(&dir), 1);
}

// ============================================================
// Failure modes
// ============================================================

#[test]
fn test_plain_directory_is_not_a_repo() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("access.csv");
    fs::write(&file, "header\n").unwrap();

    let committer = ExportCommitter::new(dir.path());
    let err = committer.commit_file(&file, None).unwrap_err();

    assert!(matches!(err, GitError::NotARepo(_)));
}

#[test]
fn test_file_outside_working_tree() {
    let repo_dir = init_repo();
    let other_dir = TempDir::new().unwrap();
    let file = other_dir.path().join("access.csv");
    fs::write(&file, "header\n").unwrap();

    let committer = ExportCommitter::new(repo_dir.path());
    let err = committer.commit_file(&file, None).unwrap_err();

    assert!(matches!(err, GitError::OutsideWorkTree(_)));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = init_repo();
    let file = dir.path().join("never-written.csv");

    let committer = ExportCommitter::new(dir.path());
    let err = committer.commit_file(&file, None).unwrap_err();

    assert!(matches!(err, GitError::IoError(_)));
}

#[test]
fn test_discovers_repo_from_subdirectory() {
    let dir = init_repo();
    let sub = dir.path().join("exports");
    fs::create_dir_all(&sub).unwrap();
    let file = sub.join("access.csv");
    fs::write(&file, "header\n").unwrap();

    let committer = ExportCommitter::new(&sub);
    let outcome = committer.commit_file(&file, Some("from subdir")).unwrap();

    assert!(matches!(outcome, CommitOutcome::Committed { .. }));
}
