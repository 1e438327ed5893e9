use std::path::{Path, PathBuf};

use chrono::Local;
use git2::{Commit, ErrorCode, Repository, Tree};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    NotARepo(String),

    #[error("File is outside the repository working tree: {}", .0.display())]
    OutsideWorkTree(PathBuf),

    #[error("Git operation failed: {0}")]
    GitOperationFailed(#[from] git2::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result of a commit attempt
#[derive(Debug, Clone)]
pub enum CommitOutcome {
    /// A commit was created.
    Committed { id: git2::Oid, message: String },
    /// The staged state already matched HEAD.
    NothingToCommit,
}

/// Stages an exported file and commits it when the staged state differs
/// from the last commit.
pub struct ExportCommitter {
    repo_dir: PathBuf,
}

impl ExportCommitter {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    /// Stage `file` and commit it with `message`, or a generated
    /// timestamped message when `message` is absent or blank.
    ///
    /// The repository is discovered upward from the configured directory;
    /// the file must exist and live inside its working tree. The whole
    /// index is compared against HEAD, so pre-existing staged changes are
    /// committed along with the file.
    pub fn commit_file(
        &self,
        file: &Path,
        message: Option<&str>,
    ) -> Result<CommitOutcome, GitError> {
        let repo = Repository::discover(&self.repo_dir)
            .map_err(|_| GitError::NotARepo(self.repo_dir.display().to_string()))?;
        if repo.is_bare() {
            return Err(GitError::NotARepo(self.repo_dir.display().to_string()));
        }
        let workdir = repo
            .workdir()
            .ok_or_else(|| GitError::NotARepo(self.repo_dir.display().to_string()))?
            .to_path_buf();

        let file = file.canonicalize()?;
        let rel = file
            .strip_prefix(workdir.canonicalize()?)
            .map_err(|_| GitError::OutsideWorkTree(file.clone()))?
            .to_path_buf();

        let mut index = repo.index()?;
        index.add_path(&rel)?;
        index.write()?;
        debug!(path = %rel.display(), "Staged export file");

        let head_tree = head_tree(&repo)?;
        let diff = repo.diff_tree_to_index(head_tree.as_ref(), Some(&index), None)?;
        if diff.stats()?.files_changed() == 0 {
            debug!("Index matches HEAD, skipping commit");
            return Ok(CommitOutcome::NothingToCommit);
        }

        let message = match message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(m) => m.to_string(),
            None => format!(
                "Update nginx CSV export ({})",
                Local::now().format("%Y-%m-%d %H:%M")
            ),
        };

        let tree = repo.find_tree(index.write_tree()?)?;
        let signature = repo.signature()?;
        let parent = head_commit(&repo)?;
        let parents: Vec<&Commit> = parent.iter().collect();

        let id = repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            &message,
            &tree,
            &parents,
        )?;
        debug!(commit = %id, "Created commit");

        Ok(CommitOutcome::Committed { id, message })
    }
}

/// HEAD's tree, or `None` on an unborn branch (repository with no commits).
fn head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_tree()?)),
        Err(e) if e.code() == ErrorCode::UnbornBranch => Ok(None),
        Err(e) => Err(GitError::GitOperationFailed(e)),
    }
}

fn head_commit(repo: &Repository) -> Result<Option<Commit<'_>>, GitError> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?)),
        Err(e) if e.code() == ErrorCode::UnbornBranch => Ok(None),
        Err(e) => Err(GitError::GitOperationFailed(e)),
    }
}
