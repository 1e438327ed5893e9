//! # logledger-git
//!
//! Git persistence for exported CSV files.
//!
//! After an export, the output file can be staged and committed so the
//! repository history doubles as an audit trail of the data. The commit is
//! idempotent: if the staged state already matches the last commit, no new
//! commit object is created.
//!
//! ## Key Types
//!
//! - [`ExportCommitter`] - Stages and commits an exported file
//! - [`CommitOutcome`] - Whether a commit was created or skipped
//! - [`GitError`] - Failures from the underlying git operations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use logledger_git::{CommitOutcome, ExportCommitter};
//!
//! let committer = ExportCommitter::new(".");
//! match committer.commit_file("exports/access.csv".as_ref(), None)? {
//!     CommitOutcome::Committed { id, .. } => println!("committed {}", id),
//!     CommitOutcome::NothingToCommit => println!("nothing to commit"),
//! }
//! ```

mod commit;

pub use commit::{CommitOutcome, ExportCommitter, GitError};
