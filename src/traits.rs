use anyhow::Result;
use std::path::{Path, PathBuf};

/// Everything gwt asks of git, behind a trait so commands can run against a fake
/// in tests.
///
/// `Send + Sync` because the picker's preview callback holds on to the source
/// while the picker renders from its own threads.
pub trait WorktreeSource: Send + Sync {
    /// Raw lines of `git worktree list`.
    ///
    /// # Errors
    /// Returns `GwtError::VcsUnavailable` if git cannot run or fails.
    fn list_worktrees(&self) -> Result<Vec<String>>;

    /// Top-level directory of the repository containing the current directory.
    ///
    /// # Errors
    /// Returns `GwtError::NotARepository` if git cannot run or fails.
    fn repository_root(&self) -> Result<PathBuf>;

    /// Adds a worktree at `path` checking out the existing `branch`.
    ///
    /// # Errors
    /// Returns an error if git refuses, e.g. because the branch does not exist.
    fn add_worktree(&self, path: &Path, branch: &str) -> Result<()>;

    /// Creates `branch` at the current HEAD and a worktree for it at `path`.
    ///
    /// # Errors
    /// Returns an error if git refuses.
    fn add_worktree_with_new_branch(&self, branch: &str, path: &Path) -> Result<()>;

    /// Removes the worktree at `path`.
    ///
    /// # Errors
    /// Returns an error if git refuses, e.g. on uncommitted changes without `force`.
    fn remove_worktree(&self, path: &Path, force: bool) -> Result<()>;

    /// Short-form status of the worktree at `path`, used for picker previews.
    ///
    /// # Errors
    /// Returns an error if git cannot run or fails.
    fn status_short(&self, path: &Path) -> Result<String>;
}
