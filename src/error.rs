//! Semantic errors that `main` needs to recognise.
//!
//! Most failures are plain `anyhow` errors with context attached. `GwtError` only
//! covers the cases that callers branch on (the `main` fallback on
//! [`GwtError::BranchNotFound`]) or that must exit without a message
//! ([`GwtError::SelectionCancelled`], [`GwtError::Declined`]).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GwtError {
    /// `git` could not be spawned or `git worktree list` exited non-zero
    VcsUnavailable { detail: String },
    /// `git rev-parse --show-toplevel` failed: not inside a repository
    NotARepository { detail: String },
    /// No worktree has this exact branch checked out
    BranchNotFound { branch: String },
    /// The user left the picker without choosing anything
    SelectionCancelled,
    /// The user answered anything but `y` at a confirmation prompt
    Declined,
}

impl fmt::Display for GwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GwtError::VcsUnavailable { detail } => {
                write!(f, "failed to list worktrees: {detail}")
            }
            GwtError::NotARepository { detail } => {
                write!(f, "not inside a git repository: {detail}")
            }
            GwtError::BranchNotFound { branch } => {
                write!(f, "no worktree has branch '{branch}' checked out")
            }
            // Silent: the user already knows they cancelled
            GwtError::SelectionCancelled | GwtError::Declined => Ok(()),
        }
    }
}

impl std::error::Error for GwtError {}

/// True when the error should end the process without printing anything.
#[must_use]
pub fn is_silent(err: &anyhow::Error) -> bool {
    err.downcast_ref::<GwtError>().is_some_and(|e| {
        matches!(e, GwtError::SelectionCancelled | GwtError::Declined)
    })
}

/// True when the error is a failed branch lookup.
#[must_use]
pub fn is_branch_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<GwtError>()
        .is_some_and(|e| matches!(e, GwtError::BranchNotFound { .. }))
}
