//! The user-facing commands.
//!
//! Each handler returns the single path the binary prints on stdout; anything
//! meant for the user goes to the `out` writer (stderr in production).

pub mod add;
pub mod init;
pub mod jump;
pub mod main_branch;
pub mod remove;

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::GwtConfig;
use crate::selection::{Picker, PreviewFn, status_preview};
use crate::traits::WorktreeSource;
use crate::worktree::{self, WorktreeRecord};

/// Per-invocation inputs shared by all commands.
///
/// The current directory is read (and symlink-resolved) once when the context
/// is built; nothing below consults the process environment again.
pub struct Context {
    pub cwd: PathBuf,
    pub config: GwtConfig,
    pub source: Arc<dyn WorktreeSource>,
    pub picker: Box<dyn Picker>,
}

impl Context {
    #[must_use]
    pub fn new(
        cwd: PathBuf,
        config: GwtConfig,
        source: Arc<dyn WorktreeSource>,
        picker: Box<dyn Picker>,
    ) -> Self {
        Self {
            cwd,
            config,
            source,
            picker,
        }
    }

    /// Resolves the process's current directory, following symlinks.
    ///
    /// # Errors
    /// Returns an error if the current directory is gone or unreadable.
    pub fn resolve_cwd() -> Result<PathBuf> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        cwd.canonicalize()
            .with_context(|| format!("Failed to resolve {}", cwd.display()))
    }

    /// Fresh, ranked listing of the repository's worktrees.
    ///
    /// # Errors
    /// Returns `GwtError::VcsUnavailable` if git cannot list worktrees.
    pub fn worktrees(&self) -> Result<Vec<WorktreeRecord>> {
        worktree::enumerate(
            self.source.as_ref(),
            &self.cwd,
            &self.config.parse_options(),
        )
    }

    /// Status preview for `records`, unless previews are switched off.
    #[must_use]
    pub fn preview(&self, records: &[WorktreeRecord]) -> Option<Arc<PreviewFn>> {
        self.config
            .preview
            .then(|| status_preview(Arc::clone(&self.source), records))
    }
}
