use anyhow::Result;
use std::path::PathBuf;

use super::Context;
use crate::selection::find_default;

/// Resolves the worktree of the default branch.
///
/// The configured default branches (`main`, then `master`) are tried in order;
/// when none is checked out anywhere the repository root is used instead.
///
/// # Errors
/// Returns an error if git cannot list the worktrees, or the fallback cannot
/// determine the repository root.
pub fn jump_default(ctx: &Context) -> Result<PathBuf> {
    let records = ctx.worktrees()?;

    if let Some(record) = find_default(&records, &ctx.config.default_branches) {
        log::debug!("default branch '{}' at {}", record.branch, record.path);
        return Ok(PathBuf::from(&record.path));
    }

    log::debug!(
        "none of {:?} checked out, falling back to repository root",
        ctx.config.default_branches
    );
    ctx.source.repository_root()
}
