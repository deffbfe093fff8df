use anyhow::Result;
use std::path::PathBuf;

use super::Context;
use crate::selection::{find_by_branch, select_one};

/// Resolves the worktree to jump to.
///
/// With a `target` branch the worktree with exactly that branch checked out is
/// chosen; without one the user picks from the ranked listing.
///
/// # Errors
/// Returns an error if:
/// - git cannot list the worktrees
/// - no worktree has `target` checked out
/// - the user cancels the picker
pub fn jump_worktree(ctx: &Context, target: Option<&str>) -> Result<PathBuf> {
    let records = ctx.worktrees()?;

    let chosen = match target {
        Some(branch) => find_by_branch(&records, branch)?,
        None => {
            let preview = ctx.preview(&records);
            select_one(ctx.picker.as_ref(), "Jump to worktree:", &records, preview)?
        }
    };

    log::debug!("jumping to {}", chosen.path);
    Ok(PathBuf::from(&chosen.path))
}

/// Branch names checked out in any worktree, in listing order, for shell
/// completion.
///
/// # Errors
/// Returns an error if git cannot list the worktrees.
pub fn list_branches(ctx: &Context) -> Result<Vec<String>> {
    let records = ctx.worktrees()?;
    Ok(records
        .into_iter()
        .map(|record| record.branch)
        .filter(|branch| !branch.is_empty())
        .collect())
}
