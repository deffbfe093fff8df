use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use super::Context;
use crate::error::GwtError;
use crate::prompt::confirm;
use crate::selection::select_many;
use crate::worktree::WorktreeRecord;

/// Removes the worktrees the user picks, after confirmation.
///
/// Each selected worktree is removed on its own: a failure is reported on
/// `out` and the rest still go ahead. The returned path is the repository
/// root, or the main worktree when the root itself was removed, so a shell
/// that was sitting in a removed worktree has somewhere to go.
///
/// # Errors
/// Returns an error if:
/// - git cannot list the worktrees or report the repository root
/// - the user cancels the picker or declines the confirmation
pub fn remove_worktrees(
    ctx: &Context,
    force: bool,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<PathBuf> {
    let records = ctx.worktrees()?;
    let preview = ctx.preview(&records);
    let selected = select_many(
        ctx.picker.as_ref(),
        "Select worktrees to remove:",
        &records,
        preview,
    )?;

    writeln!(out, "Remove {} worktree(s)?", selected.len())?;
    for record in &selected {
        writeln!(out, " - {}", record.path)?;
    }
    if !confirm(input, out, "[y/N] ")? {
        return Err(GwtError::Declined.into());
    }

    // Resolved up front: git cannot run from the current directory once the
    // worktree containing it is gone.
    let target = surviving_target(ctx, &selected)?;

    for record in &selected {
        let path = Path::new(&record.path);
        match ctx.source.remove_worktree(path, force) {
            Ok(()) => writeln!(out, "Removed {}", record.path)?,
            Err(e) => {
                log::debug!("removal of {} failed: {e:#}", record.path);
                writeln!(out, "Failed to remove {}: {e:#}", record.path)?;
            }
        }
    }

    Ok(target)
}

/// Repository root, unless it is about to be removed; then the first listed
/// worktree that is kept (git lists the main worktree first).
fn surviving_target(ctx: &Context, removing: &[&WorktreeRecord]) -> Result<PathBuf> {
    let root = ctx.source.repository_root()?;
    let removed = |path: &Path| removing.iter().any(|r| Path::new(&r.path) == path);
    if !removed(root.as_path()) {
        return Ok(root);
    }

    let listing = ctx.source.list_worktrees()?;
    let kept = listing
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .map(Path::new)
        .find(|path| !removed(*path));
    match kept {
        Some(path) => {
            log::debug!("{} is being removed, returning {}", root.display(), path.display());
            Ok(path.to_path_buf())
        }
        None => Ok(root),
    }
}
