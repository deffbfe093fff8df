use anyhow::{Context as _, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use super::Context;
use crate::error::GwtError;
use crate::prompt::confirm;

/// Directory a new worktree for `branch` gets: a sibling of `cwd` named
/// `<cwd name>_<branch>`, with every `/` in the branch turned into `_`.
///
/// # Errors
/// Returns an error if `cwd` has no parent or no final component.
pub fn sibling_path(cwd: &Path, branch: &str) -> Result<PathBuf> {
    let base = cwd
        .file_name()
        .with_context(|| format!("Cannot name a worktree next to {}", cwd.display()))?;
    let parent = cwd
        .parent()
        .with_context(|| format!("{} has no parent directory", cwd.display()))?;

    let sanitized = branch.replace('/', "_");
    Ok(parent.join(format!("{}_{sanitized}", base.to_string_lossy())))
}

/// Adds a worktree for `branch` next to the current directory.
///
/// An existing branch is checked out directly. Otherwise the user is asked
/// (on `out`, answer read from `input`) whether to create the branch from the
/// current HEAD.
///
/// # Errors
/// Returns an error if:
/// - the branch name is empty or the target path cannot be derived
/// - the user declines to create the branch
/// - git fails to create the branch or the worktree
pub fn add_worktree(
    ctx: &Context,
    branch: &str,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<PathBuf> {
    if branch.trim().is_empty() {
        anyhow::bail!("Branch name must not be empty");
    }
    let path = sibling_path(&ctx.cwd, branch)?;

    if let Err(e) = ctx.source.add_worktree(&path, branch) {
        log::debug!("checking out existing branch failed: {e:#}");

        let question = format!("Branch not found. Create '{branch}'? [y/N] ");
        if !confirm(input, out, &question)? {
            return Err(GwtError::Declined.into());
        }

        ctx.source
            .add_worktree_with_new_branch(branch, &path)
            .context("Failed to create worktree")?;
    }

    Ok(path)
}
