//! Worktree records and the parse → rank pipeline.
//!
//! [`enumerate`] is what every command starts from: it asks a
//! [`WorktreeSource`] for the raw `git worktree list` lines, parses each into a
//! [`WorktreeRecord`] and returns them in display order.

pub mod parse;
pub mod rank;

use anyhow::Result;
use std::path::Path;

use crate::traits::WorktreeSource;

pub use parse::{ParseOptions, parse_line, parse_listing};
pub use rank::rank;

/// One entry of `git worktree list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeRecord {
    /// Absolute path of the worktree, unique within one listing
    pub path: String,
    /// Presentation string for the picker; never parsed back
    pub label: String,
    /// Short commit id, empty if the listing omitted it
    pub commit: String,
    /// Branch name, or the parenthesised ref for detached worktrees
    pub branch: String,
    /// The worktree is the process's current directory
    pub is_current: bool,
}

/// Lists, parses and ranks the worktrees visible from `cwd`.
///
/// # Errors
/// Returns an error if the source cannot produce a listing.
pub fn enumerate(
    source: &dyn WorktreeSource,
    cwd: &Path,
    options: &ParseOptions,
) -> Result<Vec<WorktreeRecord>> {
    let lines = source.list_worktrees()?;
    let records = parse_listing(&lines, &cwd.to_string_lossy(), options);
    log::debug!("parsed {} worktree(s)", records.len());
    Ok(rank(records))
}
