//! Parsing of `git worktree list` (non-porcelain) output.
//!
//! Each line looks like `<path> <commit> [<branch>]` or, for a detached
//! worktree, `<path> <commit> (<description>)`. Anything after the commit
//! (`locked`, `prunable`, ...) is ignored apart from the first delimited group.

use std::path::Path;

use super::WorktreeRecord;

/// Minimum width of the name column in a label.
pub const DEFAULT_LABEL_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub label_width: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            label_width: DEFAULT_LABEL_WIDTH,
        }
    }
}

/// Returns the text between the first `open` and the first `close` after it.
///
/// `None` when `open` never appears or is left unclosed. Later groups are never
/// looked at.
#[must_use]
pub fn first_group(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)? + open.len_utf8();
    let len = text[start..].find(close)?;
    Some(&text[start..start + len])
}

/// Branch name or ref description carried by a listing line.
///
/// Any `[` in the text commits to the bracketed group: parentheses are only
/// looked at when there is no `[` at all, so an unclosed `[` gives an empty
/// result.
#[must_use]
pub fn branch_or_ref(text: &str) -> &str {
    let group = if text.contains('[') {
        first_group(text, '[', ']')
    } else {
        first_group(text, '(', ')')
    };
    group.unwrap_or("")
}

/// Parses one listing line. Blank lines yield `None`.
///
/// `cwd` must already be symlink-resolved; it is compared to the path field as
/// a plain string. The branch is taken from the whole line, path included, so
/// a directory name containing `[..]` shadows the real branch.
#[must_use]
pub fn parse_line(line: &str, cwd: &str, options: &ParseOptions) -> Option<WorktreeRecord> {
    let mut fields = line.split_whitespace();
    let path = fields.next()?;
    let commit = fields.next().unwrap_or_default();

    let branch = branch_or_ref(line);

    let record = WorktreeRecord {
        path: path.to_string(),
        label: display_label(path, commit, branch, options.label_width),
        commit: commit.to_string(),
        branch: branch.to_string(),
        is_current: path == cwd,
    };
    log::trace!("parsed {line:?} -> {record:?}");
    Some(record)
}

/// Parses every line of a listing, skipping blank ones.
#[must_use]
pub fn parse_listing<S: AsRef<str>>(
    lines: &[S],
    cwd: &str,
    options: &ParseOptions,
) -> Vec<WorktreeRecord> {
    lines
        .iter()
        .filter_map(|line| parse_line(line.as_ref(), cwd, options))
        .collect()
}

fn display_label(path: &str, commit: &str, branch: &str, width: usize) -> String {
    let name = Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned());

    let mut label = format!("{name:<width$} {commit}");
    if !branch.is_empty() {
        label.push_str(&format!(" [{branch}]"));
    }
    label
}
