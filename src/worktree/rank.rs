use std::cmp::Ordering;

use super::WorktreeRecord;

/// Orders records for display: the current worktree first, the rest by label.
///
/// The sort is stable, so records with identical labels keep listing order.
/// Should several records claim to be current they are ordered by label too.
#[must_use]
pub fn rank(mut records: Vec<WorktreeRecord>) -> Vec<WorktreeRecord> {
    records.sort_by(compare);
    records
}

fn compare(a: &WorktreeRecord, b: &WorktreeRecord) -> Ordering {
    b.is_current
        .cmp(&a.is_current)
        .then_with(|| a.label.cmp(&b.label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worktree::parse::{ParseOptions, parse_listing};

    fn record(path: &str, label: &str, is_current: bool) -> WorktreeRecord {
        WorktreeRecord {
            path: path.to_string(),
            label: label.to_string(),
            commit: String::new(),
            branch: String::new(),
            is_current,
        }
    }

    fn paths(records: &[WorktreeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_current_directory_sorts_first() {
        let lines = ["/repo 1a2b3c [main]", "/repo/wt2 4d5e6f [feature]"];
        let ranked = rank(parse_listing(&lines, "/repo", &ParseOptions::default()));
        assert_eq!(paths(&ranked), ["/repo", "/repo/wt2"]);

        // Same listing from the second worktree: label order would put "repo"
        // first, the current worktree still wins.
        let ranked = rank(parse_listing(&lines, "/repo/wt2", &ParseOptions::default()));
        assert_eq!(paths(&ranked), ["/repo/wt2", "/repo"]);
    }

    #[test]
    fn test_others_sorted_by_label() {
        let ranked = rank(vec![
            record("/c", "charlie", false),
            record("/a", "alpha", false),
            record("/here", "zulu", true),
            record("/b", "bravo", false),
        ]);
        assert_eq!(paths(&ranked), ["/here", "/a", "/b", "/c"]);
        assert!(ranked[1..].windows(2).all(|w| w[0].label <= w[1].label));
    }

    #[test]
    fn test_equal_labels_keep_listing_order() {
        let ranked = rank(vec![
            record("/second-created", "same", false),
            record("/first", "alpha", false),
            record("/third-created", "same", false),
        ]);
        assert_eq!(paths(&ranked), ["/first", "/second-created", "/third-created"]);
    }

    #[test]
    fn test_multiple_current_records_fall_back_to_label() {
        let ranked = rank(vec![
            record("/x", "xray", false),
            record("/m", "mike", true),
            record("/d", "delta", true),
        ]);
        assert_eq!(paths(&ranked), ["/d", "/m", "/x"]);
    }

    #[test]
    fn test_empty_listing() {
        assert!(rank(Vec::new()).is_empty());
    }
}
