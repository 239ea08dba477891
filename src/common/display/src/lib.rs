//! Display utilities for algraph.
//!
//! Provides tree rendering for graph expressions.

mod tree;

pub use tree::{DEFAULT_MAX_DEPTH, DisplayTree, TreeNode};

/// Truncate a string for display, appending `...` when shortened.
///
/// Truncation respects UTF-8 character boundaries.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a longer label", 8), "a lon...");
        assert_eq!(truncate_string("ééééé", 4), "é...");
    }
}
