//! Tree display for recursive expressions.

use std::fmt;

/// A node in a display tree.
pub trait TreeNode {
    /// Get the display name of this node.
    fn name(&self) -> &str;

    /// Get child nodes.
    fn children(&self) -> Vec<&dyn TreeNode>;

    /// Get additional details to display.
    fn details(&self) -> Option<String> {
        None
    }
}

/// Depth limit a [`DisplayTree`] starts with.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Helper for displaying tree structures.
///
/// Subtrees below `max_depth` are collapsed into a single `...` line so
/// that very deep expressions stay readable. The limit starts at
/// [`DEFAULT_MAX_DEPTH`].
pub struct DisplayTree<'a> {
    root: &'a dyn TreeNode,
    max_depth: Option<usize>,
}

impl<'a> DisplayTree<'a> {
    /// Create a new display tree.
    pub fn new(root: &'a dyn TreeNode) -> Self {
        Self {
            root,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }

    /// Limit rendering to `depth` levels below the root.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Render every level. Rendering recurses once per level, so only use
    /// this for trees known to be shallow.
    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.max_depth = None;
        self
    }

    fn write_label(f: &mut fmt::Formatter<'_>, node: &dyn TreeNode) -> fmt::Result {
        write!(f, "{}", node.name())?;
        if let Some(details) = node.details() {
            write!(f, " ({details})")?;
        }
        writeln!(f)
    }

    fn fmt_children(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: &dyn TreeNode,
        prefix: &str,
        depth: usize,
    ) -> fmt::Result {
        let children = node.children();
        if children.is_empty() {
            return Ok(());
        }
        if self.max_depth.is_some_and(|max| depth > max) {
            return writeln!(f, "{prefix}└─ ...");
        }

        for (i, child) in children.iter().enumerate() {
            let is_last = i == children.len() - 1;
            let connector = if is_last { "└─ " } else { "├─ " };
            write!(f, "{prefix}{connector}")?;
            Self::write_label(f, *child)?;

            let child_prefix = format!("{prefix}{}", if is_last { "   " } else { "│  " });
            self.fmt_children(f, *child, &child_prefix, depth + 1)?;
        }

        Ok(())
    }
}

impl fmt::Display for DisplayTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_label(f, self.root)?;
        self.fmt_children(f, self.root, "", 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestNode {
        name: String,
        children: Vec<TestNode>,
    }

    impl TestNode {
        fn leaf(name: &str) -> Self {
            Self {
                name: name.to_string(),
                children: vec![],
            }
        }

        fn branch(name: &str, children: Vec<TestNode>) -> Self {
            Self {
                name: name.to_string(),
                children,
            }
        }
    }

    impl TreeNode for TestNode {
        fn name(&self) -> &str {
            &self.name
        }

        fn children(&self) -> Vec<&dyn TreeNode> {
            self.children.iter().map(|c| c as &dyn TreeNode).collect()
        }
    }

    #[test]
    fn test_display_tree() {
        let tree = TestNode::branch(
            "Root",
            vec![TestNode::leaf("Child1"), TestNode::leaf("Child2")],
        );

        let output = DisplayTree::new(&tree).to_string();
        assert_eq!(output, "Root\n├─ Child1\n└─ Child2\n");
    }

    #[test]
    fn test_display_tree_nested_prefixes() {
        let tree = TestNode::branch(
            "Root",
            vec![
                TestNode::branch("A", vec![TestNode::leaf("A1")]),
                TestNode::leaf("B"),
            ],
        );

        let output = DisplayTree::new(&tree).to_string();
        assert_eq!(output, "Root\n├─ A\n│  └─ A1\n└─ B\n");
    }

    #[test]
    fn test_display_tree_max_depth() {
        let tree = TestNode::branch(
            "Root",
            vec![TestNode::branch(
                "A",
                vec![TestNode::branch("B", vec![TestNode::leaf("C")])],
            )],
        );

        let output = DisplayTree::new(&tree).with_max_depth(2).to_string();
        assert!(output.contains("B"));
        assert!(!output.contains("C"));
        assert!(output.contains("..."));
    }

    fn chain(length: usize) -> TestNode {
        (0..length).fold(TestNode::leaf("Leaf"), |child, i| {
            TestNode::branch(&format!("N{i}"), vec![child])
        })
    }

    #[test]
    fn test_display_tree_default_depth_limit() {
        let tree = chain(DEFAULT_MAX_DEPTH * 4);
        let output = DisplayTree::new(&tree).to_string();
        assert!(output.ends_with("└─ ...\n"));
        assert!(!output.contains("Leaf"));
        assert_eq!(output.lines().count(), DEFAULT_MAX_DEPTH + 2);

        let full = DisplayTree::new(&chain(3)).unbounded().to_string();
        assert!(full.contains("Leaf"));
    }
}
