//! Tree node implementation.
//!
//! A node can represent either an internal node (with a split feature and
//! threshold) or a leaf. Every node carries the per-class sample counts of
//! the rows that reached it during fitting; for leaves those counts are the
//! prediction value.

use crate::core::types::{FeatureIndex, NodeIndex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tree node supporting both internal and leaf roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Left child node index (internal nodes only)
    left_child: Option<NodeIndex>,
    /// Right child node index (internal nodes only)
    right_child: Option<NodeIndex>,
    /// Split feature index (internal nodes only)
    split_feature: Option<FeatureIndex>,
    /// Split threshold; rows with `value <= threshold` go left (internal nodes only)
    split_threshold: Option<f64>,
    /// Per-class sample counts of the rows that reached this node
    class_counts: Vec<f64>,
    /// Node depth in the tree (root = 0)
    depth: usize,
}

impl TreeNode {
    /// Creates a new leaf node with the given class counts.
    pub fn new_leaf(class_counts: Vec<f64>, depth: usize) -> Self {
        TreeNode {
            left_child: None,
            right_child: None,
            split_feature: None,
            split_threshold: None,
            class_counts,
            depth,
        }
    }

    /// Returns true if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.split_feature.is_none()
    }

    /// Returns the left child node index (for internal nodes).
    pub fn left_child(&self) -> Option<NodeIndex> {
        self.left_child
    }

    /// Returns the right child node index (for internal nodes).
    pub fn right_child(&self) -> Option<NodeIndex> {
        self.right_child
    }

    /// Returns the split feature index (for internal nodes).
    pub fn split_feature(&self) -> Option<FeatureIndex> {
        self.split_feature
    }

    /// Returns the split threshold (for internal nodes).
    pub fn split_threshold(&self) -> Option<f64> {
        self.split_threshold
    }

    /// Returns the per-class sample counts of this node.
    pub fn class_counts(&self) -> &[f64] {
        &self.class_counts
    }

    /// Returns the node depth (root = 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of samples that reached this node.
    pub fn sample_count(&self) -> f64 {
        self.class_counts.iter().sum()
    }

    /// Returns the majority class index; ties resolve to the lowest index.
    pub fn majority_class(&self) -> usize {
        let mut best = 0;
        for (class, &count) in self.class_counts.iter().enumerate() {
            if count > self.class_counts[best] {
                best = class;
            }
        }
        best
    }

    /// Converts this node from leaf to internal with the given split.
    pub fn set_split(
        &mut self,
        split_feature: FeatureIndex,
        split_threshold: f64,
        left_child: NodeIndex,
        right_child: NodeIndex,
    ) {
        self.split_feature = Some(split_feature);
        self.split_threshold = Some(split_threshold);
        self.left_child = Some(left_child);
        self.right_child = Some(right_child);
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(
                f,
                "Leaf(counts={:?}, depth={})",
                self.class_counts, self.depth
            )
        } else {
            write!(
                f,
                "Internal(feature={}, threshold={:.4}, depth={})",
                self.split_feature.unwrap_or(0),
                self.split_threshold.unwrap_or(0.0),
                self.depth
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_leaf_node() {
        let node = TreeNode::new_leaf(vec![3.0, 1.0], 2);

        assert!(node.is_leaf());
        assert_eq!(node.class_counts(), &[3.0, 1.0]);
        assert_eq!(node.depth(), 2);
        assert_eq!(node.sample_count(), 4.0);
        assert!(node.left_child().is_none());
        assert!(node.right_child().is_none());
    }

    #[test]
    fn test_set_split() {
        let mut node = TreeNode::new_leaf(vec![2.0, 2.0], 0);
        assert!(node.is_leaf());

        node.set_split(1, 0.5, 1, 2);

        assert!(!node.is_leaf());
        assert_eq!(node.split_feature(), Some(1));
        assert_eq!(node.split_threshold(), Some(0.5));
        assert_eq!(node.left_child(), Some(1));
        assert_eq!(node.right_child(), Some(2));
    }

    #[test]
    fn test_majority_class_prefers_lowest_on_tie() {
        let node = TreeNode::new_leaf(vec![2.0, 2.0, 1.0], 0);
        assert_eq!(node.majority_class(), 0);

        let node = TreeNode::new_leaf(vec![1.0, 0.0, 4.0], 0);
        assert_eq!(node.majority_class(), 2);
    }
}
