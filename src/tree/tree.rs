//! Fitted decision tree and prediction traversal.

use crate::core::error::{FavTreeError, Result};
use crate::core::types::{Label, NodeIndex};
use crate::tree::node::TreeNode;
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// An immutable fitted decision tree.
///
/// Nodes live in a flat arena with the root at index 0. Internal nodes route
/// rows with `feature value <= threshold` to the left child, everything else
/// to the right child. Leaves predict the majority class of their stored
/// class counts, with ties resolving to the lowest class code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
    num_features: usize,
    num_classes: usize,
}

impl DecisionTree {
    /// Assemble a tree from an arena of nodes. Used by the builder.
    pub(crate) fn from_parts(
        nodes: Vec<TreeNode>,
        num_features: usize,
        num_classes: usize,
    ) -> Self {
        DecisionTree {
            nodes,
            num_features,
            num_classes,
        }
    }

    /// Root node index.
    pub const ROOT: NodeIndex = 0;

    /// Number of nodes in the tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaf nodes.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Number of features the tree was fitted on.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Number of target classes the tree was fitted on.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Maximum leaf depth (a single-leaf tree has depth 0).
    pub fn depth(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.is_leaf())
            .map(|node| node.depth())
            .max()
            .unwrap_or(0)
    }

    /// Access a node by index.
    pub fn node(&self, index: NodeIndex) -> Result<&TreeNode> {
        self.nodes.get(index).ok_or_else(|| {
            FavTreeError::prediction(format!(
                "node index {} out of bounds for {} nodes",
                index,
                self.nodes.len()
            ))
        })
    }

    /// Route one feature row to its leaf and return the leaf node index.
    pub fn leaf_for_row(&self, row: &ArrayView1<'_, Label>) -> Result<NodeIndex> {
        if row.len() != self.num_features {
            return Err(FavTreeError::dimension_mismatch(
                format!("{} features", self.num_features),
                format!("{} features", row.len()),
            ));
        }
        let mut index = Self::ROOT;
        loop {
            let node = self.node(index)?;
            if node.is_leaf() {
                return Ok(index);
            }
            let feature = node.split_feature().ok_or_else(|| {
                FavTreeError::prediction(format!("internal node {} has no split feature", index))
            })?;
            let threshold = node.split_threshold().ok_or_else(|| {
                FavTreeError::prediction(format!("internal node {} has no split threshold", index))
            })?;
            let child = if f64::from(row[feature]) <= threshold {
                node.left_child()
            } else {
                node.right_child()
            };
            index = child.ok_or_else(|| {
                FavTreeError::prediction(format!("internal node {} has a missing child", index))
            })?;
        }
    }

    /// Predict the class code for one feature row.
    pub fn predict_row(&self, row: &ArrayView1<'_, Label>) -> Result<Label> {
        let leaf = self.leaf_for_row(row)?;
        Ok(self.node(leaf)?.majority_class() as Label)
    }

    /// Predict class codes for every row of a feature matrix.
    pub fn predict(&self, features: &Array2<Label>) -> Result<Array1<Label>> {
        let mut predictions = Array1::zeros(features.nrows());
        for (row_index, row) in features.rows().into_iter().enumerate() {
            predictions[row_index] = self.predict_row(&row)?;
        }
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// root: feature 0 <= 0.5 ? left leaf (class 0) : right leaf (class 1)
    fn stump() -> DecisionTree {
        let mut root = TreeNode::new_leaf(vec![2.0, 2.0], 0);
        root.set_split(0, 0.5, 1, 2);
        let left = TreeNode::new_leaf(vec![2.0, 0.0], 1);
        let right = TreeNode::new_leaf(vec![0.0, 2.0], 1);
        DecisionTree::from_parts(vec![root, left, right], 1, 2)
    }

    #[test]
    fn test_stump_prediction() {
        let tree = stump();
        let features = array![[0.0], [1.0]];
        let predictions = tree.predict(&features).unwrap();
        assert_eq!(predictions, array![0.0, 1.0]);
    }

    #[test]
    fn test_tree_shape_accessors() {
        let tree = stump();
        assert_eq!(tree.num_nodes(), 3);
        assert_eq!(tree.num_leaves(), 2);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.num_classes(), 2);
    }

    #[test]
    fn test_single_leaf_tree() {
        let tree = DecisionTree::from_parts(vec![TreeNode::new_leaf(vec![3.0], 0)], 2, 1);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.num_leaves(), 1);
        let predictions = tree.predict(&array![[5.0, 5.0]]).unwrap();
        assert_eq!(predictions[0], 0.0);
    }

    #[test]
    fn test_feature_count_mismatch_rejected() {
        let tree = stump();
        let features = array![[0.0, 1.0]];
        assert!(tree.predict(&features).is_err());
    }
}
