//! Decision-tree construction and prediction.
//!
//! The fitted tree is an arena of [`node::TreeNode`]s rooted at index 0.
//! Building happens once in [`builder::TreeBuilder`]; the tree is immutable
//! afterward and is consumed by the predictor, the JSON exporter, and the
//! renderer.

pub mod builder;
pub mod node;

mod tree;

pub use tree::DecisionTree;
