//! Core data types for the Favtree pipeline.
//!
//! These aliases keep row counts, encoded labels, and tree indices distinct
//! at the type level even though the underlying representations are plain
//! numeric types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Row count and row index type.
pub type DataSize = usize;

/// Encoded categorical value type. Label encoders assign small non-negative
/// integer codes, stored as `f32` so feature matrices and label vectors share
/// one element type.
pub type Label = f32;

/// Feature index type for identifying columns in the feature matrix.
pub type FeatureIndex = usize;

/// Class index type for decoded prediction targets.
pub type ClassIndex = usize;

/// Tree node identifier type. Nodes live in a flat arena; the root is
/// always index 0.
pub type NodeIndex = usize;

/// Split-quality criterion used when growing a decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitCriterion {
    /// Information gain based on Shannon entropy.
    Entropy,
    /// Gini impurity decrease.
    Gini,
}

impl Default for SplitCriterion {
    fn default() -> Self {
        SplitCriterion::Entropy
    }
}

impl fmt::Display for SplitCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitCriterion::Entropy => write!(f, "entropy"),
            SplitCriterion::Gini => write!(f, "gini"),
        }
    }
}

/// Canonical feature column names of the favorites survey table.
pub const FEATURE_COLUMNS: [&str; 3] = ["Recurring", "Price", "Taste"];

/// Canonical target column name of the favorites survey table.
pub const TARGET_COLUMN: &str = "Favorite";

/// Node name used for leaves in the exported JSON tree.
pub const LEAF_NODE_NAME: &str = "Leaf";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_display() {
        assert_eq!(SplitCriterion::Entropy.to_string(), "entropy");
        assert_eq!(SplitCriterion::Gini.to_string(), "gini");
    }

    #[test]
    fn test_criterion_default() {
        assert_eq!(SplitCriterion::default(), SplitCriterion::Entropy);
    }

    #[test]
    fn test_column_constants() {
        assert_eq!(FEATURE_COLUMNS.len(), 3);
        assert!(!FEATURE_COLUMNS.contains(&TARGET_COLUMN));
    }
}
