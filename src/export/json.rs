//! JSON serialization of fitted decision trees.
//!
//! The fitted tree's arena representation is re-expressed as a nested object,
//! one object per node. Internal nodes serialize as
//! `{"name": <feature>, "threshold": <number>, "left": <node>, "right": <node>}`
//! and leaves as `{"name": "Leaf", "value": [[<counts>...]]}`, with the class
//! counts wrapped in one outer array. Output is written with 4-space
//! indentation and is byte-identical across runs for the same fitted tree.

use crate::core::error::{FavTreeError, Result};
use crate::core::types::{NodeIndex, LEAF_NODE_NAME};
use crate::tree::DecisionTree;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Re-express a fitted tree as a nested JSON value, starting at the root.
pub fn tree_to_value(tree: &DecisionTree, feature_names: &[String]) -> Result<Value> {
    if feature_names.len() != tree.num_features() {
        return Err(FavTreeError::dimension_mismatch(
            format!("{} features", tree.num_features()),
            format!("{} feature names", feature_names.len()),
        ));
    }
    node_to_value(tree, feature_names, DecisionTree::ROOT)
}

/// Recurse over one node. Terminates because the arena is finite and acyclic
/// by construction.
fn node_to_value(
    tree: &DecisionTree,
    feature_names: &[String],
    index: NodeIndex,
) -> Result<Value> {
    let node = tree.node(index)?;
    if node.is_leaf() {
        return Ok(json!({
            "name": LEAF_NODE_NAME,
            "value": [node.class_counts()],
        }));
    }

    let feature = node.split_feature().ok_or_else(|| {
        FavTreeError::serialization(format!("internal node {} has no split feature", index))
    })?;
    let threshold = node.split_threshold().ok_or_else(|| {
        FavTreeError::serialization(format!("internal node {} has no split threshold", index))
    })?;
    let left = node.left_child().ok_or_else(|| {
        FavTreeError::serialization(format!("internal node {} has no left child", index))
    })?;
    let right = node.right_child().ok_or_else(|| {
        FavTreeError::serialization(format!("internal node {} has no right child", index))
    })?;

    Ok(json!({
        "name": feature_names[feature],
        "threshold": threshold,
        "left": node_to_value(tree, feature_names, left)?,
        "right": node_to_value(tree, feature_names, right)?,
    }))
}

/// Serialize a fitted tree to an indented JSON file.
pub fn write_tree_json<P: AsRef<Path>>(
    tree: &DecisionTree,
    feature_names: &[String],
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let value = tree_to_value(tree, feature_names)?;

    let mut file = File::create(path).map_err(|e| {
        FavTreeError::serialization(format!(
            "Failed to create JSON file {}: {}",
            path.display(),
            e
        ))
    })?;

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut file, formatter);
    value.serialize(&mut serializer)?;
    file.write_all(b"\n")?;

    log::info!("Exported tree structure to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::TreeNode;
    use tempfile::TempDir;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{}", i)).collect()
    }

    fn stump() -> DecisionTree {
        let mut root = TreeNode::new_leaf(vec![2.0, 2.0], 0);
        root.set_split(0, 0.5, 1, 2);
        let left = TreeNode::new_leaf(vec![2.0, 0.0], 1);
        let right = TreeNode::new_leaf(vec![0.0, 2.0], 1);
        DecisionTree::from_parts(vec![root, left, right], 1, 2)
    }

    #[test]
    fn test_internal_node_shape() {
        let tree = stump();
        let value = tree_to_value(&tree, &names(1)).unwrap();

        assert_eq!(value["name"], "f0");
        assert_eq!(value["threshold"], 0.5);
        assert_eq!(value["left"]["name"], "Leaf");
        assert_eq!(value["left"]["value"], json!([[2.0, 0.0]]));
        assert_eq!(value["right"]["value"], json!([[0.0, 2.0]]));
    }

    #[test]
    fn test_leaf_root_shape() {
        let tree = DecisionTree::from_parts(vec![TreeNode::new_leaf(vec![5.0], 0)], 2, 1);
        let value = tree_to_value(&tree, &names(2)).unwrap();

        assert_eq!(value["name"], "Leaf");
        assert_eq!(value["value"], json!([[5.0]]));
        assert!(value.get("threshold").is_none());
    }

    #[test]
    fn test_name_count_mismatch_rejected() {
        let tree = stump();
        assert!(tree_to_value(&tree, &names(3)).is_err());
    }

    #[test]
    fn test_write_uses_four_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tree.json");
        write_tree_json(&stump(), &names(1), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("    \"left\""));
        let parsed: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["threshold"], 0.5);
    }

    #[test]
    fn test_write_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let tree = stump();
        let path_a = dir.path().join("a.json");
        let path_b = dir.path().join("b.json");
        write_tree_json(&tree, &names(1), &path_a).unwrap();
        write_tree_json(&tree, &names(1), &path_b).unwrap();

        assert_eq!(
            std::fs::read(&path_a).unwrap(),
            std::fs::read(&path_b).unwrap()
        );
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("tree.json");
        let result = write_tree_json(&stump(), &names(1), &path);
        assert!(matches!(result, Err(FavTreeError::Serialization { .. })));
    }
}
