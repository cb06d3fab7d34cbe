//! PNG visualization of fitted decision trees.
//!
//! Draws the tree top-down onto a bitmap canvas: internal nodes are labeled
//! with their split (`feature <= threshold`), leaves with the original target
//! class name of their majority class. Leaf x positions are spaced evenly in
//! visit order and internal nodes sit above the midpoint of their children.

use crate::core::error::{FavTreeError, Result};
use crate::core::types::NodeIndex;
use crate::tree::DecisionTree;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: u32 = 1500;
/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: u32 = 1000;

/// Renders a fitted tree to a PNG file.
#[derive(Debug, Clone)]
pub struct TreeRenderer {
    feature_names: Vec<String>,
    class_names: Vec<String>,
    title: String,
    width: u32,
    height: u32,
}

/// Layout position of one node: x in `[0, 1]`, plus its depth row.
#[derive(Debug, Clone, Copy)]
struct NodePosition {
    x: f64,
    depth: usize,
}

impl TreeRenderer {
    /// Create a renderer with the given feature and target class names.
    pub fn new(feature_names: Vec<String>, class_names: Vec<String>) -> Self {
        TreeRenderer {
            feature_names,
            class_names,
            title: "Decision Tree for Favorite Prediction".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    /// Set the chart title.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    /// Set the canvas size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Render the tree to a PNG file.
    pub fn render<P: AsRef<Path>>(&self, tree: &DecisionTree, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(FavTreeError::rendering(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }
        }
        if self.feature_names.len() != tree.num_features() {
            return Err(FavTreeError::dimension_mismatch(
                format!("{} features", tree.num_features()),
                format!("{} feature names", self.feature_names.len()),
            ));
        }
        if self.class_names.len() != tree.num_classes() {
            return Err(FavTreeError::dimension_mismatch(
                format!("{} classes", tree.num_classes()),
                format!("{} class names", self.class_names.len()),
            ));
        }

        let mut positions: Vec<Option<NodePosition>> = vec![None; tree.num_nodes()];
        let mut next_leaf = 0usize;
        let num_leaves = tree.num_leaves();
        self.assign_positions(tree, DecisionTree::ROOT, 0, num_leaves, &mut next_leaf, &mut positions)?;

        let area = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        area.fill(&WHITE)
            .map_err(|e| FavTreeError::rendering(e.to_string()))?;

        let title_style = FontDesc::new(FontFamily::SansSerif, 28.0, FontStyle::Bold)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        area.draw(&Text::new(
            self.title.clone(),
            (self.width as i32 / 2, 15),
            title_style,
        ))
        .map_err(|e| FavTreeError::rendering(e.to_string()))?;

        let depth_rows = tree.depth() + 1;
        let top_margin = 70i32;
        let bottom_margin = 40i32;
        let side_margin = 60i32;
        let row_height = (self.height as i32 - top_margin - bottom_margin) / depth_rows as i32;
        let usable_width = self.width as i32 - 2 * side_margin;

        let center = |position: &NodePosition| -> (i32, i32) {
            let x = side_margin + (position.x * usable_width as f64) as i32;
            let y = top_margin + position.depth as i32 * row_height + row_height / 2;
            (x, y)
        };

        // Edges first so the node boxes draw over them.
        for index in 0..tree.num_nodes() {
            let node = tree.node(index)?;
            if node.is_leaf() {
                continue;
            }
            let from = center(&self.position(&positions, index)?);
            for child in [node.left_child(), node.right_child()].into_iter().flatten() {
                let to = center(&self.position(&positions, child)?);
                area.draw(&PathElement::new(vec![from, to], BLACK.stroke_width(1)))
                    .map_err(|e| FavTreeError::rendering(e.to_string()))?;
            }
        }

        let box_width = 150i32;
        let box_height = 44i32;
        for index in 0..tree.num_nodes() {
            let node = tree.node(index)?;
            let (x, y) = center(&self.position(&positions, index)?);

            let fill = if node.is_leaf() {
                Palette99::pick(node.majority_class()).mix(0.35)
            } else {
                WHITE.mix(1.0)
            };
            area.draw(&Rectangle::new(
                [
                    (x - box_width / 2, y - box_height / 2),
                    (x + box_width / 2, y + box_height / 2),
                ],
                fill.filled(),
            ))
            .map_err(|e| FavTreeError::rendering(e.to_string()))?;
            area.draw(&Rectangle::new(
                [
                    (x - box_width / 2, y - box_height / 2),
                    (x + box_width / 2, y + box_height / 2),
                ],
                BLACK.stroke_width(1),
            ))
            .map_err(|e| FavTreeError::rendering(e.to_string()))?;

            let label = self.node_label(tree, index)?;
            let label_style = ("sans-serif", 15)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));
            area.draw(&Text::new(label, (x, y), label_style))
                .map_err(|e| FavTreeError::rendering(e.to_string()))?;
        }

        area.present().map_err(|e| {
            FavTreeError::rendering(format!(
                "Failed to write image {}: {}",
                path.display(),
                e
            ))
        })?;
        log::info!("Rendered tree visualization to {}", path.display());
        Ok(())
    }

    /// Assign leaf-order x positions; internal nodes center over their children.
    fn assign_positions(
        &self,
        tree: &DecisionTree,
        index: NodeIndex,
        depth: usize,
        num_leaves: usize,
        next_leaf: &mut usize,
        positions: &mut Vec<Option<NodePosition>>,
    ) -> Result<f64> {
        let node = tree.node(index)?;
        let x = if node.is_leaf() {
            let x = (*next_leaf as f64 + 0.5) / num_leaves as f64;
            *next_leaf += 1;
            x
        } else {
            let left = node.left_child().ok_or_else(|| {
                FavTreeError::rendering(format!("internal node {} has no left child", index))
            })?;
            let right = node.right_child().ok_or_else(|| {
                FavTreeError::rendering(format!("internal node {} has no right child", index))
            })?;
            let left_x =
                self.assign_positions(tree, left, depth + 1, num_leaves, next_leaf, positions)?;
            let right_x =
                self.assign_positions(tree, right, depth + 1, num_leaves, next_leaf, positions)?;
            (left_x + right_x) / 2.0
        };
        positions[index] = Some(NodePosition { x, depth });
        Ok(x)
    }

    fn position(&self, positions: &[Option<NodePosition>], index: NodeIndex) -> Result<NodePosition> {
        positions
            .get(index)
            .copied()
            .flatten()
            .ok_or_else(|| FavTreeError::rendering(format!("node {} has no layout position", index)))
    }

    fn node_label(&self, tree: &DecisionTree, index: NodeIndex) -> Result<String> {
        let node = tree.node(index)?;
        if node.is_leaf() {
            let class = node.majority_class();
            let name = self.class_names.get(class).ok_or_else(|| {
                FavTreeError::rendering(format!("no class name for class {}", class))
            })?;
            Ok(format!("{} (n={})", name, node.sample_count()))
        } else {
            let feature = node.split_feature().unwrap_or(0);
            let threshold = node.split_threshold().unwrap_or(0.0);
            let name = self.feature_names.get(feature).ok_or_else(|| {
                FavTreeError::rendering(format!("no feature name for feature {}", feature))
            })?;
            Ok(format!("{} <= {:.2}", name, threshold))
        }
    }
}
