//! Decision-tree growing.
//!
//! The builder grows a CART-style binary tree: at each node it scans every
//! feature for the threshold with the largest impurity decrease, splits the
//! rows, and recurses until nodes are pure or no admissible split remains.
//! Candidate thresholds are the midpoints between consecutive distinct sorted
//! feature values, and rows with `value <= threshold` go left.
//!
//! Features are visited in a seeded random permutation per node and an
//! incumbent split is only replaced on strictly greater decrease, so
//! equal-quality splits resolve the same way on every run with the same seed.

use crate::config::TreeConfig;
use crate::core::error::{FavTreeError, Result};
use crate::core::types::{DataSize, FeatureIndex, Label, NodeIndex, SplitCriterion};
use crate::dataset::Dataset;
use crate::tree::node::TreeNode;
use crate::tree::DecisionTree;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Builds a [`DecisionTree`] from an encoded dataset.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    config: TreeConfig,
}

/// The best split found for a node.
struct SplitCandidate {
    feature: FeatureIndex,
    threshold: f64,
    decrease: f64,
}

impl TreeBuilder {
    /// Create a builder with the given hyperparameters.
    pub fn new(config: TreeConfig) -> Self {
        TreeBuilder { config }
    }

    /// The builder's hyperparameters.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Fit a decision tree on the full dataset.
    pub fn fit(&self, dataset: &Dataset) -> Result<DecisionTree> {
        self.config.validate()?;

        let num_classes = dataset.num_classes();
        validate_labels(dataset.labels(), num_classes)?;

        log::info!(
            "Fitting decision tree: {} rows, {} features, {} classes, criterion={}",
            dataset.num_data(),
            dataset.num_features(),
            num_classes,
            self.config.criterion
        );

        let mut rng = StdRng::seed_from_u64(self.config.random_seed);
        let mut nodes = Vec::new();
        let rows: Vec<DataSize> = (0..dataset.num_data()).collect();
        self.grow(
            &mut nodes,
            dataset.features(),
            dataset.labels(),
            num_classes,
            rows,
            0,
            &mut rng,
        )?;

        let tree = DecisionTree::from_parts(nodes, dataset.num_features(), num_classes);
        log::info!(
            "Fitted tree with {} nodes, {} leaves, depth {}",
            tree.num_nodes(),
            tree.num_leaves(),
            tree.depth()
        );
        Ok(tree)
    }

    /// Grow the subtree for `rows`, returning its root index in the arena.
    #[allow(clippy::too_many_arguments)]
    fn grow(
        &self,
        nodes: &mut Vec<TreeNode>,
        features: &Array2<Label>,
        labels: &Array1<Label>,
        num_classes: usize,
        rows: Vec<DataSize>,
        depth: usize,
        rng: &mut StdRng,
    ) -> Result<NodeIndex> {
        let counts = class_counts(labels, &rows, num_classes);
        let index = nodes.len();
        nodes.push(TreeNode::new_leaf(counts.clone(), depth));

        if is_pure(&counts)
            || rows.len() < self.config.min_samples_split
            || self.config.max_depth.is_some_and(|max| depth >= max)
        {
            return Ok(index);
        }

        let split = match self.find_best_split(features, labels, num_classes, &rows, &counts, rng)
        {
            Some(split) if split.decrease >= self.config.min_impurity_decrease => split,
            _ => return Ok(index),
        };

        let (left_rows, right_rows): (Vec<DataSize>, Vec<DataSize>) = rows
            .into_iter()
            .partition(|&row| f64::from(features[[row, split.feature]]) <= split.threshold);

        // The candidate scan guarantees both sides are non-empty.
        if left_rows.is_empty() || right_rows.is_empty() {
            return Err(FavTreeError::training(
                "split produced an empty child; inconsistent feature values",
            ));
        }

        let left = self.grow(nodes, features, labels, num_classes, left_rows, depth + 1, rng)?;
        let right = self.grow(nodes, features, labels, num_classes, right_rows, depth + 1, rng)?;
        nodes[index].set_split(split.feature, split.threshold, left, right);
        Ok(index)
    }

    /// Scan all features for the threshold with the largest impurity decrease.
    fn find_best_split(
        &self,
        features: &Array2<Label>,
        labels: &Array1<Label>,
        num_classes: usize,
        rows: &[DataSize],
        counts: &[f64],
        rng: &mut StdRng,
    ) -> Option<SplitCandidate> {
        let total = rows.len() as f64;
        let parent_impurity = impurity(self.config.criterion, counts, total);

        let mut feature_order: Vec<FeatureIndex> = (0..features.ncols()).collect();
        feature_order.shuffle(rng);

        let mut best: Option<SplitCandidate> = None;
        for feature in feature_order {
            let mut pairs: Vec<(Label, usize)> = rows
                .iter()
                .map(|&row| (features[[row, feature]], labels[row] as usize))
                .collect();
            pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

            let mut left_counts = vec![0.0; num_classes];
            for position in 1..pairs.len() {
                let (previous_value, previous_class) = pairs[position - 1];
                left_counts[previous_class] += 1.0;

                let value = pairs[position].0;
                if value <= previous_value {
                    continue;
                }

                let num_left = position;
                let num_right = pairs.len() - position;
                if num_left < self.config.min_samples_leaf
                    || num_right < self.config.min_samples_leaf
                {
                    continue;
                }

                let right_counts: Vec<f64> = counts
                    .iter()
                    .zip(&left_counts)
                    .map(|(&all, &left)| all - left)
                    .collect();

                let left_impurity =
                    impurity(self.config.criterion, &left_counts, num_left as f64);
                let right_impurity =
                    impurity(self.config.criterion, &right_counts, num_right as f64);
                let weighted = (num_left as f64 / total) * left_impurity
                    + (num_right as f64 / total) * right_impurity;
                let decrease = parent_impurity - weighted;

                let is_better = best
                    .as_ref()
                    .map_or(true, |incumbent| decrease > incumbent.decrease);
                if is_better {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: (f64::from(previous_value) + f64::from(value)) / 2.0,
                        decrease,
                    });
                }
            }
        }
        best
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        TreeBuilder::new(TreeConfig::default())
    }
}

/// Per-class sample counts for a row subset.
fn class_counts(labels: &Array1<Label>, rows: &[DataSize], num_classes: usize) -> Vec<f64> {
    let mut counts = vec![0.0; num_classes];
    for &row in rows {
        counts[labels[row] as usize] += 1.0;
    }
    counts
}

/// True if every sample in the node belongs to one class.
fn is_pure(counts: &[f64]) -> bool {
    counts.iter().filter(|&&count| count > 0.0).count() <= 1
}

/// Node impurity for the given criterion. Entropy is measured in bits.
fn impurity(criterion: SplitCriterion, counts: &[f64], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    match criterion {
        SplitCriterion::Entropy => counts
            .iter()
            .filter(|&&count| count > 0.0)
            .map(|&count| {
                let p = count / total;
                -p * p.log2()
            })
            .sum(),
        SplitCriterion::Gini => {
            1.0 - counts
                .iter()
                .map(|&count| {
                    let p = count / total;
                    p * p
                })
                .sum::<f64>()
        }
    }
}

/// Labels must be the non-negative integer codes produced by the encoders.
fn validate_labels(labels: &Array1<Label>, num_classes: usize) -> Result<()> {
    if num_classes == 0 {
        return Err(FavTreeError::training("label vector has no classes"));
    }
    for &label in labels {
        if label < 0.0 || label.fract() != 0.0 || (label as usize) >= num_classes {
            return Err(FavTreeError::training(format!(
                "label {} is not a valid class code (expected integer in 0..{})",
                label, num_classes
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn dataset(features: Array2<Label>, labels: Array1<Label>) -> Dataset {
        let names = (0..features.ncols()).map(|i| format!("f{}", i)).collect();
        Dataset::new(features, labels, names).unwrap()
    }

    #[test]
    fn test_entropy_values() {
        // pure node
        assert_relative_eq!(impurity(SplitCriterion::Entropy, &[4.0, 0.0], 4.0), 0.0);
        // balanced binary node is one bit
        assert_relative_eq!(impurity(SplitCriterion::Entropy, &[2.0, 2.0], 4.0), 1.0);
        // three balanced classes
        assert_relative_eq!(
            impurity(SplitCriterion::Entropy, &[1.0, 1.0, 1.0], 3.0),
            3.0_f64.log2()
        );
    }

    #[test]
    fn test_gini_values() {
        assert_relative_eq!(impurity(SplitCriterion::Gini, &[4.0, 0.0], 4.0), 0.0);
        assert_relative_eq!(impurity(SplitCriterion::Gini, &[2.0, 2.0], 4.0), 0.5);
    }

    #[test]
    fn test_single_class_gives_single_leaf() {
        let data = dataset(array![[0.0], [1.0], [2.0]], array![0.0, 0.0, 0.0]);
        let tree = TreeBuilder::default().fit(&data).unwrap();

        assert_eq!(tree.num_nodes(), 1);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_separable_data_perfectly_fitted() {
        let data = dataset(
            array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]],
            array![0.0, 0.0, 1.0, 1.0],
        );
        let tree = TreeBuilder::default().fit(&data).unwrap();

        let predictions = tree.predict(data.features()).unwrap();
        assert_eq!(predictions, array![0.0, 0.0, 1.0, 1.0]);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_xor_data_fully_grown() {
        // No single split has positive gain; the tree must still separate
        // the classes through zero-gain splits.
        let data = dataset(
            array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]],
            array![0.0, 1.0, 1.0, 0.0],
        );
        let tree = TreeBuilder::default().fit(&data).unwrap();

        let predictions = tree.predict(data.features()).unwrap();
        assert_eq!(predictions, array![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let data = dataset(
            array![
                [0.0, 1.0, 1.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 0.0, 1.0]
            ],
            array![0.0, 1.0, 0.0, 1.0, 0.0, 1.0],
        );
        let builder = TreeBuilder::default();
        let tree_a = builder.fit(&data).unwrap();
        let tree_b = builder.fit(&data).unwrap();
        assert_eq!(tree_a, tree_b);
    }

    #[test]
    fn test_max_depth_respected() {
        let data = dataset(
            array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]],
            array![0.0, 1.0, 1.0, 0.0],
        );
        let tree = TreeBuilder::new(TreeConfig {
            max_depth: Some(1),
            ..TreeConfig::default()
        })
        .fit(&data)
        .unwrap();
        assert!(tree.depth() <= 1);
    }

    #[test]
    fn test_midpoint_thresholds() {
        let data = dataset(array![[0.0], [2.0]], array![0.0, 1.0]);
        let tree = TreeBuilder::default().fit(&data).unwrap();

        let root = tree.node(DecisionTree::ROOT).unwrap();
        assert_eq!(root.split_threshold(), Some(1.0));
    }

    #[test]
    fn test_invalid_labels_rejected() {
        let data = dataset(array![[0.0], [1.0]], array![0.0, 1.5]);
        assert!(TreeBuilder::default().fit(&data).is_err());
    }
}
