//! Pipeline configuration for Favtree.
//!
//! This module provides the main configuration structure and builder pattern
//! for setting up the input path, output paths, split parameters, and tree
//! hyperparameters. The defaults reproduce the original analysis exactly:
//! a 20% holdout drawn with seed 42, an entropy-criterion tree grown without
//! depth limit with seed 0, and fixed output file names next to the input.

use crate::core::error::{FavTreeError, Result};
use crate::core::types::{SplitCriterion, FEATURE_COLUMNS, TARGET_COLUMN};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Hyperparameters controlling decision-tree growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Split-quality criterion
    pub criterion: SplitCriterion,
    /// Maximum tree depth (None = grow until pure or unsplittable)
    pub max_depth: Option<usize>,
    /// Minimum number of samples required to split an internal node
    pub min_samples_split: usize,
    /// Minimum number of samples required in each child of a split
    pub min_samples_leaf: usize,
    /// Minimum impurity decrease required to accept a split
    pub min_impurity_decrease: f64,
    /// Seed for the per-node feature evaluation order; fixes how equal-gain
    /// splits are broken
    pub random_seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            criterion: SplitCriterion::Entropy,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            min_impurity_decrease: 0.0,
            random_seed: 0,
        }
    }
}

impl TreeConfig {
    /// Validate the tree hyperparameters.
    pub fn validate(&self) -> Result<()> {
        if self.min_samples_split < 2 {
            return Err(FavTreeError::config(format!(
                "min_samples_split must be at least 2, got {}",
                self.min_samples_split
            )));
        }
        if self.min_samples_leaf < 1 {
            return Err(FavTreeError::config("min_samples_leaf must be at least 1"));
        }
        if self.min_impurity_decrease < 0.0 {
            return Err(FavTreeError::config(format!(
                "min_impurity_decrease must be non-negative, got {}",
                self.min_impurity_decrease
            )));
        }
        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err(FavTreeError::config("max_depth must be at least 1 when set"));
            }
        }
        Ok(())
    }
}

/// Main configuration for an end-to-end pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Path of the input CSV table
    pub input_path: PathBuf,
    /// Path of the output PNG tree visualization
    pub image_path: PathBuf,
    /// Path of the output JSON tree structure
    pub json_path: PathBuf,
    /// Fraction of rows held out for accuracy evaluation
    pub test_fraction: f64,
    /// Seed for the train/test row shuffle
    pub split_seed: u64,
    /// Feature column names, in encoding and matrix order
    pub feature_columns: Vec<String>,
    /// Target column name
    pub target_column: String,
    /// Tree hyperparameters
    pub tree: TreeConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input_path: PathBuf::from("data/favorites.csv"),
            image_path: PathBuf::from("decision_tree_visual.png"),
            json_path: PathBuf::from("decision_tree_structure.json"),
            test_fraction: 0.2,
            split_seed: 42,
            feature_columns: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            target_column: TARGET_COLUMN.to_string(),
            tree: TreeConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a builder for constructing a configuration.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(FavTreeError::config(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.feature_columns.is_empty() {
            return Err(FavTreeError::config("feature_columns must not be empty"));
        }
        if self.feature_columns.iter().any(|c| c == &self.target_column) {
            return Err(FavTreeError::config(format!(
                "target column '{}' must not appear among the feature columns",
                self.target_column
            )));
        }
        self.tree.validate()
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        PipelineConfigBuilder {
            config: PipelineConfig::default(),
        }
    }

    /// Set the input CSV path.
    pub fn input_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.input_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the output PNG path.
    pub fn image_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.image_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the output JSON path.
    pub fn json_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.json_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the holdout fraction.
    pub fn test_fraction(mut self, fraction: f64) -> Self {
        self.config.test_fraction = fraction;
        self
    }

    /// Set the train/test shuffle seed.
    pub fn split_seed(mut self, seed: u64) -> Self {
        self.config.split_seed = seed;
        self
    }

    /// Set the feature column names.
    pub fn feature_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.feature_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the target column name.
    pub fn target_column<S: Into<String>>(mut self, column: S) -> Self {
        self.config.target_column = column.into();
        self
    }

    /// Set the split criterion.
    pub fn criterion(mut self, criterion: SplitCriterion) -> Self {
        self.config.tree.criterion = criterion;
        self
    }

    /// Set the maximum tree depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.tree.max_depth = Some(depth);
        self
    }

    /// Set the tree random seed.
    pub fn tree_seed(mut self, seed: u64) -> Self {
        self.config.tree.random_seed = seed;
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<PipelineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.test_fraction, 0.2);
        assert_eq!(config.split_seed, 42);
        assert_eq!(config.tree.random_seed, 0);
        assert_eq!(config.tree.criterion, SplitCriterion::Entropy);
        assert_eq!(config.tree.max_depth, None);
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::builder()
            .input_path("table.csv")
            .test_fraction(0.25)
            .split_seed(7)
            .criterion(SplitCriterion::Gini)
            .max_depth(4)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("table.csv"));
        assert_eq!(config.test_fraction, 0.25);
        assert_eq!(config.split_seed, 7);
        assert_eq!(config.tree.criterion, SplitCriterion::Gini);
        assert_eq!(config.tree.max_depth, Some(4));
    }

    #[test]
    fn test_invalid_test_fraction() {
        let result = PipelineConfig::builder().test_fraction(0.0).build();
        assert!(result.is_err());

        let result = PipelineConfig::builder().test_fraction(1.0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_target_among_features_rejected() {
        let result = PipelineConfig::builder()
            .feature_columns(["Recurring", "Favorite"])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_tree_params() {
        let mut config = PipelineConfig::default();
        config.tree.min_samples_split = 1;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.tree.min_impurity_decrease = -0.5;
        assert!(config.validate().is_err());
    }
}
