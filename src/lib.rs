//! # Favtree
//!
//! A decision-tree pipeline for predicting favorite menu items from
//! categorical survey data. The crate loads a small tabular dataset,
//! label-encodes its categorical columns, fits a single entropy-criterion
//! decision-tree classifier, renders the fitted tree to a PNG image,
//! reports holdout accuracy, and exports the tree structure as nested JSON.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use favtree::{Pipeline, PipelineConfig};
//!
//! # fn main() -> favtree::Result<()> {
//! let config = PipelineConfig::builder()
//!     .input_path("data/favorites.csv")
//!     .image_path("decision_tree_visual.png")
//!     .json_path("decision_tree_structure.json")
//!     .build()?;
//!
//! let report = Pipeline::new(config)?.run()?;
//! println!("holdout accuracy: {:.2}%", report.accuracy * 100.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the components directly
//!
//! ```rust
//! use favtree::{Dataset, TreeBuilder, TreeConfig};
//! use ndarray::{array, Array1, Array2};
//!
//! # fn main() -> favtree::Result<()> {
//! let features: Array2<f32> = array![[0.0, 1.0], [1.0, 0.0], [0.0, 0.0], [1.0, 1.0]];
//! let labels: Array1<f32> = array![0.0, 1.0, 0.0, 1.0];
//! let dataset = Dataset::new(features, labels, vec!["Recurring".into(), "Price".into()])?;
//!
//! let tree = TreeBuilder::new(TreeConfig::default()).fit(&dataset)?;
//! let predictions = tree.predict(dataset.features())?;
//! assert_eq!(predictions.len(), 4);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: fundamental types and error handling
//! - [`config`]: pipeline configuration and validation
//! - [`dataset`]: CSV loading, label encoding, and train/test splitting
//! - [`tree`]: decision-tree construction and prediction
//! - [`metrics`]: evaluation metrics
//! - [`export`]: JSON serialization of fitted trees
//! - [`render`]: PNG visualization of fitted trees
//! - [`pipeline`]: the end-to-end run

#![warn(missing_docs)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module
pub mod core;

// Configuration management module
pub mod config;

// Dataset management module
pub mod dataset;

// Decision tree module
pub mod tree;

// Metrics evaluation module
pub mod metrics;

// Model export module
pub mod export;

// Tree visualization module
pub mod render;

// End-to-end pipeline module
pub mod pipeline;

// Re-export core functionality for convenience
pub use crate::core::{
    error::{FavTreeError, Result},
    types::*,
};

// Re-export configuration functionality
pub use crate::config::{PipelineConfig, PipelineConfigBuilder, TreeConfig};

// Re-export dataset functionality
pub use crate::dataset::{
    encoding::{EncoderSet, LabelEncoder},
    loader::{CsvLoader, RawTable},
    split::train_test_split,
    Dataset,
};

// Re-export tree functionality
pub use crate::tree::{builder::TreeBuilder, node::TreeNode, DecisionTree};

// Re-export metrics functionality
pub use crate::metrics::accuracy_score;

// Re-export export functionality
pub use crate::export::json::{tree_to_value, write_tree_json};

// Re-export render functionality
pub use crate::render::TreeRenderer;

// Re-export pipeline functionality
pub use crate::pipeline::{Pipeline, PipelineReport};
