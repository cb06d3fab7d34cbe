//! End-to-end pipeline: load, encode, split, fit, render, evaluate, export.

use crate::config::PipelineConfig;
use crate::core::error::Result;
use crate::dataset::encoding::EncoderSet;
use crate::dataset::loader::CsvLoader;
use crate::dataset::split::train_test_split;
use crate::dataset::Dataset;
use crate::export::json::write_tree_json;
use crate::metrics::accuracy_score;
use crate::render::TreeRenderer;
use crate::tree::builder::TreeBuilder;
use ndarray::{Array1, Array2};
use std::path::PathBuf;

/// Runs the favorite-prediction analysis end to end.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    /// Holdout exact-match accuracy in `[0, 1]`
    pub accuracy: f64,
    /// Number of nodes in the fitted tree
    pub num_nodes: usize,
    /// Number of leaves in the fitted tree
    pub num_leaves: usize,
    /// Maximum leaf depth of the fitted tree
    pub depth: usize,
    /// Number of training rows in the computed split
    pub num_train: usize,
    /// Number of holdout rows in the computed split
    pub num_test: usize,
    /// Path of the written PNG visualization
    pub image_path: PathBuf,
    /// Path of the written JSON tree structure
    pub json_path: PathBuf,
}

impl Pipeline {
    /// Create a pipeline with a validated configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Pipeline { config })
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full analysis.
    ///
    /// Prints the per-column code mapping tables, the holdout accuracy line,
    /// and the export confirmation line to standard output, and writes the
    /// PNG and JSON outputs to the configured paths.
    pub fn run(&self) -> Result<PipelineReport> {
        let config = &self.config;

        // 1. Load the table.
        let mut columns = config.feature_columns.clone();
        columns.push(config.target_column.clone());
        let table = CsvLoader::new(columns.iter().cloned()).load(&config.input_path)?;

        // 2. Encode the categorical columns and print the mappings.
        let encoders = EncoderSet::fit(&table, &columns)?;
        encoders.print_mappings();

        // 3. Assemble the encoded dataset.
        let dataset = self.build_dataset(&table, &encoders)?;

        // 4. Compute the deterministic train/test split. The tree below is
        // fitted on the full dataset, not the training subset, reproducing
        // the original analysis; the split only supplies the holdout rows
        // for the accuracy estimate.
        let (train, test) =
            train_test_split(&dataset, config.test_fraction, config.split_seed)?;
        log::debug!(
            "Train subset: {} rows (unused by the fit), holdout: {} rows",
            train.num_data(),
            test.num_data()
        );

        // 5. Fit the tree.
        let tree = TreeBuilder::new(config.tree.clone()).fit(&dataset)?;

        // 6. Render the visualization.
        let class_names = encoders
            .encoder(&config.target_column)?
            .classes()
            .to_vec();
        TreeRenderer::new(config.feature_columns.clone(), class_names)
            .render(&tree, &config.image_path)?;

        // 7. Evaluate on the holdout.
        let predictions = tree.predict(test.features())?;
        let accuracy = accuracy_score(&test.labels().view(), &predictions.view())?;
        println!("Decision tree accuracy: {:.2}%", accuracy * 100.0);

        // 8. Export the tree structure.
        write_tree_json(&tree, &config.feature_columns, &config.json_path)?;
        println!("Model exported to {}", config.json_path.display());

        Ok(PipelineReport {
            accuracy,
            num_nodes: tree.num_nodes(),
            num_leaves: tree.num_leaves(),
            depth: tree.depth(),
            num_train: train.num_data(),
            num_test: test.num_data(),
            image_path: config.image_path.clone(),
            json_path: config.json_path.clone(),
        })
    }

    /// Encode all configured columns into a row-aligned dataset.
    fn build_dataset(
        &self,
        table: &crate::dataset::loader::RawTable,
        encoders: &EncoderSet,
    ) -> Result<Dataset> {
        let config = &self.config;
        let num_rows = table.num_rows();
        let num_features = config.feature_columns.len();

        let mut features = Array2::zeros((num_rows, num_features));
        for (column_index, column) in config.feature_columns.iter().enumerate() {
            let codes = encoders.transform_column(table, column)?;
            for (row, &code) in codes.iter().enumerate() {
                features[[row, column_index]] = code;
            }
        }
        let labels = Array1::from_vec(encoders.transform_column(table, &config.target_column)?);

        Dataset::new(features, labels, config.feature_columns.clone())
    }
}
