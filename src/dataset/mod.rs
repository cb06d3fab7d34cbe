//! Dataset management for Favtree.
//!
//! This module provides CSV loading, label encoding, the in-memory encoded
//! dataset, and the deterministic train/test split.

pub mod encoding;
pub mod loader;
pub mod split;

use crate::core::error::{FavTreeError, Result};
use crate::core::types::{ClassIndex, DataSize, Label};
use ndarray::{Array1, Array2, Axis};

/// An encoded, row-aligned dataset: a feature matrix of categorical codes
/// plus a label vector of target codes.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Feature matrix, one row per record, one column per feature
    features: Array2<Label>,
    /// Target codes, row-aligned with the feature matrix
    labels: Array1<Label>,
    /// Feature column names, matrix order
    feature_names: Vec<String>,
}

impl Dataset {
    /// Create a dataset from an encoded feature matrix and label vector.
    ///
    /// Validates row alignment, column/name alignment, and non-emptiness.
    pub fn new(
        features: Array2<Label>,
        labels: Array1<Label>,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        if features.nrows() == 0 {
            return Err(FavTreeError::dataset("dataset has no rows"));
        }
        if features.nrows() != labels.len() {
            return Err(FavTreeError::dimension_mismatch(
                format!("{} feature rows", features.nrows()),
                format!("{} labels", labels.len()),
            ));
        }
        if features.ncols() != feature_names.len() {
            return Err(FavTreeError::dimension_mismatch(
                format!("{} feature columns", features.ncols()),
                format!("{} feature names", feature_names.len()),
            ));
        }
        Ok(Dataset {
            features,
            labels,
            feature_names,
        })
    }

    /// Number of rows.
    pub fn num_data(&self) -> DataSize {
        self.features.nrows()
    }

    /// Number of feature columns.
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    /// Number of target classes, taken as one past the largest label code.
    pub fn num_classes(&self) -> usize {
        self.labels
            .iter()
            .map(|&label| label as ClassIndex)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// The feature matrix.
    pub fn features(&self) -> &Array2<Label> {
        &self.features
    }

    /// The label vector.
    pub fn labels(&self) -> &Array1<Label> {
        &self.labels
    }

    /// The feature column names.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Build a new dataset containing the given rows, in the given order.
    pub fn select_rows(&self, rows: &[DataSize]) -> Result<Self> {
        if rows.is_empty() {
            return Err(FavTreeError::dataset("row selection is empty"));
        }
        for &row in rows {
            if row >= self.num_data() {
                return Err(FavTreeError::dataset(format!(
                    "row index {} out of bounds for {} rows",
                    row,
                    self.num_data()
                )));
            }
        }
        let features = self.features.select(Axis(0), rows);
        let labels = self.labels.select(Axis(0), rows);
        Dataset::new(features, labels, self.feature_names.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{}", i)).collect()
    }

    #[test]
    fn test_dataset_creation() {
        let features = array![[0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
        let labels = array![0.0, 1.0, 1.0];
        let dataset = Dataset::new(features, labels, names(2)).unwrap();

        assert_eq!(dataset.num_data(), 3);
        assert_eq!(dataset.num_features(), 2);
        assert_eq!(dataset.num_classes(), 2);
    }

    #[test]
    fn test_row_label_mismatch_rejected() {
        let features = array![[0.0, 1.0], [1.0, 0.0]];
        let labels = array![0.0, 1.0, 1.0];
        assert!(Dataset::new(features, labels, names(2)).is_err());
    }

    #[test]
    fn test_name_column_mismatch_rejected() {
        let features = array![[0.0, 1.0], [1.0, 0.0]];
        let labels = array![0.0, 1.0];
        assert!(Dataset::new(features, labels, names(3)).is_err());
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let features = Array2::<Label>::zeros((0, 2));
        let labels = Array1::<Label>::zeros(0);
        assert!(Dataset::new(features, labels, names(2)).is_err());
    }

    #[test]
    fn test_select_rows() {
        let features = array![[0.0], [1.0], [2.0], [3.0]];
        let labels = array![0.0, 1.0, 0.0, 1.0];
        let dataset = Dataset::new(features, labels, names(1)).unwrap();

        let subset = dataset.select_rows(&[3, 1]).unwrap();
        assert_eq!(subset.num_data(), 2);
        assert_eq!(subset.features()[[0, 0]], 3.0);
        assert_eq!(subset.labels()[1], 1.0);
    }

    #[test]
    fn test_select_rows_out_of_bounds() {
        let features = array![[0.0], [1.0]];
        let labels = array![0.0, 1.0];
        let dataset = Dataset::new(features, labels, names(1)).unwrap();
        assert!(dataset.select_rows(&[5]).is_err());
        assert!(dataset.select_rows(&[]).is_err());
    }
}
