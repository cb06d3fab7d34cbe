//! Deterministic train/test splitting.
//!
//! Rows are shuffled with a seeded generator and partitioned into a holdout
//! of `ceil(n * test_fraction)` rows and a training set of the remainder.
//! No stratification is applied; the same seed and row count always produce
//! the same partition.

use crate::core::error::{FavTreeError, Result};
use crate::core::types::DataSize;
use crate::dataset::Dataset;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Split a dataset into `(train, test)` subsets.
pub fn train_test_split(
    dataset: &Dataset,
    test_fraction: f64,
    seed: u64,
) -> Result<(Dataset, Dataset)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(FavTreeError::config(format!(
            "test_fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    let num_data = dataset.num_data();
    let num_test = ((num_data as f64) * test_fraction).ceil() as DataSize;
    let num_train = num_data - num_test;
    if num_train == 0 {
        return Err(FavTreeError::dataset(format!(
            "cannot split {} rows with test_fraction {}: training set would be empty",
            num_data, test_fraction
        )));
    }

    let mut indices: Vec<DataSize> = (0..num_data).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_rows, train_rows) = indices.split_at(num_test);
    log::info!(
        "Split {} rows into {} train / {} test (seed {})",
        num_data,
        num_train,
        num_test,
        seed
    );

    let train = dataset.select_rows(train_rows)?;
    let test = dataset.select_rows(test_rows)?;
    Ok((train, test))
}
