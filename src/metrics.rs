//! Evaluation metrics for fitted models.

use crate::core::error::{FavTreeError, Result};
use crate::core::types::Label;
use ndarray::ArrayView1;

/// Fraction of exact matches between true and predicted class codes, in
/// `[0, 1]`.
///
/// Mismatched lengths and empty inputs are errors; a degenerate empty
/// holdout therefore fails the run instead of producing NaN.
pub fn accuracy_score(
    y_true: &ArrayView1<'_, Label>,
    y_pred: &ArrayView1<'_, Label>,
) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(FavTreeError::dimension_mismatch(
            format!("{} true labels", y_true.len()),
            format!("{} predictions", y_pred.len()),
        ));
    }
    if y_true.is_empty() {
        return Err(FavTreeError::prediction(
            "cannot compute accuracy over an empty holdout set",
        ));
    }

    let matches = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(truth, prediction)| truth == prediction)
        .count();
    Ok(matches as f64 / y_true.len() as f64)
}
