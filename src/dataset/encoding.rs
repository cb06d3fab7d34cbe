//! Label encoding for categorical columns.
//!
//! Each categorical column is encoded independently: the distinct string
//! values are sorted and assigned codes `0..k`, giving a per-column bijection
//! between codes and labels. Codes are stable only for a given set of input
//! values; they are not persisted across runs.

use crate::core::error::{FavTreeError, Result};
use crate::core::types::{ClassIndex, Label};
use crate::dataset::loader::RawTable;
use std::collections::{BTreeSet, HashMap};

/// A fitted encoder for one categorical column.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder {
    /// Distinct values in code order (code = index)
    classes: Vec<String>,
    /// Reverse lookup from value to code
    codes: HashMap<String, ClassIndex>,
}

impl LabelEncoder {
    /// Fit an encoder over a column of string values.
    ///
    /// Codes are assigned to the sorted distinct values, so the mapping is
    /// independent of row order.
    pub fn fit<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        if values.is_empty() {
            return Err(FavTreeError::encoding("cannot fit an encoder on an empty column"));
        }
        let distinct: BTreeSet<&str> = values.iter().map(|v| v.as_ref()).collect();
        let classes: Vec<String> = distinct.into_iter().map(|v| v.to_string()).collect();
        let codes = classes
            .iter()
            .enumerate()
            .map(|(code, value)| (value.clone(), code))
            .collect();
        Ok(LabelEncoder { classes, codes })
    }

    /// The distinct values in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of distinct codes.
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Map one value to its code.
    pub fn encode(&self, value: &str) -> Result<ClassIndex> {
        self.codes.get(value).copied().ok_or_else(|| {
            FavTreeError::encoding(format!("value '{}' was not seen during fitting", value))
        })
    }

    /// Map a column of values to codes.
    pub fn transform<S: AsRef<str>>(&self, values: &[S]) -> Result<Vec<Label>> {
        values
            .iter()
            .map(|value| self.encode(value.as_ref()).map(|code| code as Label))
            .collect()
    }

    /// Map one code back to its value.
    pub fn decode(&self, code: ClassIndex) -> Result<&str> {
        self.classes.get(code).map(|s| s.as_str()).ok_or_else(|| {
            FavTreeError::encoding(format!(
                "code {} out of range for {} classes",
                code,
                self.classes.len()
            ))
        })
    }

    /// Map codes back to values.
    pub fn inverse_transform(&self, codes: &[ClassIndex]) -> Result<Vec<&str>> {
        codes.iter().map(|&code| self.decode(code)).collect()
    }
}

/// Fitted encoders for a set of categorical columns, kept in fit order.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderSet {
    encoders: Vec<(String, LabelEncoder)>,
}

impl EncoderSet {
    /// Fit one encoder per named column of the table, in the given order.
    pub fn fit(table: &RawTable, columns: &[String]) -> Result<Self> {
        let mut encoders = Vec::with_capacity(columns.len());
        for column in columns {
            let values = table.column(column)?;
            let encoder = LabelEncoder::fit(&values).map_err(|e| {
                FavTreeError::encoding(format!("column '{}': {}", column, e))
            })?;
            log::debug!(
                "Fitted encoder for column '{}' with {} classes",
                column,
                encoder.num_classes()
            );
            encoders.push((column.clone(), encoder));
        }
        Ok(EncoderSet { encoders })
    }

    /// Look up the encoder for a named column.
    pub fn encoder(&self, column: &str) -> Result<&LabelEncoder> {
        self.encoders
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, encoder)| encoder)
            .ok_or_else(|| {
                FavTreeError::encoding(format!("no encoder fitted for column '{}'", column))
            })
    }

    /// Encode a named column of the table.
    pub fn transform_column(&self, table: &RawTable, column: &str) -> Result<Vec<Label>> {
        let values = table.column(column)?;
        self.encoder(column)?.transform(&values)
    }

    /// Column names in fit order.
    pub fn columns(&self) -> Vec<&str> {
        self.encoders.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Print each column's code-to-label mapping table to standard output.
    pub fn print_mappings(&self) {
        for (column, encoder) in &self.encoders {
            println!("Mapping for column '{}':", column);
            for (code, label) in encoder.classes().iter().enumerate() {
                println!("  {} -> {}", code, label);
            }
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_assigns_sorted_codes() {
        let encoder = LabelEncoder::fit(&["Yes", "No", "Yes", "No"]).unwrap();
        assert_eq!(encoder.classes(), &["No", "Yes"]);
        assert_eq!(encoder.encode("No").unwrap(), 0);
        assert_eq!(encoder.encode("Yes").unwrap(), 1);
    }

    #[test]
    fn test_bijection_over_distinct_values() {
        let values = ["Cheap", "Pricey", "Moderate", "Cheap", "Moderate"];
        let encoder = LabelEncoder::fit(&values).unwrap();

        assert_eq!(encoder.num_classes(), 3);
        for (code, class) in encoder.classes().iter().enumerate() {
            assert_eq!(encoder.encode(class).unwrap(), code);
            assert_eq!(encoder.decode(code).unwrap(), class);
        }
    }

    #[test]
    fn test_transform_and_inverse() {
        let encoder = LabelEncoder::fit(&["Bad", "Good", "Okay"]).unwrap();
        let codes = encoder.transform(&["Good", "Bad", "Okay"]).unwrap();
        assert_eq!(codes, vec![1.0, 0.0, 2.0]);

        let labels = encoder.inverse_transform(&[2, 0]).unwrap();
        assert_eq!(labels, vec!["Okay", "Bad"]);
    }

    #[test]
    fn test_unknown_value_rejected() {
        let encoder = LabelEncoder::fit(&["A", "B"]).unwrap();
        assert!(encoder.encode("C").is_err());
        assert!(encoder.decode(2).is_err());
    }

    #[test]
    fn test_empty_column_rejected() {
        let values: [&str; 0] = [];
        assert!(LabelEncoder::fit(&values).is_err());
    }
}
