//! CSV table loader for Favtree.
//!
//! Reads the favorites survey table into an in-memory string table with
//! header whitespace trimmed, and validates that the columns the pipeline
//! needs are present.

use crate::core::error::{FavTreeError, Result};
use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

/// An unencoded table of string cells with a header row.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Trimmed header names, column order
    headers: Vec<String>,
    /// Row-major cell values
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Header names in column order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Index of a named column.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| {
                FavTreeError::data_loading(format!(
                    "required column '{}' not found; available columns: {}",
                    name,
                    self.headers.join(", ")
                ))
            })
    }

    /// All values of a named column, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let index = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }
}

/// CSV loader for the survey table.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    /// Field delimiter
    delimiter: u8,
    /// Columns that must be present after the header is read
    required_columns: Vec<String>,
}

impl CsvLoader {
    /// Create a loader requiring the given columns.
    pub fn new<I, S>(required_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CsvLoader {
            delimiter: b',',
            required_columns: required_columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load a CSV file into a [`RawTable`].
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<RawTable> {
        let path = path.as_ref();
        log::info!("Loading CSV file: {}", path.display());

        if !path.exists() {
            return Err(FavTreeError::data_loading(format!(
                "File does not exist: {}",
                path.display()
            )));
        }
        if !path.is_file() {
            return Err(FavTreeError::data_loading(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        let file = File::open(path).map_err(|e| {
            FavTreeError::data_loading(format!("Failed to open file {}: {}", path.display(), e))
        })?;

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| FavTreeError::data_loading(format!("Failed to read headers: {}", e)))?
            .iter()
            .map(|header| header.trim().to_string())
            .collect();

        if headers.is_empty() {
            return Err(FavTreeError::data_loading("CSV file has no columns"));
        }

        let mut rows = Vec::new();
        for (line_num, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                FavTreeError::data_loading(format!(
                    "CSV parsing error at line {}: {}",
                    line_num + 2,
                    e
                ))
            })?;
            if record.len() != headers.len() {
                return Err(FavTreeError::data_loading(format!(
                    "Inconsistent column count at line {}: expected {}, got {}",
                    line_num + 2,
                    headers.len(),
                    record.len()
                )));
            }
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        if rows.is_empty() {
            return Err(FavTreeError::data_loading("CSV file contains no data rows"));
        }

        let table = RawTable { headers, rows };
        for column in &self.required_columns {
            table.column_index(column)?;
        }

        log::info!(
            "Loaded {} rows with {} columns",
            table.num_rows(),
            table.headers().len()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_trims_headers() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "t.csv",
            " Recurring , Price ,Taste, Favorite \nYes,Cheap,Good,Yes\nNo,Pricey,Bad,No\n",
        );
        let table = CsvLoader::new(["Recurring", "Price", "Taste", "Favorite"])
            .load(&path)
            .unwrap();

        assert_eq!(
            table.headers(),
            &["Recurring", "Price", "Taste", "Favorite"]
        );
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.column("Price").unwrap(), vec!["Cheap", "Pricey"]);
    }

    #[test]
    fn test_missing_file() {
        let result = CsvLoader::new(["Favorite"]).load("/nonexistent/table.csv");
        assert!(matches!(result, Err(FavTreeError::DataLoading { .. })));
    }

    #[test]
    fn test_missing_required_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "t.csv", "A,B\n1,2\n");
        let result = CsvLoader::new(["Favorite"]).load(&path);
        assert!(matches!(result, Err(FavTreeError::DataLoading { .. })));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "t.csv", "A,B\n1,2\n3\n");
        let result = CsvLoader::new(["A"]).load(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_table_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "t.csv", "A,B\n");
        let result = CsvLoader::new(["A"]).load(&path);
        assert!(matches!(result, Err(FavTreeError::DataLoading { .. })));
    }
}
