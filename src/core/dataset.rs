//! Input dataset loading
//!
//! The input CSV is loaded fully into memory before the pipeline starts.
//! Row order defines `input_order`, and a record's position in the loaded
//! vector always equals its `input_order`.

use crate::config::InputConfig;
use crate::domain::{Record, RecordId, Result, TransentError};
use std::path::Path;

/// The read-only input dataset for one run
#[derive(Debug)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Loads the dataset from the configured CSV file
    ///
    /// The id and text columns are resolved by header name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a configured column is
    /// missing from the header, or a row carries an empty record id.
    pub fn load(config: &InputConfig) -> Result<Self> {
        Self::load_from(&config.path, &config.id_column, &config.text_column)
    }

    /// Loads a dataset from an explicit path and column names
    pub fn load_from(path: &Path, id_column: &str, text_column: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            TransentError::Dataset(format!("failed to open {}: {}", path.display(), e))
        })?;

        let headers = reader
            .headers()
            .map_err(|e| TransentError::Dataset(format!("failed to read header: {e}")))?;

        let id_idx = find_column(headers, id_column)?;
        let text_idx = find_column(headers, text_column)?;

        let mut records = Vec::new();
        for (input_order, row) in reader.records().enumerate() {
            let row = row.map_err(|e| {
                TransentError::Dataset(format!("failed to read row {input_order}: {e}"))
            })?;

            let record_id = RecordId::new(row.get(id_idx).unwrap_or_default()).map_err(|_| {
                TransentError::Dataset(format!("row {input_order} has an empty record id"))
            })?;
            let text = row.get(text_idx).unwrap_or_default().to_string();

            records.push(Record {
                record_id,
                text,
                input_order,
            });
        }

        tracing::info!(
            path = %path.display(),
            records = records.len(),
            "Loaded input dataset"
        );

        Ok(Self { records })
    }

    /// All records in input order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of input records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| {
            TransentError::Dataset(format!(
                "column '{}' not found in header [{}]",
                name,
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_assigns_input_order() {
        let file = write_csv("tweetid,text\na,hello\nb,world\nc,again\n");
        let dataset = Dataset::load_from(file.path(), "tweetid", "text").unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[0].record_id.as_str(), "a");
        assert_eq!(dataset.records()[2].input_order, 2);
        assert_eq!(dataset.records()[1].text, "world");
    }

    #[test]
    fn test_load_resolves_columns_by_name() {
        let file = write_csv("date,tweetid,lang,text\n2020,a,id,halo\n");
        let dataset = Dataset::load_from(file.path(), "tweetid", "text").unwrap();

        assert_eq!(dataset.records()[0].record_id.as_str(), "a");
        assert_eq!(dataset.records()[0].text, "halo");
    }

    #[test]
    fn test_load_missing_column() {
        let file = write_csv("id,body\na,hello\n");
        let err = Dataset::load_from(file.path(), "tweetid", "text").unwrap_err();
        assert!(err.to_string().contains("tweetid"));
    }

    #[test]
    fn test_load_empty_record_id() {
        let file = write_csv("tweetid,text\n,hello\n");
        let err = Dataset::load_from(file.path(), "tweetid", "text").unwrap_err();
        assert!(err.to_string().contains("empty record id"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Dataset::load_from(Path::new("/no/such/file.csv"), "tweetid", "text");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_quoted_text_with_commas() {
        let file = write_csv("tweetid,text\na,\"hello, world\"\n");
        let dataset = Dataset::load_from(file.path(), "tweetid", "text").unwrap();
        assert_eq!(dataset.records()[0].text, "hello, world");
    }
}
