//! Delimited-text dataset loading
//!
//! Supports loading dense datasets from CSV-style files where:
//! - The last column is the label
//! - All other columns are features
//! - First row can be headers (automatically detected)
//!
//! The delimiter is configurable because some classic tabular datasets (the
//! Statlog heart data, for one) ship space-separated.

use crate::core::{Result, SvmError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Field separator for delimited text files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Whitespace,
}

impl Delimiter {
    fn split(self, line: &str) -> Vec<&str> {
        match self {
            Delimiter::Comma => line.split(',').map(|f| f.trim()).collect(),
            Delimiter::Whitespace => line.split_whitespace().collect(),
        }
    }
}

/// Dense dataset loaded from a delimited text file
#[derive(Debug, Clone)]
pub struct CsvDataset {
    features: Vec<Vec<f64>>,
    labels: Vec<f64>,
}

impl CsvDataset {
    /// Load a dataset from a comma-separated file
    ///
    /// The last column is the label; labels outside {-1, +1} are remapped by
    /// sign. Headers are automatically detected.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(SvmError::IoError)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a dataset from a comma-separated reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, Delimiter::Comma, true)
    }

    /// Load a dataset with an explicit delimiter and header policy
    pub fn from_reader_with_options<R: BufRead>(
        reader: R,
        delimiter: Delimiter,
        auto_detect_header: bool,
    ) -> Result<Self> {
        let mut features: Vec<Vec<f64>> = Vec::new();
        let mut labels = Vec::new();
        let mut first_data_line = true;

        for line in reader.lines() {
            let line = line.map_err(SvmError::IoError)?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if first_data_line {
                first_data_line = false;
                if auto_detect_header && Self::is_header_line(line, delimiter) {
                    continue;
                }
            }

            let (row, label) = Self::parse_data_line(line, delimiter)?;

            if let Some(first) = features.first() {
                if row.len() != first.len() {
                    return Err(SvmError::ParseError(format!(
                        "Inconsistent column count: expected {}, got {} in line: {}",
                        first.len(),
                        row.len(),
                        line
                    )));
                }
            }

            features.push(row);
            labels.push(label);
        }

        if features.is_empty() {
            return Err(SvmError::EmptyDataset);
        }

        Ok(Self { features, labels })
    }

    /// Check if a line appears to be a header
    fn is_header_line(line: &str, delimiter: Delimiter) -> bool {
        let fields = delimiter.split(line);
        if fields.len() < 2 {
            return false;
        }

        // Mostly non-numeric fields (excluding the label column) means
        // headers.
        let non_numeric_count = fields
            .iter()
            .take(fields.len() - 1)
            .filter(|field| field.parse::<f64>().is_err())
            .count();

        non_numeric_count > fields.len() / 2
    }

    /// Parse one data line into a feature row and a signed label
    fn parse_data_line(line: &str, delimiter: Delimiter) -> Result<(Vec<f64>, f64)> {
        let fields = delimiter.split(line);

        if fields.len() < 2 {
            return Err(SvmError::ParseError(format!(
                "Line has too few fields: {line}"
            )));
        }

        let label_str = fields[fields.len() - 1];
        let label = label_str
            .parse::<f64>()
            .map_err(|_| SvmError::ParseError(format!("Invalid label: {label_str}")))?;
        let label = if label == 1.0 || label == -1.0 {
            label
        } else if label > 0.0 {
            1.0
        } else {
            -1.0
        };

        let mut row = Vec::with_capacity(fields.len() - 1);
        for (idx, field) in fields.iter().take(fields.len() - 1).enumerate() {
            let value = field.parse::<f64>().map_err(|_| {
                SvmError::ParseError(format!(
                    "Invalid feature value at column {}: {}",
                    idx + 1,
                    field
                ))
            })?;
            row.push(value);
        }

        Ok((row, label))
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the dataset holds no samples
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of features per sample
    pub fn dim(&self) -> usize {
        self.features.first().map_or(0, |row| row.len())
    }

    /// Feature matrix
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// Label vector
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Consume the dataset into its feature matrix and label vector
    pub fn into_parts(self) -> (Vec<Vec<f64>>, Vec<f64>) {
        (self.features, self.labels)
    }
}
