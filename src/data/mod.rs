//! Dataset loading collaborators

pub mod csv;

pub use csv::{CsvDataset, Delimiter};
