//! Error types for SVM training and prediction

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvmError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("dataset rejected: {0}")]
    InvalidDataset(String),

    #[error("labels must be -1 or +1, got {0}")]
    InvalidLabel(f64),

    #[error("expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("model is not trained or its stored state is incomplete")]
    ModelNotTrained,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, SvmError>;
