//! Core types and error definitions

pub mod error;
pub mod types;

pub use error::{Result, SvmError};
pub use types::{Prediction, SmoConfig};
