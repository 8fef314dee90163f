//! Dense binary SVM classifier trained with a simplified SMO solver
//!
//! Based on the sequential minimal optimization approach of Platt,
//! "Sequential Minimal Optimization: A Fast Algorithm for Training Support
//! Vector Machines" (simplified variant, cs229 course notes).

pub mod api;
pub mod cache;
pub mod core;
pub mod data;
pub mod kernel;
pub mod model;
pub mod persistence;
pub mod scaling;
pub mod solver;

// Re-export main types for convenience
pub use crate::api::{EvaluationMetrics, Svm};
pub use crate::cache::KernelCache;
pub use crate::core::{Prediction, Result, SmoConfig, SvmError};
pub use crate::data::{CsvDataset, Delimiter};
pub use crate::kernel::KernelKind;
pub use crate::model::TrainedSvm;
pub use crate::persistence::SerializableModel;
pub use crate::scaling::StandardScaler;
pub use crate::solver::SmoSolver;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
