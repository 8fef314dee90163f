//! Model serialization and persistence
//!
//! Saves everything needed to reproduce predictions without retraining:
//! kernel family, training parameters, support vectors with their dual
//! coefficients, the bias, the frozen scaler statistics, and the linear
//! weight vector when one exists.

use crate::core::{Result, SvmError};
use crate::kernel::KernelKind;
use crate::model::TrainedSvm;
use crate::scaling::StandardScaler;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serializable representation of a trained SVM model
#[derive(Serialize, Deserialize)]
pub struct SerializableModel {
    /// Kernel family the model was trained with
    pub kernel: KernelKind,
    /// Support vectors in standardized feature space
    pub support_vectors: Vec<Vec<f64>>,
    /// Labels of the support vectors
    pub support_labels: Vec<f64>,
    /// Dual coefficients of the support vectors
    pub alpha: Vec<f64>,
    /// Indices of the support vectors in the original training set
    pub support_indices: Vec<usize>,
    /// Bias term
    pub bias: f64,
    /// Explicit weight vector (linear kernel only)
    pub weights: Option<Vec<f64>>,
    /// Frozen standardization statistics
    pub scaler: StandardScaler,
    /// Feature count expected at prediction time
    pub n_features: usize,
    /// Model metadata
    pub metadata: ModelMetadata,
}

/// Provenance metadata stored alongside the model state
#[derive(Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Version of this library at save time
    pub library_version: String,
    /// Support vector count, duplicated here so `info` can report it
    /// without deserializing the vectors
    pub n_support_vectors: usize,
    /// Parameters the model was trained with
    pub training_params: TrainingParams,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

/// Training parameters recorded for reference
#[derive(Serialize, Deserialize)]
pub struct TrainingParams {
    pub c: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl SerializableModel {
    /// Create a serializable model from a trained model
    pub fn from_trained_model(model: &TrainedSvm) -> Self {
        Self {
            kernel: model.kernel(),
            support_vectors: model.support_vectors().to_vec(),
            support_labels: model.support_labels().to_vec(),
            alpha: model.alpha().to_vec(),
            support_indices: model.support_vector_indices().to_vec(),
            bias: model.bias(),
            weights: model.weights().map(|w| w.to_vec()),
            scaler: model.scaler().clone(),
            n_features: model.n_features(),
            metadata: ModelMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                n_support_vectors: model.n_support_vectors(),
                training_params: TrainingParams {
                    c: model.c(),
                    tolerance: model.tolerance(),
                    max_iterations: model.max_iterations(),
                },
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// Save model to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(SvmError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| SvmError::SerializationError(e.to_string()))?;
        Ok(())
    }

    /// Load model from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(SvmError::IoError)?;
        let reader = BufReader::new(file);
        let model = serde_json::from_reader(reader)
            .map_err(|e| SvmError::SerializationError(e.to_string()))?;
        Ok(model)
    }

    /// Convert back to a usable trained model
    pub fn to_trained_model(&self) -> Result<TrainedSvm> {
        self.kernel.validate()?;

        if self.n_features == 0 || self.scaler.n_features() != self.n_features {
            return Err(SvmError::ModelNotTrained);
        }
        if self.support_vectors.len() != self.alpha.len()
            || self.support_vectors.len() != self.support_labels.len()
        {
            return Err(SvmError::ModelNotTrained);
        }
        for sv in &self.support_vectors {
            if sv.len() != self.n_features {
                return Err(SvmError::DimensionMismatch {
                    expected: self.n_features,
                    actual: sv.len(),
                });
            }
        }

        Ok(TrainedSvm::from_parts(
            self.kernel,
            self.scaler.clone(),
            self.support_vectors.clone(),
            self.support_labels.clone(),
            self.alpha.clone(),
            self.support_indices.clone(),
            self.bias,
            self.weights.clone(),
            self.n_features,
            self.metadata.training_params.c,
            self.metadata.training_params.tolerance,
            self.metadata.training_params.max_iterations,
        ))
    }

    /// Print model summary
    pub fn print_summary(&self) {
        println!("=== SVM Model Summary ===");
        println!("Kernel: {:?}", self.kernel);
        println!("Support Vectors: {}", self.metadata.n_support_vectors);
        println!("Features: {}", self.n_features);
        println!("Bias: {:.6}", self.bias);
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
        println!("Training Parameters:");
        println!("  C: {}", self.metadata.training_params.c);
        println!("  Tolerance: {}", self.metadata.training_params.tolerance);
        println!(
            "  Max Iterations: {}",
            self.metadata.training_params.max_iterations
        );
    }
}
