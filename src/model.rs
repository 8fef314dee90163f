//! Trained SVM model and decision-function evaluation

use crate::core::{Prediction, Result, SmoConfig, SvmError};
use crate::kernel::{dot, KernelKind};
use crate::scaling::StandardScaler;

/// A trained binary SVM classifier
///
/// Holds the dual solution (support vectors, their multipliers, the bias)
/// together with the frozen standardization statistics. For the linear
/// kernel an explicit weight vector is cached as a fast path; the dual form
/// `f(x) = sum_k alpha_k y_k K(x_k, x) + b` stays the ground truth for every
/// kernel family. Prediction never mutates the model.
pub struct TrainedSvm {
    kernel: KernelKind,
    scaler: StandardScaler,
    support_vectors: Vec<Vec<f64>>,
    support_labels: Vec<f64>,
    alpha: Vec<f64>,
    support_indices: Vec<usize>,
    bias: f64,
    weights: Option<Vec<f64>>,
    n_features: usize,
    c: f64,
    tolerance: f64,
    max_iterations: usize,
    training_passes: usize,
}

impl TrainedSvm {
    /// Build a model from the solver output
    ///
    /// `scaled` and `alpha_full` cover the whole training set; only samples
    /// with a strictly positive multiplier are retained.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_training(
        kernel: KernelKind,
        config: &SmoConfig,
        scaler: StandardScaler,
        scaled: Vec<Vec<f64>>,
        y: &[f64],
        alpha_full: Vec<f64>,
        bias: f64,
        training_passes: usize,
    ) -> Self {
        let n_features = scaled[0].len();

        let weights = if kernel.is_linear() {
            let mut w = vec![0.0; n_features];
            for (i, row) in scaled.iter().enumerate() {
                if alpha_full[i] > 0.0 {
                    for (d, &v) in row.iter().enumerate() {
                        w[d] += alpha_full[i] * y[i] * v;
                    }
                }
            }
            Some(w)
        } else {
            None
        };

        let mut support_vectors = Vec::new();
        let mut support_labels = Vec::new();
        let mut alpha = Vec::new();
        let mut support_indices = Vec::new();
        for (i, row) in scaled.into_iter().enumerate() {
            if alpha_full[i] > 0.0 {
                support_vectors.push(row);
                support_labels.push(y[i]);
                alpha.push(alpha_full[i]);
                support_indices.push(i);
            }
        }

        Self {
            kernel,
            scaler,
            support_vectors,
            support_labels,
            alpha,
            support_indices,
            bias,
            weights,
            n_features,
            c: config.c,
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
            training_passes,
        }
    }

    /// Reassemble a model from persisted parts
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        kernel: KernelKind,
        scaler: StandardScaler,
        support_vectors: Vec<Vec<f64>>,
        support_labels: Vec<f64>,
        alpha: Vec<f64>,
        support_indices: Vec<usize>,
        bias: f64,
        weights: Option<Vec<f64>>,
        n_features: usize,
        c: f64,
        tolerance: f64,
        max_iterations: usize,
    ) -> Self {
        Self {
            kernel,
            scaler,
            support_vectors,
            support_labels,
            alpha,
            support_indices,
            bias,
            weights,
            n_features,
            c,
            tolerance,
            max_iterations,
            training_passes: 0,
        }
    }

    /// Decision function value for a raw (unscaled) feature row
    pub fn decision_value(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.n_features {
            return Err(SvmError::DimensionMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }
        let scaled = self.scaler.transform_row(row);
        self.decision_scaled(&scaled)
    }

    fn decision_scaled(&self, scaled: &[f64]) -> Result<f64> {
        if let Some(w) = &self.weights {
            return Ok(dot(w, scaled) + self.bias);
        }

        let mut f = self.bias;
        for (i, sv) in self.support_vectors.iter().enumerate() {
            f += self.alpha[i] * self.support_labels[i] * self.kernel.compute(sv, scaled)?;
        }
        Ok(f)
    }

    /// Predict a single raw feature row
    pub fn predict_row(&self, row: &[f64]) -> Result<Prediction> {
        let decision_value = self.decision_value(row)?;
        let label = if decision_value >= 0.0 { 1.0 } else { -1.0 };
        Ok(Prediction::new(label, decision_value))
    }

    /// Predict every row of a raw feature matrix
    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        x.iter().map(|row| self.predict_row(row)).collect()
    }

    /// Kernel family the model was trained with
    pub fn kernel(&self) -> KernelKind {
        self.kernel
    }

    /// Frozen standardization statistics fitted during training
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Support vectors in standardized feature space
    pub fn support_vectors(&self) -> &[Vec<f64>] {
        &self.support_vectors
    }

    /// Labels of the support vectors
    pub fn support_labels(&self) -> &[f64] {
        &self.support_labels
    }

    /// Dual coefficients of the support vectors
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    /// Indices of the support vectors in the original training set
    pub fn support_vector_indices(&self) -> &[usize] {
        &self.support_indices
    }

    /// Number of support vectors
    pub fn n_support_vectors(&self) -> usize {
        self.support_vectors.len()
    }

    /// Bias term of the decision function
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Explicit weight vector; only present for the linear kernel
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Number of features expected by `predict`
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Regularization bound the model was trained with
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Tolerance the model was trained with
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// No-progress pass cap the model was trained with
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Total outer passes the training loop performed
    pub fn training_passes(&self) -> usize {
        self.training_passes
    }
}
