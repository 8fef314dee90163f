//! High-level API for training and evaluating SVM classifiers
//!
//! # Quick Start
//!
//! ```rust
//! use densvm::api::Svm;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let x = vec![
//!     vec![1.0, 1.0],
//!     vec![1.0, 2.0],
//!     vec![-1.0, -1.0],
//!     vec![-1.0, -2.0],
//! ];
//! let y = vec![1.0, 1.0, -1.0, -1.0];
//!
//! let model = Svm::new().with_c(10.0).with_seed(1234).train(&x, &y)?;
//! let predictions = model.predict(&x)?;
//! assert_eq!(predictions.len(), 4);
//! # Ok(())
//! # }
//! ```

use crate::core::{Result, SmoConfig};
use crate::data::CsvDataset;
use crate::kernel::KernelKind;
use crate::model::TrainedSvm;
use crate::solver::SmoSolver;
use std::path::Path;

/// Builder-style SVM trainer
pub struct Svm {
    kernel: KernelKind,
    config: SmoConfig,
}

impl Svm {
    /// Create a trainer with a linear kernel and default parameters
    pub fn new() -> Self {
        Self {
            kernel: KernelKind::Linear,
            config: SmoConfig::default(),
        }
    }

    /// Set the kernel family
    pub fn with_kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    /// Set regularization parameter C
    pub fn with_c(mut self, c: f64) -> Self {
        self.config.c = c;
        self
    }

    /// Set the KKT/update tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set the number of consecutive clean passes that ends training
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set the hard cap on total outer passes
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.config.max_passes = max_passes;
        self
    }

    /// Set the seed for the working-pair RNG
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the learning-rate field
    ///
    /// Accepted for interface compatibility only: the pairwise step size is
    /// derived analytically, so this value never influences the solution.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    /// Train on a dense feature matrix and a {-1, +1} label vector
    pub fn train(self, x: &[Vec<f64>], y: &[f64]) -> Result<TrainedSvm> {
        SmoSolver::new(self.kernel, self.config).train(x, y)
    }

    /// Train from a CSV file whose last column is the label
    pub fn train_from_csv<P: AsRef<Path>>(self, path: P) -> Result<TrainedSvm> {
        let dataset = CsvDataset::from_file(path)?;
        let (x, y) = dataset.into_parts();
        self.train(&x, &y)
    }
}

impl Default for Svm {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainedSvm {
    /// Fraction of rows classified correctly
    pub fn evaluate(&self, x: &[Vec<f64>], y: &[f64]) -> Result<f64> {
        let predictions = self.predict(x)?;
        let correct = predictions
            .iter()
            .zip(y.iter())
            .filter(|(pred, &actual)| pred.label == actual)
            .count();
        Ok(correct as f64 / y.len().max(1) as f64)
    }

    /// Confusion-matrix based metrics
    pub fn evaluate_detailed(&self, x: &[Vec<f64>], y: &[f64]) -> Result<EvaluationMetrics> {
        let predictions = self.predict(x)?;

        let mut metrics = EvaluationMetrics {
            true_positives: 0,
            true_negatives: 0,
            false_positives: 0,
            false_negatives: 0,
        };
        for (pred, &actual) in predictions.iter().zip(y.iter()) {
            match (pred.label > 0.0, actual > 0.0) {
                (true, true) => metrics.true_positives += 1,
                (false, false) => metrics.true_negatives += 1,
                (true, false) => metrics.false_positives += 1,
                (false, true) => metrics.false_negatives += 1,
            }
        }

        Ok(metrics)
    }
}

/// Confusion-matrix counts with derived metrics
///
/// Every ratio returns 0.0 when its denominator is empty, so the metrics
/// are safe on degenerate batches (all-positive or all-negative inputs).
#[derive(Debug, Clone)]
pub struct EvaluationMetrics {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl EvaluationMetrics {
    pub fn accuracy(&self) -> f64 {
        let correct = self.true_positives + self.true_negatives;
        ratio(correct, correct + self.false_positives + self.false_negatives)
    }

    pub fn precision(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_positives,
        )
    }

    /// Recall, also known as sensitivity
    pub fn recall(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_negatives,
        )
    }

    /// Harmonic mean of precision and recall
    pub fn f1_score(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    pub fn specificity(&self) -> f64 {
        ratio(
            self.true_negatives,
            self.true_negatives + self.false_positives,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_pattern() {
        let svm = Svm::new()
            .with_c(2.0)
            .with_tolerance(0.01)
            .with_max_iterations(50)
            .with_seed(9);

        assert_eq!(svm.config.c, 2.0);
        assert_eq!(svm.config.tolerance, 0.01);
        assert_eq!(svm.config.max_iterations, 50);
        assert_eq!(svm.config.seed, 9);
    }

    #[test]
    fn test_train_and_evaluate() {
        let x = vec![
            vec![2.0, 1.0],
            vec![1.8, 1.1],
            vec![-2.0, -1.0],
            vec![-1.8, -1.1],
        ];
        let y = vec![1.0, 1.0, -1.0, -1.0];

        let model = Svm::new().train(&x, &y).expect("training should succeed");
        let accuracy = model.evaluate(&x, &y).unwrap();
        assert_eq!(accuracy, 1.0);

        let metrics = model.evaluate_detailed(&x, &y).unwrap();
        assert_eq!(metrics.accuracy(), 1.0);
        assert_eq!(metrics.true_positives, 2);
        assert_eq!(metrics.true_negatives, 2);
    }

    #[test]
    fn test_evaluation_metrics() {
        let metrics = EvaluationMetrics {
            true_positives: 10,
            true_negatives: 5,
            false_positives: 2,
            false_negatives: 3,
        };

        assert_eq!(metrics.accuracy(), 0.75); // (10+5)/(10+5+2+3)
        assert_eq!(metrics.precision(), 10.0 / 12.0); // 10/(10+2)
        assert_eq!(metrics.recall(), 10.0 / 13.0); // 10/(10+3)
        assert!(metrics.f1_score() > 0.0);
        assert_eq!(metrics.specificity(), 5.0 / 7.0); // 5/(5+2)
    }

    #[test]
    fn test_metrics_empty_denominators() {
        let metrics = EvaluationMetrics {
            true_positives: 0,
            true_negatives: 0,
            false_positives: 0,
            false_negatives: 0,
        };
        assert_eq!(metrics.accuracy(), 0.0);
        assert_eq!(metrics.precision(), 0.0);
        assert_eq!(metrics.recall(), 0.0);
        assert_eq!(metrics.f1_score(), 0.0);
        assert_eq!(metrics.specificity(), 0.0);
    }

    #[test]
    fn test_train_from_csv() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(temp_file, "f1,f2,label").expect("Failed to write");
        writeln!(temp_file, "2.0,1.0,1").expect("Failed to write");
        writeln!(temp_file, "1.8,1.1,1").expect("Failed to write");
        writeln!(temp_file, "-2.0,-1.0,-1").expect("Failed to write");
        writeln!(temp_file, "-1.8,-1.1,-1").expect("Failed to write");
        temp_file.flush().expect("Failed to flush");

        let model = Svm::new()
            .train_from_csv(temp_file.path())
            .expect("CSV training should succeed");
        assert_eq!(model.n_features(), 2);
    }
}
