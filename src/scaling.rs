//! Per-feature standardization with frozen statistics
//!
//! The scaler is fitted once on the training matrix and its parameters are
//! stored inside the trained model, so prediction batches are transformed
//! with the training-time statistics rather than statistics recomputed from
//! the (possibly small or skewed) prediction input.

use crate::core::{Result, SvmError};
use serde::{Deserialize, Serialize};

/// Z-score scaler: (x - mean) / std per feature
///
/// Uses the population standard deviation. Constant features get a scale of
/// 1.0 so they map to exactly 0 without dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Fit scaling statistics on a training matrix
    ///
    /// Expects a non-empty matrix with equal-length rows; the caller
    /// validates shapes before fitting.
    pub fn fit(x: &[Vec<f64>]) -> Result<Self> {
        if x.is_empty() {
            return Err(SvmError::EmptyDataset);
        }

        let n = x.len() as f64;
        let dim = x[0].len();
        let mut means = vec![0.0; dim];
        let mut scales = vec![0.0; dim];

        for row in x {
            for (j, &v) in row.iter().enumerate() {
                means[j] += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        for row in x {
            for (j, &v) in row.iter().enumerate() {
                let d = v - means[j];
                scales[j] += d * d;
            }
        }
        for s in &mut scales {
            *s = (*s / n).sqrt();
            if *s < 1e-12 {
                *s = 1.0;
            }
        }

        Ok(Self { means, scales })
    }

    /// Transform a single row with the frozen statistics
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(self.scales.iter()))
            .map(|(&v, (&m, &s))| (v - m) / s)
            .collect()
    }

    /// Transform a whole matrix
    pub fn transform(&self, x: &[Vec<f64>]) -> Vec<Vec<f64>> {
        x.iter().map(|row| self.transform_row(row)).collect()
    }

    /// Number of features the scaler was fitted on
    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    /// Fitted per-feature means
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Fitted per-feature scales (population standard deviations)
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }
}
