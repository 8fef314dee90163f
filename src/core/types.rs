//! Core type definitions for the SMO trainer

/// Classification outcome for one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Signed class label, +1.0 or -1.0
    pub label: f64,
    /// Value of the decision function before thresholding
    pub decision_value: f64,
}

impl Prediction {
    pub fn new(label: f64, decision_value: f64) -> Self {
        Self {
            label,
            decision_value,
        }
    }

    /// Distance from the decision boundary, usable as a confidence proxy
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// Configuration for the SMO trainer
///
/// All fields are fixed once training starts; the solver never writes back
/// into its configuration.
#[derive(Debug, Clone)]
pub struct SmoConfig {
    /// Regularization parameter (upper bound for alpha)
    pub c: f64,
    /// Tolerance for KKT violation and update-significance checks
    pub tolerance: f64,
    /// Number of consecutive full passes without progress that ends training
    pub max_iterations: usize,
    /// Hard cap on total outer passes, so training terminates even when the
    /// no-progress counter never fills up
    pub max_passes: usize,
    /// Accepted for interface compatibility; the pairwise step is derived
    /// analytically, so this value is never read by the update math
    pub learning_rate: f64,
    /// Seed for the working-pair RNG; equal seeds give bit-identical runs
    pub seed: u64,
}

impl Default for SmoConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            tolerance: 1e-5,
            max_iterations: 100,
            max_passes: 100_000,
            learning_rate: 0.001,
            seed: 42,
        }
    }
}

impl SmoConfig {
    /// Check configuration values that must hold before training starts
    pub fn validate(&self) -> crate::core::Result<()> {
        if self.c <= 0.0 || !self.c.is_finite() {
            return Err(crate::core::SvmError::InvalidParameter(format!(
                "Regularization C must be a positive finite number, got {}",
                self.c
            )));
        }
        if self.tolerance <= 0.0 || !self.tolerance.is_finite() {
            return Err(crate::core::SvmError::InvalidParameter(format!(
                "Tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(crate::core::SvmError::InvalidParameter(
                "max_iterations must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
