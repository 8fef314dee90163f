//! Simplified SMO solver
//!
//! Trains the soft-margin SVM dual by repeatedly optimizing a pair of
//! Lagrange multipliers: the first index comes from a left-to-right scan for
//! KKT violations, the second is drawn from a seeded RNG. Training ends once
//! `max_iterations` consecutive full passes change no pair (the convergence
//! criterion is absence of qualifying updates, not an objective threshold).

use crate::cache::{KernelCache, DEFAULT_CACHE_ENTRIES};
use crate::core::{Result, SmoConfig, SvmError};
use crate::kernel::KernelKind;
use crate::model::TrainedSvm;
use crate::scaling::StandardScaler;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// SMO solver for the binary SVM dual problem
pub struct SmoSolver {
    kernel: KernelKind,
    config: SmoConfig,
}

/// Raw output of the optimization loop
struct SolveState {
    alpha: Vec<f64>,
    bias: f64,
    passes: usize,
}

impl SmoSolver {
    /// Create a new solver with the given kernel and configuration
    pub fn new(kernel: KernelKind, config: SmoConfig) -> Self {
        Self { kernel, config }
    }

    /// Get the solver configuration
    pub fn config(&self) -> &SmoConfig {
        &self.config
    }

    /// Get the kernel family
    pub fn kernel(&self) -> KernelKind {
        self.kernel
    }

    /// Train a model on a dense feature matrix and a {-1, +1} label vector
    ///
    /// Features are standardized internally; the fitted statistics are frozen
    /// into the returned model and reused verbatim at prediction time.
    pub fn train(&self, x: &[Vec<f64>], y: &[f64]) -> Result<TrainedSvm> {
        self.config.validate()?;
        self.kernel.validate()?;
        validate_training_input(x, y)?;

        let scaler = StandardScaler::fit(x)?;
        let scaled = scaler.transform(x);

        let state = self.optimize(&scaled, y)?;

        Ok(TrainedSvm::from_training(
            self.kernel,
            &self.config,
            scaler,
            scaled,
            y,
            state.alpha,
            state.bias,
            state.passes,
        ))
    }

    /// Run the pairwise coordinate-ascent loop on standardized data
    fn optimize(&self, x: &[Vec<f64>], y: &[f64]) -> Result<SolveState> {
        let n = x.len();
        let c = self.config.c;
        let tol = self.config.tolerance;

        let mut alpha = vec![0.0; n];
        let mut bias = 0.0;
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut cache = KernelCache::new(DEFAULT_CACHE_ENTRIES);

        let mut stalled_passes = 0;
        let mut total_passes = 0;

        while stalled_passes < self.config.max_iterations && total_passes < self.config.max_passes
        {
            let mut changed_pairs = 0;

            for i in 0..n {
                let e_i = self.decision(i, x, y, &alpha, bias, &mut cache)? - y[i];
                let r_i = y[i] * e_i;

                // KKT violation: alpha_i can move up when the margin is
                // violated from below, down when violated from above.
                let violates = (r_i < -tol && alpha[i] < c) || (r_i > tol && alpha[i] > 0.0);
                if !violates || n < 2 {
                    continue;
                }

                // Draw j from [0, n-1) and remap past i, so j != i without
                // any retry loop.
                let mut j = rng.gen_range(0..n - 1);
                if j >= i {
                    j += 1;
                }

                let e_j = self.decision(j, x, y, &alpha, bias, &mut cache)? - y[j];

                let prev_i = alpha[i];
                let prev_j = alpha[j];

                // Box bounds keep alpha_i + s*alpha_j on the constraint line.
                let (low, high) = if y[i] != y[j] {
                    ((prev_j - prev_i).max(0.0), (c + prev_j - prev_i).min(c))
                } else {
                    ((prev_i + prev_j - c).max(0.0), (prev_i + prev_j).min(c))
                };
                if low == high {
                    continue;
                }

                let k_ii = self.kernel_at(i, i, x, &mut cache)?;
                let k_ij = self.kernel_at(i, j, x, &mut cache)?;
                let k_jj = self.kernel_at(j, j, x, &mut cache)?;

                // eta is the negated second derivative along the constraint
                // line; a non-negative value means the pair is numerically
                // degenerate and gets skipped.
                let eta = 2.0 * k_ij - k_ii - k_jj;
                if eta >= 0.0 {
                    continue;
                }

                let mut a_j = prev_j + y[j] * (e_i - e_j) / eta;
                a_j = a_j.clamp(low, high);

                if (a_j - prev_j).abs() < tol {
                    continue;
                }

                let a_i = prev_i + y[i] * y[j] * (prev_j - a_j);
                alpha[i] = a_i;
                alpha[j] = a_j;

                // Bias from the KKT stationarity conditions; prefer whichever
                // multiplier stayed strictly inside the box.
                let b1 = bias
                    - e_i
                    - y[i] * (a_i - prev_i) * k_ii
                    - y[j] * (a_j - prev_j) * k_ij;
                let b2 = bias
                    - e_j
                    - y[i] * (a_i - prev_i) * k_ij
                    - y[j] * (a_j - prev_j) * k_jj;

                bias = if a_i > 0.0 && a_i < c {
                    b1
                } else if a_j > 0.0 && a_j < c {
                    b2
                } else {
                    (b1 + b2) / 2.0
                };

                changed_pairs += 1;
            }

            total_passes += 1;
            if changed_pairs == 0 {
                stalled_passes += 1;
            } else {
                stalled_passes = 0;
            }
        }

        Ok(SolveState {
            alpha,
            bias,
            passes: total_passes,
        })
    }

    /// Dual-form decision function for training sample `i` under the current
    /// alphas and bias
    fn decision(
        &self,
        i: usize,
        x: &[Vec<f64>],
        y: &[f64],
        alpha: &[f64],
        bias: f64,
        cache: &mut KernelCache,
    ) -> Result<f64> {
        let mut f = bias;
        for k in 0..x.len() {
            if alpha[k] > 0.0 {
                f += alpha[k] * y[k] * self.kernel_at(k, i, x, cache)?;
            }
        }
        Ok(f)
    }

    fn kernel_at(
        &self,
        i: usize,
        j: usize,
        x: &[Vec<f64>],
        cache: &mut KernelCache,
    ) -> Result<f64> {
        let kernel = self.kernel;
        cache.get_or_compute(i, j, || kernel.compute(&x[i], &x[j]))
    }
}

/// Shape and label-domain checks shared by every training entry point
fn validate_training_input(x: &[Vec<f64>], y: &[f64]) -> Result<()> {
    if x.is_empty() {
        return Err(SvmError::EmptyDataset);
    }
    if x.len() != y.len() {
        return Err(SvmError::DimensionMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }

    let dim = x[0].len();
    if dim == 0 {
        return Err(SvmError::InvalidDataset(
            "samples have no features".to_string(),
        ));
    }
    for row in x {
        if row.len() != dim {
            return Err(SvmError::DimensionMismatch {
                expected: dim,
                actual: row.len(),
            });
        }
    }

    for &label in y {
        if label != 1.0 && label != -1.0 {
            return Err(SvmError::InvalidLabel(label));
        }
    }

    Ok(())
}
