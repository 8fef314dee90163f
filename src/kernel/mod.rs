//! Kernel families and the pure evaluation contract
//!
//! Kernel selection is an immutable part of the model configuration; the
//! evaluator is a pure function of its inputs and never writes back into any
//! stored state. Families that are declared but cannot be evaluated fail
//! loudly instead of returning a placeholder value.

use crate::core::{Result, SvmError};
use serde::{Deserialize, Serialize};

/// Kernel family selector
///
/// `Poly` uses the inhomogeneous form `(x . y + 1)^degree` and requires a
/// degree of at least 2; degree 1 is just the linear kernel and is rejected
/// so configuration mistakes surface instead of silently degrading. `Rbf`
/// is reserved and currently not evaluable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum KernelKind {
    Linear,
    Poly { degree: u32 },
    Rbf,
}

impl KernelKind {
    /// Compute the kernel value K(x, y) for two dense feature vectors
    ///
    /// The slices must have equal length; the solver and the model guarantee
    /// this by validating shapes before any evaluation happens.
    pub fn compute(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        match *self {
            KernelKind::Linear => Ok(dot(x, y)),
            KernelKind::Poly { degree } => {
                if degree < 2 {
                    return Err(SvmError::InvalidParameter(format!(
                        "Polynomial kernel requires degree >= 2, got {degree}"
                    )));
                }
                Ok((dot(x, y) + 1.0).powi(degree as i32))
            }
            KernelKind::Rbf => Err(SvmError::InvalidParameter(
                "RBF kernel is declared but not implemented".to_string(),
            )),
        }
    }

    /// Fail fast on families that cannot be evaluated
    ///
    /// Called once before the training loop and before prediction, so a
    /// misconfigured kernel never gets halfway through an optimization run.
    pub fn validate(&self) -> Result<()> {
        match *self {
            KernelKind::Linear => Ok(()),
            KernelKind::Poly { degree } if degree >= 2 => Ok(()),
            KernelKind::Poly { degree } => Err(SvmError::InvalidParameter(format!(
                "Polynomial kernel requires degree >= 2, got {degree}"
            ))),
            KernelKind::Rbf => Err(SvmError::InvalidParameter(
                "RBF kernel is declared but not implemented".to_string(),
            )),
        }
    }

    /// Whether the decision function can be collapsed into an explicit
    /// weight vector
    pub fn is_linear(&self) -> bool {
        matches!(self, KernelKind::Linear)
    }
}

/// Dot product of two dense vectors
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y.iter()).map(|(a, b)| a * b).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_kernel_basic() {
        let x = vec![1.0, 2.0, 3.0];
        let y = vec![2.0, 1.0, 0.5];

        // 1*2 + 2*1 + 3*0.5 = 5.5
        assert_relative_eq!(
            KernelKind::Linear.compute(&x, &y).unwrap(),
            5.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_linear_kernel_unit_vector_self_similarity() {
        let x = vec![0.6, 0.8];
        let k = KernelKind::Linear.compute(&x, &x).unwrap();
        assert_relative_eq!(k, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_poly_kernel_quadratic() {
        let kernel = KernelKind::Poly { degree: 2 };
        let x = vec![1.0, 2.0];
        let y = vec![2.0, 1.0];

        // (1*2 + 2*1 + 1)^2 = 25
        assert_relative_eq!(kernel.compute(&x, &y).unwrap(), 25.0, epsilon = 1e-10);
    }

    #[test]
    fn test_poly_kernel_cubic_same_vector() {
        let kernel = KernelKind::Poly { degree: 3 };
        let x = vec![3.0, 4.0];

        // (25 + 1)^3 = 17576
        assert_relative_eq!(kernel.compute(&x, &x).unwrap(), 17576.0, epsilon = 1e-6);
    }

    #[test]
    fn test_poly_kernel_rejects_degree_below_two() {
        let kernel = KernelKind::Poly { degree: 1 };
        let x = vec![1.0];

        assert!(matches!(
            kernel.compute(&x, &x),
            Err(SvmError::InvalidParameter(_))
        ));
        assert!(kernel.validate().is_err());
    }

    #[test]
    fn test_rbf_kernel_is_rejected() {
        let x = vec![1.0];
        assert!(matches!(
            KernelKind::Rbf.compute(&x, &x),
            Err(SvmError::InvalidParameter(_))
        ));
        assert!(KernelKind::Rbf.validate().is_err());
    }

    #[test]
    fn test_kernel_validate_accepts_usable_families() {
        assert!(KernelKind::Linear.validate().is_ok());
        assert!(KernelKind::Poly { degree: 2 }.validate().is_ok());
        assert!(KernelKind::Poly { degree: 5 }.validate().is_ok());
    }

    #[test]
    fn test_dot_orthogonal() {
        assert_eq!(dot(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_kernel_kind_serde_round_trip() {
        let kernel = KernelKind::Poly { degree: 4 };
        let json = serde_json::to_string(&kernel).unwrap();
        let back: KernelKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kernel, back);
    }
}
