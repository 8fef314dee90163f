//! Integration tests for the densvm library
//!
//! These tests verify end-to-end functionality across multiple modules
//! and validate real-world usage scenarios.

use densvm::persistence::SerializableModel;
use densvm::{KernelKind, Svm, SvmError};
use std::io::Write;
use tempfile::NamedTempFile;

/// Deterministic synthetic dataset: two separable clusters in 13 dimensions,
/// mimicking the shape of a small tabular medical dataset.
fn thirteen_feature_dataset() -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut x = Vec::new();
    let mut y = Vec::new();

    for i in 0..30 {
        let noise = (i % 7) as f64 / 20.0;
        let row: Vec<f64> = (0..13).map(|d| 1.0 + noise + (d as f64) * 0.01).collect();
        x.push(row);
        y.push(1.0);

        let noise = (i % 5) as f64 / 20.0;
        let row: Vec<f64> = (0..13).map(|d| -1.0 - noise - (d as f64) * 0.01).collect();
        x.push(row);
        y.push(-1.0);
    }

    (x, y)
}

#[test]
fn test_complete_workflow_csv() {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");

    writeln!(temp_file, "feature1,feature2,label").expect("Failed to write");
    writeln!(temp_file, "2.0,1.0,1").expect("Failed to write");
    writeln!(temp_file, "1.8,1.1,1").expect("Failed to write");
    writeln!(temp_file, "2.2,0.9,1").expect("Failed to write");
    writeln!(temp_file, "-2.0,-1.0,-1").expect("Failed to write");
    writeln!(temp_file, "-1.8,-1.1,-1").expect("Failed to write");
    writeln!(temp_file, "-2.2,-0.9,-1").expect("Failed to write");
    temp_file.flush().expect("Failed to flush");

    let model = Svm::new()
        .with_c(1.0)
        .with_max_iterations(100)
        .train_from_csv(temp_file.path())
        .expect("Training should succeed");

    assert!(model.n_support_vectors() > 0, "Should have support vectors");
    assert!(model.n_support_vectors() <= 6);

    let x = vec![vec![1.9, 1.0], vec![-2.1, -1.0]];
    let predictions = model.predict(&x).expect("Prediction should succeed");
    assert_eq!(predictions[0].label, 1.0);
    assert_eq!(predictions[1].label, -1.0);
}

#[test]
fn test_end_to_end_thirteen_features() {
    let (x, y) = thirteen_feature_dataset();

    let model = Svm::new()
        .with_c(10.0)
        .with_tolerance(1e-5)
        .with_max_iterations(100)
        .with_seed(1234)
        .train(&x, &y)
        .expect("Training should succeed");

    // Terminates before the hard pass cap, i.e. by the no-progress
    // criterion.
    assert!(model.training_passes() < 100_000);

    // Linear kernel exposes a weight vector matching the feature count.
    let weights = model.weights().expect("linear model should have weights");
    assert_eq!(weights.len(), 13);
    assert!(model.bias().is_finite());

    let accuracy = model.evaluate(&x, &y).unwrap();
    assert_eq!(accuracy, 1.0, "separable clusters should be fully learned");
}

#[test]
fn test_accuracy_reproducible_across_runs() {
    let (x, y) = thirteen_feature_dataset();

    let run = || {
        Svm::new()
            .with_c(10.0)
            .with_tolerance(1e-5)
            .with_max_iterations(100)
            .with_seed(777)
            .train(&x, &y)
            .expect("Training should succeed")
    };

    let first = run();
    let second = run();

    assert_eq!(first.alpha(), second.alpha());
    assert_eq!(first.bias(), second.bias());
    assert_eq!(
        first.support_vector_indices(),
        second.support_vector_indices()
    );
    assert_eq!(
        first.evaluate(&x, &y).unwrap(),
        second.evaluate(&x, &y).unwrap()
    );
}

#[test]
fn test_alphas_stay_in_box_on_noisy_data() {
    // Overlapping clusters so some alphas hit the C bound.
    let mut x = Vec::new();
    let mut y = Vec::new();
    for i in 0..20 {
        let t = (i as f64) / 10.0 - 1.0;
        x.push(vec![t + 0.3, -t]);
        y.push(1.0);
        x.push(vec![t - 0.3, t]);
        y.push(-1.0);
    }

    let c = 2.5;
    let model = Svm::new()
        .with_c(c)
        .with_max_iterations(50)
        .train(&x, &y)
        .expect("Training should succeed");

    for &a in model.alpha() {
        assert!(a >= 0.0, "negative alpha: {a}");
        assert!(a <= c + 1e-9, "alpha above C: {a}");
    }
}

#[test]
fn test_predict_shape_mismatch_fails_loudly() {
    let (x, y) = thirteen_feature_dataset();
    let model = Svm::new().train(&x, &y).expect("Training should succeed");

    let narrow = vec![vec![1.0, 2.0]];
    assert!(matches!(
        model.predict(&narrow),
        Err(SvmError::DimensionMismatch {
            expected: 13,
            actual: 2
        })
    ));
}

#[test]
fn test_model_persistence_round_trip() {
    let (x, y) = thirteen_feature_dataset();
    let model = Svm::new()
        .with_c(10.0)
        .with_seed(5)
        .train(&x, &y)
        .expect("Training should succeed");

    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    SerializableModel::from_trained_model(&model)
        .save_to_file(temp_file.path())
        .expect("Save should succeed");

    let restored = SerializableModel::load_from_file(temp_file.path())
        .expect("Load should succeed")
        .to_trained_model()
        .expect("Reconstruction should succeed");

    assert_eq!(model.predict(&x).unwrap(), restored.predict(&x).unwrap());
    assert_eq!(model.weights(), restored.weights());
}

#[test]
fn test_polynomial_kernel_learns_xor() {
    // XOR is not linearly separable; the quadratic kernel adds the product
    // feature that separates it.
    let x = vec![
        vec![1.0, 1.0],
        vec![-1.0, -1.0],
        vec![1.0, -1.0],
        vec![-1.0, 1.0],
    ];
    let y = vec![1.0, 1.0, -1.0, -1.0];

    let model = Svm::new()
        .with_kernel(KernelKind::Poly { degree: 2 })
        .with_c(10.0)
        .with_max_iterations(100)
        .train(&x, &y)
        .expect("Training should succeed");

    let accuracy = model.evaluate(&x, &y).unwrap();
    assert!(
        accuracy >= 0.75,
        "quadratic kernel should fit XOR well, got accuracy {accuracy}"
    );
}

#[test]
fn test_parameter_sensitivity() {
    let (x, y) = thirteen_feature_dataset();

    for &c in &[0.1, 1.0, 10.0] {
        let model = Svm::new()
            .with_c(c)
            .train(&x, &y)
            .unwrap_or_else(|_| panic!("Training with C={c} should succeed"));

        let accuracy = model.evaluate(&x, &y).unwrap();
        assert!(
            accuracy >= 0.9,
            "C={c} should give high accuracy on separable data, got {accuracy}"
        );
    }
}

#[test]
fn test_invalid_inputs_fail_before_training() {
    // Empty dataset.
    assert!(matches!(
        Svm::new().train(&[], &[]),
        Err(SvmError::EmptyDataset)
    ));

    // Out-of-domain label.
    let x = vec![vec![1.0], vec![-1.0]];
    assert!(matches!(
        Svm::new().train(&x, &[1.0, 2.0]),
        Err(SvmError::InvalidLabel(l)) if l == 2.0
    ));

    // Misconfigured kernel surfaces before the loop runs.
    assert!(matches!(
        Svm::new()
            .with_kernel(KernelKind::Poly { degree: 1 })
            .train(&x, &[1.0, -1.0]),
        Err(SvmError::InvalidParameter(_))
    ));
}
