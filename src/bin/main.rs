//! densvm Command Line Interface
//!
//! A command-line interface for training, evaluating, and using dense SVM
//! models stored as JSON.

use clap::{Args, Parser, Subcommand, ValueEnum};
use densvm::core::{Result, SvmError};
use densvm::data::{CsvDataset, Delimiter};
use densvm::kernel::KernelKind;
use densvm::persistence::SerializableModel;
use densvm::Svm;
use env_logger::Env;
use log::{error, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "densvm")]
#[command(about = "A dense SVM classifier trained with simplified SMO")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log progress at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log at debug level (implies --verbose)
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model and save it as JSON
    Train(TrainArgs),
    /// Classify data with a saved model
    Predict(PredictArgs),
    /// Score a saved model on labeled data
    Evaluate(EvaluateArgs),
    /// Print a saved model's parameters and coefficients
    Info(InfoArgs),
    /// Train/test split evaluation without saving a model
    Holdout(HoldoutArgs),
}

#[derive(Args, Clone)]
struct TrainParams {
    /// Regularization parameter C
    #[arg(short = 'C', long, default_value = "1.0")]
    c: f64,

    /// KKT violation / update-significance tolerance
    #[arg(short, long, default_value = "1e-5")]
    tolerance: f64,

    /// Consecutive clean passes required to stop
    #[arg(short, long, default_value = "100")]
    max_iterations: usize,

    /// Kernel family
    #[arg(short, long, default_value = "linear")]
    kernel: CliKernel,

    /// Polynomial degree (poly kernel only, must be >= 2)
    #[arg(long, default_value = "3")]
    degree: u32,

    /// Seed for the working-pair RNG
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Field delimiter of the input file
    #[arg(long, default_value = "comma")]
    delimiter: CliDelimiter,
}

#[derive(ValueEnum, Clone, Debug)]
enum CliKernel {
    /// Dot product
    Linear,
    /// Inhomogeneous polynomial (x.y + 1)^degree
    Poly,
}

#[derive(ValueEnum, Clone, Debug)]
enum CliDelimiter {
    Comma,
    Whitespace,
}

impl From<CliDelimiter> for Delimiter {
    fn from(d: CliDelimiter) -> Self {
        match d {
            CliDelimiter::Comma => Delimiter::Comma,
            CliDelimiter::Whitespace => Delimiter::Whitespace,
        }
    }
}

impl TrainParams {
    fn kernel_kind(&self) -> KernelKind {
        match self.kernel {
            CliKernel::Linear => KernelKind::Linear,
            CliKernel::Poly => KernelKind::Poly {
                degree: self.degree,
            },
        }
    }

    fn builder(&self) -> Svm {
        Svm::new()
            .with_kernel(self.kernel_kind())
            .with_c(self.c)
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations)
            .with_seed(self.seed)
    }
}

#[derive(Args)]
struct TrainArgs {
    /// Training data file (delimited text, last column is the label)
    #[arg(long)]
    data: PathBuf,

    /// Output model file (JSON)
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    params: TrainParams,
}

#[derive(Args)]
struct PredictArgs {
    /// Trained model file (JSON)
    #[arg(short, long)]
    model: PathBuf,

    /// Data file to classify
    #[arg(long)]
    data: PathBuf,

    /// Where to write predictions; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Field delimiter of the input file
    #[arg(long, default_value = "comma")]
    delimiter: CliDelimiter,

    /// Append a confidence column to each prediction
    #[arg(long)]
    confidence: bool,
}

#[derive(Args)]
struct EvaluateArgs {
    /// Trained model file (JSON)
    #[arg(short, long)]
    model: PathBuf,

    /// Labeled test data file
    #[arg(long)]
    data: PathBuf,

    /// Field delimiter of the input file
    #[arg(long, default_value = "comma")]
    delimiter: CliDelimiter,

    /// Also print confusion-matrix metrics
    #[arg(long)]
    detailed: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// Model file (JSON)
    model: PathBuf,
}

#[derive(Args)]
struct HoldoutArgs {
    /// Data file
    #[arg(long)]
    data: PathBuf,

    /// Training ratio (0.0-1.0)
    #[arg(short, long, default_value = "0.8")]
    ratio: f64,

    #[command(flatten)]
    params: TrainParams,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match (cli.debug, cli.verbose) {
        (true, _) => "debug",
        (false, true) => "info",
        (false, false) => "warn",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Train(args) => train_command(args),
        Commands::Predict(args) => predict_command(args),
        Commands::Evaluate(args) => evaluate_command(args),
        Commands::Info(args) => info_command(args),
        Commands::Holdout(args) => holdout_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn load_dataset(path: &PathBuf, delimiter: CliDelimiter) -> Result<CsvDataset> {
    let file = File::open(path).map_err(SvmError::IoError)?;
    CsvDataset::from_reader_with_options(BufReader::new(file), delimiter.into(), true)
}

fn train_command(args: TrainArgs) -> Result<()> {
    info!("Training SVM model...");
    info!("Data file: {:?}", args.data);
    info!(
        "Parameters: C={}, tolerance={}, max_iterations={}, kernel={:?}, seed={}",
        args.params.c,
        args.params.tolerance,
        args.params.max_iterations,
        args.params.kernel_kind(),
        args.params.seed
    );

    let dataset = load_dataset(&args.data, args.params.delimiter.clone())?;
    info!(
        "Loaded {} samples with {} features",
        dataset.len(),
        dataset.dim()
    );

    let (x, y) = dataset.into_parts();
    let model = args.params.builder().train(&x, &y)?;

    info!("Training completed in {} passes", model.training_passes());
    info!("Support vectors: {}", model.n_support_vectors());
    info!("Bias: {:.6}", model.bias());

    let serializable = SerializableModel::from_trained_model(&model);
    serializable.save_to_file(&args.output)?;
    info!("Model saved to: {:?}", args.output);

    let accuracy = model.evaluate(&x, &y)?;
    info!("Training accuracy: {:.2}%", accuracy * 100.0);

    Ok(())
}

fn predict_command(args: PredictArgs) -> Result<()> {
    info!("Loading model from: {:?}", args.model);
    let serializable = SerializableModel::load_from_file(&args.model)?;
    let model = serializable.to_trained_model()?;

    info!("Loading prediction data from: {:?}", args.data);
    let dataset = load_dataset(&args.data, args.delimiter)?;
    let predictions = model.predict(dataset.features())?;

    let mut sink: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(SvmError::IoError)?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout().lock()),
    };

    writeln!(sink, "# {} predictions", predictions.len()).map_err(SvmError::IoError)?;
    writeln!(
        sink,
        "# columns: sample_index predicted_label{}",
        if args.confidence { " confidence" } else { "" }
    )
    .map_err(SvmError::IoError)?;

    for (i, pred) in predictions.iter().enumerate() {
        if args.confidence {
            writeln!(sink, "{} {:.0} {:.6}", i, pred.label, pred.confidence())
                .map_err(SvmError::IoError)?;
        } else {
            writeln!(sink, "{} {:.0}", i, pred.label).map_err(SvmError::IoError)?;
        }
    }
    sink.flush().map_err(SvmError::IoError)?;

    if let Some(path) = &args.output {
        info!("Predictions saved to: {path:?}");
    }

    Ok(())
}

fn evaluate_command(args: EvaluateArgs) -> Result<()> {
    info!("Loading model from: {:?}", args.model);
    let serializable = SerializableModel::load_from_file(&args.model)?;
    let model = serializable.to_trained_model()?;

    info!("Loading test data from: {:?}", args.data);
    let dataset = load_dataset(&args.data, args.delimiter)?;

    let accuracy = model.evaluate(dataset.features(), dataset.labels())?;

    println!("=== Model Evaluation ===");
    serializable.print_summary();

    println!("\nTest Results:");
    println!("  Accuracy: {:.2}%", accuracy * 100.0);

    if args.detailed {
        let metrics = model.evaluate_detailed(dataset.features(), dataset.labels())?;
        println!("\nConfusion matrix:");
        println!(
            "  TP: {}  FP: {}",
            metrics.true_positives, metrics.false_positives
        );
        println!(
            "  FN: {}  TN: {}",
            metrics.false_negatives, metrics.true_negatives
        );
        println!("\nDerived metrics:");
        println!("  Precision:   {:.4}", metrics.precision());
        println!("  Recall:      {:.4}", metrics.recall());
        println!("  F1 score:    {:.4}", metrics.f1_score());
        println!("  Specificity: {:.4}", metrics.specificity());
    }

    Ok(())
}

fn info_command(args: InfoArgs) -> Result<()> {
    info!("Loading model from: {:?}", args.model);
    let serializable = SerializableModel::load_from_file(&args.model)?;

    serializable.print_summary();

    println!("\nSupport Vector Details:");
    println!("  Total: {}", serializable.support_vectors.len());

    let alpha = &serializable.alpha;
    let n_show = alpha.len().min(10);
    if n_show > 0 {
        println!("\nDual coefficients:");
        for (i, &a) in alpha.iter().enumerate().take(n_show) {
            println!("  alpha[{i}]: {a:.6}");
        }
        if alpha.len() > n_show {
            println!("  ... ({} more)", alpha.len() - n_show);
        }
    }

    if let Some(weights) = &serializable.weights {
        println!("\nWeight vector ({} features):", weights.len());
        let n_show = weights.len().min(10);
        for (i, &w) in weights.iter().enumerate().take(n_show) {
            println!("  w[{i}]: {w:.6}");
        }
        if weights.len() > n_show {
            println!("  ... ({} more)", weights.len() - n_show);
        }
    }

    Ok(())
}

fn holdout_command(args: HoldoutArgs) -> Result<()> {
    if args.ratio <= 0.0 || args.ratio >= 1.0 {
        return Err(SvmError::InvalidParameter(format!(
            "Train ratio must be between 0 and 1, got: {}",
            args.ratio
        )));
    }

    info!(
        "Holdout evaluation on {:?} with ratio {}",
        args.data, args.ratio
    );

    let dataset = load_dataset(&args.data, args.params.delimiter.clone())?;
    let (x, y) = dataset.into_parts();

    let mut indices: Vec<usize> = (0..x.len()).collect();
    let mut rng = StdRng::seed_from_u64(args.params.seed);
    indices.shuffle(&mut rng);

    let train_size = (x.len() as f64 * args.ratio) as usize;
    if train_size == 0 || train_size == x.len() {
        return Err(SvmError::InvalidDataset(
            "Split leaves one side empty; use more data or a different ratio".to_string(),
        ));
    }

    let pick = |idx: &[usize]| -> (Vec<Vec<f64>>, Vec<f64>) {
        (
            idx.iter().map(|&i| x[i].clone()).collect(),
            idx.iter().map(|&i| y[i]).collect(),
        )
    };
    let (train_x, train_y) = pick(&indices[..train_size]);
    let (test_x, test_y) = pick(&indices[train_size..]);

    let model = args.params.builder().train(&train_x, &train_y)?;

    let train_accuracy = model.evaluate(&train_x, &train_y)?;
    let test_accuracy = model.evaluate(&test_x, &test_y)?;

    println!("=== Holdout Evaluation Results ===");
    println!("Data file: {:?}", args.data);
    println!(
        "Train/test split: {}/{} samples",
        train_x.len(),
        test_x.len()
    );
    println!("C parameter: {}", args.params.c);
    println!("Kernel: {:?}", args.params.kernel_kind());
    println!("Seed: {}", args.params.seed);
    println!("Train accuracy: {:.2}%", train_accuracy * 100.0);
    println!("Test accuracy: {:.2}%", test_accuracy * 100.0);

    Ok(())
}
