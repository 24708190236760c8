// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// Every flag of a run. clap's derive macros generate the help
// text, error messages for bad values, and type conversion.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, ValueEnum};
use crate::application::run_use_case::RunConfig;
use crate::domain::mode::Mode;

/// Operating mode as spelled on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Adversarial training only
    Train,
    /// Report accuracy of --load-model on the test split
    Eval,
    /// Train, then evaluate, each epoch
    TrainEval,
}

impl From<ModeArg> for Mode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Train     => Mode::Train,
            ModeArg::Eval      => Mode::Eval,
            ModeArg::TrainEval => Mode::TrainEval,
        }
    }
}

/// All arguments of a run.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input batch size for training and evaluation
    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Number of epochs to train
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Random seed for weight initialisation and shuffling
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// How many batches to wait before logging training status
    #[arg(long, default_value_t = 10)]
    pub log_interval: usize,

    /// How many epochs to wait between evaluations
    #[arg(long, default_value_t = 1)]
    pub eval_interval: usize,

    /// How many epochs to wait between checkpoints
    #[arg(long, default_value_t = 1000)]
    pub save_interval: usize,

    /// Checkpoint holding an already trained classifier
    #[arg(long)]
    pub load_model: Option<String>,

    /// Path prefix for checkpoints; epoch N is saved as <PREFIX>_N.mpk.gz
    #[arg(long, default_value = "dense_mnist")]
    pub save_model: String,

    /// Operating mode: train and/or evaluate
    #[arg(long, value_enum, default_value_t = ModeArg::TrainEval)]
    pub mode: ModeArg,

    /// Adam learning rate for both networks
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,
}

/// Convert CLI RunArgs into the application-layer RunConfig.
/// The application layer never sees clap types.
impl From<RunArgs> for RunConfig {
    fn from(a: RunArgs) -> Self {
        RunConfig {
            batch_size:    a.batch_size,
            epochs:        a.epochs,
            seed:          a.seed,
            lr:            a.lr,
            log_interval:  a.log_interval,
            eval_interval: a.eval_interval,
            save_interval: a.save_interval,
            load_model:    a.load_model,
            save_model:    a.save_model,
            mode:          a.mode.into(),
        }
    }
}
