// ============================================================
// Layer 2 — RunUseCase
// ============================================================
// Orchestrates one invocation of the program:
//
//   Step 1: Resolve the configuration   (mode rules, validation)
//   Step 2: Seed the backend RNG
//   Step 3: Load the MNIST splits       (Layer 4 - data)
//   Step 4: Prepare outputs             (Layer 6 - infra)
//   Step 5: Run the epoch loop          (Layer 5 - ml)
//
// Which splits get loaded depends on the mode: `train` reads
// only the training split, `eval` only the test split, and
// `train-eval` both.

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::{dataset::DigitDataset, loader::MnistLoader};
use crate::domain::{mode::{Mode, Split}, traits::DigitSource};
use crate::infra::{checkpoint::CheckpointManager, metrics::MetricsLogger};
use crate::ml::trainer::{run_epochs, RunSummary};

type MyBackend = burn::backend::Autodiff<burn::backend::Wgpu>;

// ─── Run Configuration ───────────────────────────────────────────────────────
// Every knob of a run. Serialisable so the resolved values can
// be written next to the checkpoints for later reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub batch_size:    usize,
    pub epochs:        usize,
    pub seed:          u64,
    pub lr:            f64,
    pub log_interval:  usize,
    pub eval_interval: usize,
    pub save_interval: usize,
    pub load_model:    Option<String>,
    pub save_model:    String,
    pub mode:          Mode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size:    64,
            epochs:        10,
            seed:          1,
            lr:            1e-3,
            log_interval:  10,
            eval_interval: 1,
            save_interval: 1000,
            load_model:    None,
            save_model:    "dense_mnist".to_string(),
            mode:          Mode::TrainEval,
        }
    }
}

impl RunConfig {
    /// Validate the flags and apply the mode rules.
    ///
    /// Evaluation-only runs need a checkpoint and always run a
    /// single epoch that evaluates.
    pub fn resolve(mut self) -> Result<Self> {
        if self.mode == Mode::Eval {
            if self.load_model.is_none() {
                bail!("mode 'eval' needs a model to evaluate: pass --load-model <PATH>");
            }
            self.epochs        = 1;
            self.eval_interval = 1;
        }

        ensure!(self.batch_size    > 0, "--batch-size must be at least 1");
        ensure!(self.epochs        > 0, "--epochs must be at least 1");
        ensure!(self.log_interval  > 0, "--log-interval must be at least 1");
        ensure!(self.eval_interval > 0, "--eval-interval must be at least 1");
        ensure!(self.save_interval > 0, "--save-interval must be at least 1");
        ensure!(self.lr > 0.0 && self.lr.is_finite(), "--lr must be a positive number");

        Ok(self)
    }

    /// Only training runs describe a new set of checkpoints, so only
    /// they write `<prefix>_config.json`.
    pub fn writes_config(&self) -> bool {
        self.mode.trains()
    }
}

// ─── RunUseCase ───────────────────────────────────────────────────────────────
pub struct RunUseCase {
    config: RunConfig,
}

impl RunUseCase {
    /// Fails fast on an invalid configuration, before any data is read.
    pub fn new(config: RunConfig) -> Result<Self> {
        Ok(Self { config: config.resolve()? })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn execute(&self) -> Result<RunSummary> {
        let cfg = &self.config;

        // ── Step 2: Seed ──────────────────────────────────────────────────────
        // Parameter initialisation draws from the backend RNG
        <MyBackend as burn::tensor::backend::Backend>::seed(cfg.seed);

        // ── Step 3: Load data ─────────────────────────────────────────────────
        let (train, test) = load_datasets(&MnistLoader::new(), cfg.mode)?;

        // ── Step 4: Outputs ───────────────────────────────────────────────────
        let (ckpt_manager, metrics) = prepare_outputs(cfg)?;

        // ── Step 5: Epoch loop ────────────────────────────────────────────────
        let device = burn::backend::wgpu::WgpuDevice::default();
        tracing::info!("Using WGPU device: {:?}", device);
        run_epochs::<MyBackend>(cfg, train, test, &ckpt_manager, &metrics, device)
    }
}

/// Create the checkpoint manager and metrics logger for `cfg.save_model`,
/// writing the resolved config first when the run trains.
pub fn prepare_outputs(cfg: &RunConfig) -> Result<(CheckpointManager, MetricsLogger)> {
    let ckpt_manager = CheckpointManager::new(&cfg.save_model)?;
    if cfg.writes_config() {
        ckpt_manager.save_config(cfg)?;
    }

    let metrics = MetricsLogger::new(ckpt_manager.metrics_path())?;
    tracing::info!("Epoch metrics → {}", metrics.csv_path().display());
    Ok((ckpt_manager, metrics))
}

/// Load the splits the mode needs; the other stays None.
pub fn load_datasets(
    source: &dyn DigitSource,
    mode:   Mode,
) -> Result<(Option<DigitDataset>, Option<DigitDataset>)> {
    let train = if mode.trains() {
        Some(DigitDataset::new(source.load_split(Split::Train)?))
    } else {
        None
    };
    let test = if mode.evaluates() {
        Some(DigitDataset::new(source.load_split(Split::Test)?))
    } else {
        None
    };
    Ok((train, test))
}
