// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores the classifier's weights using Burn's
// NamedMpkGzFileRecorder (MessagePack + gzip, full precision),
// so a reloaded classifier predicts exactly what it did when saved.
//
// Every file shares the --save-model prefix:
//
//   dense_mnist_1000.mpk.gz   ← classifier after epoch 1000
//   dense_mnist_2000.mpk.gz   ← classifier after epoch 2000
//   dense_mnist_config.json   ← resolved run configuration
//   dense_mnist_metrics.csv   ← per-epoch metrics (see metrics.rs)
//
// Each saved epoch gets its own file, so a later save never
// replaces an earlier one.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};
use burn::{
    prelude::*,
    record::{FileRecorder, FullPrecisionSettings, NamedMpkGzFileRecorder, Recorder},
};

use crate::application::run_use_case::RunConfig;
use crate::ml::model::Classifier;

/// Recorder for every classifier checkpoint.
type CheckpointRecorder = NamedMpkGzFileRecorder<FullPrecisionSettings>;

/// Manages checkpoint files that share a common path prefix.
pub struct CheckpointManager {
    /// e.g. "dense_mnist" or "runs/a/dense_mnist"
    prefix: String,
}

impl CheckpointManager {
    /// Create a manager for `prefix`, creating its parent
    /// directory if the prefix names one.
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if let Some(parent) = Path::new(&prefix).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Cannot create checkpoint directory '{}'", parent.display())
                })?;
            }
        }
        Ok(Self { prefix })
    }

    /// Path of the checkpoint for `epoch`, without the recorder's extension.
    pub fn checkpoint_stem(&self, epoch: usize) -> PathBuf {
        PathBuf::from(format!("{}_{}", self.prefix, epoch))
    }

    pub fn config_path(&self) -> PathBuf {
        PathBuf::from(format!("{}_config.json", self.prefix))
    }

    pub fn metrics_path(&self) -> PathBuf {
        PathBuf::from(format!("{}_metrics.csv", self.prefix))
    }

    /// Save classifier weights for a given epoch and return the
    /// path of the file written.
    pub fn save_classifier<B: Backend>(
        &self,
        model: &Classifier<B>,
        epoch: usize,
    ) -> Result<PathBuf> {
        let stem = self.checkpoint_stem(epoch);

        CheckpointRecorder::new()
            .record(model.clone().into_record(), stem.clone())
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", stem.display())
            })?;

        Ok(with_record_extension(&stem))
    }

    /// Load classifier weights from `path`.
    ///
    /// Accepts the path with or without the `.mpk.gz` extension,
    /// so both `dense_mnist_10` and `dense_mnist_10.mpk.gz` work.
    pub fn load_classifier<B: Backend>(
        &self,
        model:  Classifier<B>,
        path:   &str,
        device: &B::Device,
    ) -> Result<Classifier<B>> {
        let stem = strip_record_extension(Path::new(path));

        tracing::info!("Loading classifier from '{}'", with_record_extension(&stem).display());

        let record = CheckpointRecorder::new()
            .load(stem.clone(), device)
            .with_context(|| {
                format!("Cannot load checkpoint '{}'", with_record_extension(&stem).display())
            })?;

        Ok(model.load_record(record))
    }

    /// Save the resolved run configuration as pretty JSON.
    pub fn save_config(&self, cfg: &RunConfig) -> Result<()> {
        let path = self.config_path();
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| {
                format!("Cannot write config to '{}'", path.display())
            })?;

        tracing::debug!("Saved run config to '{}'", path.display());
        Ok(())
    }
}

/// The extension the recorder writes: "mpk.gz".
fn record_extension() -> &'static str {
    <CheckpointRecorder as FileRecorder<burn::backend::NdArray>>::file_extension()
}

fn with_record_extension(stem: &Path) -> PathBuf {
    PathBuf::from(format!("{}.{}", stem.display(), record_extension()))
}

fn strip_record_extension(path: &Path) -> PathBuf {
    let suffix = format!(".{}", record_extension());
    let s = path.to_string_lossy();
    match s.strip_suffix(suffix.as_str()) {
        Some(stem) => PathBuf::from(stem),
        None       => path.to_path_buf(),
    }
}
