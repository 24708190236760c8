// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends one CSV row per epoch to <save-model>_metrics.csv.
//
// Metrics recorded per epoch:
//   - epoch:    the epoch number (1, 2, 3, ...)
//   - d_loss:   mean discriminator loss (real + fake)
//   - g_loss:   mean classifier (generator) loss
//   - correct:  test images classified correctly
//   - total:    test images evaluated
//   - accuracy: correct / total
//
// Phases that did not run in an epoch leave their cells empty,
// e.g. an eval-only run writes `1,,,9120,10000,0.912000`.

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use crate::ml::evaluator::Accuracy;

const HEADER: &str = "epoch,d_loss,g_loss,correct,total,accuracy";

/// One row of metrics for a single epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochMetrics {
    pub epoch:    usize,
    pub losses:   Option<(f64, f64)>,
    pub accuracy: Option<Accuracy>,
}

impl EpochMetrics {
    pub fn new(epoch: usize) -> Self {
        Self { epoch, losses: None, accuracy: None }
    }

    pub fn with_losses(mut self, d_loss: f64, g_loss: f64) -> Self {
        self.losses = Some((d_loss, g_loss));
        self
    }

    pub fn with_accuracy(mut self, accuracy: Accuracy) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    fn csv_row(&self) -> String {
        let (d, g) = match self.losses {
            Some((d, g)) => (format!("{d:.6}"), format!("{g:.6}")),
            None         => (String::new(), String::new()),
        };
        let (correct, total, ratio) = match self.accuracy {
            Some(a) => (a.correct.to_string(), a.total.to_string(), format!("{:.6}", a.ratio())),
            None    => (String::new(), String::new(), String::new()),
        };
        format!("{},{d},{g},{correct},{total},{ratio}", self.epoch)
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Writes the CSV header if the file doesn't exist yet,
    /// so repeated runs with the same prefix append.
    pub fn new(csv_path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = csv_path.into();

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create metrics file '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open metrics file '{}'", self.csv_path.display()))?;

        writeln!(f, "{}", m.csv_row())?;

        tracing::debug!("Logged epoch {} metrics", m.epoch);
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_with_every_phase() {
        let m = EpochMetrics::new(2)
            .with_losses(1.25, 0.5)
            .with_accuracy(Accuracy { correct: 9, total: 10 });
        assert_eq!(m.csv_row(), "2,1.250000,0.500000,9,10,0.900000");
    }

    #[test]
    fn test_row_leaves_skipped_phases_empty() {
        let eval_only = EpochMetrics::new(1).with_accuracy(Accuracy { correct: 1, total: 4 });
        assert_eq!(eval_only.csv_row(), "1,,,1,4,0.250000");

        let train_only = EpochMetrics::new(3).with_losses(1.0, 2.0);
        assert_eq!(train_only.csv_row(), "3,1.000000,2.000000,,,");
    }

    #[test]
    fn test_logger_appends_after_single_header() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.csv");

        let logger = MetricsLogger::new(&path).unwrap();
        logger.log(&EpochMetrics::new(1).with_losses(1.0, 1.0)).unwrap();

        // Reopening must not write a second header
        let logger = MetricsLogger::new(&path).unwrap();
        logger.log(&EpochMetrics::new(2).with_losses(0.5, 0.5)).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("2,0.500000"));
    }
}
