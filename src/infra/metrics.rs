// ============================================================
// Layer 6 — Metrics
// ============================================================
// Per-epoch bookkeeping for the training loop:
//
//   accuracy()          — fraction of predictions equal to targets
//   PhaseAccumulator    — sums losses and collects (pred, target)
//                         pairs over one pass of a split
//   PhaseMetrics        — mean loss + accuracy of one pass
//   EpochMetrics        — train and dev PhaseMetrics of one epoch
//   TrainingHistory     — the four running lists
//                         (train/dev × loss/accuracy)
//   MetricsLogger       — writes the history as a CSV learning curve
//
// Example CSV output:
//   epoch,train_loss,train_acc,dev_loss,dev_acc
//   1,0.693100,0.512000,0.690200,0.530000
//   2,0.671800,0.588000,0.665400,0.602000
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

/// Fraction of positions where `predictions` and `targets` agree.
/// Returns 0.0 for empty input.
///
/// # Panics
/// If the two slices have different lengths.
pub fn accuracy(predictions: &[i64], targets: &[i64]) -> f64 {
    assert_eq!(
        predictions.len(),
        targets.len(),
        "predictions and targets must have equal length"
    );
    if targets.is_empty() {
        return 0.0;
    }
    let correct = predictions
        .iter()
        .zip(targets)
        .filter(|(p, t)| p == t)
        .count();
    correct as f64 / targets.len() as f64
}

/// Mean loss and accuracy of one pass over a split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseMetrics {
    pub loss:     f64,
    pub accuracy: f64,
}

/// Running totals for one pass.
#[derive(Debug, Default)]
pub struct PhaseAccumulator {
    loss_sum:    f64,
    batches:     usize,
    predictions: Vec<i64>,
    targets:     Vec<i64>,
}

impl PhaseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one batch: its mean loss and its (prediction, target) pairs
    pub fn record(&mut self, batch_loss: f64, predictions: &[i64], targets: &[i64]) {
        self.loss_sum += batch_loss;
        self.batches  += 1;
        self.predictions.extend_from_slice(predictions);
        self.targets.extend_from_slice(targets);
    }

    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn samples(&self) -> usize {
        self.targets.len()
    }

    /// Mean over batches (NaN if no batch was seen) and accuracy over samples
    pub fn finish(self) -> PhaseMetrics {
        let loss = if self.batches > 0 {
            self.loss_sum / self.batches as f64
        } else {
            f64::NAN
        };
        PhaseMetrics {
            loss,
            accuracy: accuracy(&self.predictions, &self.targets),
        }
    }
}

/// Train and dev results of a single epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,
    pub train: PhaseMetrics,
    pub dev:   PhaseMetrics,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train: PhaseMetrics, dev: PhaseMetrics) -> Self {
        Self { epoch, train, dev }
    }
}

/// Per-split learning curves, one entry per completed epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub train_loss: Vec<f64>,
    pub train_acc:  Vec<f64>,
    pub dev_loss:   Vec<f64>,
    pub dev_acc:    Vec<f64>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, m: &EpochMetrics) {
        self.train_loss.push(m.train.loss);
        self.train_acc.push(m.train.accuracy);
        self.dev_loss.push(m.dev.loss);
        self.dev_acc.push(m.dev.accuracy);
    }

    /// Number of recorded epochs
    pub fn len(&self) -> usize {
        self.train_loss.len()
    }

    pub fn is_empty(&self) -> bool {
        self.train_loss.is_empty()
    }

    /// Rebuild the per-epoch view (epochs numbered from 1)
    pub fn epochs(&self) -> impl Iterator<Item = EpochMetrics> + '_ {
        (0..self.len()).map(move |i| EpochMetrics {
            epoch: i + 1,
            train: PhaseMetrics { loss: self.train_loss[i], accuracy: self.train_acc[i] },
            dev:   PhaseMetrics { loss: self.dev_loss[i], accuracy: self.dev_acc[i] },
        })
    }

    /// The epoch with the highest dev accuracy (earliest on ties)
    pub fn best_dev_epoch(&self) -> Option<EpochMetrics> {
        self.epochs().fold(None, |best: Option<EpochMetrics>, m| match best {
            Some(b) if b.dev.accuracy >= m.dev.accuracy => Some(b),
            _ => Some(m),
        })
    }
}

/// Writes learning curves to `<dir>/metrics.csv`.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create run directory '{}'", dir.display()))?;
        Ok(Self { csv_path: dir.join("metrics.csv") })
    }

    /// Overwrite the CSV with a header and one row per epoch
    pub fn write(&self, history: &TrainingHistory) -> Result<()> {
        let mut f = fs::File::create(&self.csv_path)
            .with_context(|| format!("Cannot write '{}'", self.csv_path.display()))?;

        writeln!(f, "epoch,train_loss,train_acc,dev_loss,dev_acc")?;
        for m in history.epochs() {
            writeln!(
                f,
                "{},{:.6},{:.6},{:.6},{:.6}",
                m.epoch, m.train.loss, m.train.accuracy, m.dev.loss, m.dev.accuracy,
            )?;
        }

        tracing::debug!(
            "Wrote {} epochs of metrics to '{}'",
            history.len(),
            self.csv_path.display()
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
