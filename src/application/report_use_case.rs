// ============================================================
// Layer 2 — ReportUseCase
// ============================================================
// Reads back a finished run directory and summarises it:
//
//   Step 1: Check the run directory exists   (this layer)
//   Step 2: Load config + history            (Layer 6 - infra)
//   Step 3: Build the per-epoch table        (this layer)
//
// Printing is left to Layer 1.

use std::{fmt::Write as _, path::Path};

use anyhow::{ensure, Result};

use crate::application::train_use_case::TrainConfig;
use crate::infra::{
    metrics::{EpochMetrics, TrainingHistory},
    run_store::RunStore,
};

/// Everything recorded about one training run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub config:  TrainConfig,
    pub history: TrainingHistory,
}

impl RunReport {
    pub fn best_epoch(&self) -> Option<EpochMetrics> {
        self.history.best_dev_epoch()
    }

    /// Fixed-width table, one row per epoch, best dev epoch marked with `*`
    pub fn render_table(&self) -> String {
        let best = self.best_epoch().map(|m| m.epoch);
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>5}  {:>10}  {:>9}  {:>10}  {:>9}",
            "epoch", "train_loss", "train_acc", "dev_loss", "dev_acc"
        );
        for m in self.history.epochs() {
            let mark = if Some(m.epoch) == best { "*" } else { "" };
            let _ = writeln!(
                out,
                "{:>5}  {:>10.4}  {:>9.4}  {:>10.4}  {:>9.4}{}",
                m.epoch, m.train.loss, m.train.accuracy, m.dev.loss, m.dev.accuracy, mark
            );
        }
        out
    }
}

pub struct ReportUseCase {
    run_dir: String,
}

impl ReportUseCase {
    pub fn new(run_dir: impl Into<String>) -> Self {
        Self { run_dir: run_dir.into() }
    }

    pub fn execute(&self) -> Result<RunReport> {
        // ── Step 1: The directory must come from a previous run ───────────────
        let dir = Path::new(&self.run_dir);
        ensure!(dir.is_dir(), "Run directory '{}' does not exist", dir.display());

        // ── Step 2: Load what training recorded ───────────────────────────────
        let store   = RunStore::new(dir)?;
        let config  = store.load_config()?;
        let history = store.load_history()?;
        tracing::info!("Loaded {} epochs from '{}'", history.len(), dir.display());

        Ok(RunReport { config, history })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::metrics::PhaseMetrics;

    fn epoch(n: usize, dev_acc: f64) -> EpochMetrics {
        EpochMetrics::new(
            n,
            PhaseMetrics { loss: 0.5, accuracy: 0.7 },
            PhaseMetrics { loss: 0.6, accuracy: dev_acc },
        )
    }

    #[test]
    fn test_report_reads_back_a_run() {
        let dir = tempfile::tempdir().unwrap();
        let store = RunStore::new(dir.path()).unwrap();
        let mut history = TrainingHistory::new();
        history.push(&epoch(1, 0.60));
        history.push(&epoch(2, 0.75));
        history.push(&epoch(3, 0.70));
        store.save_config(&TrainConfig { epochs: 3, ..TrainConfig::default() }).unwrap();
        store.save_history(&history).unwrap();

        let report = ReportUseCase::new(dir.path().display().to_string()).execute().unwrap();
        assert_eq!(report.config.epochs, 3);
        assert_eq!(report.best_epoch().map(|m| m.epoch), Some(2));

        let table = report.render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("dev_acc"));
        assert!(lines[2].ends_with('*'));
        assert!(!lines[3].ends_with('*'));
    }

    #[test]
    fn test_missing_run_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = ReportUseCase::new(missing.display().to_string()).execute().unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(!missing.exists());
    }
}
