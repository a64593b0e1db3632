// ============================================================
// Layer 6 — Run Directory
// ============================================================
// Records what a training run was asked to do and what it
// measured. No model weights are written.
//
// File layout:
//   runs/
//     train_config.json   ← every hyperparameter of the run
//     history.json        ← the four learning-curve lists
//     metrics.csv         ← same curves, one row per epoch
//                           (written by MetricsLogger)
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json documentation

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::application::train_use_case::TrainConfig;
use crate::infra::metrics::TrainingHistory;

const CONFIG_FILE: &str = "train_config.json";
const HISTORY_FILE: &str = "history.json";

pub struct RunStore {
    dir: PathBuf,
}

impl RunStore {
    /// Create the directory (and parents) if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create run directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        self.write_json(CONFIG_FILE, cfg)
    }

    pub fn load_config(&self) -> Result<TrainConfig> {
        self.read_json(CONFIG_FILE)
    }

    pub fn save_history(&self, history: &TrainingHistory) -> Result<()> {
        self.write_json(HISTORY_FILE, history)
    }

    pub fn load_history(&self) -> Result<TrainingHistory> {
        self.read_json(HISTORY_FILE)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Saved '{}'", path.display());
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid JSON in '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::metrics::{EpochMetrics, PhaseMetrics};

    #[test]
    fn test_config_and_history_round_trip() {
        let dir   = tempfile::tempdir().unwrap();
        let store = RunStore::new(dir.path().join("run-1")).unwrap();

        let cfg = TrainConfig { epochs: 3, lr: 0.01, ..TrainConfig::default() };
        store.save_config(&cfg).unwrap();
        let loaded = store.load_config().unwrap();
        assert_eq!(loaded.epochs, 3);
        assert_eq!(loaded.optimizer, cfg.optimizer);

        let mut history = TrainingHistory::new();
        let phase = PhaseMetrics { loss: 0.5, accuracy: 0.75 };
        history.push(&EpochMetrics::new(1, phase, phase));
        store.save_history(&history).unwrap();
        assert_eq!(store.load_history().unwrap(), history);
    }

    #[test]
    fn test_missing_history_is_an_error() {
        let dir   = tempfile::tempdir().unwrap();
        let store = RunStore::new(dir.path()).unwrap();
        assert!(store.load_history().is_err());
    }
}
