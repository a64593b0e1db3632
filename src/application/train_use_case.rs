// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates a full training run in order:
//
//   Step 1: Validate the configuration     (this layer)
//   Step 2: Load GloVe table + vocabulary  (Layer 4 - data)
//   Step 3: Build the example encoder      (Layer 4 - data)
//   Step 4: Load train / dev datasets      (Layer 4 - data)
//   Step 5: Save config to the run dir     (Layer 6 - infra)
//   Step 6: Train and evaluate             (Layer 5 - ml)
//   Step 7: Write learning curves          (Layer 6 - infra)
//
// Any failure before Step 6 aborts the run; nothing is retried.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use std::{fmt, path::Path, str::FromStr, sync::Arc};

use anyhow::{ensure, Context, Result};
use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::ReviewDataset,
    embeddings::{EmbeddingTable, GloveLoader, UnkInit},
    encoder::ExampleEncoder,
    text::TextEncoding,
    tokenizer::TreebankTokenizer,
};
use crate::infra::{
    metrics::{MetricsLogger, TrainingHistory},
    run_store::RunStore,
};
use crate::ml::{optimizer::OptimizerKind, trainer::run_training};

// ─── Device Selection ─────────────────────────────────────────────────────────
/// Which Burn backend the run executes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// GPU through wgpu (falls back to whatever adapter wgpu picks)
    #[default]
    Wgpu,
    /// CPU through ndarray
    Cpu,
}

impl FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wgpu" | "gpu" => Ok(DeviceKind::Wgpu),
            "cpu" | "ndarray" => Ok(DeviceKind::Cpu),
            other => Err(format!("unknown device '{other}' (expected wgpu or cpu)")),
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Wgpu => f.write_str("wgpu"),
            DeviceKind::Cpu => f.write_str("cpu"),
        }
    }
}

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters and paths for a training run.
// Serialisable so the run directory records exactly what was run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub glove_path:    String,
    pub embedding_dim: usize,
    pub train_file:    String,
    pub dev_file:      String,
    pub output_dir:    String,
    pub encoding:      TextEncoding,
    pub unk_init:      UnkInit,
    pub max_length:    usize,
    pub dropout:       f64,
    pub hidden_size:   usize,
    pub kernel_size:   usize,
    pub epochs:        usize,
    pub lr:            f64,
    pub batch_size:    usize,
    pub optimizer:     OptimizerKind,
    pub num_workers:   usize,
    pub seed:          u64,
    pub device:        DeviceKind,
    pub progress:      bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            glove_path:    "data/glove.6B.50d.txt".to_string(),
            embedding_dim: 50,
            train_file:    "data/train.json".to_string(),
            dev_file:      "data/dev.json".to_string(),
            output_dir:    "runs".to_string(),
            encoding:      TextEncoding::Latin1,
            unk_init:      UnkInit::Random,
            max_length:    384,
            dropout:       0.2,
            hidden_size:   128,
            kernel_size:   5,
            epochs:        30,
            lr:            0.0075,
            batch_size:    48,
            optimizer:     OptimizerKind::Sgd,
            num_workers:   2,
            seed:          42,
            device:        DeviceKind::Wgpu,
            progress:      true,
        }
    }
}

impl TrainConfig {
    /// Reject settings the model or the loop cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.embedding_dim >= 1, "embedding_dim must be at least 1");
        ensure!(self.max_length >= 1, "max_length must be at least 1");
        ensure!(self.hidden_size >= 1, "hidden_size must be at least 1");
        ensure!(self.kernel_size >= 1, "kernel_size must be at least 1");
        ensure!(
            self.kernel_size <= self.max_length,
            "kernel_size ({}) must not exceed max_length ({})",
            self.kernel_size,
            self.max_length
        );
        ensure!(
            (0.0..1.0).contains(&self.dropout),
            "dropout must be in [0, 1), got {}",
            self.dropout
        );
        ensure!(self.epochs >= 1, "epochs must be at least 1");
        ensure!(self.lr > 0.0 && self.lr.is_finite(), "lr must be positive, got {}", self.lr);
        ensure!(self.batch_size >= 1, "batch_size must be at least 1");
        Ok(())
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainingHistory> {
        let cfg = &self.config;

        // ── Step 1: Validate ──────────────────────────────────────────────────
        cfg.validate().context("Invalid training configuration")?;

        // ── Step 2: Load GloVe ────────────────────────────────────────────────
        let (table, vocab) = GloveLoader::new(cfg.embedding_dim)
            .with_encoding(cfg.encoding)
            .with_unk_init(cfg.unk_init, cfg.seed)
            .load(Path::new(&cfg.glove_path))
            .context("Failed to load embeddings")?;

        // ── Step 3: Encoder shared by both splits ─────────────────────────────
        let encoder = ExampleEncoder::new(
            Arc::new(vocab),
            Arc::new(TreebankTokenizer::new()),
            cfg.max_length,
        );

        // ── Step 4: Datasets ──────────────────────────────────────────────────
        let train_dataset =
            ReviewDataset::load(Path::new(&cfg.train_file), cfg.encoding, encoder.clone())
                .context("Failed to load training data")?;
        let dev_dataset = ReviewDataset::load(Path::new(&cfg.dev_file), cfg.encoding, encoder)
            .context("Failed to load dev data")?;

        let (neg, pos) = train_dataset.label_counts();
        tracing::info!(
            "Train: {} reviews ({} positive, {} negative); dev: {} reviews",
            train_dataset.len(),
            pos,
            neg,
            dev_dataset.len()
        );

        // ── Step 5: Record the configuration ──────────────────────────────────
        let store = RunStore::new(&cfg.output_dir)?;
        store.save_config(cfg)?;

        // ── Step 6: Train on the selected backend ─────────────────────────────
        let history = self.train_on_device(&table, train_dataset, dev_dataset);

        // ── Step 7: Learning curves ───────────────────────────────────────────
        store.save_history(&history)?;
        let logger = MetricsLogger::new(store.dir())?;
        logger.write(&history)?;
        tracing::info!("Learning curves written to '{}'", logger.csv_path().display());

        Ok(history)
    }

    fn train_on_device(
        &self,
        table: &EmbeddingTable,
        train: ReviewDataset,
        dev:   ReviewDataset,
    ) -> TrainingHistory {
        use burn::backend::{ndarray::NdArrayDevice, wgpu::WgpuDevice, Autodiff, NdArray, Wgpu};

        let cfg = &self.config;
        match cfg.device {
            DeviceKind::Wgpu => {
                let device = WgpuDevice::default();
                tracing::info!("Using WGPU device: {:?}", device);
                run_training::<Autodiff<Wgpu>>(cfg, table, train, dev, &device).history
            }
            DeviceKind::Cpu => {
                let device = NdArrayDevice::default();
                tracing::info!("Using CPU device: {:?}", device);
                run_training::<Autodiff<NdArray>>(cfg, table, train, dev, &device).history
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::application::report_use_case::ReportUseCase;

    #[test]
    fn test_default_config_is_valid() {
        TrainConfig::default().validate().unwrap();
    }

    #[test]
    fn test_kernel_longer_than_text_is_rejected() {
        let cfg = TrainConfig { kernel_size: 9, max_length: 8, ..TrainConfig::default() };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("kernel_size"));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let base = TrainConfig::default();
        for cfg in [
            TrainConfig { dropout: 1.0, ..base.clone() },
            TrainConfig { dropout: -0.1, ..base.clone() },
            TrainConfig { lr: 0.0, ..base.clone() },
            TrainConfig { epochs: 0, ..base.clone() },
            TrainConfig { batch_size: 0, ..base.clone() },
            TrainConfig { hidden_size: 0, ..base.clone() },
        ] {
            assert!(cfg.validate().is_err(), "{cfg:?}");
        }
    }

    #[test]
    fn test_parse_device() {
        assert_eq!("cpu".parse::<DeviceKind>().unwrap(), DeviceKind::Cpu);
        assert_eq!("WGPU".parse::<DeviceKind>().unwrap(), DeviceKind::Wgpu);
        assert!("tpu".parse::<DeviceKind>().is_err());
    }

    #[test]
    fn test_end_to_end_on_cpu() {
        let dir = tempfile::tempdir().unwrap();
        let glove = dir.path().join("glove.txt");
        let train = dir.path().join("train.json");
        let dev   = dir.path().join("dev.json");
        fs::write(&glove, "good 1 0 0\nbad 0 1 0\nmovie 0 0 1\n").unwrap();
        fs::write(
            &train,
            r#"[{"text": "Good movie!", "label": "positive"},
                {"text": "Bad movie.", "label": "negative"},
                {"text": "good good", "label": "positive"}]"#,
        )
        .unwrap();
        fs::write(&dev, r#"[{"text": "bad", "label": "negative"}]"#).unwrap();

        let cfg = TrainConfig {
            glove_path:    glove.display().to_string(),
            embedding_dim: 3,
            train_file:    train.display().to_string(),
            dev_file:      dev.display().to_string(),
            output_dir:    dir.path().join("run").display().to_string(),
            max_length:    4,
            hidden_size:   4,
            kernel_size:   2,
            epochs:        2,
            lr:            0.05,
            batch_size:    2,
            num_workers:   0,
            device:        DeviceKind::Cpu,
            progress:      false,
            ..TrainConfig::default()
        };

        let history = TrainUseCase::new(cfg).execute().unwrap();
        assert_eq!(history.len(), 2);

        let run = dir.path().join("run");
        assert!(run.join("train_config.json").exists());
        assert!(run.join("history.json").exists());
        let csv = fs::read_to_string(run.join("metrics.csv")).unwrap();
        assert_eq!(csv.lines().count(), 3);

        // the run reads back through `report`
        let report = ReportUseCase::new(run.display().to_string()).execute().unwrap();
        assert_eq!(report.history, history);
        assert_eq!(report.config.epochs, 2);
    }

    #[test]
    fn test_bad_label_aborts_before_training() {
        let dir = tempfile::tempdir().unwrap();
        let glove = dir.path().join("glove.txt");
        let data  = dir.path().join("data.json");
        fs::write(&glove, "good 1 0\n").unwrap();
        fs::write(&data, r#"[{"text": "good", "label": "great"}]"#).unwrap();

        let cfg = TrainConfig {
            glove_path:    glove.display().to_string(),
            embedding_dim: 2,
            train_file:    data.display().to_string(),
            dev_file:      data.display().to_string(),
            output_dir:    dir.path().join("run").display().to_string(),
            max_length:    4,
            kernel_size:   2,
            device:        DeviceKind::Cpu,
            ..TrainConfig::default()
        };

        let err = TrainUseCase::new(cfg).execute().unwrap_err();
        assert!(format!("{err:#}").contains("unknown label 'great'"));
        assert!(!dir.path().join("run").exists());
    }
}
