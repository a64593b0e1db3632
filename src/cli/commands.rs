// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `report`
// and all their configurable flags.
//
// Enum-valued flags (optimizer, device, ...) parse through
// their FromStr impls, so inner layers never see clap types.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::train_use_case::{DeviceKind, TrainConfig};
use crate::data::{embeddings::UnkInit, text::TextEncoding};
use crate::ml::optimizer::OptimizerKind;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the sentiment CNN on labelled reviews
    Train(TrainArgs),

    /// Summarise the learning curves of a finished run
    Report(ReportArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// GloVe text file: one token followed by its vector per line
    #[arg(long, default_value = "data/glove.6B.50d.txt")]
    pub glove: String,

    /// Number of components in every GloVe vector
    #[arg(long, default_value_t = 50)]
    pub embedding_dim: usize,

    /// JSON array of {"text", "label"} training records
    #[arg(long, default_value = "data/train.json")]
    pub train_file: String,

    /// JSON array of {"text", "label"} development records
    #[arg(long, default_value = "data/dev.json")]
    pub dev_file: String,

    /// Where train_config.json, history.json and metrics.csv go
    #[arg(long, default_value = "runs")]
    pub output_dir: String,

    /// Reviews are truncated or padded to this many tokens
    #[arg(long, default_value_t = 384)]
    pub max_length: usize,

    #[arg(long, default_value_t = 0.2)]
    pub dropout: f64,

    /// Number of convolution filters (and hidden layer width)
    #[arg(long, default_value_t = 128)]
    pub hidden_size: usize,

    /// Convolution window in tokens
    #[arg(long, default_value_t = 5)]
    pub kernel_size: usize,

    #[arg(long, default_value_t = 30)]
    pub epochs: usize,

    #[arg(long, default_value_t = 0.0075)]
    pub lr: f64,

    #[arg(long, default_value_t = 48)]
    pub batch_size: usize,

    /// sgd, adam, adamw, adagrad or rmsprop
    #[arg(long, default_value_t = OptimizerKind::Sgd)]
    pub optimizer: OptimizerKind,

    /// Background threads preparing batches (0 = load on the main thread)
    #[arg(long, default_value_t = 2)]
    pub num_workers: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// How the <UNK> embedding row starts: random or zero
    #[arg(long, default_value_t = UnkInit::Random)]
    pub unk_init: UnkInit,

    /// Character encoding of the GloVe and dataset files: latin1 or utf8
    #[arg(long, default_value_t = TextEncoding::Latin1)]
    pub encoding: TextEncoding,

    /// wgpu or cpu
    #[arg(long, default_value_t = DeviceKind::Wgpu)]
    pub device: DeviceKind,

    /// Hide the per-batch progress bars
    #[arg(long)]
    pub no_progress: bool,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            glove_path:    a.glove,
            embedding_dim: a.embedding_dim,
            train_file:    a.train_file,
            dev_file:      a.dev_file,
            output_dir:    a.output_dir,
            encoding:      a.encoding,
            unk_init:      a.unk_init,
            max_length:    a.max_length,
            dropout:       a.dropout,
            hidden_size:   a.hidden_size,
            kernel_size:   a.kernel_size,
            epochs:        a.epochs,
            lr:            a.lr,
            batch_size:    a.batch_size,
            optimizer:     a.optimizer,
            num_workers:   a.num_workers,
            seed:          a.seed,
            device:        a.device,
            progress:      !a.no_progress,
        }
    }
}

/// All arguments for the `report` command
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Directory written by a previous `train` run
    #[arg(long, default_value = "runs")]
    pub run_dir: String,
}
