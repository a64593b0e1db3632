// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`  — trains the CNN and records learning curves
//   2. `report` — prints the learning curves of a finished run
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, ReportArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "sentiment-cnn",
    version = "0.1.0",
    about = "Train a convolutional sentiment classifier over GloVe embeddings."
)]
pub struct Cli {
    /// The subcommand to run (train or report)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)  => run_train(args),
            Commands::Report(args) => run_report(args),
        }
    }
}

/// Handles the `train` subcommand.
fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Training on '{}', evaluating on '{}'", args.train_file, args.dev_file);

    let output_dir = args.output_dir.clone();
    let history = TrainUseCase::new(args.into()).execute()?;

    match history.best_dev_epoch() {
        Some(best) => println!(
            "Training complete. Best dev accuracy {:.4} at epoch {}. Results in '{}'.",
            best.dev.accuracy, best.epoch, output_dir
        ),
        None => println!("Training complete. Results in '{}'.", output_dir),
    }
    Ok(())
}

/// Handles the `report` subcommand.
fn run_report(args: ReportArgs) -> Result<()> {
    use crate::application::report_use_case::ReportUseCase;

    let report = ReportUseCase::new(args.run_dir).execute()?;
    let cfg = &report.config;

    println!(
        "optimizer={} lr={} batch_size={} hidden_size={} kernel_size={} max_length={} dropout={}",
        cfg.optimizer, cfg.lr, cfg.batch_size, cfg.hidden_size, cfg.kernel_size, cfg.max_length, cfg.dropout
    );
    print!("{}", report.render_table());
    if let Some(best) = report.best_epoch() {
        println!("Best dev accuracy {:.4} at epoch {}", best.dev.accuracy, best.epoch);
    }
    Ok(())
}
