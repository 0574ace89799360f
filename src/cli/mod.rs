// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap.
// All business logic is delegated to Layer 2 (application).
//
// Three commands:
//   1. `train`   — fine-tunes the classifier on train.csv
//   2. `predict` — scores test.csv with a trained checkpoint
//   3. `run`     — both in sequence, the full pipeline

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, RunArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "news-classifier",
    version,
    about = "Fine-tune a transformer news classifier on CSV data, then score a test set."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use
    /// case. The CLI layer only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Predict(args) => run_predict(args),
            Commands::Run(args)     => run_pipeline(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting fine-tuning on '{}'", args.train_csv);
    TrainUseCase::new(args.into()).execute()?;

    println!("Training complete. Checkpoint saved.");
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let use_case = PredictUseCase::new(
        args.test_csv,
        args.checkpoint_dir,
        args.output_csv,
    );
    use_case.execute()?;
    Ok(())
}

fn run_pipeline(args: RunArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;
    use crate::application::train_use_case::TrainUseCase;

    let predict = PredictUseCase::new(
        args.test_csv.clone(),
        args.train.checkpoint_dir.clone(),
        args.output_csv.clone(),
    );

    TrainUseCase::new(args.train.into()).execute()?;
    predict.execute()?;
    Ok(())
}
