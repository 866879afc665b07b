// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `run`     — the full train/deploy/score pipeline
//   2. `prepare` — the local data-preparation half only
//
// The run command wires the application layer to the bundled
// in-memory backend. Pointing it at a real platform means
// constructing real ObjectStore/TrainingPlatform/ModelHost
// implementations here — nothing below this layer changes.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PrepareArgs, RunArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "abalone-age",
    version = "0.1.0",
    about = "Train, deploy and query an abalone age model through a managed ML platform."
)]
pub struct Cli {
    /// The subcommand to run (run or prepare)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args)     => Self::run_pipeline(args),
            Commands::Prepare(args) => Self::run_prepare(args),
        }
    }

    /// Handles the `run` subcommand.
    fn run_pipeline(args: RunArgs) -> Result<()> {
        use crate::application::pipeline_use_case::PipelineUseCase;
        use crate::infra::stub_backend::StubBackend;

        tracing::info!("Starting pipeline run against the in-memory backend");

        let backend  = StubBackend::new();
        let use_case = PipelineUseCase::new(
            args.into(),
            backend.store(),
            backend.platform(),
            backend.host(),
        );
        let summary = use_case.execute()?;

        println!("Pipeline complete.");
        println!("  rows loaded:      {}", summary.rows_loaded);
        println!("  rows scored:      {}", summary.rows_scored);
        println!("  mean abs error:   {:.3} rings", summary.mean_abs_error);
        println!("  model artifact:   {}", summary.model_uri);
        println!("  prediction report: {}", summary.report_path.display());
        Ok(())
    }

    /// Handles the `prepare` subcommand.
    fn run_prepare(args: PrepareArgs) -> Result<()> {
        use crate::application::prepare_use_case::PrepareUseCase;

        let use_case = PrepareUseCase::new(args.into());
        let summary  = use_case.execute()?;

        println!("Data prepared.");
        println!("  train:      {} rows -> {}", summary.train_rows, summary.train_path.display());
        println!(
            "  validation: {} rows -> {}",
            summary.validation_rows,
            summary.validation_path.display()
        );
        println!("  test:       {} rows -> {}", summary.test_rows, summary.test_path.display());
        Ok(())
    }
}
