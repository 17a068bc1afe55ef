//! Run command implementation
//!
//! This module implements the `run` command: resume-aware batch translation
//! and sentiment scoring of the configured dataset.

use crate::adapters::scorer::SentiStrengthScorer;
use crate::adapters::translator::HttpTranslator;
use crate::config::load_config;
use crate::core::pipeline::PipelineCoordinator;
use crate::core::RunOutcome;
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Override the input CSV path
    #[arg(long)]
    pub input: Option<String>,

    /// Override the output base name
    #[arg(long)]
    pub output_name: Option<String>,

    /// Override the rows-per-job batch size
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Override the number of concurrent workers
    #[arg(long)]
    pub workers: Option<usize>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        // Load configuration
        let mut config = load_config(config_path)?;

        // Apply CLI overrides
        if let Some(input) = &self.input {
            tracing::info!(input = %input, "Overriding input path from CLI");
            config.input.path = input.into();
        }

        if let Some(name) = &self.output_name {
            tracing::info!(name = %name, "Overriding output name from CLI");
            config.output.name = name.clone();
        }

        if let Some(batch_size) = self.batch_size {
            tracing::info!(batch_size, "Overriding batch size from CLI");
            config.pipeline.batch_size = batch_size;
        }

        if let Some(workers) = self.workers {
            tracing::info!(workers, "Overriding worker count from CLI");
            config.pipeline.workers = workers;
        }

        // Validate configuration
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        // Confirmation prompt (unless --yes)
        if !self.yes {
            println!("Run Configuration:");
            println!("  Input: {}", config.input.path.display());
            println!("  Checkpoint: {}", config.output.checkpoint_path().display());
            println!("  Artifact: {}", config.output.artifact_path().display());
            println!("  Batch size: {}", config.pipeline.batch_size);
            println!("  Workers: {}", config.pipeline.workers);
            println!("  Score mode: {}", config.scorer.mode);
            println!();
            print!("Proceed with run? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Run cancelled.");
                return Ok(0);
            }
        }

        // Create collaborators
        let translator = match HttpTranslator::new(config.translator.clone()) {
            Ok(t) => Arc::new(t),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create translator client");
                eprintln!("Failed to initialize translator: {e}");
                return Ok(4); // Collaborator error exit code
            }
        };

        let scorer = match SentiStrengthScorer::new(config.scorer.clone()) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create sentiment scorer");
                eprintln!("Failed to initialize scorer: {e}");
                return Ok(4);
            }
        };

        // Smoke test the scorer before any work is planned
        println!("Checking sentiment scorer...");
        if let Err(e) = scorer.init().await {
            tracing::error!(error = %e, "Scorer smoke test failed");
            eprintln!("Scorer smoke test failed: {e}");
            return Ok(4);
        }

        // Execute the pipeline
        tracing::info!("Executing pipeline");
        println!("Starting run...");
        println!();

        let coordinator =
            PipelineCoordinator::new(config, translator, scorer, shutdown_signal);
        let summary = match coordinator.execute().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Run failed");
                eprintln!("Run failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Display summary
        println!();
        println!("Run Summary:");
        println!("  Total records: {}", summary.total_records);
        println!("  Already completed: {}", summary.already_completed);
        println!("  Jobs planned: {}", summary.total_jobs);
        println!("  Jobs written: {}", summary.jobs_written);
        println!("  Rows written: {}", summary.rows_written);
        if summary.workers_failed > 0 {
            println!(
                "  Workers failed: {}/{}",
                summary.workers_failed, summary.workers_spawned
            );
        }
        if let Some(rows) = summary.artifact_rows {
            println!("  Artifact rows: {rows}");
        }
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        // Determine exit code
        let exit_code = match summary.outcome {
            RunOutcome::Cancelled => {
                println!("Run interrupted gracefully. Progress saved.");
                println!("Run the same command to resume from checkpoint.");
                tracing::info!("Run interrupted by user signal");
                130 // SIGINT exit code (standard Unix convention)
            }
            RunOutcome::Completed => {
                println!("Run completed successfully.");
                0
            }
            RunOutcome::WorkersExitedEarly => {
                println!("Run completed with failures. Re-run to retry the remaining records.");
                1 // Partial success
            }
            RunOutcome::StorageFailed => {
                println!("Run stopped: results could not be written to the checkpoint.");
                5
            }
        };

        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_defaults() {
        let args = RunArgs {
            yes: false,
            input: None,
            output_name: None,
            batch_size: None,
            workers: None,
        };

        assert!(!args.yes);
        assert!(args.input.is_none());
        assert!(args.batch_size.is_none());
        assert!(args.workers.is_none());
    }

    #[test]
    fn test_run_args_with_overrides() {
        let args = RunArgs {
            yes: true,
            input: Some("tweets.csv".to_string()),
            output_name: Some("run2".to_string()),
            batch_size: Some(25),
            workers: Some(4),
        };

        assert!(args.yes);
        assert_eq!(args.input, Some("tweets.csv".to_string()));
        assert_eq!(args.output_name, Some("run2".to_string()));
        assert_eq!(args.batch_size, Some(25));
        assert_eq!(args.workers, Some(4));
    }
}
