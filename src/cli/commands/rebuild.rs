//! Rebuild command implementation
//!
//! This module implements the `rebuild` command: regenerate the final
//! ordered artifact from the checkpoint without contacting any collaborator.

use crate::config::load_config;
use crate::core::{CheckpointStore, Rebuilder};
use clap::Args;

/// Arguments for the rebuild command
#[derive(Args, Debug)]
pub struct RebuildArgs {
    /// Override the output base name
    #[arg(long)]
    pub output_name: Option<String>,
}

impl RebuildArgs {
    /// Execute the rebuild command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting standalone rebuild");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Some(name) = &self.output_name {
            config.output.name = name.clone();
        }

        let store = CheckpointStore::new(config.output.checkpoint_path());
        let artifact_path = config.output.artifact_path();
        let rebuilder = Rebuilder::new(store, artifact_path.clone(), config.scorer.mode);

        match rebuilder.rebuild() {
            Ok(Some(rows)) => {
                println!("Rebuilt {} ({rows} rows)", artifact_path.display());
                Ok(0)
            }
            Ok(None) => {
                println!("No checkpoint data found - nothing to rebuild.");
                println!("Run 'transent run' first.");
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Rebuild failed");
                eprintln!("Rebuild failed: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
