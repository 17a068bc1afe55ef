//! Status command implementation
//!
//! This module implements the `status` command for displaying checkpoint
//! progress against the configured dataset.

use crate::config::load_config;
use crate::core::{CheckpointStore, Dataset};
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Override the output base name
    #[arg(long)]
    pub output_name: Option<String>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking run status");

        println!("Run Status");
        println!();

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

        // Load the dataset to get the denominator
        let dataset = match Dataset::load(&config.input) {
            Ok(d) => d,
            Err(e) => {
                println!("Failed to read input dataset");
                println!("   Error: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        let store = CheckpointStore::new(config.output.checkpoint_path());
        let completed = store.recover_ids();

        let done = dataset
            .records()
            .iter()
            .filter(|record| completed.contains(&record.record_id))
            .count();
        let remaining = dataset.len() - done;

        println!("  Input: {}", config.input.path.display());
        println!("  Checkpoint: {}", config.output.checkpoint_path().display());
        if let Some(updated) = checkpoint_updated_at(&store) {
            println!("  Last checkpoint write: {}", updated.format("%Y-%m-%d %H:%M:%S"));
        }
        println!();
        println!("  Total records: {}", dataset.len());
        println!("  Completed: {done}");
        println!("  Remaining: {remaining}");

        // Ids checkpointed but absent from the input (changed dataset)
        let orphaned = completed.len().saturating_sub(done);
        if orphaned > 0 {
            println!("  Checkpointed but not in input: {orphaned}");
        }

        println!();
        if remaining == 0 && dataset.len() > 0 {
            println!("All records processed. Run 'transent rebuild' to refresh the artifact.");
        } else {
            println!("Run 'transent run' to process the remaining records.");
        }

        Ok(0)
    }
}

/// Modification time of the checkpoint file, if it exists
fn checkpoint_updated_at(store: &CheckpointStore) -> Option<chrono::DateTime<chrono::Local>> {
    let modified = std::fs::metadata(store.path()).ok()?.modified().ok()?;
    Some(modified.into())
}
