//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Transent using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Transent - batch translation and sentiment scoring tool
#[derive(Parser, Debug)]
#[command(name = "transent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "transent.toml", env = "TRANSENT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TRANSENT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate and score the input dataset, resuming from the checkpoint
    Run(commands::run::RunArgs),

    /// Show checkpoint progress for the configured dataset
    Status(commands::status::StatusArgs),

    /// Rebuild the final artifact from the checkpoint without processing
    Rebuild(commands::rebuild::RebuildArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["transent", "run"]);
        assert_eq!(cli.config, "transent.toml");
        assert!(matches!(cli.command, Commands::Run(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["transent", "--config", "custom.toml", "run"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["transent", "--log-level", "debug", "run"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["transent", "status"]);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_rebuild() {
        let cli = Cli::parse_from(["transent", "rebuild"]);
        assert!(matches!(cli.command, Commands::Rebuild(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["transent", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_run_overrides() {
        let cli = Cli::parse_from(["transent", "run", "--workers", "8", "--batch-size", "20"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.workers, Some(8));
        assert_eq!(args.batch_size, Some(20));
    }
}
