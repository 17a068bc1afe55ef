//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "transent.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("Initializing Transent configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point input.path at your dataset CSV");
                println!("  3. Point translator.endpoint at a LibreTranslate-compatible server");
                println!("     (set TRANSENT_TRANSLATOR_API_KEY in .env if the server needs one)");
                println!("  4. Point scorer.jar_path and scorer.language_dir at SentiStrength");
                println!("  5. Run: transent run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# Transent Configuration File
# Batch translation and sentiment scoring with checkpointed resume

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[input]
# Input CSV with a header row
path = "tweets.csv"

# Column holding the unique record identifier
id_column = "tweetid"

# Column holding the free text to translate and score
text_column = "text"

[output]
# Directory for the checkpoint (<name>_raw.csv) and artifact (<name>.csv)
directory = "out"
name = "tweets"

[pipeline]
# Rows per translate/score call
batch_size = 10

# Concurrent workers
workers = 4

[translator]
# LibreTranslate-compatible endpoint
endpoint = "http://localhost:5000/translate"
target_language = "en"

# Optional API key (use environment variable)
# api_key = "${TRANSENT_TRANSLATOR_API_KEY}"

# Request timeout in seconds
timeout_secs = 60

[scorer]
# SentiStrength jar and language resources
jar_path = "lib/SentiStrengthCom.jar"
language_dir = "lang/EN"

# Score shape: "dual" (positive + negative) or "scale" (-4..4)
mode = "dual"

# Java binary used to launch the scorer
java_bin = "java"

[logging]
# Enable local file logging
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "transent.toml".to_string(),
            force: false,
        };

        assert_eq!(args.output, "transent.toml");
        assert!(!args.force);
    }

    #[test]
    fn test_generate_config_sections() {
        let config = InitArgs::generate_config();
        assert!(config.contains("[input]"));
        assert!(config.contains("[output]"));
        assert!(config.contains("[pipeline]"));
        assert!(config.contains("[translator]"));
        assert!(config.contains("[scorer]"));
    }

    #[test]
    fn test_generated_config_parses() {
        let config = InitArgs::generate_config();
        let parsed: crate::config::TransentConfig = toml::from_str(&config).unwrap();
        assert_eq!(parsed.pipeline.batch_size, 10);
        assert!(parsed.validate().is_ok());
    }
}
