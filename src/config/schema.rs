//! Configuration schema types
//!
//! This module defines the configuration structure for Transent as it maps
//! to the TOML file.

use crate::domain::ScoreMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Transent configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransentConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Input dataset location and column mapping
    pub input: InputConfig,

    /// Output directory and artifact naming
    pub output: OutputConfig,

    /// Pipeline sizing (batch size, worker count)
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Translation collaborator configuration
    pub translator: TranslatorConfig,

    /// Sentiment scorer collaborator configuration
    pub scorer: ScorerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TransentConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.input.validate()?;
        self.output.validate()?;
        self.pipeline.validate()?;
        self.translator.validate()?;
        self.scorer.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Input dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the input CSV file
    pub path: PathBuf,

    /// Header name of the record identifier column
    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Header name of the free-text column
    #[serde(default = "default_text_column")]
    pub text_column: String,
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("input.path must not be empty".to_string());
        }
        if self.id_column.trim().is_empty() {
            return Err("input.id_column must not be empty".to_string());
        }
        if self.text_column.trim().is_empty() {
            return Err("input.text_column must not be empty".to_string());
        }
        Ok(())
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory where the checkpoint and final artifact are written
    pub directory: PathBuf,

    /// Base name of the output artifacts
    pub name: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.as_os_str().is_empty() {
            return Err("output.directory must not be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("output.name must not be empty".to_string());
        }
        Ok(())
    }

    /// Path of the append-only checkpoint store (`<name>_raw.csv`)
    pub fn checkpoint_path(&self) -> PathBuf {
        self.directory.join(format!("{}_raw.csv", self.name))
    }

    /// Path of the final ordered artifact (`<name>.csv`)
    pub fn artifact_path(&self) -> PathBuf {
        self.directory.join(format!("{}.csv", self.name))
    }
}

/// Pipeline sizing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Rows per job
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Number of concurrent workers
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            workers: default_workers(),
        }
    }
}

impl PipelineConfig {
    fn validate(&self) -> Result<(), String> {
        // A zero here was a silent no-op in earlier incarnations of this
        // tool; it is rejected up front instead.
        if self.batch_size == 0 {
            return Err("pipeline.batch_size must be at least 1".to_string());
        }
        if self.workers == 0 {
            return Err("pipeline.workers must be at least 1".to_string());
        }
        if self.workers > 256 {
            return Err(format!(
                "pipeline.workers is {} - values above 256 are not supported",
                self.workers
            ));
        }
        Ok(())
    }
}

/// Translation collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Translation endpoint URL (LibreTranslate-compatible)
    pub endpoint: String,

    /// Target language code
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Optional API key sent with each request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_translator_timeout_secs")]
    pub timeout_secs: u64,
}

impl TranslatorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("translator.endpoint must not be empty".to_string());
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!(
                "translator.endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            ));
        }
        if self.target_language.trim().is_empty() {
            return Err("translator.target_language must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("translator.timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Sentiment scorer collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Path to the SentiStrength jar
    pub jar_path: PathBuf,

    /// Path to the language resource directory
    pub language_dir: PathBuf,

    /// Score shape (scale or dual)
    #[serde(default = "default_score_mode")]
    pub mode: ScoreMode,

    /// Java binary used to launch the scorer
    #[serde(default = "default_java_bin")]
    pub java_bin: String,
}

impl ScorerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.jar_path.as_os_str().is_empty() {
            return Err("scorer.jar_path must not be empty".to_string());
        }
        if self.language_dir.as_os_str().is_empty() {
            return Err("scorer.language_dir must not be empty".to_string());
        }
        if self.java_bin.trim().is_empty() {
            return Err("scorer.java_bin must not be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation (daily or hourly)
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must not be empty when local logging is enabled"
                .to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_id_column() -> String {
    "tweetid".to_string()
}

fn default_text_column() -> String {
    "text".to_string()
}

fn default_batch_size() -> usize {
    10
}

fn default_workers() -> usize {
    1
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_translator_timeout_secs() -> u64 {
    60
}

fn default_score_mode() -> ScoreMode {
    ScoreMode::Dual
}

fn default_java_bin() -> String {
    "java".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}
