//! Configuration management
//!
//! TOML-based configuration with environment variable substitution and
//! `TRANSENT_*` overrides.

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, InputConfig, LoggingConfig, OutputConfig, PipelineConfig, ScorerConfig,
    TransentConfig, TranslatorConfig,
};
