//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::TransentConfig;
use crate::domain::errors::TransentError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TransentConfig
/// 4. Applies environment variable overrides (TRANSENT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use transent::config::load_config;
///
/// let config = load_config("transent.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TransentConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TransentError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TransentError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: TransentConfig = toml::from_str(&contents)
        .map_err(|e| TransentError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        TransentError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are passed through untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(TransentError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the TRANSENT_* prefix
///
/// Environment variables follow the pattern: TRANSENT_<SECTION>_<KEY>
/// For example: TRANSENT_TRANSLATOR_ENDPOINT, TRANSENT_PIPELINE_WORKERS
fn apply_env_overrides(config: &mut TransentConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("TRANSENT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Input overrides
    if let Ok(val) = std::env::var("TRANSENT_INPUT_PATH") {
        config.input.path = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("TRANSENT_INPUT_ID_COLUMN") {
        config.input.id_column = val;
    }
    if let Ok(val) = std::env::var("TRANSENT_INPUT_TEXT_COLUMN") {
        config.input.text_column = val;
    }

    // Output overrides
    if let Ok(val) = std::env::var("TRANSENT_OUTPUT_DIRECTORY") {
        config.output.directory = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("TRANSENT_OUTPUT_NAME") {
        config.output.name = val;
    }

    // Pipeline overrides
    if let Ok(val) = std::env::var("TRANSENT_PIPELINE_BATCH_SIZE") {
        if let Ok(size) = val.parse() {
            config.pipeline.batch_size = size;
        }
    }
    if let Ok(val) = std::env::var("TRANSENT_PIPELINE_WORKERS") {
        if let Ok(workers) = val.parse() {
            config.pipeline.workers = workers;
        }
    }

    // Translator overrides
    if let Ok(val) = std::env::var("TRANSENT_TRANSLATOR_ENDPOINT") {
        config.translator.endpoint = val;
    }
    if let Ok(val) = std::env::var("TRANSENT_TRANSLATOR_TARGET_LANGUAGE") {
        config.translator.target_language = val;
    }
    if let Ok(val) = std::env::var("TRANSENT_TRANSLATOR_API_KEY") {
        config.translator.api_key = Some(val);
    }
    if let Ok(val) = std::env::var("TRANSENT_TRANSLATOR_TIMEOUT_SECS") {
        if let Ok(secs) = val.parse() {
            config.translator.timeout_secs = secs;
        }
    }

    // Scorer overrides
    if let Ok(val) = std::env::var("TRANSENT_SCORER_JAR_PATH") {
        config.scorer.jar_path = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("TRANSENT_SCORER_LANGUAGE_DIR") {
        config.scorer.language_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("TRANSENT_SCORER_JAVA_BIN") {
        config.scorer.java_bin = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("TRANSENT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TRANSENT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID_TOML: &str = r#"
[input]
path = "tweets.csv"

[output]
directory = "out"
name = "tweets"

[pipeline]
batch_size = 25
workers = 4

[translator]
endpoint = "http://localhost:5000/translate"

[scorer]
jar_path = "lib/SentiStrengthCom.jar"
language_dir = "lang"
"#;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("TRANSENT_TEST_VAR", "test_value");
        let input = "name = \"${TRANSENT_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "name = \"test_value\"\n");
        std::env::remove_var("TRANSENT_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("TRANSENT_MISSING_VAR");
        let input = "name = \"${TRANSENT_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# uses ${NOT_A_REAL_VAR}\nname = \"x\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${NOT_A_REAL_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(VALID_TOML.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.batch_size, 25);
        assert_eq!(config.pipeline.workers, 4);
        assert_eq!(config.output.name, "tweets");
    }

    #[test]
    fn test_load_config_rejects_invalid_pipeline() {
        let toml_content = VALID_TOML.replace("workers = 4", "workers = 0");
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("workers"));
    }
}
