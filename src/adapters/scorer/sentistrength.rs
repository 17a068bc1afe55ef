//! SentiStrength subprocess scorer
//!
//! Runs the SentiStrength jar in stdin mode: one text per input line, one
//! score line per text. The process is launched per batch; texts are
//! flattened to single lines before writing.

use super::SentimentScorer;
use crate::config::ScorerConfig;
use crate::domain::{Result, ScoreMode, ScorerError, SentimentScore};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Text used by the initialization smoke test
const SMOKE_TEST_TEXT: &str = "You are beautiful";

/// JVM subprocess implementation of the [`SentimentScorer`] trait
#[derive(Debug)]
pub struct SentiStrengthScorer {
    config: ScorerConfig,
}

impl SentiStrengthScorer {
    /// Creates a scorer, validating the configured resources exist
    ///
    /// # Errors
    ///
    /// Returns an error if the jar or the language resource directory is
    /// missing.
    pub fn new(config: ScorerConfig) -> Result<Self> {
        if !config.jar_path.is_file() {
            return Err(ScorerError::InvalidResources(format!(
                "jar not found: {}",
                config.jar_path.display()
            ))
            .into());
        }
        if !config.language_dir.is_dir() {
            return Err(ScorerError::InvalidResources(format!(
                "language directory not found: {}",
                config.language_dir.display()
            ))
            .into());
        }
        Ok(Self { config })
    }

    /// One-time smoke test before first use
    ///
    /// Scores a known short text and checks that exactly one score of the
    /// configured shape comes back. Failure here is fatal for the run.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::SmokeTestFailed`] on any deviation.
    pub async fn init(&self) -> Result<()> {
        let scores = self
            .score_batch(&[SMOKE_TEST_TEXT.to_string()])
            .await
            .map_err(|e| ScorerError::SmokeTestFailed(e.to_string()))?;

        match scores.as_slice() {
            [score] if score.mode() == self.config.mode => {
                tracing::info!(
                    jar = %self.config.jar_path.display(),
                    mode = %self.config.mode,
                    "Scorer smoke test passed"
                );
                Ok(())
            }
            [score] => Err(ScorerError::SmokeTestFailed(format!(
                "expected a {} score, got {:?}",
                self.config.mode, score
            ))
            .into()),
            other => Err(ScorerError::SmokeTestFailed(format!(
                "expected 1 score, got {}",
                other.len()
            ))
            .into()),
        }
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(&self.config.java_bin);
        command
            .arg("-jar")
            .arg(&self.config.jar_path)
            .arg("sentidata")
            .arg(&self.config.language_dir)
            .arg("stdin");
        if self.config.mode == ScoreMode::Scale {
            command.arg("scale");
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

#[async_trait]
impl SentimentScorer for SentiStrengthScorer {
    fn mode(&self) -> ScoreMode {
        self.config.mode
    }

    async fn score_batch(&self, texts: &[String]) -> Result<Vec<SentimentScore>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut child = self
            .build_command()
            .spawn()
            .map_err(|e| ScorerError::LaunchFailed(e.to_string()))?;

        // One text per line; embedded newlines would desync output lines.
        let mut input = String::new();
        for text in texts {
            input.push_str(&text.replace(['\r', '\n'], " "));
            input.push('\n');
        }

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ScorerError::LaunchFailed("stdin not captured".to_string()))?;
        stdin
            .write_all(input.as_bytes())
            .await
            .map_err(|e| ScorerError::ProcessFailed(e.to_string()))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ScorerError::ProcessFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScorerError::ProcessFailed(format!(
                "exit status {}: {}",
                output.status,
                stderr.trim()
            ))
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let scores = parse_output(&stdout, self.config.mode)?;

        if scores.len() != texts.len() {
            return Err(ScorerError::BatchMismatch {
                sent: texts.len(),
                received: scores.len(),
            }
            .into());
        }

        Ok(scores)
    }
}

/// Parses scorer stdout into scores, one line per text
///
/// SentiStrength emits tab-separated integers: `positive negative` in dual
/// mode, `positive negative scale` when the scale option is set.
fn parse_output(stdout: &str, mode: ScoreMode) -> Result<Vec<SentimentScore>> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_score_line(line, mode))
        .collect()
}

fn parse_score_line(line: &str, mode: ScoreMode) -> Result<SentimentScore> {
    let values: Vec<i32> = line
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i32>()
                .map_err(|_| ScorerError::InvalidOutput(format!("non-numeric token in '{line}'")))
        })
        .collect::<std::result::Result<_, _>>()?;

    match mode {
        ScoreMode::Dual => match values.as_slice() {
            [positive, negative, ..] => Ok(SentimentScore::Dual {
                positive: *positive,
                negative: *negative,
            }),
            _ => Err(ScorerError::InvalidOutput(format!(
                "expected two values in '{line}'"
            ))
            .into()),
        },
        ScoreMode::Scale => match values.as_slice() {
            // With the scale option the scale value is the third column
            [_, _, scale, ..] => Ok(SentimentScore::Scale(*scale)),
            [scale] => Ok(SentimentScore::Scale(*scale)),
            _ => Err(ScorerError::InvalidOutput(format!(
                "expected a scale value in '{line}'"
            ))
            .into()),
        },
    }
}
