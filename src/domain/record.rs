//! Pipeline data model
//!
//! This module defines the immutable data the pipeline moves around: input
//! [`Record`]s, translator output, sentiment scores and the durable
//! [`ResultRow`] unit appended to the checkpoint store.

use crate::domain::errors::TransentError;
use crate::domain::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Record identifier newtype wrapper
///
/// An opaque, comparable key taken from the input dataset's id column
/// (historically a tweet id). No format is assumed beyond non-emptiness.
///
/// # Examples
///
/// ```
/// use transent::domain::RecordId;
///
/// let id = RecordId::new("1234567890").unwrap();
/// assert_eq!(id.as_str(), "1234567890");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new RecordId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TransentError::Validation(
                "record id cannot be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Returns the record id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One immutable input row
///
/// `input_order` is the row's position in the original dataset and defines
/// the order of the final artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub record_id: RecordId,
    pub text: String,
    pub input_order: usize,
}

/// Translator output for a single text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub detected_source_language: String,
}

/// Sentiment score shape requested from the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    /// Single signed strength value
    Scale,
    /// Separate positive and negative magnitudes
    Dual,
}

impl ScoreMode {
    /// Column headers contributed by this mode to the final artifact
    pub fn score_headers(&self) -> &'static [&'static str] {
        match self {
            ScoreMode::Scale => &["scale"],
            ScoreMode::Dual => &["positive", "negative"],
        }
    }

    /// Number of score fields a checkpoint row carries in this mode
    pub fn field_count(&self) -> usize {
        self.score_headers().len()
    }
}

impl fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreMode::Scale => write!(f, "scale"),
            ScoreMode::Dual => write!(f, "dual"),
        }
    }
}

/// Sentiment strength for one text
///
/// A tagged variant rather than a variable-length tuple: the shape is fixed
/// by the configured [`ScoreMode`] for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentScore {
    Scale(i32),
    Dual { positive: i32, negative: i32 },
}

impl SentimentScore {
    /// The mode this score belongs to
    pub fn mode(&self) -> ScoreMode {
        match self {
            SentimentScore::Scale(_) => ScoreMode::Scale,
            SentimentScore::Dual { .. } => ScoreMode::Dual,
        }
    }

    /// Score fields in checkpoint column order
    pub fn to_fields(&self) -> Vec<String> {
        match self {
            SentimentScore::Scale(value) => vec![value.to_string()],
            SentimentScore::Dual { positive, negative } => {
                vec![positive.to_string(), negative.to_string()]
            }
        }
    }
}

/// The durable unit of completed work
///
/// Appended to the checkpoint store by the writer and read back by recovery
/// and rebuild. Checkpoint layout (no header):
///
/// ```text
/// input_order, record_id, <score fields>, detected_source_language, translated_text
/// ```
///
/// `record_id` is always the second column; recovery matches against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub input_order: usize,
    pub record_id: RecordId,
    pub score: SentimentScore,
    pub detected_source_language: String,
    pub translated_text: String,
}

impl ResultRow {
    /// Serializes the row to checkpoint fields in column order
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = vec![self.input_order.to_string(), self.record_id.to_string()];
        fields.extend(self.score.to_fields());
        fields.push(self.detected_source_language.clone());
        fields.push(self.translated_text.clone());
        fields
    }

    /// Parses a row from checkpoint fields
    ///
    /// The score shape is inferred from the field count: five fields carry a
    /// scale score, six carry a dual score.
    ///
    /// # Errors
    ///
    /// Returns a checkpoint error if the field count is unknown or a numeric
    /// field does not parse.
    pub fn from_fields(fields: &csv::StringRecord) -> Result<Self> {
        let parse_int = |idx: usize, name: &str| -> Result<i64> {
            fields
                .get(idx)
                .ok_or_else(|| TransentError::Checkpoint(format!("missing {name} field")))?
                .trim()
                .parse::<i64>()
                .map_err(|e| TransentError::Checkpoint(format!("invalid {name} field: {e}")))
        };

        let score = match fields.len() {
            5 => SentimentScore::Scale(parse_int(2, "scale score")? as i32),
            6 => SentimentScore::Dual {
                positive: parse_int(2, "positive score")? as i32,
                negative: parse_int(3, "negative score")? as i32,
            },
            n => {
                return Err(TransentError::Checkpoint(format!(
                    "unexpected checkpoint row width: {n} fields"
                )))
            }
        };

        let input_order = parse_int(0, "input_order")? as usize;
        let record_id = RecordId::new(fields.get(1).unwrap_or_default())
            .map_err(|e| TransentError::Checkpoint(format!("invalid record id: {e}")))?;
        let tail = fields.len() - 2;
        let detected_source_language = fields.get(tail).unwrap_or_default().to_string();
        let translated_text = fields.get(tail + 1).unwrap_or_default().to_string();

        Ok(Self {
            input_order,
            record_id,
            score,
            detected_source_language,
            translated_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual_row() -> ResultRow {
        ResultRow {
            input_order: 7,
            record_id: RecordId::new("id-7").unwrap(),
            score: SentimentScore::Dual {
                positive: 3,
                negative: -2,
            },
            detected_source_language: "id".to_string(),
            translated_text: "hello, \"world\"".to_string(),
        }
    }

    #[test]
    fn test_record_id_rejects_empty() {
        assert!(RecordId::new("").is_err());
        assert!(RecordId::new("   ").is_err());
        assert!(RecordId::new("x").is_ok());
    }

    #[test]
    fn test_score_mode_headers() {
        assert_eq!(ScoreMode::Scale.score_headers(), &["scale"]);
        assert_eq!(ScoreMode::Dual.score_headers(), &["positive", "negative"]);
        assert_eq!(ScoreMode::Dual.field_count(), 2);
    }

    #[test]
    fn test_result_row_field_order_dual() {
        let fields = dual_row().to_fields();
        assert_eq!(
            fields,
            vec!["7", "id-7", "3", "-2", "id", "hello, \"world\""]
        );
    }

    #[test]
    fn test_result_row_roundtrip_dual() {
        let row = dual_row();
        let record = csv::StringRecord::from(row.to_fields());
        let parsed = ResultRow::from_fields(&record).unwrap();
        assert_eq!(parsed, row);
    }

    #[test]
    fn test_result_row_roundtrip_scale() {
        let row = ResultRow {
            input_order: 0,
            record_id: RecordId::new("a").unwrap(),
            score: SentimentScore::Scale(-4),
            detected_source_language: "es".to_string(),
            translated_text: "bad".to_string(),
        };
        let record = csv::StringRecord::from(row.to_fields());
        let parsed = ResultRow::from_fields(&record).unwrap();
        assert_eq!(parsed, row);
        assert_eq!(parsed.score.mode(), ScoreMode::Scale);
    }

    #[test]
    fn test_result_row_rejects_unknown_width() {
        let record = csv::StringRecord::from(vec!["0", "id"]);
        let err = ResultRow::from_fields(&record).unwrap_err();
        assert!(matches!(err, TransentError::Checkpoint(_)));
    }

    #[test]
    fn test_result_row_rejects_bad_order() {
        let record = csv::StringRecord::from(vec!["seven", "id", "1", "-1", "en", "text"]);
        assert!(ResultRow::from_fields(&record).is_err());
    }
}
