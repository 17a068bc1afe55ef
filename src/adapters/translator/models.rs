//! Wire models for the translation endpoint
//!
//! The endpoint speaks the LibreTranslate batch shape: an array of texts in,
//! an array of translations (and detected languages) out.

use serde::{Deserialize, Serialize};

/// Request body for a batched translate call
#[derive(Debug, Serialize)]
pub struct TranslateRequest<'a> {
    /// Texts to translate, in order
    pub q: &'a [String],
    /// Source language ("auto" enables detection)
    pub source: &'a str,
    /// Target language code
    pub target: &'a str,
    /// Payload format
    pub format: &'a str,
    /// Optional API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<&'a str>,
}

/// Response body for a batched translate call
#[derive(Debug, Deserialize)]
pub struct TranslateResponse {
    /// Translated texts, in request order
    #[serde(rename = "translatedText")]
    pub translated_text: Vec<String>,

    /// Detected source language per text (absent when `source` is explicit)
    #[serde(rename = "detectedLanguage", default)]
    pub detected_language: Vec<DetectedLanguage>,
}

/// Detected source language for one text
#[derive(Debug, Deserialize)]
pub struct DetectedLanguage {
    pub language: String,
    #[serde(default)]
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_without_api_key() {
        let texts = vec!["hola".to_string()];
        let request = TranslateRequest {
            q: &texts,
            source: "auto",
            target: "en",
            format: "text",
            api_key: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("api_key"));
        assert!(json.contains("\"q\":[\"hola\"]"));
    }

    #[test]
    fn test_response_deserializes_with_detection() {
        let body = r#"{
            "translatedText": ["hello", "goodbye"],
            "detectedLanguage": [
                {"language": "es", "confidence": 0.97},
                {"language": "es", "confidence": 0.92}
            ]
        }"#;
        let response: TranslateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.translated_text, vec!["hello", "goodbye"]);
        assert_eq!(response.detected_language[0].language, "es");
    }

    #[test]
    fn test_response_deserializes_without_detection() {
        let body = r#"{"translatedText": ["hello"]}"#;
        let response: TranslateResponse = serde_json::from_str(body).unwrap();
        assert!(response.detected_language.is_empty());
    }
}
