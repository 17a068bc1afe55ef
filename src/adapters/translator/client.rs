//! HTTP translation client
//!
//! Talks to a LibreTranslate-compatible endpoint. Retry policy is
//! deliberately absent: a failed call fails the whole job, and the job is
//! retried on the next run via checkpoint recovery.

use super::models::{TranslateRequest, TranslateResponse};
use super::Translator;
use crate::config::TranslatorConfig;
use crate::domain::{Result, Translation, TranslatorError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// HTTP implementation of the [`Translator`] trait
pub struct HttpTranslator {
    client: Client,
    config: TranslatorConfig,
}

impl HttpTranslator {
    /// Creates a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranslatorError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn map_send_error(err: reqwest::Error) -> TranslatorError {
        if err.is_timeout() {
            TranslatorError::Timeout(err.to_string())
        } else {
            TranslatorError::ConnectionFailed(err.to_string())
        }
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<Translation>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = TranslateRequest {
            q: texts,
            source: "auto",
            target: &self.config.target_language,
            format: "text",
            api_key: self.config.api_key.as_deref(),
        };

        tracing::debug!(
            endpoint = %self.config.endpoint,
            batch_size = texts.len(),
            "Sending translation request"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let err = if status.is_server_error() {
                TranslatorError::ServerError {
                    status: status.as_u16(),
                    message,
                }
            } else {
                TranslatorError::ClientError {
                    status: status.as_u16(),
                    message,
                }
            };
            return Err(err.into());
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslatorError::InvalidResponse(e.to_string()))?;

        if body.translated_text.len() != texts.len() {
            return Err(TranslatorError::BatchMismatch {
                sent: texts.len(),
                received: body.translated_text.len(),
            }
            .into());
        }

        let translations = body
            .translated_text
            .into_iter()
            .enumerate()
            .map(|(i, text)| Translation {
                text,
                detected_source_language: body
                    .detected_language
                    .get(i)
                    .map(|d| d.language.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
            })
            .collect();

        Ok(translations)
    }
}
