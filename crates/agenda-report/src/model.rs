//! Language-model clients
//!
//! [`SummaryModel`] is the seam the generator talks to; [`GeminiModel`] is
//! the production implementation over the `generateContent` REST call.

use crate::error::ReportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default model name
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Text generation backend
#[async_trait]
pub trait SummaryModel: Send + Sync + std::fmt::Debug {
    /// Generate text for `prompt`
    ///
    /// # Errors
    /// Any transport, service or empty-response failure.
    async fn generate(&self, prompt: &str) -> Result<String, ReportError>;
}

/// Gemini client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,
    /// Model name
    pub model: String,
    /// API base URL
    pub endpoint: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Create settings with defaults for everything but the key
    #[inline]
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// With model name
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// With API base URL
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// With timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `generateContent` URL for the configured model
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// Gemini `generateContent` client; one attempt per call, no retries
#[derive(Debug, Clone)]
pub struct GeminiModel {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiModel {
    /// Create client
    ///
    /// # Errors
    /// - `ReportError::MissingCredential` for a blank key
    /// - `ReportError::Http` if the HTTP client cannot be built
    pub fn new(config: GeminiConfig) -> Result<Self, ReportError> {
        if config.api_key.trim().is_empty() {
            return Err(ReportError::MissingCredential);
        }
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Client settings
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl SummaryModel for GeminiModel {
    async fn generate(&self, prompt: &str) -> Result<String, ReportError> {
        let url = self.config.url();
        tracing::debug!(model = %self.config.model, prompt_bytes = prompt.len(), "requesting summary");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::status(status.as_u16(), body));
        }

        let body: GenerateResponse = response.json().await?;
        body.text().ok_or(ReportError::EmptyResponse)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

impl<'a> GenerateRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate; `None` if blank
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn url_for_model() {
        let config = GeminiConfig::new("k").with_endpoint("http://localhost:8080/");
        assert_eq!(
            config.url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn blank_key_is_missing_credential() {
        let err = GeminiModel::new(GeminiConfig::new("  ")).unwrap_err();
        assert!(matches!(err, ReportError::MissingCredential));
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(GenerateRequest::from_prompt("hola")).unwrap();
        assert_eq!(body, serde_json::json!({"contents": [{"parts": [{"text": "hola"}]}]}));
    }

    #[test]
    fn response_text_extraction() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"<p>Todo "},{"text":"bien</p>"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(body.text().as_deref(), Some("<p>Todo bien</p>"));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(empty.text(), None);

        let blocked: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(blocked.text(), None);
    }
}
