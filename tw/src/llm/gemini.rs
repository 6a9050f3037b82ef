//! Gemini API client implementation
//!
//! Implements the GenerativeClient trait against the Gemini
//! `generateContent` REST endpoint with structured-output JSON schema
//! enforcement and transport-level retry for transient errors.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{GenerativeClient, LlmError};
use crate::config::LlmConfig;
use crate::prompt::GenerationRequest;

/// Maximum number of retries for transient errors
const MAX_RETRIES: u32 = 3;

/// Initial backoff delay for retries
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// Retry decision for the transport loop
///
/// Slightly wider than LlmError::is_retryable: request-timeout (408)
/// API errors are retried here even though they sit below 500.
fn should_retry(error: &LlmError) -> bool {
    match error {
        LlmError::ApiError { status, .. } => is_retryable_status(*status),
        other => other.is_retryable(),
    }
}

/// Gemini API client
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_output_tokens: u32,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, base_url = %config.base_url, "from_config: called");
        let api_key = config.get_api_key()?;

        let timeout = Duration::from_millis(config.timeout_ms);

        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
            max_output_tokens: config.max_output_tokens,
            timeout,
        })
    }

    /// Build the request body for the generateContent API
    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        debug!(%self.model, instruction_len = request.instruction.len(), "build_request_body: called");
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.instruction }],
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
                "maxOutputTokens": self.max_output_tokens,
            },
        })
    }

    /// Endpoint URL for the configured model
    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Send the request once, without retries
    async fn send_once(&self, body: &serde_json::Value) -> Result<String, LlmError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout)
                } else {
                    LlmError::Network(e)
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(30));
            return Err(LlmError::RateLimited { retry_after });
        }
        if !(200..300).contains(&status) {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, message });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(LlmError::Network)?;
        parsed.text().ok_or_else(|| {
            LlmError::InvalidResponse("response contained no candidate text".to_string())
        })
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        debug!("generate: called");
        let body = self.build_request_body(request);

        let mut backoff = Duration::from_millis(INITIAL_BACKOFF_MS);
        let mut attempt = 0;

        loop {
            match self.send_once(&body).await {
                Ok(text) => {
                    debug!(text_len = text.len(), "generate: success");
                    return Ok(text);
                }
                Err(e) if should_retry(&e) && attempt < MAX_RETRIES => {
                    attempt += 1;
                    let delay = e.retry_after().unwrap_or(backoff);
                    warn!(attempt, ?delay, error = %e, "generate: transient error, retrying");
                    tokio::time::sleep(delay).await;
                    backoff *= 2;
                }
                Err(e) => {
                    warn!(attempt, error = %e, "generate: giving up");
                    return Err(e);
                }
            }
        }
    }
}

/// Wire shape of a generateContent response (the fields we consume)
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_status_codes() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(503));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(401));
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "{\"a\":"}, {"text": " 1}"}]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).expect("response parses");
        assert_eq!(response.text().as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_response_without_candidates_yields_none() {
        let response: GenerateContentResponse = serde_json::from_str("{}").expect("empty response parses");
        assert!(response.text().is_none());
    }
}
