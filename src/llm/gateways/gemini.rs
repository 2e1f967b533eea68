//! Gemini gateway for multimodal analysis.
//!
//! This module provides a gateway for Google's Gemini `generateContent` API,
//! carrying a free-text prompt and an optional inline image.

use crate::error::{Result, VisionLabError};
use crate::llm::gateway::{AnalysisConfig, AnalysisGateway};
use crate::llm::models::AnalysisRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

/// Configuration for connecting to the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Client-side timeout for the remote call. `None` means the call runs
    /// to completion or never resolves, matching the service's own behavior.
    pub timeout: Option<std::time::Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            timeout: None,
        }
    }
}

/// Gateway for the Gemini multimodal-analysis service.
pub struct GeminiGateway {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    /// Create a new Gemini gateway with default configuration.
    pub fn new() -> Self {
        Self::with_config(GeminiConfig::default())
    }

    /// Create a new Gemini gateway with custom configuration.
    pub fn with_config(config: GeminiConfig) -> Self {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build().unwrap();

        Self { client, config }
    }

    /// Create gateway with custom API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::with_config(GeminiConfig {
            api_key: api_key.into(),
            ..Default::default()
        })
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self::with_config(GeminiConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
            ..Default::default()
        })
    }
}

impl Default for GeminiGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the `generateContent` body: one user content with a text part for a
/// non-empty prompt and an `inline_data` part for an attached image.
fn build_request_body(request: &AnalysisRequest, config: &AnalysisConfig) -> Value {
    let mut parts = Vec::new();

    if !request.prompt.is_empty() {
        parts.push(serde_json::json!({ "text": request.prompt }));
    }

    if let Some(image) = &request.image {
        parts.push(serde_json::json!({
            "inline_data": {
                "mime_type": image.media_type,
                "data": image.data
            }
        }));
    }

    let mut body = serde_json::json!({
        "contents": [{ "parts": parts }]
    });

    let mut generation = serde_json::Map::new();
    if let Some(temperature) = config.temperature {
        generation.insert("temperature".to_string(), serde_json::json!(temperature));
    }
    if let Some(max_output_tokens) = config.max_output_tokens {
        generation.insert("maxOutputTokens".to_string(), serde_json::json!(max_output_tokens));
    }
    if !generation.is_empty() {
        body["generationConfig"] = Value::Object(generation);
    }

    body
}

/// Pull the remote service's own message out of an error body, if it sent one.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = value["error"]["message"].as_str()?;

    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(body: &Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts.iter().filter_map(|part| part["text"].as_str()).collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl AnalysisGateway for GeminiGateway {
    async fn analyze(&self, request: &AnalysisRequest, config: &AnalysisConfig) -> Result<String> {
        if self.config.api_key.is_empty() {
            return Err(VisionLabError::ConfigError("GEMINI_API_KEY is not set".to_string()));
        }

        info!("Delegating to Gemini for analysis");
        debug!(
            "Model: {}, prompt chars: {}, image attached: {}",
            self.config.model,
            request.prompt.len(),
            request.image.is_some()
        );

        let body = build_request_body(request, config);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if let Some(message) = extract_error_message(&error_text) {
                return Err(VisionLabError::ApiError(message));
            }

            return Err(VisionLabError::GatewayError(format!("Gemini API error: {}", status)));
        }

        let response_body: Value = response.json().await?;

        extract_text(&response_body)
            .ok_or_else(|| VisionLabError::GatewayError("No content in response".to_string()))
    }
}
