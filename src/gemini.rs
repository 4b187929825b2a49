//! Gemini API gateway
//!
//! Text-in/text-out access to the language model. One best-effort attempt per
//! call: every transport, status or parse problem is reported as a single
//! `ServiceFailure` and nothing is retried.
//! Uses a long-lived reqwest::Client for connection pooling.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{error, info};

use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::Result;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Boundary to the language-model service
#[async_trait]
pub trait AdvisorGateway: Send + Sync {
    /// Whether a credential is configured. Callers check this before `generate`.
    fn has_credential(&self) -> bool;

    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Reusable Gemini client (connection-pooled)
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .map_err(|e| AdvisorError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: format!("{}/models/{}:generateContent", config.base_url, config.model),
        })
    }
}

#[async_trait]
impl AdvisorGateway for GeminiClient {
    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(AdvisorError::MissingCredential)?;

        let request = GeminiRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_p: 0.95,
                max_output_tokens: 2048,
            },
        };

        info!(chars = prompt.len(), "Calling Gemini API");

        // Key travels in a header; reqwest errors echo the URL
        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("Gemini API request failed: {}", e);
                AdvisorError::ServiceFailure(format!("Gemini API request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(%status, "Gemini API error response: {}", error_text);
            return Err(AdvisorError::ServiceFailure(format!(
                "Gemini API returned {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!("Failed to parse Gemini response: {}", e);
            AdvisorError::ServiceFailure(format!("Gemini parse error: {}", e))
        })?;

        let answer = gemini_response.first_text().ok_or_else(|| {
            error!("Gemini response had no text candidates");
            AdvisorError::ServiceFailure("Empty response from Gemini".to_string())
        })?;

        info!(chars = answer.len(), "Gemini response received");

        Ok(answer)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiResponse {
    /// Text of the first candidate's parts, `None` if blank
    fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Scripted gateway for development & testing
///
/// Keeps the session usable without network access and records every prompt.
pub struct MockGateway {
    credential: bool,
    reply: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl MockGateway {
    /// Always answers with `reply`
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            credential: true,
            reply: Ok(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with a `ServiceFailure`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            credential: true,
            reply: Err(message.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// No credential configured
    pub fn without_credential() -> Self {
        Self {
            credential: false,
            ..Self::replying("unused")
        }
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AdvisorGateway for MockGateway {
    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        if !self.credential {
            return Err(AdvisorError::MissingCredential);
        }

        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        self.reply.clone().map_err(AdvisorError::ServiceFailure)
    }
}
