// src/core/idea_client.rs
//! Chat-completion client that turns user preferences into business ideas

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::form::UserInputs;
use crate::models::REQUEST_MODEL;
use crate::prompt::{build_prompt, SYSTEM_PERSONA};
use crate::types::{ChatRequest, ChatResponse};

pub const DEFAULT_API_URL: &str = "https://api.perplexity.ai";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";

/// Provider API key. Only `expose` hands out the raw value.
#[derive(Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Outcome of one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    /// Completion text, verbatim.
    Ideas(String),
    /// Raw error body or failure description.
    Failed(String),
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Ideas(_))
    }
}

impl fmt::Display for GenerationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationResult::Ideas(text) => f.write_str(text),
            GenerationResult::Failed(message) => write!(f, "Error: {}", message),
        }
    }
}

pub struct IdeaClient {
    client: reqwest::Client,
    base_url: String,
}

impl IdeaClient {
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the model for business ideas. Every failure is folded into
    /// `GenerationResult::Failed`.
    pub async fn generate(&self, api_key: &ApiKey, inputs: &UserInputs) -> GenerationResult {
        let prompt = build_prompt(inputs);

        match self.send_completion(api_key, &prompt).await {
            Ok(result) => result,
            Err(e) => {
                error!("Idea generation failed: {:#}", e);
                GenerationResult::Failed(format!("{:#}", e))
            }
        }
    }

    async fn send_completion(&self, api_key: &ApiKey, prompt: &str) -> Result<GenerationResult> {
        let url = format!("{}{}", self.base_url, CHAT_COMPLETIONS_ENDPOINT);
        let request = ChatRequest::new(REQUEST_MODEL, SYSTEM_PERSONA, prompt);

        info!("Sending chat completion to {} (model: {})", url, REQUEST_MODEL);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key.expose()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to chat completion API")?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response
                .text()
                .await
                .context("Failed to read error response body")?;
            warn!("Chat completion API returned {}: {}", status, error_text);
            return Ok(GenerationResult::Failed(error_text));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        let content = completion
            .into_content()
            .context("Chat completion response contained no choices")?;

        info!("Received {} characters from chat completion API", content.len());
        Ok(GenerationResult::Ideas(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Budget;
    use httpmock::prelude::*;
    use serde_json::json;

    fn inputs() -> UserInputs {
        UserInputs {
            budget: Budget::UnderOneThousand,
            skills: "cooking".to_string(),
            interests: "travel".to_string(),
            location: "Paris".to_string(),
            time_commitment: None,
            market_preference: vec![],
        }
    }

    #[tokio::test]
    async fn test_success_returns_content_verbatim() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("Authorization", "Bearer pplx-test")
                    .header("Content-Type", "application/json");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({"choices": [{"message": {"content": "X"}}]}));
            })
            .await;

        let client = IdeaClient::new(server.base_url(), 5).unwrap();
        let result = client.generate(&ApiKey::new("pplx-test"), &inputs()).await;

        mock.assert_async().await;
        assert_eq!(result, GenerationResult::Ideas("X".to_string()));
        assert_eq!(result.to_string(), "X");
    }

    #[tokio::test]
    async fn test_request_body_has_persona_then_prompt() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .json_body_includes(r#"{"model":"sonar-pro"}"#)
                    .body_includes(format!(
                        r#""messages":[{{"role":"system","content":"{}"}},{{"role":"user","#,
                        SYSTEM_PERSONA
                    ))
                    .body_includes("Budget: Under $1,000")
                    .body_includes("Skills: cooking")
                    .body_includes("Interests: travel")
                    .body_includes("Location: Paris");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({"choices": [{"message": {"content": "ok"}}]}));
            })
            .await;

        let client = IdeaClient::new(server.base_url(), 5).unwrap();
        let result = client.generate(&ApiKey::new("pplx-test"), &inputs()).await;

        mock.assert_async().await;
        assert_eq!(result, GenerationResult::Ideas("ok".to_string()));
    }

    #[tokio::test]
    async fn test_server_error_echoes_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(500).body("bad");
            })
            .await;

        let client = IdeaClient::new(server.base_url(), 5).unwrap();
        let result = client.generate(&ApiKey::new("pplx-test"), &inputs()).await;

        assert_eq!(result, GenerationResult::Failed("bad".to_string()));
        assert!(result.to_string().contains("Error: bad"));
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(202).body("queued");
            })
            .await;

        let client = IdeaClient::new(server.base_url(), 5).unwrap();
        let result = client.generate(&ApiKey::new("pplx-test"), &inputs()).await;

        assert_eq!(result.to_string(), "Error: queued");
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({"choices": []}));
            })
            .await;

        let client = IdeaClient::new(server.base_url(), 5).unwrap();
        let result = client.generate(&ApiKey::new("pplx-test"), &inputs()).await;

        assert!(!result.is_success());
        assert!(result.to_string().starts_with("Error: "));
        assert!(result.to_string().contains("no choices"));
    }

    #[tokio::test]
    async fn test_connection_failure() {
        // Nothing listens on port 1.
        let client = IdeaClient::new("http://127.0.0.1:1", 5).unwrap();
        let result = client.generate(&ApiKey::new("pplx-test"), &inputs()).await;

        let text = result.to_string();
        assert!(text.starts_with("Error: "));
        assert!(text.len() > "Error: ".len());
    }

    #[test]
    fn test_api_key_is_redacted() {
        let key = ApiKey::new("pplx-secret");
        assert!(!format!("{:?}", key).contains("pplx-secret"));
        assert!(!key.to_string().contains("pplx-secret"));
        assert_eq!(key.expose(), "pplx-secret");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = IdeaClient::new("https://api.perplexity.ai/", 5).unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_URL);
    }
}
