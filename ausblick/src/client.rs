#![doc = "Generation client for CLI: bridges the core Generator trait to the actual chat-completions API endpoint."]
//
//! # Generation Client (CLI <-> Core)
//!
//! This module provides the bridge between the CLI workflow and the
//! generation abstraction in [`ausblick-core::contract`]. It wires up the
//! `Generator` trait for real use against a remote chat-completions API and
//! provides the `OpenAiClient` used by the CLI for networked generation.
//!
//! ## Client Usage
//!
//! - Construct [`OpenAiClient`] from the environment (`OPENAI_API_KEY`,
//!   optional `OPENAI_BASE_URL`) plus the loaded [`ReportConfig`].
//! - The API key must be present in the environment; there is no fallback
//!   value, a missing key is a startup error.
//! - All transport, serialization, timeout and error handling are
//!   encapsulated here; the trait stays agnostic of authentication details.
//!
//! For the trait contract itself, see core's [`contract`] module.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use ausblick_core::config::ReportConfig;
use ausblick_core::contract::{GenerateError, Generator};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new_from_env(config: &ReportConfig) -> Result<Self, GenerateError> {
        dotenvy::dotenv().ok(); // loads environment variables from .env if present
        let api_key = match env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            Ok(_) => {
                tracing::error!("OPENAI_API_KEY is set but empty");
                return Err("OPENAI_API_KEY is set but empty".into());
            }
            Err(e) => {
                tracing::error!(error = ?e, "OPENAI_API_KEY missing in environment");
                return Err(Box::new(e));
            }
        };
        let base_url = env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        tracing::info!(
            api_key_set = !api_key.is_empty(),
            base_url = %base_url,
            model = %config.model,
            timeout_secs = config.timeout_secs,
            "Initialized OpenAiClient from environment"
        );
        Ok(OpenAiClient {
            client,
            api_key,
            base_url,
            model: config.model.clone(),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[async_trait]
impl Generator for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        tracing::info!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Completion request failed");
                GenerateError::from(format!("completion request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Completion endpoint returned error");
            return Err(format!("completion endpoint returned {status}: {error_body}").into());
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!(error = ?e, "Failed to parse completion response");
            GenerateError::from(format!("failed to parse completion response: {e}"))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            tracing::error!("Completion contained no usable content");
            return Err("completion contained no usable content".into());
        }

        tracing::info!(
            content_chars = content.chars().count(),
            "Received completion"
        );
        Ok(content)
    }
}
