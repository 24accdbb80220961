//! Language-model API interaction.
//!
//! This module provides the interface for communicating with the Anthropic
//! Messages API.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`Complete`]: Core trait defining a single-turn completion
//! - [`AnthropicClient`]: Production implementation over HTTP
//!
//! The summarization stage is generic over [`Complete`], so tests substitute
//! a canned fake instead of a network client. The production client is
//! constructed once in `main` and passed down; nothing in the pipeline builds
//! its own client. There is deliberately no retry here: a failed or
//! malformed completion aborts the run.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, instrument, warn};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Trait for single-turn LLM completion.
///
/// Implementors send one user-role prompt and return the response text.
pub trait Complete {
    /// Send `prompt` to the model with the given output-token budget and
    /// return the raw response text.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String>;
}

/// Client for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    /// Create a client from an already-built HTTP client.
    ///
    /// The HTTP client should carry a generous timeout; model calls run far
    /// longer than the 10s used for the HN and Slack requests.
    pub fn new(http: reqwest::Client, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        AnthropicClient {
            http,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

impl Complete for AnthropicClient {
    #[instrument(level = "info", skip_all, fields(model = %self.model, max_tokens))]
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let t0 = Instant::now();
        let res = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?
            .error_for_status();
        let dt = t0.elapsed();

        let response: MessagesResponse = match res {
            Ok(resp) => resp.json().await?,
            Err(e) => {
                warn!(elapsed_ms = dt.as_millis() as u128, error = %e, "API call failed");
                return Err(e.into());
            }
        };

        let text = response
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("");
        debug!(
            elapsed_ms = dt.as_millis() as u128,
            bytes = text.len(),
            "Completion received"
        );
        Ok(text)
    }
}
