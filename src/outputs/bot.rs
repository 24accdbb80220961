//! Bot-token delivery with thread anchoring.
//!
//! Posts messages through `chat.postMessage`. The first post of a run
//! returns a `ts` timestamp; passing it as `thread_ts` on later posts nests
//! them as replies under that parent. Payload construction is a pure
//! function so the thread linkage is testable without a network.

use crate::error::{Error, Result};
use crate::outputs::blocks::SlackMessage;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// Authenticated `chat.postMessage` client bound to one channel.
#[derive(Debug, Clone)]
pub struct BotClient {
    http: reqwest::Client,
    token: String,
    channel: String,
}

/// The slice of the `chat.postMessage` response the pipeline reads.
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Build the request body for one post. `thread_ts` is present only on
/// replies; the parent post omits the field entirely.
pub fn build_payload(channel: &str, message: &SlackMessage, thread_ts: Option<&str>) -> Value {
    let mut payload = json!({
        "channel": channel,
        "blocks": message.blocks,
    });
    if let Some(ts) = thread_ts {
        payload["thread_ts"] = Value::String(ts.to_string());
    }
    payload
}

impl BotClient {
    pub fn new(http: reqwest::Client, token: impl Into<String>, channel: impl Into<String>) -> Self {
        BotClient {
            http,
            token: token.into(),
            channel: channel.into(),
        }
    }

    /// Post one message, optionally threaded under `thread_ts`.
    ///
    /// Returns the posted message's `ts`, which callers pass back as
    /// `thread_ts` to anchor replies. A non-2xx status or an `ok: false`
    /// body is a delivery failure.
    #[instrument(level = "info", skip_all, fields(threaded = thread_ts.is_some()))]
    pub async fn post_message(
        &self,
        message: &SlackMessage,
        thread_ts: Option<&str>,
    ) -> Result<String> {
        let payload = build_payload(&self.channel, message, thread_ts);
        let response = self
            .http
            .post(POST_MESSAGE_URL)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await
            .map_err(Error::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Delivery(format!(
                "chat.postMessage returned {status}"
            )));
        }

        let body: PostMessageResponse = response.json().await.map_err(Error::Network)?;
        if !body.ok {
            return Err(Error::Delivery(format!(
                "chat.postMessage rejected: {}",
                body.error.unwrap_or_else(|| "unknown error".to_string())
            )));
        }

        let ts = body
            .ts
            .ok_or_else(|| Error::Delivery("chat.postMessage response missing ts".to_string()))?;
        info!(ts = %ts, "Posted message");
        Ok(ts)
    }
}
