//! Incoming-webhook delivery.
//!
//! Posts a single message body to a Slack incoming webhook. The platform
//! acknowledges with a bare 2xx; anything else is a delivery failure that
//! aborts the run.

use crate::error::{Error, Result};
use crate::outputs::blocks::SlackMessage;
use tracing::{info, instrument};
use url::Url;

/// POST the message to the webhook URL.
#[instrument(level = "info", skip_all)]
pub async fn send(http: &reqwest::Client, webhook_url: &Url, message: &SlackMessage) -> Result<()> {
    let response = http
        .post(webhook_url.clone())
        .json(message)
        .send()
        .await
        .map_err(Error::Network)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Delivery(format!(
            "webhook returned {status}: {body}"
        )));
    }

    info!("Posted digest via webhook");
    Ok(())
}
