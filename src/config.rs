//! Environment-backed configuration.
//!
//! Credentials and endpoints come from environment variables (a `.env` file
//! is honored via `dotenv` before anything reads them). Validation is
//! per-mode: the webhook URL is only required for webhook delivery, the bot
//! token and channel only for threaded delivery, and each is checked before
//! any network call that would need it.

use crate::error::{Error, Result};
use crate::hn;
use std::env;
use url::Url;

/// Typed runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Anthropic API key. Required in every mode.
    pub anthropic_api_key: String,
    /// Incoming-webhook URL for digest/brief delivery.
    webhook_url: Option<Url>,
    /// Bot token for threaded delivery.
    bot_token: Option<String>,
    /// Channel id for threaded delivery.
    channel_id: Option<String>,
    /// HN API base, overridable for testing.
    pub hn_api_base: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Config::from_parts(
            env_str("ANTHROPIC_API_KEY"),
            env_str("SLACK_WEBHOOK_URL"),
            env_str("SLACK_BOT_TOKEN"),
            env_str("SLACK_CHANNEL_ID"),
            env_str("HN_API_BASE"),
        )
    }

    /// Build and validate a config from raw values. Split out of
    /// [`Config::from_env`] so tests never touch process-global state.
    pub fn from_parts(
        anthropic_api_key: Option<String>,
        webhook_url: Option<String>,
        bot_token: Option<String>,
        channel_id: Option<String>,
        hn_api_base: Option<String>,
    ) -> Result<Self> {
        let anthropic_api_key = anthropic_api_key.ok_or_else(|| {
            Error::Config("ANTHROPIC_API_KEY environment variable is required".to_string())
        })?;

        let webhook_url = webhook_url
            .map(|raw| {
                Url::parse(&raw)
                    .map_err(|e| Error::Config(format!("SLACK_WEBHOOK_URL is not a valid URL: {e}")))
            })
            .transpose()?;

        Ok(Config {
            anthropic_api_key,
            webhook_url,
            bot_token,
            channel_id,
            hn_api_base: hn_api_base.unwrap_or_else(|| hn::DEFAULT_API_BASE.to_string()),
        })
    }

    /// The webhook URL, or a config error if webhook delivery was selected
    /// without one.
    pub fn webhook_url(&self) -> Result<&Url> {
        self.webhook_url.as_ref().ok_or_else(|| {
            Error::Config("SLACK_WEBHOOK_URL environment variable is required".to_string())
        })
    }

    /// Bot token and channel id, or a config error naming whichever is
    /// missing for threaded delivery.
    pub fn bot_credentials(&self) -> Result<(&str, &str)> {
        let token = self.bot_token.as_deref().ok_or_else(|| {
            Error::Config("SLACK_BOT_TOKEN environment variable is required".to_string())
        })?;
        let channel = self.channel_id.as_deref().ok_or_else(|| {
            Error::Config("SLACK_CHANNEL_ID environment variable is required".to_string())
        })?;
        Ok((token, channel))
    }
}

/// Read a non-empty environment variable.
fn env_str(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let err = Config::from_parts(None, None, None, None, None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_invalid_webhook_url_rejected() {
        let err = Config::from_parts(some("key"), some("not a url"), None, None, None)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("SLACK_WEBHOOK_URL"));
    }

    #[test]
    fn test_webhook_mode_validation() {
        let config = Config::from_parts(
            some("key"),
            some("https://hooks.slack.com/services/T0/B0/xyz"),
            None,
            None,
            None,
        )
        .unwrap();
        assert!(config.webhook_url().is_ok());
        // Thread mode credentials were never provided.
        assert!(config.bot_credentials().is_err());
    }

    #[test]
    fn test_bot_mode_requires_both_token_and_channel() {
        let config =
            Config::from_parts(some("key"), None, some("xoxb-1"), None, None).unwrap();
        let err = config.bot_credentials().unwrap_err();
        assert!(err.to_string().contains("SLACK_CHANNEL_ID"));

        let config =
            Config::from_parts(some("key"), None, some("xoxb-1"), some("C123"), None).unwrap();
        let (token, channel) = config.bot_credentials().unwrap();
        assert_eq!(token, "xoxb-1");
        assert_eq!(channel, "C123");
    }

    #[test]
    fn test_hn_base_defaults() {
        let config = Config::from_parts(some("key"), None, None, None, None).unwrap();
        assert_eq!(config.hn_api_base, hn::DEFAULT_API_BASE);

        let config = Config::from_parts(
            some("key"),
            None,
            None,
            None,
            some("http://localhost:8080/v0"),
        )
        .unwrap();
        assert_eq!(config.hn_api_base, "http://localhost:8080/v0");
    }
}
