//! Error taxonomy for the digest pipeline.
//!
//! Per-item fetch failures are handled by the fetch policy and never reach
//! this level; everything here aborts the run when it propagates out of
//! `main`.

use thiserror::Error;

/// Pipeline error type.
///
/// - [`Error::Network`]: a transport-level failure (connect, timeout,
///   non-2xx from the HN API or the model endpoint).
/// - [`Error::MalformedResponse`]: the model's output was not valid JSON
///   after fence stripping. Never retried.
/// - [`Error::Config`]: a required credential or setting is missing or
///   invalid. Raised before any network call that would need it.
/// - [`Error::Delivery`]: Slack rejected the message (non-2xx status or an
///   `ok: false` body).
#[derive(Debug, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("model returned malformed JSON: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

pub type Result<T> = std::result::Result<T, Error>;
