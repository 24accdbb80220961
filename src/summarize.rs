//! Summarization stage: prompts in, typed summaries out.
//!
//! Each function builds one prompt, sends it through the [`Complete`] seam
//! with a fixed output-token budget, strips an optional code fence, and
//! parses the result into its typed form. A response that is not valid JSON
//! after fence stripping is a [`MalformedResponse`](crate::error::Error):
//! the run aborts; there is no repair or re-ask.

use crate::api::Complete;
use crate::error::{Error, Result};
use crate::models::{BriefSummary, DigestSummary, Story, StoryAnalysis};
use crate::prompts;
use crate::utils::{strip_code_fence, truncate_for_log};
use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

/// Output-token budget for the digest and brief prompts.
const DIGEST_MAX_TOKENS: u32 = 2000;
/// Output-token budget for each per-story analysis.
const ANALYSIS_MAX_TOKENS: u32 = 1500;

/// Strip an optional fence and parse, logging a preview on failure.
fn parse_response<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let stripped = strip_code_fence(raw);
    serde_json::from_str(stripped).map_err(|e| {
        warn!(
            error = %e,
            response_preview = %truncate_for_log(stripped, 300),
            "Model returned non-conforming JSON"
        );
        Error::MalformedResponse(e)
    })
}

/// Classify and summarize all collected stories in one call.
#[instrument(level = "info", skip_all, fields(stories = stories.len()))]
pub async fn categorize<C: Complete>(
    client: &C,
    stories: &[Story],
    language: &str,
) -> Result<DigestSummary> {
    let prompt = prompts::digest_prompt(stories, language);
    let response = client.complete(&prompt, DIGEST_MAX_TOKENS).await?;
    let summary: DigestSummary = parse_response(&response)?;
    info!(
        top3 = summary.top3.len(),
        "Categorization and summaries received"
    );
    Ok(summary)
}

/// Produce the brief digest: top titles plus a free-text overview.
#[instrument(level = "info", skip_all, fields(stories = stories.len()))]
pub async fn brief<C: Complete>(
    client: &C,
    stories: &[Story],
    language: &str,
) -> Result<BriefSummary> {
    let prompt = prompts::brief_prompt(stories, language);
    let response = client.complete(&prompt, DIGEST_MAX_TOKENS).await?;
    parse_response(&response)
}

/// Deep-analyze one top story from its cleaned comments.
#[instrument(level = "info", skip_all, fields(story_id = story.id, comments = comments.len()))]
pub async fn analyze<C: Complete>(
    client: &C,
    story: &Story,
    comments: &[String],
    language: &str,
) -> Result<StoryAnalysis> {
    let prompt = prompts::analysis_prompt(story, comments, language);
    let response = client.complete(&prompt, ANALYSIS_MAX_TOKENS).await?;
    parse_response(&response)
}
