//! Hacker News source client.
//!
//! Wraps the public Firebase API: a ranked id list at `/topstories.json` and
//! per-item detail at `/item/{id}.json`. Items are fetched strictly in
//! sequence; individual fetch failures are handled by the injected
//! [`FetchPolicy`] rather than aborting the run, while the top-level id list
//! fetch always propagates its error.
//!
//! The filter/rank stage is a pure function ([`select_stories`]) so it can be
//! exercised without a network.

use crate::error::Result;
use crate::models::{RawItem, Story};
use crate::utils::clean_comment;
use itertools::Itertools;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Public HN Firebase API base. Override with `HN_API_BASE` for testing.
pub const DEFAULT_API_BASE: &str = "https://hacker-news.firebaseio.com/v0";

/// How many ids to take from the ranked top-stories list.
pub const TOP_CANDIDATES: usize = 30;
/// Minimum score a story needs to enter the digest.
pub const MIN_SCORE: u32 = 50;
/// How many stories survive ranking.
pub const MAX_STORIES: usize = 20;
/// How many child comments to collect per story.
pub const MAX_COMMENTS: usize = 30;
/// Courtesy delay between consecutive comment fetches.
pub const COMMENT_PACING: Duration = Duration::from_millis(100);

/// What to do when a single item fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Log, drop the item, keep going. Production behavior.
    SkipAndContinue,
    /// Propagate the error immediately. Used by tests.
    FailFast,
}

/// Per-item fetch behavior, passed in rather than baked into control flow.
///
/// The default (no retries, skip and continue) means one bad item never
/// sinks the run. Top-level failures (the id list, summarization, delivery)
/// are not subject to this policy.
#[derive(Debug, Clone, Copy)]
pub struct FetchPolicy {
    /// Extra attempts per item after the first failure.
    pub max_retries: u32,
    pub on_failure: FailureMode,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        FetchPolicy {
            max_retries: 0,
            on_failure: FailureMode::SkipAndContinue,
        }
    }
}

/// Client for the HN read API. Construct once and pass by reference.
#[derive(Debug, Clone)]
pub struct HnClient {
    http: reqwest::Client,
    base: String,
}

impl HnClient {
    pub fn new(http: reqwest::Client, base: impl Into<String>) -> Self {
        HnClient {
            http,
            base: base.into(),
        }
    }

    /// Fetch the ranked top-story id list, truncated to the candidate count.
    #[instrument(level = "info", skip_all)]
    pub async fn fetch_top_ids(&self) -> Result<Vec<u64>> {
        let url = format!("{}/topstories.json", self.base);
        let ids: Vec<u64> = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(total = ids.len(), "Fetched top story ids");
        Ok(ids.into_iter().take(TOP_CANDIDATES).collect())
    }

    /// Fetch one item. The API returns a JSON `null` body for unknown ids.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_item(&self, id: u64) -> Result<Option<RawItem>> {
        let url = format!("{}/item/{}.json", self.base, id);
        let item: Option<RawItem> = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(item)
    }

    /// Fetch one item, honoring the policy's retry budget.
    async fn fetch_item_retrying(
        &self,
        id: u64,
        policy: &FetchPolicy,
    ) -> Result<Option<RawItem>> {
        let mut attempt = 0u32;
        loop {
            match self.fetch_item(id).await {
                Ok(item) => return Ok(item),
                Err(e) if attempt < policy.max_retries => {
                    attempt += 1;
                    warn!(id, attempt, error = %e, "Item fetch failed; retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Fetch, filter, rank, and truncate the day's top stories.
    ///
    /// Fetches the candidate ids, then each item in sequence. Per-item
    /// failures follow `policy`; a failed id list fetch always propagates.
    /// The result contains at most [`MAX_STORIES`] stories of type "story"
    /// with score ≥ [`MIN_SCORE`], sorted descending by score.
    #[instrument(level = "info", skip_all)]
    pub async fn fetch_top_stories(&self, policy: &FetchPolicy) -> Result<Vec<Story>> {
        let ids = self.fetch_top_ids().await?;
        let mut items = Vec::with_capacity(ids.len());

        for id in ids {
            match self.fetch_item_retrying(id, policy).await {
                Ok(Some(item)) => items.push(item),
                Ok(None) => debug!(id, "Item missing from API; skipping"),
                Err(e) => match policy.on_failure {
                    FailureMode::SkipAndContinue => {
                        warn!(id, error = %e, "Item fetch failed; skipping");
                    }
                    FailureMode::FailFast => return Err(e),
                },
            }
        }

        let stories = select_stories(items);
        info!(count = stories.len(), "Collected top stories");
        Ok(stories)
    }

    /// Fetch a story's direct child comments as cleaned plain text.
    ///
    /// Takes up to [`MAX_COMMENTS`] of the story's `kids`, pacing requests
    /// [`COMMENT_PACING`] apart. Deleted and textless comments are skipped,
    /// as are comments that clean down to nothing. Per-item failures follow
    /// `policy`.
    #[instrument(level = "info", skip_all, fields(story_id = story.id))]
    pub async fn fetch_comments(
        &self,
        story: &Story,
        policy: &FetchPolicy,
    ) -> Result<Vec<String>> {
        let mut comments = Vec::new();

        for (i, &id) in story.kids.iter().take(MAX_COMMENTS).enumerate() {
            if i > 0 {
                sleep(COMMENT_PACING).await;
            }
            let item = match self.fetch_item_retrying(id, policy).await {
                Ok(item) => item,
                Err(e) => match policy.on_failure {
                    FailureMode::SkipAndContinue => {
                        warn!(id, error = %e, "Comment fetch failed; skipping");
                        continue;
                    }
                    FailureMode::FailFast => return Err(e),
                },
            };
            let Some(item) = item else { continue };
            if item.deleted {
                continue;
            }
            let Some(text) = item.text else { continue };
            let cleaned = clean_comment(&text);
            if !cleaned.is_empty() {
                comments.push(cleaned);
            }
        }

        info!(count = comments.len(), "Collected comments");
        Ok(comments)
    }
}

/// The pure filter/rank/truncate stage.
///
/// Keeps items of type "story" scoring at least [`MIN_SCORE`], sorts them
/// descending by score, and truncates to [`MAX_STORIES`].
pub fn select_stories(items: Vec<RawItem>) -> Vec<Story> {
    items
        .into_iter()
        .filter(|item| item.kind == "story" && item.score >= MIN_SCORE)
        .map(Story::from_item)
        .sorted_by(|a, b| b.score.cmp(&a.score))
        .take(MAX_STORIES)
        .collect()
}
