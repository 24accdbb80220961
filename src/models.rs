//! Data models for Hacker News stories and their model-produced summaries.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`RawItem`]: An item as returned by the HN Firebase API
//! - [`Story`]: A filtered, defaulted story record, immutable after creation
//! - [`DigestSummary`]: The model's categorized digest (top 3 + categories)
//! - [`BriefSummary`]: The model's free-text overview for brief mode
//! - [`StoryAnalysis`]: Per-story deep analysis with comment reactions
//!
//! Model-output types deserialize leniently: absent category keys and absent
//! reaction lists become empty vectors so a sparse response renders as empty
//! sections instead of failing the run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An item as returned by `GET {base}/item/{id}.json`.
///
/// The HN API omits fields freely, so everything except `id` defaults:
/// `title`/`by` to empty strings, `score`/`descendants` to 0, `kids` to an
/// empty list. A missing `url` stays `None` and is resolved to the canonical
/// discussion URL when the item becomes a [`Story`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    pub id: u64,
    /// Item kind: "story", "comment", "job", "poll", ...
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub score: u32,
    /// Total comment count.
    #[serde(default)]
    pub descendants: u32,
    /// Submitter username.
    #[serde(default)]
    pub by: String,
    /// Direct child comment ids, ranked by the API.
    #[serde(default)]
    pub kids: Vec<u64>,
    /// Raw HTML body, present on comments and text posts.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

/// A story that survived filtering. Immutable once built; every downstream
/// stage reads it by id via [`story_lookup`].
#[derive(Debug, Clone)]
pub struct Story {
    pub id: u64,
    pub title: String,
    /// The submitted link, or the discussion URL for text posts.
    pub url: String,
    pub score: u32,
    pub descendants: u32,
    pub by: String,
    pub kids: Vec<u64>,
}

/// Canonical HN discussion page URL for an item.
pub fn discussion_url(id: u64) -> String {
    format!("https://news.ycombinator.com/item?id={id}")
}

impl Story {
    /// Build a story from a raw item, applying the url default.
    pub fn from_item(item: RawItem) -> Self {
        let url = item.url.unwrap_or_else(|| discussion_url(item.id));
        Story {
            id: item.id,
            title: item.title,
            url,
            score: item.score,
            descendants: item.descendants,
            by: item.by,
            kids: item.kids,
        }
    }

    /// The discussion page URL for this story.
    pub fn discussion_url(&self) -> String {
        discussion_url(self.id)
    }
}

/// Index stories by id for formatting lookups.
///
/// The model echoes story ids back in its response; formatting resolves them
/// through this map and degrades to placeholders for ids it cannot find.
pub fn story_lookup(stories: &[Story]) -> HashMap<u64, &Story> {
    stories.iter().map(|s| (s.id, s)).collect()
}

/// The fixed four-way classification applied to every non-top-3 story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Dev,
    Security,
    BigTech,
    Misc,
}

impl Category {
    /// All categories in render order.
    pub const ALL: [Category; 4] =
        [Category::Dev, Category::Security, Category::BigTech, Category::Misc];

    /// The JSON key the model uses for this category.
    pub fn key(self) -> &'static str {
        match self {
            Category::Dev => "dev",
            Category::Security => "security",
            Category::BigTech => "bigtech",
            Category::Misc => "misc",
        }
    }

    /// The section heading shown in the digest.
    pub fn label(self) -> &'static str {
        match self {
            Category::Dev => "Developer picks",
            Category::Security => "Security & infrastructure",
            Category::BigTech => "Big tech & startups",
            Category::Misc => "Also interesting",
        }
    }
}

/// One of the top-3 stories with its detailed summary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopStorySummary {
    pub id: u64,
    /// Title rewritten in the configured output language.
    pub title: String,
    pub summary: String,
}

/// A categorized non-top-3 story.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryEntry {
    pub id: u64,
    pub title: String,
    pub one_liner: String,
}

/// Category key to entries. Absent keys deserialize to empty lists so a
/// category with no matches renders as an empty section, never an error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Categories {
    #[serde(default)]
    pub dev: Vec<CategoryEntry>,
    #[serde(default)]
    pub security: Vec<CategoryEntry>,
    #[serde(default)]
    pub bigtech: Vec<CategoryEntry>,
    #[serde(default)]
    pub misc: Vec<CategoryEntry>,
}

impl Categories {
    pub fn get(&self, category: Category) -> &[CategoryEntry] {
        match category {
            Category::Dev => &self.dev,
            Category::Security => &self.security,
            Category::BigTech => &self.bigtech,
            Category::Misc => &self.misc,
        }
    }
}

/// The model's categorized digest for one run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DigestSummary {
    pub top3: Vec<TopStorySummary>,
    #[serde(default)]
    pub categories: Categories,
}

/// A top story reference in the brief digest.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BriefEntry {
    pub id: u64,
    pub title: String,
}

/// The model's free-text overview for one run (brief mode).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BriefSummary {
    #[serde(default)]
    pub top: Vec<BriefEntry>,
    pub overview: String,
}

/// Comment reactions grouped by tone. All lists default to empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Reactions {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
    #[serde(default)]
    pub interesting: Vec<String>,
}

impl Reactions {
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty() && self.interesting.is_empty()
    }
}

/// Deep analysis of a single top-3 story, built from its comments.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoryAnalysis {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub reactions: Reactions,
}
