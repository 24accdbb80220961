//! Pure Slack Block Kit formatting.
//!
//! Functions here map typed summaries plus the collected story set to a
//! [`SlackMessage`]. No network I/O happens in this module, and nothing here
//! fails: a story id the model invented degrades to zero-score/zero-comment
//! placeholders, an empty category is omitted, and empty reaction lists
//! render as a fixed placeholder line.

use crate::models::{
    discussion_url, story_lookup, BriefSummary, Categories, Category, DigestSummary, Story,
    StoryAnalysis,
};
use serde::Serialize;
use std::collections::HashMap;

/// A Slack message body: an ordered list of blocks.
#[derive(Debug, Clone, Serialize)]
pub struct SlackMessage {
    pub blocks: Vec<Block>,
}

/// The Block Kit block kinds the digest uses.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header { text: Text },
    Section { text: Text },
    Divider,
}

/// A Block Kit text object.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Text {
    PlainText { text: String },
    Mrkdwn { text: String },
}

impl Block {
    fn header(text: impl Into<String>) -> Self {
        Block::Header {
            text: Text::PlainText { text: text.into() },
        }
    }

    fn section(text: impl Into<String>) -> Self {
        Block::Section {
            text: Text::Mrkdwn { text: text.into() },
        }
    }
}

/// Score and comment count for a model-referenced id, degrading to zeros
/// when the id is not in the collected set.
fn stats(map: &HashMap<u64, &Story>, id: u64) -> (u32, u32) {
    map.get(&id).map(|s| (s.score, s.descendants)).unwrap_or((0, 0))
}

/// Render the categorized digest: header, top-3 section, divider, category
/// sections.
pub fn digest_message(summary: &DigestSummary, stories: &[Story], date: &str) -> SlackMessage {
    let map = story_lookup(stories);

    let top_lines: Vec<String> = summary
        .top3
        .iter()
        .take(3)
        .enumerate()
        .map(|(i, item)| {
            let (score, comments) = stats(&map, item.id);
            format!(
                "*{rank}. {title}* ({score} points / {comments} comments)\n{summary}\n<{link}|View HN discussion>",
                rank = i + 1,
                title = item.title,
                summary = item.summary,
                link = discussion_url(item.id),
            )
        })
        .collect();

    let mut blocks = vec![Block::header(format!("HN Daily - {date}"))];
    if !top_lines.is_empty() {
        blocks.push(Block::section(top_lines.join("\n\n")));
    }
    blocks.push(Block::Divider);

    let categories_text = category_sections(&summary.categories, &map);
    if !categories_text.is_empty() {
        blocks.push(Block::section(categories_text));
    }

    SlackMessage { blocks }
}

/// Render the category sections, skipping empty categories and capping each
/// at 3 entries.
fn category_sections(categories: &Categories, map: &HashMap<u64, &Story>) -> String {
    let mut sections = Vec::new();
    for category in Category::ALL {
        let entries = categories.get(category);
        if entries.is_empty() {
            continue;
        }
        let mut lines = vec![format!("*{}*", category.label())];
        for entry in entries.iter().take(3) {
            let (score, _) = stats(map, entry.id);
            lines.push(format!(
                "• {title} - {one_liner} ({score} points) <{link}|link>",
                title = entry.title,
                one_liner = entry.one_liner,
                link = discussion_url(entry.id),
            ));
        }
        sections.push(lines.join("\n"));
    }
    sections.join("\n\n")
}

/// Render the brief digest: header, top list, divider, one free-text
/// overview section.
pub fn brief_message(summary: &BriefSummary, stories: &[Story], date: &str) -> SlackMessage {
    let map = story_lookup(stories);

    let top_lines: Vec<String> = summary
        .top
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let (score, comments) = stats(&map, entry.id);
            format!(
                "*{rank}. {title}* ({score} points / {comments} comments) <{link}|View HN discussion>",
                rank = i + 1,
                title = entry.title,
                link = discussion_url(entry.id),
            )
        })
        .collect();

    let mut blocks = vec![Block::header(format!("HN Daily - {date}"))];
    if !top_lines.is_empty() {
        blocks.push(Block::section(top_lines.join("\n")));
    }
    blocks.push(Block::Divider);
    if !summary.overview.is_empty() {
        blocks.push(Block::section(summary.overview.clone()));
    }

    SlackMessage { blocks }
}

/// Render one threaded deep-dive reply for a top-3 story.
///
/// `rank` is 1-based. When every reaction list is empty a fixed placeholder
/// renders instead of the labeled lists.
pub fn analysis_reply(rank: usize, analysis: &StoryAnalysis, story: &Story) -> SlackMessage {
    let body = format!(
        "*{rank}. {title}*\n<{url}|Article> · <{discussion}|HN discussion>\n\n{summary}",
        title = analysis.title,
        url = story.url,
        discussion = story.discussion_url(),
        summary = analysis.summary,
    );

    let reactions = &analysis.reactions;
    let reactions_text = if reactions.is_empty() {
        "_No major comment reactions yet._".to_string()
    } else {
        let labeled: [(&str, &[String]); 3] = [
            ("Positive", &reactions.positive),
            ("Negative", &reactions.negative),
            ("Interesting", &reactions.interesting),
        ];
        labeled
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(label, list)| {
                let bullets: Vec<String> = list.iter().map(|r| format!("• {r}")).collect();
                format!("*{label}*\n{}", bullets.join("\n"))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    SlackMessage {
        blocks: vec![Block::section(body), Block::section(reactions_text)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BriefEntry, CategoryEntry, Reactions, TopStorySummary};

    fn story(id: u64, score: u32) -> Story {
        Story {
            id,
            title: format!("Story {id}"),
            url: format!("https://example.com/{id}"),
            score,
            descendants: id as u32 * 2,
            by: "tester".into(),
            kids: vec![],
        }
    }

    fn top(id: u64) -> TopStorySummary {
        TopStorySummary {
            id,
            title: format!("Top {id}"),
            summary: format!("Summary {id}"),
        }
    }

    fn entry(id: u64) -> CategoryEntry {
        CategoryEntry {
            id,
            title: format!("Entry {id}"),
            one_liner: format!("Liner {id}"),
        }
    }

    fn rendered(message: &SlackMessage) -> String {
        serde_json::to_string(message).unwrap()
    }

    #[test]
    fn test_block_serialization_shapes() {
        let message = SlackMessage {
            blocks: vec![
                Block::header("HN Daily - 2026-08-06"),
                Block::section("*hello*"),
                Block::Divider,
            ],
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["blocks"][0]["type"], "header");
        assert_eq!(json["blocks"][0]["text"]["type"], "plain_text");
        assert_eq!(json["blocks"][1]["type"], "section");
        assert_eq!(json["blocks"][1]["text"]["type"], "mrkdwn");
        assert_eq!(json["blocks"][2]["type"], "divider");
    }

    #[test]
    fn test_digest_end_to_end_scenario() {
        // Five collected candidates, the fifth already filtered out below
        // threshold; the model categorizes id 4 as dev and never mentions 5.
        let stories: Vec<Story> = [(1u64, 120u32), (2, 95), (3, 80), (4, 60)]
            .iter()
            .map(|&(id, score)| story(id, score))
            .collect();
        let summary = DigestSummary {
            top3: vec![top(1), top(2), top(3)],
            categories: Categories {
                dev: vec![entry(4)],
                ..Categories::default()
            },
        };

        let message = digest_message(&summary, &stories, "2026-08-06");
        let text = rendered(&message);

        // Exactly one dev entry, rendered with its real score.
        assert_eq!(text.matches("• Entry").count(), 1);
        assert!(text.contains("Developer picks"));
        assert!(text.contains("Liner 4 (60 points)"));
        // Story 5 appears nowhere.
        assert!(!text.contains("item?id=5"));
        assert!(!text.contains("Story 5"));
        // Empty categories render no sections.
        assert!(!text.contains("Security"));
        assert!(!text.contains("Also interesting"));
    }

    #[test]
    fn test_digest_unknown_id_degrades_to_placeholders() {
        let stories = vec![story(1, 120)];
        let summary = DigestSummary {
            top3: vec![top(999)],
            categories: Categories::default(),
        };
        let message = digest_message(&summary, &stories, "2026-08-06");
        let text = rendered(&message);
        assert!(text.contains("(0 points / 0 comments)"));
    }

    #[test]
    fn test_digest_caps_category_entries_at_three() {
        let stories: Vec<Story> = (1..=6).map(|i| story(i, 100)).collect();
        let summary = DigestSummary {
            top3: vec![],
            categories: Categories {
                misc: (1..=5).map(entry).collect(),
                ..Categories::default()
            },
        };
        let message = digest_message(&summary, &stories, "2026-08-06");
        assert_eq!(rendered(&message).matches("• Entry").count(), 3);
    }

    #[test]
    fn test_digest_all_categories_empty() {
        let stories = vec![story(1, 120)];
        let summary = DigestSummary {
            top3: vec![top(1)],
            categories: Categories::default(),
        };
        let message = digest_message(&summary, &stories, "2026-08-06");
        // Header, top section, divider, and no trailing category section.
        assert_eq!(message.blocks.len(), 3);
    }

    #[test]
    fn test_digest_header_carries_date() {
        let message = digest_message(
            &DigestSummary {
                top3: vec![],
                categories: Categories::default(),
            },
            &[],
            "2026-08-06",
        );
        assert!(rendered(&message).contains("HN Daily - 2026-08-06"));
    }

    #[test]
    fn test_brief_message_shape() {
        let stories = vec![story(1, 150), story(2, 90)];
        let summary = BriefSummary {
            top: vec![
                BriefEntry { id: 1, title: "First".into() },
                BriefEntry { id: 2, title: "Second".into() },
            ],
            overview: "A busy day in infra.".into(),
        };
        let message = brief_message(&summary, &stories, "2026-08-06");
        let text = rendered(&message);
        assert!(text.contains("*1. First* (150 points / 2 comments)"));
        assert!(text.contains("*2. Second* (90 points / 4 comments)"));
        assert!(text.contains("A busy day in infra."));
    }

    #[test]
    fn test_analysis_reply_with_reactions() {
        let s = story(3, 200);
        let analysis = StoryAnalysis {
            title: "Deep dive".into(),
            summary: "What happened.".into(),
            reactions: Reactions {
                positive: vec!["elegant".into()],
                negative: vec![],
                interesting: vec!["prior art".into(), "benchmarks".into()],
            },
        };
        let message = analysis_reply(2, &analysis, &s);
        let text = rendered(&message);
        assert!(text.contains("*2. Deep dive*"));
        assert!(text.contains("https://example.com/3"));
        assert!(text.contains("item?id=3"));
        assert!(text.contains("*Positive*"));
        assert!(text.contains("• prior art"));
        // The empty tone is omitted rather than rendered as a bare label.
        assert!(!text.contains("*Negative*"));
    }

    #[test]
    fn test_analysis_reply_empty_reactions_placeholder() {
        let s = story(3, 200);
        let analysis = StoryAnalysis {
            title: "Quiet".into(),
            summary: "Nothing much.".into(),
            reactions: Reactions::default(),
        };
        let message = analysis_reply(1, &analysis, &s);
        assert!(rendered(&message).contains("No major comment reactions yet"));
    }
}
