//! Prompt builders for the summarization stage.
//!
//! Pure functions from collected stories (and comments) to the user-role
//! prompt text sent to the model. Every prompt pins the exact JSON shape the
//! parser expects and forbids code fences; the parser still tolerates one
//! fence because models ignore that instruction often enough.

use crate::models::Story;
use std::fmt::Write;

/// Render one story as a prompt block.
fn story_block(story: &Story) -> String {
    format!(
        "ID: {}\nTitle: {}\nScore: {} points, Comments: {}",
        story.id, story.title, story.score, story.descendants
    )
}

fn story_list(stories: &[Story]) -> String {
    stories.iter().map(story_block).collect::<Vec<_>>().join("\n\n")
}

/// Build the categorization/summary prompt covering all collected stories.
///
/// The top 3 get detailed two-sentence summaries; the rest are classified
/// into exactly one of the four fixed categories.
pub fn digest_prompt(stories: &[Story], language: &str) -> String {
    let split = stories.len().min(3);
    let (top3, rest) = stories.split_at(split);

    format!(
        r#"Here are today's trending Hacker News stories.

## TOP 3 (detailed summaries needed)
{top3}

## REMAINING STORIES (categorization needed)
{rest}

Respond with JSON in exactly this shape:

{{
  "top3": [
    {{
      "id": <story id>,
      "title": "<title rewritten in {language}>",
      "summary": "<at most two sentences in {language}: first the facts, second the significance or impact>"
    }}
  ],
  "categories": {{
    "dev": [
      {{
        "id": <story id>,
        "title": "<title rewritten in {language}>",
        "one_liner": "<one short line in {language}>"
      }}
    ],
    "security": [...],
    "bigtech": [...],
    "misc": [...]
  }}
}}

Category definitions:
- dev (developer picks): AI, coding, developer tools, programming languages, open source
- security (security/infrastructure): vulnerabilities, data breaches, systems, DevOps, Linux
- bigtech (big tech/startups): company news, mergers and acquisitions, product launches, business
- misc (everything else): science, history, society, law, anything the other categories don't fit

Rules:
- Classify each remaining story into exactly one category.
- At most 3 entries per category, highest score first.
- Categories with no matching stories must be empty arrays, never omitted.
- Output valid JSON only, with no markdown code fences."#,
        top3 = story_list(top3),
        rest = story_list(rest),
        language = language,
    )
}

/// Build the brief-mode prompt: top titles plus one overview paragraph.
pub fn brief_prompt(stories: &[Story], language: &str) -> String {
    format!(
        r#"Here are today's trending Hacker News stories.

{stories}

Respond with JSON in exactly this shape:

{{
  "top": [
    {{"id": <story id>, "title": "<title rewritten in {language}>"}}
  ],
  "overview": "<one paragraph in {language} summarizing today's main themes across all the stories>"
}}

Rules:
- "top" lists the 3 highest-scoring stories in order.
- Output valid JSON only, with no markdown code fences."#,
        stories = story_list(stories),
        language = language,
    )
}

/// Build the per-story deep-analysis prompt from its cleaned comments.
pub fn analysis_prompt(story: &Story, comments: &[String], language: &str) -> String {
    let mut comment_text = String::new();
    for (i, comment) in comments.iter().enumerate() {
        let _ = writeln!(comment_text, "[{}] {}", i + 1, comment);
    }
    if comments.is_empty() {
        comment_text.push_str("(no comments collected)\n");
    }

    format!(
        r#"Summarize this Hacker News story and the reaction in its comment thread.

{story}
Submitted by: {by}
URL: {url}

## COMMENTS
{comments}
Respond with JSON in exactly this shape:

{{
  "title": "<title rewritten in {language}>",
  "summary": "<short prose summary in {language} of the story and what is at stake>",
  "reactions": {{
    "positive": ["<short phrase in {language}>"],
    "negative": ["<short phrase in {language}>"],
    "interesting": ["<short phrase in {language}>"]
  }}
}}

Rules:
- Each reactions list holds at most 3 short phrases drawn from the comments.
- Use an empty array for any tone with no matching comments.
- Output valid JSON only, with no markdown code fences."#,
        story = story_block(story),
        by = story.by,
        url = story.url,
        comments = comment_text,
        language = language,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::discussion_url;

    fn story(id: u64, score: u32) -> Story {
        Story {
            id,
            title: format!("Story {id}"),
            url: discussion_url(id),
            score,
            descendants: 7,
            by: "tester".into(),
            kids: vec![],
        }
    }

    #[test]
    fn test_digest_prompt_splits_top3_and_rest() {
        let stories: Vec<Story> = (1..=5).map(|i| story(i, 200 - i as u32)).collect();
        let prompt = digest_prompt(&stories, "English");

        let top_section = prompt.split("## REMAINING STORIES").next().unwrap();
        assert!(top_section.contains("ID: 1"));
        assert!(top_section.contains("ID: 3"));
        assert!(!top_section.contains("ID: 4"));

        let rest_section = prompt.split("## REMAINING STORIES").nth(1).unwrap();
        assert!(rest_section.contains("ID: 4"));
        assert!(rest_section.contains("ID: 5"));
    }

    #[test]
    fn test_digest_prompt_embeds_scores_and_language() {
        let stories = vec![story(10, 321)];
        let prompt = digest_prompt(&stories, "Korean");
        assert!(prompt.contains("Score: 321 points"));
        assert!(prompt.contains("rewritten in Korean"));
        assert!(prompt.contains("\"dev\""));
        assert!(prompt.contains("\"misc\""));
    }

    #[test]
    fn test_digest_prompt_fewer_than_three_stories() {
        let stories = vec![story(1, 100), story(2, 90)];
        let prompt = digest_prompt(&stories, "English");
        assert!(prompt.contains("ID: 1"));
        assert!(prompt.contains("ID: 2"));
    }

    #[test]
    fn test_analysis_prompt_numbers_comments() {
        let s = story(99, 150);
        let comments = vec!["first take".to_string(), "second take".to_string()];
        let prompt = analysis_prompt(&s, &comments, "English");
        assert!(prompt.contains("[1] first take"));
        assert!(prompt.contains("[2] second take"));
        assert!(prompt.contains("ID: 99"));
        assert!(prompt.contains("Submitted by: tester"));
    }

    #[test]
    fn test_analysis_prompt_without_comments() {
        let s = story(5, 80);
        let prompt = analysis_prompt(&s, &[], "English");
        assert!(prompt.contains("(no comments collected)"));
    }

    #[test]
    fn test_brief_prompt_lists_all_stories() {
        let stories: Vec<Story> = (1..=4).map(|i| story(i, 100)).collect();
        let prompt = brief_prompt(&stories, "English");
        for i in 1..=4 {
            assert!(prompt.contains(&format!("ID: {i}")));
        }
        assert!(prompt.contains("\"overview\""));
    }
}
