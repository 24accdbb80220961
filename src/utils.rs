//! Utility functions for model-output cleanup, comment text sanitization,
//! and log-friendly string truncation.
//!
//! Two small text pipelines live here:
//! - Code-fence stripping for model responses that arrive wrapped in
//!   triple-backtick fences
//! - HN comment cleanup: tag stripping followed by entity decoding

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a complete HTML tag, e.g. `<p>` or `</a>`.
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// The named entities HN comment bodies actually use, decoded in this order.
/// `&amp;` must come last so earlier replacements cannot create new matches.
const ENTITIES: [(&str, &str); 5] = [
    ("&#x27;", "'"),
    ("&quot;", "\""),
    ("&gt;", ">"),
    ("&lt;", "<"),
    ("&amp;", "&"),
];

/// Strip at most one surrounding code fence from a model response.
///
/// Models occasionally wrap their JSON in a triple-backtick fence, sometimes
/// with a `json` language tag, despite being told not to. This removes one
/// leading fence (and tag) and one trailing fence, then trims. Text that is
/// not fenced comes back trimmed but otherwise untouched, which makes the
/// function idempotent. Anything that still fails to parse after this is the
/// caller's problem; nothing here attempts to salvage broken JSON.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
/// assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
/// ```
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Remove HTML tags from a raw comment body.
pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

/// Decode the five named entities HN uses in comment bodies.
pub fn decode_entities(text: &str) -> String {
    let mut out = text.to_string();
    for (entity, plain) in ENTITIES {
        out = out.replace(entity, plain);
    }
    out
}

/// Clean a raw HN comment body into plain text.
///
/// Tags are stripped first, entities decoded second; an escaped tag like
/// `&lt;p&gt;` therefore survives as literal text rather than being removed.
/// The result is whitespace-trimmed.
pub fn clean_comment(raw: &str) -> String {
    decode_entities(&strip_tags(raw)).trim().to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte count
/// indicator appended. Used to keep model-response previews readable in logs.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", &s[..max], s.len() - max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence_with_json_tag() {
        let fenced = "```json\n{\"top3\": []}\n```";
        assert_eq!(strip_code_fence(fenced), "{\"top3\": []}");
    }

    #[test]
    fn test_strip_code_fence_without_tag() {
        let fenced = "```\n{\"top3\": []}\n```";
        assert_eq!(strip_code_fence(fenced), "{\"top3\": []}");
    }

    #[test]
    fn test_strip_code_fence_raw_json_untouched() {
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fence_idempotent() {
        let fenced = "```json\n{\"a\": 1}\n```";
        let once = strip_code_fence(fenced);
        let twice = strip_code_fence(once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fenced_and_raw_parse_identically() {
        let raw = "{\"a\": 1, \"b\": [2, 3]}";
        let fenced = format!("```json\n{raw}\n```");
        let from_raw: serde_json::Value =
            serde_json::from_str(strip_code_fence(raw)).unwrap();
        let from_fenced: serde_json::Value =
            serde_json::from_str(strip_code_fence(&fenced)).unwrap();
        assert_eq!(from_raw, from_fenced);
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("hello <p>world</p>"), "hello world");
        assert_eq!(strip_tags("<a href=\"x\">link</a>"), "link");
        assert_eq!(strip_tags("no tags here"), "no tags here");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("it&#x27;s &quot;fine&quot;"), "it's \"fine\"");
        assert_eq!(decode_entities("1 &lt; 2 &amp;&amp; 3 &gt; 2"), "1 < 2 && 3 > 2");
    }

    #[test]
    fn test_clean_comment_tags_before_entities() {
        // Escaped tags must survive as text: strip first, decode second.
        assert_eq!(clean_comment("a &amp; b &lt;tag&gt;"), "a & b <tag>");
        assert_eq!(clean_comment("<i>a</i> &amp; b"), "a & b");
    }

    #[test]
    fn test_clean_comment_trims() {
        assert_eq!(clean_comment("<p> spaced </p>"), "spaced");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }
}
