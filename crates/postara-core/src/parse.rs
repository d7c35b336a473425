//! Completion Parsing
//!
//! Models are asked for strict JSON but do not always comply. Policy:
//! attempt a strict structured parse first, fall back to line-splitting
//! heuristics, dedupe case-insensitively, truncate to the requested count,
//! and never return an empty caption list.

use serde::Deserialize;

/// Substituted when the model produced zero usable captions
pub const FALLBACK_CAPTION: &str = "Sorry—couldn’t generate captions right now. Try again.";

/// Captions and raw (unsanitized) hashtags pulled out of a completion
#[derive(Clone, Debug, Default)]
pub struct ParsedCompletion {
    pub captions: Vec<String>,
    pub hashtags: Vec<String>,
}

#[derive(Deserialize)]
struct StructuredOutput {
    #[serde(default)]
    captions: Vec<String>,
    #[serde(default)]
    hashtags: Vec<String>,
}

/// Parse model output into captions and hashtags.
///
/// Accepts a JSON object with `captions`/`hashtags` keys, a bare JSON array
/// of strings, or free text split into lines. The returned caption list is
/// deduplicated case-insensitively, truncated to `count`, and never empty:
/// if nothing usable remains, it contains exactly [`FALLBACK_CAPTION`].
pub fn parse_completion(content: &str, count: usize) -> ParsedCompletion {
    let trimmed = strip_code_fence(content.trim());

    let (raw_captions, hashtags) = if let Ok(structured) =
        serde_json::from_str::<StructuredOutput>(trimmed)
    {
        (structured.captions, structured.hashtags)
    } else if let Ok(array) = serde_json::from_str::<Vec<String>>(trimmed) {
        (array, Vec::new())
    } else {
        (split_lines(trimmed), Vec::new())
    };

    let mut captions = dedupe_case_insensitive(raw_captions);
    captions.truncate(count);

    if captions.is_empty() {
        captions.push(FALLBACK_CAPTION.into());
    }

    ParsedCompletion { captions, hashtags }
}

/// Line-splitting fallback: strip enumeration markers, trim, drop blanks
fn split_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(strip_enumeration)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Strip leading enumeration markers ("1.", "2)", "-", "*", "•") and
/// surrounding quotes from one line
fn strip_enumeration(line: &str) -> &str {
    let mut s = line.trim();

    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &s[digits..];
        if let Some(stripped) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            s = stripped.trim_start();
        }
    }

    for marker in ["- ", "* ", "• "] {
        if let Some(stripped) = s.strip_prefix(marker) {
            s = stripped.trim_start();
        }
    }

    s.trim_matches('"').trim()
}

/// Some models wrap JSON in a markdown fence even when told not to
fn strip_code_fence(content: &str) -> &str {
    let s = content.trim();
    if let Some(inner) = s.strip_prefix("```") {
        let inner = inner.strip_prefix("json").unwrap_or(inner);
        if let Some(inner) = inner.strip_suffix("```") {
            return inner.trim();
        }
    }
    s
}

fn dedupe_case_insensitive(items: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();

    for item in items {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(trimmed.to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_json_object() {
        let content =
            r##"{"captions":["Golden hour","Chasing light"],"hashtags":["#sunset","beach"]}"##;
        let parsed = parse_completion(content, 5);
        assert_eq!(parsed.captions, vec!["Golden hour", "Chasing light"]);
        assert_eq!(parsed.hashtags, vec!["#sunset", "beach"]);
    }

    #[test]
    fn test_bare_json_array() {
        let parsed = parse_completion(r#"["One","Two","Three"]"#, 2);
        assert_eq!(parsed.captions, vec!["One", "Two"]);
        assert!(parsed.hashtags.is_empty());
    }

    #[test]
    fn test_fenced_json_accepted() {
        let content = "```json\n{\"captions\":[\"Hi there\"]}\n```";
        let parsed = parse_completion(content, 5);
        assert_eq!(parsed.captions, vec!["Hi there"]);
    }

    #[test]
    fn test_line_fallback_strips_enumeration() {
        let content = "1. First caption\n2) Second caption\n- Third caption\n\n* Fourth";
        let parsed = parse_completion(content, 10);
        assert_eq!(
            parsed.captions,
            vec!["First caption", "Second caption", "Third caption", "Fourth"]
        );
    }

    #[test]
    fn test_dedupes_case_insensitive() {
        let parsed = parse_completion("Cap A\nCap A\ncap a\nCap B", 10);
        assert_eq!(parsed.captions, vec!["Cap A", "Cap B"]);
    }

    #[test]
    fn test_truncates_to_count() {
        let content = "A1\nB2\nC3\nD4\nE5\nF6";
        let parsed = parse_completion(content, 3);
        assert_eq!(parsed.captions.len(), 3);
    }

    #[test]
    fn test_empty_output_substitutes_fallback() {
        let parsed = parse_completion("", 5);
        assert_eq!(parsed.captions, vec![FALLBACK_CAPTION.to_string()]);

        let parsed = parse_completion("   \n  \n", 5);
        assert_eq!(parsed.captions.len(), 1);
        assert_eq!(parsed.captions[0], FALLBACK_CAPTION);
    }

    #[test]
    fn test_quoted_lines_unquoted() {
        let parsed = parse_completion("\"Sun's out\"\n\"Waves in\"", 5);
        assert_eq!(parsed.captions, vec!["Sun's out", "Waves in"]);
    }
}
