//! Hashtag Sanitation
//!
//! Model output is untrusted: tags arrive with `#` prefixes, punctuation,
//! mixed case, and duplicates. Sanitation normalizes them into a bounded,
//! deduplicated list and is idempotent.

/// Maximum number of hashtags returned
pub const MAX_HASHTAGS: usize = 12;

/// Maximum length of a single sanitized hashtag
pub const MAX_HASHTAG_LEN: usize = 24;

/// Sanitize a list of raw hashtag candidates.
///
/// Strips leading `#`, keeps only ASCII letters/digits, lowercases, drops
/// empty or over-length entries and case-insensitive duplicates, and caps
/// the result at [`MAX_HASHTAGS`].
pub fn sanitize_hashtags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();

    for tag in raw {
        let cleaned: String = tag
            .as_ref()
            .trim()
            .trim_start_matches('#')
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        if cleaned.is_empty() || cleaned.len() > MAX_HASHTAG_LEN {
            continue;
        }
        if out.iter().any(|existing| existing == &cleaned) {
            continue;
        }
        out.push(cleaned);

        if out.len() == MAX_HASHTAGS {
            break;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_hash_and_lowercases() {
        let tags = sanitize_hashtags(["#SunSet", "Beach-Day!", "  #ocean  "]);
        assert_eq!(tags, vec!["sunset", "beachday", "ocean"]);
    }

    #[test]
    fn test_drops_duplicates_case_insensitive() {
        let tags = sanitize_hashtags(["#sun", "SUN", "Sun"]);
        assert_eq!(tags, vec!["sun"]);
    }

    #[test]
    fn test_drops_empty_and_overlong() {
        let long = "a".repeat(MAX_HASHTAG_LEN + 1);
        let tags = sanitize_hashtags(["#", "!!!", long.as_str(), "ok"]);
        assert_eq!(tags, vec!["ok"]);
    }

    #[test]
    fn test_caps_at_max() {
        let raw: Vec<String> = (0..20).map(|i| format!("tag{}", i)).collect();
        let tags = sanitize_hashtags(&raw);
        assert_eq!(tags.len(), MAX_HASHTAGS);
    }

    #[test]
    fn test_sanitation_is_idempotent() {
        let once = sanitize_hashtags(["#Sun", "beach DAY", "x", "#sun"]);
        let twice = sanitize_hashtags(&once);
        assert_eq!(once, twice);
    }
}
