//! Text helpers shared by the status classifier and coverage extractor.

use regex::Regex;
use std::sync::LazyLock;

// Content between a closing `>` and the next `<`.
static FRAGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">([^<>]+)<").unwrap());

/// Lowercase the badge body once so keyword checks are case-insensitive.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// True if `haystack` contains any of `needles`.
///
/// `haystack` must already be normalized; needles are lowercase literals.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Displayed text fragments of an SVG body, trimmed, in document order.
///
/// Markup-free input (a plain text body) is treated as one fragment.
pub fn text_fragments(text: &str) -> Vec<&str> {
    if !text.contains('<') {
        let trimmed = text.trim();
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed]
        };
    }

    FRAGMENT_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// True for digits with at most one decimal point and nothing else.
pub fn is_bare_number(fragment: &str) -> bool {
    let mut parts = fragment.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    match parts.next() {
        Some(decimals) => is_digits(whole) && is_digits(decimals),
        None => is_digits(whole),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_from_svg() {
        let svg = r#"<svg><g><text x="1">coverage</text><text x="2"> 85% </text></g></svg>"#;
        assert_eq!(text_fragments(svg), vec!["coverage", "85%"]);
    }

    #[test]
    fn fragments_skip_whitespace_between_tags() {
        let svg = "<svg>\n  <text>build</text>\n  <text>passing</text>\n</svg>";
        assert_eq!(text_fragments(svg), vec!["build", "passing"]);
    }

    #[test]
    fn plain_text_is_one_fragment() {
        assert_eq!(text_fragments("  coverage 75 "), vec!["coverage 75"]);
    }

    #[test]
    fn empty_input_has_no_fragments() {
        assert!(text_fragments("").is_empty());
        assert!(text_fragments("   ").is_empty());
        assert!(text_fragments("<svg></svg>").is_empty());
    }

    #[test]
    fn bare_number_shapes() {
        assert!(is_bare_number("75"));
        assert!(is_bare_number("75.5"));
        assert!(!is_bare_number("75."));
        assert!(!is_bare_number(".5"));
        assert!(!is_bare_number("7.5.1"));
        assert!(!is_bare_number("75%"));
        assert!(!is_bare_number("-5"));
        assert!(!is_bare_number(""));
    }

    #[test]
    fn contains_any_matches_substrings() {
        let text = normalize("Build PASSING");
        assert!(contains_any(&text, &["passing", "success"]));
        assert!(!contains_any(&text, &["failing"]));
    }
}
