//! Coverage extraction from badge bodies.
//!
//! Strategies run in order and the first one that yields a value wins:
//! 1. Negative-keyword gate (`unknown`, `pending`, `inaccessible`, ...) -> unknown
//! 2. A number directly followed by `%` anywhere in the body
//! 3. A displayed text fragment containing a percentage (`85 %` allowed)
//! 4. A bare-number fragment in `[0, 100]`, only if a fragment mentions
//!    `coverage`/`cov` (the gate is dropped in loose mode)
//!
//! Percentages outside `[0, 100]` never become a coverage value. Such a match
//! is skipped and the same strategy keeps scanning; the next strategy runs
//! only when no in-range match is left.

use regex::Regex;
use std::sync::LazyLock;

use super::models::CoverageValue;
use super::options::ParserOptions;
use super::text::{contains_any, is_bare_number, normalize, text_fragments};

const NEGATIVE_WORDS: &[&str] = &[
    "unknown",
    "pending",
    "inaccessible",
    "invalid",
    "error",
    "not found",
    "unavailable",
];

// "cov" already covers "coverage"; both listed for readability.
const COVERAGE_WORDS: &[&str] = &["coverage", "cov"];

static DIRECT_PERCENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)%").unwrap());

static FRAGMENT_PERCENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").unwrap());

/// Extractor for coverage badges.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageExtractor {
    options: ParserOptions,
}

impl CoverageExtractor {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Extract a coverage percentage from a raw badge body. Total over all inputs.
    pub fn extract(&self, text: &str) -> CoverageValue {
        let normalized = normalize(text);
        if contains_any(&normalized, NEGATIVE_WORDS) {
            tracing::trace!("coverage badge carries a negative keyword");
            return CoverageValue::Unknown;
        }

        let fragments = text_fragments(text);

        direct_percentage(text)
            .or_else(|| fragment_percentage(&fragments))
            .or_else(|| self.bare_number(&fragments))
            .unwrap_or(CoverageValue::Unknown)
    }

    fn bare_number(&self, fragments: &[&str]) -> Option<CoverageValue> {
        let gated = !self.options.allow_ungated_numeric_fallback;
        if gated
            && !fragments
                .iter()
                .any(|fragment| contains_any(&normalize(fragment), COVERAGE_WORDS))
        {
            return None;
        }

        fragments
            .iter()
            .filter(|fragment| is_bare_number(fragment))
            .find_map(|fragment| parse_percent(fragment))
    }
}

fn direct_percentage(text: &str) -> Option<CoverageValue> {
    DIRECT_PERCENT_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .find_map(|m| parse_percent(m.as_str()))
}

fn fragment_percentage(fragments: &[&str]) -> Option<CoverageValue> {
    fragments.iter().find_map(|fragment| {
        FRAGMENT_PERCENT_REGEX
            .captures(fragment)
            .and_then(|cap| cap.get(1))
            .and_then(|m| parse_percent(m.as_str()))
    })
}

fn parse_percent(raw: &str) -> Option<CoverageValue> {
    raw.parse::<f64>().ok().and_then(CoverageValue::percent)
}

/// Extract coverage with the default (keyword-gated) options.
pub fn extract_coverage(text: &str) -> CoverageValue {
    CoverageExtractor::default().extract(text)
}
