//! Status classification from badge bodies.
//!
//! Keyword tiers are checked in a fixed priority order and the first tier with
//! a hit wins:
//! 1. success: `passing`, `success`
//! 2. failure: `failing`, `failure`, `failed` (plus `error` when enabled)
//! 3. in progress: `pending`, `running`, `in progress`
//! 4. explicit unknown: `no status`, `unknown`
//!
//! Anything else is `unknown` as well.

use super::models::StatusValue;
use super::options::ParserOptions;
use super::text::normalize;

const SUCCESS_WORDS: &[&str] = &["passing", "success"];
const FAILURE_WORDS: &[&str] = &["failing", "failure", "failed"];
const FAILURE_WORDS_WITH_ERROR: &[&str] = &["failing", "failure", "failed", "error"];
const SHIELDS_FAILURE_WORDS: &[&str] = &["failing", "failure", "error"];
const IN_PROGRESS_WORDS: &[&str] = &["pending", "running", "in progress"];
const UNKNOWN_WORDS: &[&str] = &["no status", "unknown"];

/// Classifier for status badges (build, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusClassifier {
    options: ParserOptions,
}

impl StatusClassifier {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Classify a raw badge body. Total over all inputs.
    pub fn classify(&self, text: &str) -> StatusValue {
        let failure_words = if self.options.recognize_error_as_failure {
            FAILURE_WORDS_WITH_ERROR
        } else {
            FAILURE_WORDS
        };
        classify_with(&normalize(text), failure_words)
    }
}

/// First keyword tier with a hit, together with the keyword that matched.
fn matching_tier(
    normalized: &str,
    failure_words: &[&'static str],
) -> Option<(StatusValue, &'static str)> {
    let tiers: [(StatusValue, &[&'static str]); 4] = [
        (StatusValue::Success, SUCCESS_WORDS),
        (StatusValue::Failure, failure_words),
        (StatusValue::InProgress, IN_PROGRESS_WORDS),
        (StatusValue::Unknown, UNKNOWN_WORDS),
    ];

    tiers.into_iter().find_map(|(status, words)| {
        words
            .iter()
            .find(|word| normalized.contains(*word))
            .map(|word| (status, *word))
    })
}

fn classify_with(normalized: &str, failure_words: &[&'static str]) -> StatusValue {
    match matching_tier(normalized, failure_words) {
        Some((status, keyword)) => {
            tracing::trace!(%status, keyword, "status keyword matched");
            status
        }
        None => StatusValue::Unknown,
    }
}

/// Classify a badge body with the default (strict) options.
pub fn classify_status(text: &str) -> StatusValue {
    StatusClassifier::default().classify(text)
}

/// Classify a shields.io message label such as `"passing"` or `"error"`.
///
/// Missing or blank labels are `unknown` without further inspection. The
/// failure tier here is `failing`, `failure`, `error`.
pub fn classify_shields_status(label: Option<&str>) -> StatusValue {
    match label.map(str::trim) {
        None | Some("") => StatusValue::Unknown,
        Some(label) => classify_with(&normalize(label), SHIELDS_FAILURE_WORDS),
    }
}
