use serde::{Deserialize, Serialize};

/// Strictness switches for the badge parser.
///
/// Both default to `false`: `error` is not a failure word for the primary
/// classifier, and a bare number only counts as coverage when a coverage
/// keyword is displayed somewhere on the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParserOptions {
    /// Treat `error` as a failure keyword in `classify_status`.
    #[serde(default)]
    pub recognize_error_as_failure: bool,
    /// Accept any bare number in `[0, 100]` as coverage, keyword or not.
    #[serde(default)]
    pub allow_ungated_numeric_fallback: bool,
}
