//! Typed error hierarchy for badgeboard.
//!
//! Two top-level enums cover the two I/O-facing subsystems:
//! - `FetchError` — badge downloads (the parser itself never fails)
//! - `BoardError` — GitHub issue board and label moves

use thiserror::Error;

/// Errors from fetching a badge body.
///
/// Callers map every variant to the `unknown` sentinel before anything
/// reaches the classifier or the renderer.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid badge URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Badge endpoint {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to fetch badge {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors from the GitHub issue board.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("No GitHub token configured. Set GITHUB_TOKEN or [github] token in badgeboard.toml")]
    MissingToken,

    #[error("GitHub token does not look like a GitHub token (unknown prefix)")]
    InvalidToken,

    #[error("GitHub API error: {0}")]
    GitHub(String),

    #[error("Invalid column '{column}'. Valid values: backlog, todo, in_progress, review, done")]
    UnknownColumn { column: String },

    #[error("Issue #{number} not found")]
    IssueNotFound { number: u64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
