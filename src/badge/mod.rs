//! Badge parsing engine.
//!
//! ## Overview
//!
//! Shields.io style badges are SVG images whose only structured content is the
//! text they display. This module turns those bodies into values the board can
//! render:
//!
//! ```text
//!  urls.rs ──> fetch.rs (BadgeFetcher) ──> status.rs   ──> StatusValue
//!  (targets,    HTTP GET + ?t=<millis>  └─> coverage.rs ──> CoverageValue
//!   cache bust)
//! ```
//!
//! `status` and `coverage` are pure functions of the body and a
//! `ParserOptions` value; `fetch` is the only part that does I/O and it maps
//! every failure to `unknown` before anything is classified.

pub mod coverage;
pub mod fetch;
pub mod models;
pub mod options;
pub mod status;
pub mod text;
pub mod urls;

pub use coverage::{CoverageExtractor, extract_coverage};
pub use fetch::{BadgeFetcher, BadgeReader, HttpBadgeFetcher};
pub use models::{BadgeKind, BadgeValue, CoverageValue, RepositoryCoordinates, StatusValue};
pub use options::ParserOptions;
pub use status::{StatusClassifier, classify_shields_status, classify_status};
pub use urls::{BadgeTarget, Endpoints, badge_targets};
