//! Badge and link URL construction.

use reqwest::Url;
use serde::Serialize;

use super::models::{BadgeKind, RepositoryCoordinates};
use crate::errors::FetchError;

/// Query parameter appended to every badge request.
pub const CACHE_BUST_PARAM: &str = "t";

/// Base URLs the badges and links point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub shields_base: String,
    pub coveralls_base: String,
    pub github_web: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            shields_base: "https://img.shields.io".to_string(),
            coveralls_base: "https://coveralls.io".to_string(),
            github_web: "https://github.com".to_string(),
        }
    }
}

/// One badge to fetch, plus where a user should go to see the details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeTarget {
    pub kind: BadgeKind,
    pub badge_url: String,
    pub link_url: String,
}

pub fn workflow_status_url(
    endpoints: &Endpoints,
    coords: &RepositoryCoordinates,
    workflow_file: &str,
) -> String {
    format!(
        "{}/github/workflow/status/{}/{}/{}",
        endpoints.shields_base.trim_end_matches('/'),
        coords.owner,
        coords.repo,
        workflow_file
    )
}

pub fn coveralls_badge_url(endpoints: &Endpoints, coords: &RepositoryCoordinates) -> String {
    format!(
        "{}/coveralls/github/{}/{}/{}.svg",
        endpoints.shields_base.trim_end_matches('/'),
        coords.owner,
        coords.repo,
        coords.branch
    )
}

pub fn workflow_page_url(
    endpoints: &Endpoints,
    coords: &RepositoryCoordinates,
    workflow_file: &str,
) -> String {
    format!(
        "{}/{}/{}/actions/workflows/{}",
        endpoints.github_web.trim_end_matches('/'),
        coords.owner,
        coords.repo,
        workflow_file
    )
}

pub fn coveralls_page_url(endpoints: &Endpoints, coords: &RepositoryCoordinates) -> String {
    format!(
        "{}/github/{}/{}?branch={}",
        endpoints.coveralls_base.trim_end_matches('/'),
        coords.owner,
        coords.repo,
        coords.branch
    )
}

pub fn issues_page_url(endpoints: &Endpoints, coords: &RepositoryCoordinates) -> String {
    format!(
        "{}/{}/{}/issues",
        endpoints.github_web.trim_end_matches('/'),
        coords.owner,
        coords.repo
    )
}

/// Badge targets for a repository, in `BadgeKind::ALL` order.
pub fn badge_targets(endpoints: &Endpoints, coords: &RepositoryCoordinates) -> Vec<BadgeTarget> {
    BadgeKind::ALL
        .into_iter()
        .map(|kind| badge_target(endpoints, coords, kind))
        .collect()
}

pub fn badge_target(
    endpoints: &Endpoints,
    coords: &RepositoryCoordinates,
    kind: BadgeKind,
) -> BadgeTarget {
    let (badge_url, link_url) = match kind {
        BadgeKind::Build => (
            workflow_status_url(endpoints, coords, &coords.workflow_file),
            workflow_page_url(endpoints, coords, &coords.workflow_file),
        ),
        BadgeKind::Tests => (
            workflow_status_url(endpoints, coords, &coords.test_workflow_file),
            workflow_page_url(endpoints, coords, &coords.test_workflow_file),
        ),
        BadgeKind::Coverage => (
            coveralls_badge_url(endpoints, coords),
            coveralls_page_url(endpoints, coords),
        ),
    };
    BadgeTarget {
        kind,
        badge_url,
        link_url,
    }
}

/// Append `t=<stamp>` to `url`, keeping any query it already has.
pub fn cache_busted(url: &str, stamp: i64) -> Result<String, FetchError> {
    let mut parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    parsed
        .query_pairs_mut()
        .append_pair(CACHE_BUST_PARAM, &stamp.to_string());
    Ok(parsed.into())
}

/// [`cache_busted`] with the current time in milliseconds.
pub fn cache_busted_now(url: &str) -> Result<String, FetchError> {
    cache_busted(url, chrono::Utc::now().timestamp_millis())
}
