use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::badge::StatusValue;
use crate::errors::BoardError;

const USER_AGENT: &str = concat!("badgeboard/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: usize = 100;

/// A GitHub label (subset of fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubLabel {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// A GitHub issue (subset of fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubIssue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub state: String,
    pub html_url: String,
    #[serde(default)]
    pub labels: Vec<GitHubLabel>,
    /// Pull requests also come through the issues endpoint; filter them out.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

/// A GitHub Actions workflow run (subset of fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    pub status: Option<String>,
    pub conclusion: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub head_branch: Option<String>,
}

impl WorkflowRun {
    /// Map the Actions run state onto the badge status vocabulary.
    pub fn status_value(&self) -> StatusValue {
        match self.status.as_deref() {
            Some("queued") | Some("waiting") | Some("requested") | Some("pending") => {
                StatusValue::Queued
            }
            Some("in_progress") => StatusValue::InProgress,
            Some("completed") => match self.conclusion.as_deref() {
                Some("success") => StatusValue::Success,
                Some("failure") | Some("timed_out") | Some("cancelled")
                | Some("startup_failure") => StatusValue::Failure,
                _ => StatusValue::Unknown,
            },
            _ => StatusValue::Unknown,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WorkflowRunsPage {
    workflow_runs: Vec<WorkflowRun>,
}

#[derive(Debug, Serialize)]
struct LabelsUpdate<'a> {
    labels: &'a [String],
}

/// Known GitHub token prefixes.
/// See: https://github.blog/2021-04-05-behind-githubs-new-authentication-token-formats/
const GITHUB_TOKEN_PREFIXES: &[&str] = &[
    "ghp_",        // Personal access tokens (classic)
    "github_pat_", // Fine-grained personal access tokens
    "gho_",        // OAuth access tokens
    "ghu_",        // GitHub App user-to-server tokens
    "ghs_",        // GitHub App server-to-server tokens
    "ghr_",        // GitHub App refresh tokens
];

/// Validate that a string looks like a GitHub token based on its prefix.
///
/// Format check only; it does not verify the token is active.
pub fn is_valid_github_token(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    GITHUB_TOKEN_PREFIXES
        .iter()
        .any(|prefix| token.starts_with(prefix))
}

/// Split a repository URL into `(owner, repo)`.
///
/// `web_base` is the configured GitHub web root (`https://github.com` or an
/// Enterprise host). Both `{web_base}/owner/repo[.git]` and the SSH form
/// `git@{host}:owner/repo[.git]` are accepted; anything else is `None`.
pub fn parse_repository_url(url: &str, web_base: &str) -> Option<(String, String)> {
    let web_base = web_base.trim_end_matches('/');
    let host = web_base.split_once("://").map_or(web_base, |(_, host)| host);

    let path = url
        .trim()
        .strip_prefix(web_base)
        .and_then(|rest| rest.strip_prefix('/'))
        .or_else(|| url.trim().strip_prefix(&format!("git@{}:", host)))?;
    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    match path.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Some((owner.to_string(), repo.to_string()))
        }
        _ => None,
    }
}

/// Thin client over the GitHub REST endpoints the board needs.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

impl GitHubClient {
    /// Build a client. The token must look like a GitHub token.
    pub fn new(api_base: &str, token: Option<&str>) -> Result<Self, BoardError> {
        let token = token.ok_or(BoardError::MissingToken)?;
        if !is_valid_github_token(token) {
            return Err(BoardError::InvalidToken);
        }
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build GitHub HTTP client")?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{}", self.api_base, path))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
    }

    /// List issues for a repository (excludes pull requests).
    /// Paginates through all pages automatically.
    pub async fn list_issues(
        &self,
        owner_repo: &str,
        state: &str,
    ) -> Result<Vec<GitHubIssue>, BoardError> {
        let path = format!("/repos/{}/issues", owner_repo);
        let mut all_issues = Vec::new();
        let mut page = 1u32;

        loop {
            let resp: Vec<GitHubIssue> = self
                .get(&path)
                .query(&[
                    ("state", state),
                    ("per_page", &PER_PAGE.to_string()),
                    ("page", &page.to_string()),
                ])
                .send()
                .await
                .context("Failed to send issues request to GitHub")?
                .error_for_status()
                .map_err(|e| BoardError::GitHub(e.to_string()))?
                .json()
                .await
                .context("Failed to parse issues response from GitHub")?;

            let count = resp.len();
            all_issues.extend(resp.into_iter().filter(|i| i.pull_request.is_none()));
            tracing::debug!(page, count, "fetched issues page");

            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(all_issues)
    }

    pub async fn get_issue(&self, owner_repo: &str, number: u64) -> Result<GitHubIssue, BoardError> {
        let resp = self
            .get(&format!("/repos/{}/issues/{}", owner_repo, number))
            .send()
            .await
            .context("Failed to send issue request to GitHub")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(BoardError::IssueNotFound { number });
        }

        resp.error_for_status()
            .map_err(|e| BoardError::GitHub(e.to_string()))?
            .json()
            .await
            .context("Failed to parse issue response from GitHub")
            .map_err(BoardError::from)
    }

    /// Replace the label set of an issue.
    pub async fn set_issue_labels(
        &self,
        owner_repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<GitHubIssue, BoardError> {
        let url = format!("{}/repos/{}/issues/{}", self.api_base, owner_repo, number);
        self.client
            .patch(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .json(&LabelsUpdate { labels })
            .send()
            .await
            .context("Failed to send label update to GitHub")?
            .error_for_status()
            .map_err(|e| BoardError::GitHub(e.to_string()))?
            .json()
            .await
            .context("Failed to parse label update response from GitHub")
            .map_err(BoardError::from)
    }

    /// Most recent run of a workflow on a branch, if any.
    pub async fn latest_workflow_run(
        &self,
        owner_repo: &str,
        workflow_file: &str,
        branch: &str,
    ) -> Result<Option<WorkflowRun>, BoardError> {
        let page: WorkflowRunsPage = self
            .get(&format!(
                "/repos/{}/actions/workflows/{}/runs",
                owner_repo, workflow_file
            ))
            .query(&[("branch", branch), ("per_page", "1")])
            .send()
            .await
            .context("Failed to send workflow runs request to GitHub")?
            .error_for_status()
            .map_err(|e| BoardError::GitHub(e.to_string()))?
            .json()
            .await
            .context("Failed to parse workflow runs response from GitHub")?;

        Ok(page.workflow_runs.into_iter().next())
    }
}
