//! Unified configuration for badgeboard.
//!
//! Settings are read from `.badgeboard/badgeboard.toml` and layered
//! (file → environment → CLI). Every field has a default, so an empty or
//! missing file is a valid configuration pointing at the compiled-in
//! repository.
//!
//! # Configuration File Format
//!
//! ```toml
//! [repository]
//! owner = "octo"
//! repo = "widgets"
//! branch = "main"
//! workflow_file = "ci.yml"
//! test_workflow_file = "tests.yml"
//!
//! [endpoints]
//! shields_base = "https://img.shields.io"
//! coveralls_base = "https://coveralls.io"
//! github_web = "https://github.com"
//! github_api = "https://api.github.com"
//!
//! [parser]
//! recognize_error_as_failure = false
//! allow_ungated_numeric_fallback = false
//!
//! [refresh]
//! status_interval_secs = 60
//! coverage_interval_secs = 300
//! request_timeout_secs = 10
//!
//! [board]
//! columns = ["backlog", "todo", "in_progress", "review", "done"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::badge::urls::Endpoints;
use crate::badge::{BadgeTarget, ParserOptions, RepositoryCoordinates, badge_targets};
use crate::board::Column;
use crate::github::parse_repository_url;

pub const CONFIG_DIR: &str = ".badgeboard";
pub const CONFIG_FILE: &str = "badgeboard.toml";

const DEFAULT_OWNER: &str = "badgeboard";
const DEFAULT_REPO: &str = "badgeboard";

/// Repository the badges and issues belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySection {
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_repo")]
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Workflow behind the build badge
    #[serde(default = "default_workflow_file")]
    pub workflow_file: String,
    /// Workflow behind the tests badge
    #[serde(default = "default_test_workflow_file")]
    pub test_workflow_file: String,
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

fn default_repo() -> String {
    DEFAULT_REPO.to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_workflow_file() -> String {
    "ci.yml".to_string()
}

fn default_test_workflow_file() -> String {
    "tests.yml".to_string()
}

impl Default for RepositorySection {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            repo: default_repo(),
            branch: default_branch(),
            workflow_file: default_workflow_file(),
            test_workflow_file: default_test_workflow_file(),
        }
    }
}

/// Base URLs for badges, links and the GitHub API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsSection {
    #[serde(default = "default_shields_base")]
    pub shields_base: String,
    #[serde(default = "default_coveralls_base")]
    pub coveralls_base: String,
    #[serde(default = "default_github_web")]
    pub github_web: String,
    #[serde(default = "default_github_api")]
    pub github_api: String,
}

fn default_shields_base() -> String {
    "https://img.shields.io".to_string()
}

fn default_coveralls_base() -> String {
    "https://coveralls.io".to_string()
}

fn default_github_web() -> String {
    "https://github.com".to_string()
}

fn default_github_api() -> String {
    "https://api.github.com".to_string()
}

impl Default for EndpointsSection {
    fn default() -> Self {
        Self {
            shields_base: default_shields_base(),
            coveralls_base: default_coveralls_base(),
            github_web: default_github_web(),
            github_api: default_github_api(),
        }
    }
}

/// Polling cadence and request timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSection {
    #[serde(default = "default_status_interval_secs")]
    pub status_interval_secs: u64,
    #[serde(default = "default_coverage_interval_secs")]
    pub coverage_interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_status_interval_secs() -> u64 {
    60
}

fn default_coverage_interval_secs() -> u64 {
    300
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for RefreshSection {
    fn default() -> Self {
        Self {
            status_interval_secs: default_status_interval_secs(),
            coverage_interval_secs: default_coverage_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Kanban board layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSection {
    /// Columns to show, left to right
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,
}

fn default_columns() -> Vec<String> {
    Column::ALL.iter().map(|c| c.as_str().to_string()).collect()
}

impl Default for BoardSection {
    fn default() -> Self {
        Self {
            columns: default_columns(),
        }
    }
}

/// GitHub credentials. Prefer `GITHUB_TOKEN` over writing the token to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitHubSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// The complete badgeboard.toml configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardToml {
    #[serde(default)]
    pub repository: RepositorySection,
    #[serde(default)]
    pub endpoints: EndpointsSection,
    #[serde(default)]
    pub parser: ParserOptions,
    #[serde(default)]
    pub refresh: RefreshSection,
    #[serde(default)]
    pub board: BoardSection,
    #[serde(default)]
    pub github: GitHubSection,
}

impl BoardToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse badgeboard.toml")
    }

    /// Load configuration from `<config_dir>/badgeboard.toml`.
    /// Returns default configuration if the file doesn't exist.
    pub fn load_or_default(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize badgeboard.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Apply environment overrides. `lookup` is `std::env::var` in production.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(owner) = non_empty("BADGEBOARD_OWNER") {
            self.repository.owner = owner;
        }
        if let Some(repo) = non_empty("BADGEBOARD_REPO") {
            self.repository.repo = repo;
        }
        if let Some(branch) = non_empty("BADGEBOARD_BRANCH") {
            self.repository.branch = branch;
        }
        if let Some(token) = non_empty("GITHUB_TOKEN") {
            self.github.token = Some(token);
        }
        self.expand_repository_url();
    }

    /// Accept a repository URL in `repo` and split it into owner and repo.
    /// The URL's owner replaces any separately configured owner.
    pub fn expand_repository_url(&mut self) {
        if let Some((owner, repo)) =
            parse_repository_url(&self.repository.repo, &self.endpoints.github_web)
        {
            tracing::debug!(%owner, %repo, "repository given as URL");
            self.repository.owner = owner;
            self.repository.repo = repo;
        }
    }

    /// Validate configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (name, value) in [
            ("repository.owner", &self.repository.owner),
            ("repository.repo", &self.repository.repo),
            ("repository.branch", &self.repository.branch),
        ] {
            if value.trim().is_empty() {
                warnings.push(format!("{} is empty", name));
            }
        }

        for (name, value) in [
            ("endpoints.shields_base", &self.endpoints.shields_base),
            ("endpoints.coveralls_base", &self.endpoints.coveralls_base),
            ("endpoints.github_web", &self.endpoints.github_web),
            ("endpoints.github_api", &self.endpoints.github_api),
        ] {
            if !value.starts_with("https://") {
                warnings.push(format!("{} '{}' is not an https URL", name, value));
            }
        }

        for (name, value) in [
            ("refresh.status_interval_secs", self.refresh.status_interval_secs),
            ("refresh.coverage_interval_secs", self.refresh.coverage_interval_secs),
            ("refresh.request_timeout_secs", self.refresh.request_timeout_secs),
        ] {
            if value == 0 {
                warnings.push(format!("{} must be greater than 0", name));
            }
        }

        let mut seen = Vec::new();
        for column in &self.board.columns {
            if column.parse::<Column>().is_err() {
                warnings.push(format!("Unknown board column '{}'", column));
            } else if seen.contains(&column) {
                warnings.push(format!("Board column '{}' is listed twice", column));
            }
            seen.push(column);
        }

        warnings
    }
}

/// CLI overrides for the repository coordinates.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
}

/// Resolved configuration, passed by reference into every component.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Path to the project directory
    pub project_dir: PathBuf,
    /// Path to the .badgeboard directory
    pub config_dir: PathBuf,
    /// Parsed badgeboard.toml with env and CLI overrides applied
    pub toml: BoardToml,
}

impl BoardConfig {
    /// Load from a project directory, applying process environment overrides.
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        Self::with_env(project_dir, |key| std::env::var(key).ok())
    }

    pub fn with_env<F>(project_dir: PathBuf, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let config_dir = project_dir.join(CONFIG_DIR);
        let mut toml = BoardToml::load_or_default(&config_dir)?;
        toml.apply_env(lookup);

        Ok(Self {
            project_dir,
            config_dir,
            toml,
        })
    }

    /// Load and then apply CLI overrides on top of file and environment.
    pub fn with_cli_args(project_dir: PathBuf, overrides: CliOverrides) -> Result<Self> {
        let mut config = Self::new(project_dir)?;
        config.apply_cli(overrides);
        Ok(config)
    }

    pub fn apply_cli(&mut self, overrides: CliOverrides) {
        if let Some(owner) = overrides.owner {
            self.toml.repository.owner = owner;
        }
        if let Some(repo) = overrides.repo {
            self.toml.repository.repo = repo;
        }
        if let Some(branch) = overrides.branch {
            self.toml.repository.branch = branch;
        }
        self.toml.expand_repository_url();
    }

    pub fn ui_state_file(&self) -> PathBuf {
        self.config_dir.join(crate::ui_state::UI_STATE_FILE)
    }

    pub fn coordinates(&self) -> RepositoryCoordinates {
        let repo = &self.toml.repository;
        RepositoryCoordinates {
            owner: repo.owner.clone(),
            repo: repo.repo.clone(),
            branch: repo.branch.clone(),
            workflow_file: repo.workflow_file.clone(),
            test_workflow_file: repo.test_workflow_file.clone(),
        }
    }

    pub fn endpoints(&self) -> Endpoints {
        let endpoints = &self.toml.endpoints;
        Endpoints {
            shields_base: endpoints.shields_base.clone(),
            coveralls_base: endpoints.coveralls_base.clone(),
            github_web: endpoints.github_web.clone(),
        }
    }

    pub fn github_api(&self) -> &str {
        &self.toml.endpoints.github_api
    }

    pub fn parser_options(&self) -> ParserOptions {
        self.toml.parser
    }

    pub fn badge_targets(&self) -> Vec<BadgeTarget> {
        badge_targets(&self.endpoints(), &self.coordinates())
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.toml.refresh.status_interval_secs.max(1))
    }

    pub fn coverage_interval(&self) -> Duration {
        Duration::from_secs(self.toml.refresh.coverage_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.toml.refresh.request_timeout_secs.max(1))
    }

    /// Board columns in display order; unknown names are skipped.
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = Vec::new();
        for column in self.toml.board.columns.iter().filter_map(|c| c.parse().ok()) {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        columns
    }

    pub fn github_token(&self) -> Option<&str> {
        self.toml.github.token.as_deref()
    }

    /// Validate configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}
