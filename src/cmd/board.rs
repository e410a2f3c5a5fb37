//! Kanban board commands — `badgeboard board|move|collapse|expand`.

use anyhow::Result;
use badgeboard::badge::{BadgeKind, StatusValue};
use badgeboard::board::{Board, Column, relabel_for_move};
use badgeboard::board_config::BoardConfig;
use badgeboard::errors::BoardError;
use badgeboard::github::GitHubClient;
use badgeboard::ui::badges::render_status_line;
use badgeboard::ui::render_board;
use badgeboard::ui_state::UiState;
use console::style;
use serde_json::json;
use std::path::Path;

use crate::Cli;

fn client(config: &BoardConfig) -> Result<GitHubClient, BoardError> {
    GitHubClient::new(config.github_api(), config.github_token())
}

/// Latest build run status; errors degrade to unknown.
async fn build_status(client: &GitHubClient, config: &BoardConfig) -> StatusValue {
    let coords = config.coordinates();
    match client
        .latest_workflow_run(&coords.slug(), &coords.workflow_file, &coords.branch)
        .await
    {
        Ok(Some(run)) => run.status_value(),
        Ok(None) => StatusValue::Unknown,
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch latest workflow run");
            StatusValue::Unknown
        }
    }
}

pub async fn cmd_board(cli: &Cli, project_dir: &Path, all: bool, json: bool) -> Result<()> {
    let config = super::load_config(cli, project_dir)?;
    let client = client(&config)?;
    let slug = config.coordinates().slug();

    let state = if all { "all" } else { "open" };
    let issues = client.list_issues(&slug, state).await?;
    let board = Board::from_issues(&issues);
    tracing::debug!(issues = board.len(), "loaded board");
    let build = build_status(&client, &config).await;

    if json {
        let out = json!({ "repository": slug, "build": build, "board": board });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let ui_state = UiState::load_or_default(&config.ui_state_file());
    println!("{}", style(&slug).bold());
    println!("{}", render_status_line(BadgeKind::Build, build));
    println!();
    if board.is_empty() {
        println!("{}", style("No issues.").dim());
        return Ok(());
    }
    print!("{}", render_board(&board, &config.columns(), &ui_state));

    Ok(())
}

pub async fn cmd_move(cli: &Cli, project_dir: &Path, number: u64, column: &str) -> Result<()> {
    let target: Column = column.parse()?;
    let config = super::load_config(cli, project_dir)?;
    let client = client(&config)?;
    let slug = config.coordinates().slug();

    let issue = client.get_issue(&slug, number).await?;
    let current: Vec<String> = issue.labels.iter().map(|l| l.name.clone()).collect();
    let labels = relabel_for_move(&current, target);
    tracing::debug!(number, ?current, ?labels, "relabelling issue");

    client.set_issue_labels(&slug, number, &labels).await?;
    println!("Moved #{} to {}", number, style(target.title()).bold());

    Ok(())
}

pub fn cmd_collapse(cli: &Cli, project_dir: &Path, column: &str, collapsed: bool) -> Result<()> {
    let column: Column = column.parse()?;
    let config = super::load_config(cli, project_dir)?;
    let path = config.ui_state_file();

    let mut state = UiState::load_or_default(&path);
    state.set_collapsed(column, collapsed);
    state.save(&path)?;

    let verb = if collapsed { "Collapsed" } else { "Expanded" };
    println!("{} {}", verb, column.title());
    Ok(())
}
