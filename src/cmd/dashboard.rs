//! Badge dashboard commands — `badgeboard status|watch|links|open`.

use anyhow::{Context, Result};
use badgeboard::badge::urls::{cache_busted_now, issues_page_url};
use badgeboard::badge::{BadgeKind, HttpBadgeFetcher};
use badgeboard::board_config::BoardConfig;
use badgeboard::refresh::{RefreshIntervals, RefreshScheduler};
use badgeboard::ui::render_snapshot;
use console::{Term, style};
use serde_json::json;
use std::path::Path;

use crate::{Cli, OpenTarget};

fn scheduler(config: &BoardConfig) -> Result<RefreshScheduler<HttpBadgeFetcher>> {
    let fetcher = HttpBadgeFetcher::new(config.request_timeout())?;
    Ok(RefreshScheduler::new(
        fetcher,
        config.badge_targets(),
        RefreshIntervals {
            status: config.status_interval(),
            coverage: config.coverage_interval(),
        },
        config.parser_options(),
    ))
}

fn header(config: &BoardConfig) -> String {
    let coords = config.coordinates();
    format!(
        "{} {}",
        style(coords.slug()).bold(),
        style(format!("@ {}", coords.branch)).dim()
    )
}

pub async fn cmd_status(cli: &Cli, project_dir: &Path, json: bool) -> Result<()> {
    let config = super::load_config(cli, project_dir)?;
    let snapshot = scheduler(&config)?.run_cycle().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", header(&config));
        println!("{}", render_snapshot(&snapshot));
    }

    Ok(())
}

pub async fn cmd_watch(cli: &Cli, project_dir: &Path) -> Result<()> {
    let config = super::load_config(cli, project_dir)?;
    let scheduler = scheduler(&config)?;
    let mut rx = scheduler.subscribe();
    let title = header(&config);

    let render = async move {
        let term = Term::stdout();
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            let _ = term.clear_screen();
            println!("{}", title);
            println!("{}", render_snapshot(&snapshot));
            println!();
            println!("{}", style("Ctrl-C to quit").dim());
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    tokio::select! {
        _ = scheduler.run_until(shutdown) => {}
        _ = render => {}
    }

    Ok(())
}

pub fn cmd_links(cli: &Cli, project_dir: &Path, json: bool) -> Result<()> {
    let config = super::load_config(cli, project_dir)?;
    let issues_url = issues_page_url(&config.endpoints(), &config.coordinates());

    let mut entries = Vec::new();
    for target in config.badge_targets() {
        let badge_url = cache_busted_now(&target.badge_url)?;
        entries.push((target.kind, badge_url, target.link_url));
    }

    if json {
        let badges: Vec<_> = entries
            .iter()
            .map(|(kind, badge_url, link_url)| {
                json!({ "kind": kind, "badge_url": badge_url, "link_url": link_url })
            })
            .collect();
        let out = json!({ "badges": badges, "issues_url": issues_url });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", header(&config));
    for (kind, badge_url, link_url) in &entries {
        println!("{:<9} {}", style(kind).bold(), badge_url);
        println!("{:<9} {}", "", style(link_url).dim());
    }
    println!("{:<9} {}", style("issues").bold(), issues_url);

    Ok(())
}

pub fn cmd_open(cli: &Cli, project_dir: &Path, target: OpenTarget) -> Result<()> {
    let config = super::load_config(cli, project_dir)?;
    let kind = match target {
        OpenTarget::Build => Some(BadgeKind::Build),
        OpenTarget::Tests => Some(BadgeKind::Tests),
        OpenTarget::Coverage => Some(BadgeKind::Coverage),
        OpenTarget::Issues => None,
    };

    let url = match kind {
        Some(kind) => config
            .badge_targets()
            .into_iter()
            .find(|t| t.kind == kind)
            .map(|t| t.link_url)
            .context("No badge target configured")?,
        None => issues_page_url(&config.endpoints(), &config.coordinates()),
    };

    println!("Opening {}", url);
    open::that(&url).with_context(|| format!("Failed to open {}", url))?;
    Ok(())
}
