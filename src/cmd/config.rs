//! Configuration view and validation commands — `badgeboard config`.

use anyhow::Result;
use badgeboard::board_config::{BoardToml, CONFIG_DIR, CONFIG_FILE};
use std::path::Path;

use super::super::ConfigCommands;
use crate::Cli;

pub fn cmd_config(cli: &Cli, project_dir: &Path, command: Option<ConfigCommands>) -> Result<()> {
    let config_dir = project_dir.join(CONFIG_DIR);
    let config_path = config_dir.join(CONFIG_FILE);

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Badgeboard Configuration");
            println!("========================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No badgeboard.toml found at {}", config_path.display());
                println!("Using default configuration.");
            }
            println!();

            let toml = if config_path.exists() {
                BoardToml::load(&config_path)?
            } else {
                BoardToml::default()
            };
            print_toml(&toml);

            println!("Effective values (with env/CLI overrides):");
            let config = super::load_config(cli, project_dir)?;
            let coords = config.coordinates();
            println!("  repository = \"{}\" @ {}", coords.slug(), coords.branch);
            for target in config.badge_targets() {
                println!("  {:<9}= {}", target.kind, target.badge_url);
            }
            println!(
                "  github token = {}",
                if config.github_token().is_some() {
                    "set"
                } else {
                    "not set"
                }
            );
            println!();

            if !config_path.exists() {
                println!("Run 'badgeboard config init' to create a badgeboard.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No badgeboard.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = BoardToml::load(&config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("badgeboard.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if !config_dir.exists() {
                std::fs::create_dir_all(&config_dir)?;
            }

            let mut toml = BoardToml::default();
            if let Some(owner) = &cli.owner {
                toml.repository.owner = owner.clone();
            }
            if let Some(repo) = &cli.repo {
                toml.repository.repo = repo.clone();
            }
            if let Some(branch) = &cli.branch {
                toml.repository.branch = branch.clone();
            }
            toml.save(&config_path)?;

            println!("Created badgeboard.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [repository] owner, repo, branch, workflow files");
            println!("  - [parser] recognize_error_as_failure, allow_ungated_numeric_fallback");
            println!("  - [refresh] polling intervals and request timeout");
            println!();
        }
    }

    Ok(())
}

fn print_toml(toml: &BoardToml) {
    let repo = &toml.repository;
    println!("[repository]");
    println!("  owner = \"{}\"", repo.owner);
    println!("  repo = \"{}\"", repo.repo);
    println!("  branch = \"{}\"", repo.branch);
    println!("  workflow_file = \"{}\"", repo.workflow_file);
    println!("  test_workflow_file = \"{}\"", repo.test_workflow_file);
    println!();

    let endpoints = &toml.endpoints;
    println!("[endpoints]");
    println!("  shields_base = \"{}\"", endpoints.shields_base);
    println!("  coveralls_base = \"{}\"", endpoints.coveralls_base);
    println!("  github_web = \"{}\"", endpoints.github_web);
    println!("  github_api = \"{}\"", endpoints.github_api);
    println!();

    println!("[parser]");
    println!(
        "  recognize_error_as_failure = {}",
        toml.parser.recognize_error_as_failure
    );
    println!(
        "  allow_ungated_numeric_fallback = {}",
        toml.parser.allow_ungated_numeric_fallback
    );
    println!();

    println!("[refresh]");
    println!("  status_interval_secs = {}", toml.refresh.status_interval_secs);
    println!("  coverage_interval_secs = {}", toml.refresh.coverage_interval_secs);
    println!("  request_timeout_secs = {}", toml.refresh.request_timeout_secs);
    println!();

    println!("[board]");
    println!("  columns = [{}]", toml.board.columns.join(", "));
    println!();
}
