use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "badgeboard")]
#[command(version, about = "Kanban board for GitHub issues with CI status and coverage badges")]
pub struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Repository owner. Overrides badgeboard.toml and BADGEBOARD_OWNER.
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Repository name. Overrides badgeboard.toml and BADGEBOARD_REPO.
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// Branch used for the coverage badge and workflow runs.
    #[arg(long, global = true)]
    pub branch: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a badge body read from a file or stdin (offline)
    Classify {
        /// File holding the badge body; stdin when omitted
        file: Option<PathBuf>,
        /// Treat the input as a shields.io message label
        #[arg(long)]
        shields_label: bool,
        /// Count "error" as a failure keyword
        #[arg(long)]
        error_as_failure: bool,
        /// Accept a bare number as coverage without a coverage keyword
        #[arg(long)]
        loose_coverage: bool,
        #[arg(long)]
        json: bool,
    },
    /// Fetch every badge once and print the result
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Keep polling badges and redraw on every change (Ctrl-C to stop)
    Watch,
    /// Show open issues as a kanban board
    Board {
        /// Include closed issues (shown in Done)
        #[arg(long)]
        all: bool,
        #[arg(long)]
        json: bool,
    },
    /// Move an issue to another column by relabelling it
    Move { issue: u64, column: String },
    /// Collapse a board column
    Collapse { column: String },
    /// Expand a collapsed board column
    Expand { column: String },
    /// Print badge and link URLs
    Links {
        #[arg(long)]
        json: bool,
    },
    /// Open a dashboard link in the browser
    Open {
        #[arg(value_enum)]
        target: OpenTarget,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default badgeboard.toml file
    Init,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OpenTarget {
    Build,
    Tests,
    Coverage,
    Issues,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    badgeboard::telemetry::init_tracing(cli.log_json, level);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Classify {
            file,
            shields_label,
            error_as_failure,
            loose_coverage,
            json,
        } => cmd::cmd_classify(
            &cli,
            &project_dir,
            cmd::ClassifyArgs {
                file: file.clone(),
                shields_label: *shields_label,
                error_as_failure: *error_as_failure,
                loose_coverage: *loose_coverage,
                json: *json,
            },
        )?,
        Commands::Status { json } => cmd::cmd_status(&cli, &project_dir, *json).await?,
        Commands::Watch => cmd::cmd_watch(&cli, &project_dir).await?,
        Commands::Board { all, json } => cmd::cmd_board(&cli, &project_dir, *all, *json).await?,
        Commands::Move { issue, column } => {
            cmd::cmd_move(&cli, &project_dir, *issue, column).await?
        }
        Commands::Collapse { column } => cmd::cmd_collapse(&cli, &project_dir, column, true)?,
        Commands::Expand { column } => cmd::cmd_collapse(&cli, &project_dir, column, false)?,
        Commands::Links { json } => cmd::cmd_links(&cli, &project_dir, *json)?,
        Commands::Open { target } => cmd::cmd_open(&cli, &project_dir, *target)?,
        Commands::Config { command } => cmd::cmd_config(&cli, &project_dir, command.clone())?,
    }

    Ok(())
}
