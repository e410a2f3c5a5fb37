//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module      | Commands handled                          |
//! |-------------|-------------------------------------------|
//! | `classify`  | `Classify`                                |
//! | `dashboard` | `Status`, `Watch`, `Links`, `Open`        |
//! | `board`     | `Board`, `Move`, `Collapse`, `Expand`     |
//! | `config`    | `Config`                                  |

pub mod board;
pub mod classify;
pub mod config;
pub mod dashboard;

pub use board::{cmd_board, cmd_collapse, cmd_move};
pub use classify::{ClassifyArgs, cmd_classify};
pub use config::cmd_config;
pub use dashboard::{cmd_links, cmd_open, cmd_status, cmd_watch};

use anyhow::Result;
use badgeboard::board_config::{BoardConfig, CliOverrides};
use std::path::Path;

use crate::Cli;

/// Resolve configuration for a command: file, then environment, then CLI flags.
pub fn load_config(cli: &Cli, project_dir: &Path) -> Result<BoardConfig> {
    BoardConfig::with_cli_args(
        project_dir.to_path_buf(),
        CliOverrides {
            owner: cli.owner.clone(),
            repo: cli.repo.clone(),
            branch: cli.branch.clone(),
        },
    )
}
