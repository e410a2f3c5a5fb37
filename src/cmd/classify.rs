//! Offline badge classification — `badgeboard classify`.

use anyhow::{Context, Result};
use badgeboard::badge::{CoverageExtractor, StatusClassifier, classify_shields_status};
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::Cli;

pub struct ClassifyArgs {
    pub file: Option<PathBuf>,
    pub shields_label: bool,
    pub error_as_failure: bool,
    pub loose_coverage: bool,
    pub json: bool,
}

pub fn cmd_classify(cli: &Cli, project_dir: &Path, args: ClassifyArgs) -> Result<()> {
    let config = super::load_config(cli, project_dir)?;
    let mut options = config.parser_options();
    options.recognize_error_as_failure |= args.error_as_failure;
    options.allow_ungated_numeric_fallback |= args.loose_coverage;

    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read badge body from stdin")?;
            buf
        }
    };

    if args.shields_label {
        let status = classify_shields_status(Some(&text));
        if args.json {
            println!("{}", json!({ "status": status }));
        } else {
            println!("status: {}", status);
        }
        return Ok(());
    }

    let status = StatusClassifier::new(options).classify(&text);
    let coverage = CoverageExtractor::new(options).extract(&text);
    tracing::debug!(?options, %status, %coverage, "classified badge body");

    if args.json {
        println!("{}", json!({ "status": status, "coverage": coverage }));
    } else {
        println!("status: {}", status);
        println!("coverage: {}", coverage);
    }

    Ok(())
}
