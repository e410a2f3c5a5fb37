//! Integration tests for badgeboard
//!
//! These drive the binary end to end. Network-backed commands run against
//! local axum servers configured through badgeboard.toml.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::net::SocketAddr;
use tempfile::TempDir;

/// Helper to create a badgeboard Command with a clean environment
fn badgeboard() -> Command {
    let mut cmd = cargo_bin_cmd!("badgeboard");
    cmd.env_remove("BADGEBOARD_OWNER")
        .env_remove("BADGEBOARD_REPO")
        .env_remove("BADGEBOARD_BRANCH")
        .env_remove("GITHUB_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create a temporary project directory
fn create_temp_project() -> TempDir {
    TempDir::new().unwrap()
}

fn write_config(dir: &TempDir, content: &str) {
    let config_dir = dir.path().join(".badgeboard");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("badgeboard.toml"), content).unwrap();
}

/// Serve `app` on an ephemeral port from a background runtime.
fn spawn_server(app: axum::Router) -> SocketAddr {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    rx.recv().unwrap()
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_badgeboard_help() {
        badgeboard()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("classify"));
    }

    #[test]
    fn test_badgeboard_version() {
        badgeboard().arg("--version").assert().success();
    }

    #[test]
    fn test_unknown_command_fails() {
        badgeboard().arg("frobnicate").assert().failure();
    }
}

// =============================================================================
// Classification
// =============================================================================

mod classify {
    use super::*;

    #[test]
    fn test_classify_passing_build_from_stdin() {
        let dir = create_temp_project();
        badgeboard()
            .current_dir(dir.path())
            .arg("classify")
            .write_stdin("<svg><text>build</text><text>passing</text></svg>")
            .assert()
            .success()
            .stdout(predicate::str::contains("status: success"))
            .stdout(predicate::str::contains("coverage: unknown"));
    }

    #[test]
    fn test_classify_coverage_from_file() {
        let dir = create_temp_project();
        let badge = dir.path().join("coverage.svg");
        fs::write(&badge, "<svg><text>coverage</text><text>85%</text></svg>").unwrap();

        badgeboard()
            .current_dir(dir.path())
            .arg("classify")
            .arg(&badge)
            .assert()
            .success()
            .stdout(predicate::str::contains("coverage: 85%"));
    }

    #[test]
    fn test_classify_json_output() {
        let dir = create_temp_project();
        let output = badgeboard()
            .current_dir(dir.path())
            .args(["classify", "--json"])
            .write_stdin("<svg><text>tests</text><text>failing</text></svg>")
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["status"], "failure");
        assert_eq!(value["coverage"], "unknown");
    }

    #[test]
    fn test_classify_bare_number_needs_loose_flag() {
        let dir = create_temp_project();
        badgeboard()
            .current_dir(dir.path())
            .arg("classify")
            .write_stdin("<svg><text>75</text></svg>")
            .assert()
            .success()
            .stdout(predicate::str::contains("coverage: unknown"));

        badgeboard()
            .current_dir(dir.path())
            .args(["classify", "--loose-coverage"])
            .write_stdin("<svg><text>75</text></svg>")
            .assert()
            .success()
            .stdout(predicate::str::contains("coverage: 75%"));
    }

    #[test]
    fn test_classify_error_keyword_is_opt_in() {
        let dir = create_temp_project();
        badgeboard()
            .current_dir(dir.path())
            .arg("classify")
            .write_stdin("<svg><text>build</text><text>error</text></svg>")
            .assert()
            .success()
            .stdout(predicate::str::contains("status: unknown"));

        badgeboard()
            .current_dir(dir.path())
            .args(["classify", "--error-as-failure"])
            .write_stdin("<svg><text>build</text><text>error</text></svg>")
            .assert()
            .success()
            .stdout(predicate::str::contains("status: failure"));
    }

    #[test]
    fn test_classify_parser_options_from_config() {
        let dir = create_temp_project();
        write_config(&dir, "[parser]\nallow_ungated_numeric_fallback = true\n");

        badgeboard()
            .current_dir(dir.path())
            .arg("classify")
            .write_stdin("<svg><text>75</text></svg>")
            .assert()
            .success()
            .stdout(predicate::str::contains("coverage: 75%"));
    }

    #[test]
    fn test_classify_shields_label() {
        let dir = create_temp_project();
        badgeboard()
            .current_dir(dir.path())
            .args(["classify", "--shields-label"])
            .write_stdin("error\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("status: failure"));
    }

    #[test]
    fn test_classify_missing_file_fails() {
        let dir = create_temp_project();
        badgeboard()
            .current_dir(dir.path())
            .args(["classify", "does-not-exist.svg"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read"));
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_init_creates_file() {
        let dir = create_temp_project();
        badgeboard()
            .current_dir(dir.path())
            .args(["config", "init", "--owner", "octo", "--repo", "widgets"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created badgeboard.toml"));

        let content = fs::read_to_string(dir.path().join(".badgeboard/badgeboard.toml")).unwrap();
        assert!(content.contains("owner = \"octo\""));
        assert!(content.contains("repo = \"widgets\""));
    }

    #[test]
    fn test_config_init_does_not_overwrite() {
        let dir = create_temp_project();
        write_config(&dir, "[repository]\nowner = \"keep\"\n");

        badgeboard()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));

        let content = fs::read_to_string(dir.path().join(".badgeboard/badgeboard.toml")).unwrap();
        assert!(content.contains("keep"));
    }

    #[test]
    fn test_config_validate_without_file() {
        let dir = create_temp_project();
        badgeboard()
            .current_dir(dir.path())
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Using defaults"));
    }

    #[test]
    fn test_config_validate_reports_warnings() {
        let dir = create_temp_project();
        write_config(&dir, "[refresh]\nstatus_interval_secs = 0\n");

        badgeboard()
            .current_dir(dir.path())
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration warnings"));
    }

    #[test]
    fn test_config_show_prefers_cli_and_env() {
        let dir = create_temp_project();
        write_config(&dir, "[repository]\nowner = \"file-owner\"\nrepo = \"file-repo\"\n");

        badgeboard()
            .current_dir(dir.path())
            .env("BADGEBOARD_REPO", "env-repo")
            .args(["config", "show", "--owner", "cli-owner"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cli-owner/env-repo"));
    }

    #[test]
    fn test_invalid_config_fails() {
        let dir = create_temp_project();
        write_config(&dir, "[repository\nowner = ");

        badgeboard()
            .current_dir(dir.path())
            .arg("links")
            .assert()
            .failure()
            .stderr(predicate::str::contains("badgeboard.toml"));
    }
}

// =============================================================================
// Links and UI state
// =============================================================================

mod links_and_state {
    use super::*;

    #[test]
    fn test_links_builds_badge_urls() {
        let dir = create_temp_project();
        badgeboard()
            .current_dir(dir.path())
            .args(["links", "--owner", "octo", "--repo", "widgets", "--branch", "dev"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "https://img.shields.io/github/workflow/status/octo/widgets/ci.yml?t=",
            ))
            .stdout(predicate::str::contains(
                "https://img.shields.io/coveralls/github/octo/widgets/dev.svg?t=",
            ))
            .stdout(predicate::str::contains("https://github.com/octo/widgets/issues"));
    }

    #[test]
    fn test_links_accepts_repository_url() {
        let dir = create_temp_project();
        badgeboard()
            .current_dir(dir.path())
            .args(["links", "--repo", "https://github.com/octo/widgets.git"])
            .assert()
            .success()
            .stdout(predicate::str::contains("octo/widgets"))
            .stdout(predicate::str::contains("https://github.com/octo/widgets/issues"));
    }

    #[test]
    fn test_links_json() {
        let dir = create_temp_project();
        let output = badgeboard()
            .current_dir(dir.path())
            .args(["links", "--json", "--owner", "octo", "--repo", "widgets"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let badges = value["badges"].as_array().unwrap();
        assert_eq!(badges.len(), 3);
        assert_eq!(badges[2]["kind"], "coverage");
        assert_eq!(
            badges[2]["link_url"],
            "https://coveralls.io/github/octo/widgets?branch=main"
        );
    }

    #[test]
    fn test_collapse_and_expand_persist() {
        let dir = create_temp_project();
        badgeboard()
            .current_dir(dir.path())
            .args(["collapse", "done"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Collapsed Done"));

        let state_path = dir.path().join(".badgeboard/ui_state.json");
        let state: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&state_path).unwrap()).unwrap();
        assert_eq!(state["collapsed"]["done"], true);

        badgeboard()
            .current_dir(dir.path())
            .args(["expand", "done"])
            .assert()
            .success();

        let state: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&state_path).unwrap()).unwrap();
        assert_eq!(state["collapsed"]["done"], false);
    }

    #[test]
    fn test_collapse_unknown_column_fails() {
        let dir = create_temp_project();
        badgeboard()
            .current_dir(dir.path())
            .args(["collapse", "someday"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid column"));
    }
}

// =============================================================================
// Network-backed commands against local servers
// =============================================================================

mod networked {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    fn badge_server() -> SocketAddr {
        let app = Router::new()
            .route(
                "/github/workflow/status/octo/widgets/ci.yml",
                get(|| async { "<svg><text>build</text><text>passing</text></svg>" }),
            )
            .route(
                "/github/workflow/status/octo/widgets/tests.yml",
                get(|| async { "<svg><text>tests</text><text>failing</text></svg>" }),
            )
            .route(
                "/coveralls/github/octo/widgets/main.svg",
                get(|| async { "<svg><text>coverage</text><text>87%</text></svg>" }),
            );
        spawn_server(app)
    }

    fn issue(number: u64, labels: &[&str]) -> Value {
        json!({
            "number": number,
            "title": format!("Issue {}", number),
            "body": null,
            "state": "open",
            "html_url": format!("https://github.com/octo/widgets/issues/{}", number),
            "labels": labels.iter().map(|name| json!({ "name": name, "color": null })).collect::<Vec<_>>(),
        })
    }

    /// GitHub API double. The slot records the last label update body.
    fn github_server() -> (SocketAddr, Arc<Mutex<Option<Value>>>) {
        let issues = json!([issue(1, &["status:todo", "bug"]), issue(2, &["status:review"])]);
        let recorded = Arc::new(Mutex::new(None));
        let patches = recorded.clone();

        let app = Router::new()
            .route(
                "/repos/octo/widgets/issues/{number}",
                get(|Path(number): Path<u64>| async move {
                    if number == 1 {
                        Ok(Json(issue(1, &["status:todo", "bug"])))
                    } else {
                        Err(StatusCode::NOT_FOUND)
                    }
                })
                .patch(move |Path(number): Path<u64>, Json(body): Json<Value>| {
                    let patches = patches.clone();
                    async move {
                        *patches.lock().unwrap() = Some(body);
                        Json(issue(number, &["bug", "status:done"]))
                    }
                }),
            )
            .route(
                "/repos/octo/widgets/issues",
                get(move || {
                    let issues = issues.clone();
                    async move { Json(issues) }
                }),
            )
            .route(
                "/repos/octo/widgets/actions/workflows/ci.yml/runs",
                get(|| async {
                    Json(json!({
                        "workflow_runs": [{
                            "id": 7,
                            "status": "queued",
                            "conclusion": null,
                            "html_url": "https://github.com/octo/widgets/actions/runs/7",
                            "head_branch": "main",
                        }]
                    }))
                }),
            );
        (spawn_server(app), recorded)
    }

    fn github_project(addr: SocketAddr) -> TempDir {
        let dir = create_temp_project();
        write_config(
            &dir,
            &format!(
                "[repository]\nowner = \"octo\"\nrepo = \"widgets\"\n\n[endpoints]\ngithub_api = \"http://{}\"\n",
                addr
            ),
        );
        dir
    }

    #[test]
    fn test_status_reads_every_badge() {
        let addr = badge_server();
        let dir = create_temp_project();
        write_config(
            &dir,
            &format!(
                "[repository]\nowner = \"octo\"\nrepo = \"widgets\"\n\n[endpoints]\nshields_base = \"http://{}\"\n",
                addr
            ),
        );

        let output = badgeboard()
            .current_dir(dir.path())
            .args(["status", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let snapshot: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(snapshot["readings"]["build"]["value"]["value"], "success");
        assert_eq!(snapshot["readings"]["tests"]["value"]["value"], "failure");
        assert_eq!(snapshot["readings"]["coverage"]["value"]["value"], 87.0);
        assert_eq!(snapshot["cycles"], 1);
    }

    #[test]
    fn test_status_unreachable_badges_are_unknown() {
        let dir = create_temp_project();
        write_config(
            &dir,
            "[endpoints]\nshields_base = \"http://127.0.0.1:1\"\n\n[refresh]\nrequest_timeout_secs = 2\n",
        );

        badgeboard()
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("unknown"));
    }

    #[test]
    fn test_board_groups_issues_by_label() {
        let (addr, _) = github_server();
        let dir = github_project(addr);

        let output = badgeboard()
            .current_dir(dir.path())
            .env("GITHUB_TOKEN", "ghp_testtoken")
            .args(["board", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["build"], "queued");
        assert_eq!(value["board"]["columns"]["todo"][0]["number"], 1);
        assert_eq!(value["board"]["columns"]["review"][0]["number"], 2);
    }

    #[test]
    fn test_move_relabels_issue() {
        let (addr, recorded) = github_server();
        let dir = github_project(addr);

        badgeboard()
            .current_dir(dir.path())
            .env("GITHUB_TOKEN", "ghp_testtoken")
            .args(["move", "1", "done"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Moved #1 to Done"));

        assert_eq!(
            *recorded.lock().unwrap(),
            Some(json!({ "labels": ["bug", "status:done"] }))
        );
    }

    #[test]
    fn test_move_missing_issue_fails() {
        let (addr, recorded) = github_server();
        let dir = github_project(addr);

        badgeboard()
            .current_dir(dir.path())
            .env("GITHUB_TOKEN", "ghp_testtoken")
            .args(["move", "42", "review"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Issue #42 not found"));
        assert!(recorded.lock().unwrap().is_none());
    }

    #[test]
    fn test_board_requires_token() {
        let dir = create_temp_project();
        badgeboard()
            .current_dir(dir.path())
            .arg("board")
            .assert()
            .failure()
            .stderr(predicate::str::contains("No GitHub token configured"));
    }
}
