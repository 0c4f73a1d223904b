//! CLI integration tests for tasksift
//!
//! Tests the tasksift CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tasksift_core::storage::{Database, DatabaseConfig};
use tempfile::TempDir;

const BOARD: &str = r#"
    INSERT INTO projects (id, name) VALUES (1, 'Website'), (10, 'Mobile App');
    INSERT INTO tasks (id, title, description, project_id) VALUES
        (1, 'Quarterly report', 'Collect numbers', 1),
        (2, 'Login page', 'Password reset flow', 1),
        (3, 'Push notifications', NULL, 10);
    INSERT INTO comments (task_id, comment) VALUES (2, 'needs a report link');
"#;

/// Isolated config directory and seeded database
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let workspace = Self { dir };
        seed(&workspace.database());
        workspace
    }

    fn database(&self) -> PathBuf {
        self.dir.path().join("board.db")
    }

    fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Command with config and database pointed into the workspace
    #[allow(deprecated)]
    fn tasksift(&self) -> Command {
        let mut cmd = Command::cargo_bin("tasksift").unwrap();
        cmd.current_dir(self.dir.path())
            .env("TASKSIFT_CONFIG_DIR", self.config_dir())
            .env_remove("TASKSIFT_DATABASE")
            .env_remove("RUST_LOG")
            .arg("--database")
            .arg(self.database());
        cmd
    }

    fn enable(&self, attributes: &[&str]) {
        self.tasksift()
            .args(["toggles", "enable"])
            .args(attributes)
            .assert()
            .success();
    }
}

fn seed(path: &Path) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async {
        let db = Database::new(DatabaseConfig::with_path(path)).await.unwrap();
        sqlx::raw_sql(BOARD).execute(db.pool()).await.unwrap();
        db.close().await;
    });
}

#[test]
fn test_help_lists_commands() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("tasksift").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("toggles"))
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn test_search_by_id_prefix() {
    let ws = Workspace::new();

    ws.tasksift()
        .args(["search", "#2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Login page"))
        .stdout(predicate::str::contains("Quarterly report").not());
}

#[test]
fn test_search_without_toggles_finds_nothing() {
    let ws = Workspace::new();

    ws.tasksift()
        .args(["search", "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_search_title_and_comment() {
    let ws = Workspace::new();
    ws.enable(&["title", "comment"]);

    ws.tasksift()
        .args(["search", "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quarterly report"))
        .stdout(predicate::str::contains("Login page"))
        .stdout(predicate::str::contains("2 task(s)"));
}

#[test]
fn test_search_json_output() {
    let ws = Workspace::new();
    ws.enable(&["title"]);

    let output = ws
        .tasksift()
        .args(["--format", "json", "search", "login", "--explain"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["query"], "login");
    assert_eq!(value["tasks"][0]["id"], 2);
    assert_eq!(value["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(value["composition"]["mode"]["mode"], "general");
    assert_eq!(value["composition"]["predicate"]["kind"], "id_in");
}

#[test]
fn test_explain_shows_sentinel() {
    let ws = Workspace::new();
    ws.enable(&["description"]);

    ws.tasksift()
        .args(["search", "xyz", "--explain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode: general"))
        .stdout(predicate::str::is_match(r"title\s+disabled").unwrap())
        .stdout(predicate::str::contains("[-1]"))
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_toggles_enable_disable_and_list() {
    let ws = Workspace::new();
    ws.enable(&["desc", "project"]);

    ws.tasksift()
        .args(["toggles", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("description_search = 1"))
        .stdout(predicate::str::contains("project_search = 1"))
        .stdout(predicate::str::contains("title_search = (unset)"));

    ws.tasksift()
        .args(["toggles", "disable", "project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Disabled project"));

    ws.tasksift()
        .args(["attributes"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"description\s+description_search\s+enabled").unwrap())
        .stdout(predicate::str::is_match(r"project\s+project_search\s+disabled").unwrap());
}

#[test]
fn test_unknown_attribute_reports_code() {
    let ws = Workspace::new();

    ws.tasksift()
        .args(["toggles", "enable", "title", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E801"))
        .stderr(predicate::str::contains("tasksift attributes"));

    // Nothing is written when any name is unknown
    ws.tasksift()
        .args(["toggles", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("title_search = (unset)"));
}

#[test]
fn test_config_set_changes_project_matching() {
    let ws = Workspace::new();
    ws.enable(&["project"]);

    // Project 1's id also occurs in project 10's id
    ws.tasksift()
        .args(["search", "website"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Push notifications"));

    ws.tasksift()
        .args(["config", "set", "search.project_match", "exact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set search.project_match = exact"));

    ws.tasksift()
        .args(["search", "website"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Login page"))
        .stdout(predicate::str::contains("Push notifications").not());
}

#[test]
fn test_config_list_and_reset() {
    let ws = Workspace::new();

    ws.tasksift()
        .args(["config", "set", "search.id_prefix", "strict"])
        .assert()
        .success();

    ws.tasksift()
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("search.id_prefix = strict"))
        .stdout(predicate::str::contains("search.metadata_ids = row"));

    ws.tasksift()
        .args(["search", "#abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E800"));

    ws.tasksift().args(["config", "reset"]).assert().success();

    ws.tasksift()
        .args(["config", "get", "search.id_prefix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("coerce"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let ws = Workspace::new();

    ws.tasksift()
        .args(["config", "set", "search.colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_doctor_reports_database() {
    let ws = Workspace::new();
    ws.enable(&["title"]);

    ws.tasksift()
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] Database: Connected"))
        .stdout(predicate::str::contains("[OK] Database: Schema v1"))
        .stdout(predicate::str::contains("[OK] Search: title"));
}
