//! End-to-end tests for the deskboard binary.
//!
//! Every test gets its own data and config directory so nothing touches the
//! real board.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Sandbox {
    data: TempDir,
    config: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            data: TempDir::new().expect("data dir"),
            config: TempDir::new().expect("config dir"),
        }
    }

    fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("deskboard").expect("binary");
        cmd.env("XDG_CONFIG_HOME", self.config.path())
            .env("DESKBOARD_LOG", "warn")
            .arg("--data-dir")
            .arg(self.data.path())
            .args(args);
        cmd
    }

    /// Runs `todo add` / `memo add` and returns the new id.
    fn add(&self, args: &[&str]) -> String {
        let output = self.cmd(args).assert().success().get_output().stdout.clone();
        let stdout = String::from_utf8(output).expect("utf-8");
        stdout
            .trim()
            .strip_prefix("Added ")
            .expect("add prints the id")
            .to_string()
    }
}

// --- layout ---

#[test]
fn layout_show_prints_default_columns() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["layout", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "left    clock, calendar, background, timer",
        ))
        .stdout(predicate::str::contains("center  addTodo, todoList"))
        .stdout(predicate::str::contains("right   memo [locked]"));
}

#[test]
fn layout_move_persists() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["layout", "move", "todoList", "right"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved todoList to the right column"));

    sandbox
        .cmd(&["layout", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("center  addTodo [locked]"))
        .stdout(predicate::str::contains("right   todoList, memo"));
    assert!(sandbox.data.path().join("widgetsLayout.json").exists());
}

#[test]
fn layout_move_before_anchor() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["layout", "move", "timer", "right", "--before", "memo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("right   timer, memo"));
}

#[test]
fn layout_move_last_widget_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["layout", "move", "memo", "left"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Layout error"))
        .stderr(predicate::str::contains("locked"));
}

#[test]
fn layout_move_unknown_widget_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["layout", "move", "weather", "left"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown widget id: weather"));
}

#[test]
fn layout_reset_restores_defaults() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["layout", "move", "clock", "right"])
        .assert()
        .success();
    sandbox
        .cmd(&["layout", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("right   memo [locked]"));
    assert!(!sandbox.data.path().join("widgetsLayout.json").exists());
}

// --- todo ---

#[test]
fn todo_add_and_list() {
    let sandbox = Sandbox::new();
    let id = sandbox.add(&["todo", "add", "water", "the", "plants"]);
    sandbox
        .cmd(&["todo", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{id}  [ ] water the plants")));
}

#[test]
fn todo_list_empty() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["todo", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No to-dos"));
}

#[test]
fn todo_add_rejects_bad_deadline() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["todo", "add", "taxes", "--deadline", "next tuesday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid deadline"));
}

#[test]
fn todo_overdue_filter() {
    let sandbox = Sandbox::new();
    sandbox.add(&["todo", "add", "late", "--deadline", "2000-01-01T00:00:00Z"]);
    sandbox.add(&["todo", "add", "later", "--deadline", "2999-01-01T00:00:00Z"]);
    sandbox
        .cmd(&["todo", "list", "--overdue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[!] late"))
        .stdout(predicate::str::contains("later").not());
}

#[test]
fn todo_list_json_holds_utc_deadline() {
    let sandbox = Sandbox::new();
    sandbox.add(&["todo", "add", "ship", "--deadline", "2030-05-01T12:00:00+02:00"]);
    let output = sandbox
        .cmd(&["todo", "list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let items: serde_json::Value = serde_json::from_slice(&output).expect("json");
    let items = items.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["text"], "ship");
    assert_eq!(items[0]["deadline"], "2030-05-01T10:00:00Z");
}

#[test]
fn todo_toggle_and_remove() {
    let sandbox = Sandbox::new();
    let id = sandbox.add(&["todo", "add", "call", "mom"]);
    sandbox
        .cmd(&["todo", "toggle", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("is now done"));
    sandbox
        .cmd(&["todo", "remove", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));
    sandbox
        .cmd(&["todo", "remove", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("To-do not found"));
}

#[test]
fn todo_edit_clears_deadline() {
    let sandbox = Sandbox::new();
    let id = sandbox.add(&["todo", "add", "plan", "--deadline", "2030-01-01"]);
    sandbox
        .cmd(&["todo", "edit", &id, "--text", "plan trip", "--clear-deadline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plan trip"))
        .stdout(predicate::str::contains("due").not());
}

#[test]
fn todo_batch_complete_and_purge() {
    let sandbox = Sandbox::new();
    let a = sandbox.add(&["todo", "add", "a"]);
    let b = sandbox.add(&["todo", "add", "b"]);
    sandbox
        .cmd(&["todo", "complete", &a, &b])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked 2 to-do(s) done"));
    sandbox
        .cmd(&["todo", "purge", &a, &b, "missing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 to-do(s)"));
}

// --- memo ---

#[test]
fn memo_add_list_clear() {
    let sandbox = Sandbox::new();
    let id = sandbox.add(&["memo", "add", "remember", "the", "milk"]);
    sandbox
        .cmd(&["memo", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{id}  remember the milk")));
    sandbox
        .cmd(&["memo", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 memo(s)"));
    sandbox
        .cmd(&["memo", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No memos"));
}

#[test]
fn memo_edit_unknown_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["memo", "edit", "nope", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Memo not found"));
}

// --- config ---

#[test]
fn config_path_honors_xdg() {
    let sandbox = Sandbox::new();
    let expected = sandbox.config.path().join("deskboard").join("config.toml");
    sandbox
        .cmd(&["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn config_init_then_validate() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd(&["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
    sandbox
        .cmd(&["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration"));
    sandbox
        .cmd(&["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
    sandbox.cmd(&["config", "init"]).assert().failure();
}

#[test]
fn invalid_config_is_reported() {
    let sandbox = Sandbox::new();
    let dir = sandbox.config.path().join("deskboard");
    std::fs::create_dir_all(&dir).expect("mkdir");
    std::fs::write(dir.join("config.toml"), "[tui]\ntick_rate = \"soon\"\n").expect("write");
    sandbox
        .cmd(&["todo", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}
