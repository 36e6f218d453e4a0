use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn task_cli(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("task-cli").unwrap();
    cmd.env_remove("TASK_CLI_DB").env_remove("TASK_CLI_LOG");
    cmd.arg("--db").arg(db);
    cmd
}

fn read_tasks(db: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(db).unwrap()).unwrap()
}

#[test]
fn test_add_and_list_integration() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("tasks.json");

    task_cli(&db)
        .args(["add", "buy", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added successfully (ID: 1)"));

    task_cli(&db)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("| ID | Description | Status | Created At"))
        .stdout(predicate::str::contains("|  1 | buy milk    | todo   |"));
}

#[test]
fn test_file_format_integration() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("tasks.json");

    task_cli(&db).args(["add", "buy milk"]).assert().success();
    task_cli(&db).args(["mark-in-progress", "1"]).assert().success();

    let tasks = read_tasks(&db);
    let task = &tasks[0];
    assert_eq!(task["id"], 1);
    assert_eq!(task["description"], "buy milk");
    assert_eq!(task["status"], "in-progress");
    let created = task["createdAt"].as_str().unwrap();
    assert!(
        predicate::str::is_match(r"^\d{2}/\d{2}/\d{4} - \d{2}:\d{2}:\d{2}$").unwrap().eval(created),
        "unexpected timestamp {created}"
    );
    assert!(task["updatedAt"].is_string());
}

#[test]
fn test_scenario_integration() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("tasks.json");

    task_cli(&db).args(["add", "buy milk"]).assert().success();
    assert!(read_tasks(&db)[0]["updatedAt"].is_null());

    task_cli(&db)
        .args(["mark-done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status updated successfully!"));
    assert_eq!(read_tasks(&db)[0]["status"], "done");

    task_cli(&db).args(["add", "walk dog"]).assert().success();

    task_cli(&db)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task deleted successfully!"));

    task_cli(&db)
        .args(["update", "1", "walk", "the", "dog", "twice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task updated successfully!"));

    let tasks = read_tasks(&db);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["id"], 1);
    assert_eq!(tasks[0]["description"], "walk the dog twice");
}

#[test]
fn test_list_filter_integration() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("tasks.json");

    task_cli(&db).args(["add", "write report"]).assert().success();
    task_cli(&db).args(["add", "file taxes"]).assert().success();
    task_cli(&db).args(["mark-done", "2"]).assert().success();

    task_cli(&db)
        .args(["list", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("file taxes"))
        .stdout(predicate::str::contains("write report").not());

    task_cli(&db)
        .args(["list", "someday"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown status 'someday'"));
}

#[test]
fn test_out_of_range_integration() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("tasks.json");

    task_cli(&db).args(["add", "only task"]).assert().success();
    let before = fs::read_to_string(&db).unwrap();

    task_cli(&db)
        .args(["delete", "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Task was not deleted!"));
    task_cli(&db)
        .args(["mark-done", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Status was not updated!"));
    task_cli(&db)
        .args(["update", "-3", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Task was not updated!"));
    task_cli(&db)
        .args(["delete", "99999999999999999999"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Task was not deleted!"));

    assert_eq!(fs::read_to_string(&db).unwrap(), before);
}

#[test]
fn test_usage_errors_integration() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("tasks.json");

    task_cli(&db)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Please enter a command"));
    task_cli(&db)
        .arg("add")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Please enter the task description!"));
    task_cli(&db)
        .args(["delete", "abc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Task id must be an integer"));
    task_cli(&db)
        .arg("remove")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown command 'remove'"));
}

#[test]
fn test_help_integration() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("tasks.json");

    task_cli(&db)
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("mark-in-progress <id>"));
}

#[test]
fn test_corrupt_file_integration() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("tasks.json");
    fs::write(&db, "{ definitely not a task list").unwrap();

    task_cli(&db)
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load tasks"));
}

#[test]
fn test_env_var_selects_file_integration() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("from-env.json");

    let mut cmd = Command::cargo_bin("task-cli").unwrap();
    cmd.env("TASK_CLI_DB", &db).env_remove("TASK_CLI_LOG");
    cmd.args(["add", "via env"]).assert().success();

    assert_eq!(read_tasks(&db)[0]["description"], "via env");
}

#[test]
fn test_completions_integration() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("tasks.json");

    task_cli(&db)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("task-cli"));
    assert!(!db.exists());
}
