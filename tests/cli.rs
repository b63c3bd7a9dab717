//! End-to-end tests for the ez binary.

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A command wired to a throwaway data dir, forced local.
fn ez(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ez").unwrap();
    cmd.env("EZ_DATA_DIR", dir.path())
        .env_remove("EZ_BACKEND_URL")
        .env_remove("EZ_LOG")
        .arg("--local");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be one JSON document")
}

#[test]
fn test_add_complete_stats_flow() {
    let dir = TempDir::new().unwrap();

    let out = ez(&dir)
        .args(["add", "Write the report", "--mood", "focused", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let added = stdout_json(&out);
    assert_eq!(added["step"], "Open your doc and write the first sentence.");
    assert_eq!(added["mood"], "Focused");
    assert_eq!(added["source"], "local");
    let id = added["id"].as_str().unwrap().to_string();

    let out = ez(&dir).args(["complete", &id, "--json"]).output().unwrap();
    assert!(out.status.success());
    let receipt = stdout_json(&out);
    assert_eq!(receipt["xp_awarded"], 10);
    assert_eq!(receipt["xp"], 10);
    assert_eq!(receipt["level"], 1);
    assert_eq!(receipt["leveled_up"], false);

    let out = ez(&dir).args(["stats", "--json"]).output().unwrap();
    assert!(out.status.success());
    let stats = stdout_json(&out);
    assert_eq!(stats["xp"], 10);
    assert_eq!(stats["level"], 1);
    assert_eq!(stats["pending_tasks"], 0);
    assert_eq!(stats["xp_per_level"], 50);
}

#[test]
fn test_recent_lists_newest_first() {
    let dir = TempDir::new().unwrap();

    for title in ["First", "Second", "Third"] {
        let out = ez(&dir).args(["add", title, "--json"]).output().unwrap();
        assert!(out.status.success());
    }

    let out = ez(&dir)
        .args(["recent", "--limit", "2", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let recent = stdout_json(&out);
    assert_eq!(recent["count"], 2);
    assert_eq!(recent["tasks"][0]["title"], "Third");
    assert_eq!(recent["tasks"][1]["title"], "Second");
}

#[test]
fn test_unknown_id_gives_structured_error() {
    let dir = TempDir::new().unwrap();

    let out = ez(&dir)
        .args(["--quiet", "complete", "task_missing", "--json"])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(3));
    let err: Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(err["error"]["code"], "TASK_NOT_FOUND");
    assert_eq!(err["error"]["retryable"], false);
}

#[test]
fn test_invalid_mood_is_rejected() {
    let dir = TempDir::new().unwrap();

    let out = ez(&dir)
        .args(["--quiet", "add", "Task", "--mood", "angry", "--json"])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(4));
    let err: Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(err["error"]["code"], "INVALID_MOOD");
}

#[test]
fn test_breakdown_lifecycle() {
    let dir = TempDir::new().unwrap();

    let out = ez(&dir)
        .args([
            "breakdown",
            "start",
            "Clean the garage",
            "--mood",
            "low-energy",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(out.status.success());
    let plan = stdout_json(&out);
    assert_eq!(plan["total"], 5);
    assert_eq!(plan["completed"], 0);
    assert_eq!(plan["finished"], false);

    let out = ez(&dir)
        .args(["breakdown", "done", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let done = stdout_json(&out);
    assert_eq!(done["step_completed"], 1);
    assert_eq!(done["completed"], 1);
    assert_eq!(done["finished"], false);

    let out = ez(&dir)
        .args(["breakdown", "reset", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let reset = stdout_json(&out);
    assert_eq!(reset["cleared"], true);

    let out = ez(&dir)
        .args(["--quiet", "breakdown", "show", "--json"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn test_backend_set_show_clear() {
    let dir = TempDir::new().unwrap();

    let out = ez(&dir)
        .args(["backend", "set", "http://localhost:8000/", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let set = stdout_json(&out);
    assert_eq!(set["url"], "http://localhost:8000");

    let out = ez(&dir)
        .args(["backend", "show", "--json"])
        .output()
        .unwrap();
    let show = stdout_json(&out);
    assert_eq!(show["url"], "http://localhost:8000");
    assert_eq!(show["source"], "config");

    let out = ez(&dir)
        .args(["--quiet", "backend", "set", "not-a-url", "--json"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(4));

    let out = ez(&dir)
        .args(["backend", "clear", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let out = ez(&dir)
        .args(["backend", "show", "--json"])
        .output()
        .unwrap();
    let show = stdout_json(&out);
    assert!(show["url"].is_null());
}

#[test]
fn test_sync_requires_backend() {
    let dir = TempDir::new().unwrap();

    let out = ez(&dir)
        .args(["--quiet", "sync", "--json"])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(7));
    let err: Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(err["error"]["code"], "BACKEND_NOT_CONFIGURED");
}

#[test]
fn test_version_reports_crate_version() {
    let dir = TempDir::new().unwrap();

    let out = ez(&dir).args(["version", "--json"]).output().unwrap();
    assert!(out.status.success());
    let v = stdout_json(&out);
    assert_eq!(v["version"], env!("CARGO_PKG_VERSION"));
}
