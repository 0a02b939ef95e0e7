//! Process-level startup behaviour of the outline-mcp binary.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde_json::{json, Value};

/// Empty working directory so no `.env` file is picked up.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("outline-mcp-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn missing_api_key_exits_with_one_fatal_line() {
    let output = Command::new(env!("CARGO_BIN_EXE_outline-mcp"))
        .arg("--stdio")
        .env_remove("OUTLINE_API_KEY")
        .env_remove("OUTLINE_API_URL")
        .current_dir(scratch_dir("no-key"))
        .stdin(Stdio::null())
        .output()
        .expect("failed to run outline-mcp");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "stdout must stay clean");

    let stderr = String::from_utf8(output.stderr).expect("stderr is not UTF-8");
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "expected exactly one line, got: {stderr}");

    let line: Value = serde_json::from_str(lines[0]).expect("fatal line is not JSON");
    assert_eq!(
        line,
        json!({
            "jsonrpc": "2.0",
            "error": {
                "code": -32603,
                "message": "OUTLINE_API_KEY environment variable is required"
            }
        })
    );
}

#[test]
fn blank_api_key_is_treated_as_missing() {
    let output = Command::new(env!("CARGO_BIN_EXE_outline-mcp"))
        .env("OUTLINE_API_KEY", "   ")
        .current_dir(scratch_dir("blank-key"))
        .stdin(Stdio::null())
        .output()
        .expect("failed to run outline-mcp");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.contains("OUTLINE_API_KEY environment variable is required"));
}

#[test]
fn malformed_env_file_is_reported_instead_of_missing_key() {
    let dir = scratch_dir("bad-dotenv");
    std::fs::write(dir.join(".env"), "OUTLINE_API_KEY='unterminated\n").expect("write .env");

    let output = Command::new(env!("CARGO_BIN_EXE_outline-mcp"))
        .env_remove("OUTLINE_API_KEY")
        .current_dir(&dir)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run outline-mcp");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "stdout must stay clean");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "expected exactly one line, got: {stderr}");
    let line: Value = serde_json::from_str(stderr.trim()).expect("fatal line is not JSON");
    assert_eq!(line["error"]["code"], -32603);
    let message = line["error"]["message"].as_str().unwrap_or_default();
    assert!(message.starts_with("Failed to load .env file"), "{message}");
}
