//! End-to-end tests of the `filecache` binary.

use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn filecache() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_filecache"));
    cmd.env_remove("RUST_LOG")
        .env_remove("FILECACHE_RECHECK_DELAY_SECS")
        .env_remove("FILECACHE_FINGERPRINT")
        .env_remove("FILECACHE_WATCH_INTERVAL_MS");
    cmd
}

#[test]
fn test_cat_prints_files() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "one\n").unwrap();
    fs::write(&b, "two\n").unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "recheck_delay_secs = 30\n").unwrap();

    let output = filecache()
        .arg("--config")
        .arg(&config)
        .arg("cat")
        .arg(&a)
        .arg(&b)
        .arg(&a)
        .arg("--stats")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, b"one\ntwo\none\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stats_line = stderr.lines().last().unwrap();
    let stats: serde_json::Value = serde_json::from_str(stats_line).unwrap();
    assert_eq!(stats["misses"], 2);
    assert_eq!(stats["fast_hits"], 1);
}

#[test]
fn test_missing_file_exit_code() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();

    let output = filecache()
        .arg("--config")
        .arg(&config)
        .arg("cat")
        .arg(dir.path().join("absent.txt"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FC002"), "stderr: {}", stderr);
    assert!(stderr.contains("File not found"), "stderr: {}", stderr);
}

#[test]
fn test_json_errors() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();
    let missing = dir.path().join("absent.txt");

    let output = filecache()
        .arg("--json-errors")
        .arg("--config")
        .arg(&config)
        .arg("cat")
        .arg(&missing)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["code"], "FC002");
    assert_eq!(err["exit_code"], 2);
    assert_eq!(err["path"], missing.to_str().unwrap());
}

#[test]
fn test_bad_recheck_delay_is_general_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();
    let file = dir.path().join("f.txt");
    fs::write(&file, "x").unwrap();

    let output = filecache()
        .arg("--config")
        .arg(&config)
        .arg("--recheck-delay=-1")
        .arg("cat")
        .arg(&file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_flag_overrides_invalid_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "recheck_delay_secs = -1\n").unwrap();
    let file = dir.path().join("f.txt");
    fs::write(&file, "fine").unwrap();

    let output = filecache()
        .arg("--config")
        .arg(&config)
        .arg("--recheck-delay")
        .arg("2")
        .arg("cat")
        .arg(&file)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(output.stdout, b"fine");
}

#[test]
fn test_invalid_config_file_without_override_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "recheck_delay_secs = -1\n").unwrap();
    let file = dir.path().join("f.txt");
    fs::write(&file, "fine").unwrap();

    let output = filecache()
        .arg("--config")
        .arg(&config)
        .arg("cat")
        .arg(&file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_watch_with_poll_limit() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();
    let file = dir.path().join("w.txt");
    fs::write(&file, "watched").unwrap();

    let output = filecache()
        .arg("--config")
        .arg(&config)
        .arg("watch")
        .arg(&file)
        .arg("--interval")
        .arg("5")
        .arg("--max-polls")
        .arg("3")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, b"watched");
}
