use std::path::PathBuf;
use std::time::{Duration, Instant};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn explorer(log_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mongo-explorer").unwrap();
    cmd.env("HOME", log_dir.path()).env("LOG_DIR", log_dir.path());
    cmd
}

fn log_files(dir: &TempDir) -> Vec<PathBuf> {
    std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("mongo-explorer-") && name.ends_with(".log"))
        })
        .collect()
}

#[test]
fn info_mode_echoes_arguments_in_order() {
    let dir = TempDir::new().unwrap();
    explorer(&dir)
        .args(["-q", "-v", "zeta", "alpha", "beta"])
        .assert()
        .success()
        .stdout("[\"zeta\", \"alpha\", \"beta\"]\n")
        .stderr(predicate::str::contains(
            "[mongo-explorer]  Working directory is",
        ));
}

#[test]
fn flag_like_tokens_after_first_argument_are_echoed() {
    let dir = TempDir::new().unwrap();
    explorer(&dir)
        .args(["a", "-z", "-d"])
        .assert()
        .success()
        .stdout("[\"a\", \"-z\", \"-d\"]\n")
        .stderr(predicate::str::contains("Debugging level").not());
}

#[test]
fn info_mode_without_arguments_prints_empty_sequence() {
    let dir = TempDir::new().unwrap();
    explorer(&dir).assert().success().stdout("[]\n");
    assert_eq!(log_files(&dir).len(), 1);
}

#[test]
fn debug_level_notice() {
    let dir = TempDir::new().unwrap();
    explorer(&dir)
        .args(["-d", "-d", "-d"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Debugging level set to 3"));

    explorer(&dir)
        .args(["-D", "7"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Debugging level set to 7"));

    explorer(&dir)
        .args(["-D", "7", "-D", "4"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Debugging level set to 4"));

    explorer(&dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Debugging level").not());
}

#[test]
fn version_reports_failure_status() {
    let dir = TempDir::new().unwrap();
    explorer(&dir)
        .arg("-V")
        .assert()
        .code(1)
        .stdout(format!("[mongo-explorer]  Version: {VERSION}\n"));

    explorer(&dir)
        .args(["-q", "--version"])
        .assert()
        .code(1)
        .stdout(format!("{VERSION}\n"));
}

#[test]
fn help_prints_usage() {
    let dir = TempDir::new().unwrap();
    for flag in ["-h", "-?", "--help"] {
        explorer(&dir)
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("--debug-level"));
    }
}

#[test]
fn unknown_flag_prints_usage() {
    let dir = TempDir::new().unwrap();
    explorer(&dir)
        .arg("-z")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:"))
        .stderr(predicate::str::contains("-z"));
}

#[test]
fn malformed_debug_level_prints_usage() {
    let dir = TempDir::new().unwrap();
    explorer(&dir)
        .args(["-D", "lots"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn missing_home_does_nothing() {
    let dir = TempDir::new().unwrap();
    explorer(&dir)
        .env_remove("HOME")
        .args(["-f", "whatever"])
        .assert()
        .success()
        .stdout("Set HOME environment variable and re-run\n")
        .stderr("");
    assert!(log_files(&dir).is_empty());
}

#[test]
fn parse_mode_reformats_the_file() {
    let dir = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let base = data.path().join("somefile");
    std::fs::write(base.with_extension("log"), "one,1\ntwo,2\n").unwrap();

    explorer(&dir)
        .arg("-f")
        .arg(&base)
        .assert()
        .success()
        .stdout("Read 2 data items...\n");

    let out = std::fs::read_to_string(base.with_extension("dat")).unwrap();
    assert_eq!(out, "[one,1]\n[two,2]\n");

    let logs = log_files(&dir);
    assert_eq!(logs.len(), 1);
    let contents = std::fs::read_to_string(&logs[0]).unwrap();
    assert!(contents.contains(" -  INFO - Parsing"));
}

#[test]
fn parse_mode_quiet_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let base = data.path().join("quiet");
    std::fs::write(base.with_extension("log"), "x\n").unwrap();

    explorer(&dir)
        .arg("-q")
        .arg("--file")
        .arg(&base)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn parse_mode_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let base = data.path().join("missing");

    explorer(&dir)
        .arg("-f")
        .arg(&base)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.log: cannot open:"));
}

#[cfg(unix)]
#[test]
fn interrupt_while_parsing_exits_cleanly() {
    use std::process::{Command as StdCommand, Stdio};

    let dir = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let base = data.path().join("blocked");
    // opening a fifo with no writer blocks the worker
    let status = StdCommand::new("mkfifo")
        .arg(base.with_extension("log"))
        .status()
        .unwrap();
    assert!(status.success());

    let child = StdCommand::new(assert_cmd::cargo::cargo_bin("mongo-explorer"))
        .env("HOME", dir.path())
        .env("LOG_DIR", dir.path())
        .arg("-f")
        .arg(&base)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(20);
    loop {
        let started = log_files(&dir).iter().any(|path| {
            std::fs::read_to_string(path)
                .unwrap_or_default()
                .contains("reformatting")
        });
        if started {
            break;
        }
        assert!(Instant::now() < deadline, "worker never started");
        std::thread::sleep(Duration::from_millis(50));
    }
    std::thread::sleep(Duration::from_millis(300));

    let status = StdCommand::new("kill")
        .arg("-INT")
        .arg(child.id().to_string())
        .status()
        .unwrap();
    assert!(status.success());

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "[mongo-explorer]  Interrupted!\n"
    );
}
