//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with a temporary config and scripted stdin,
//! then check its output and the resumption line it leaves behind.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

struct Sandbox {
    dir: tempfile::TempDir,
}

impl Sandbox {
    /// Temp dir with a config whose continue file lives inside it.
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let continue_file = dir.path().join("continue");
        let config = format!(
            "[timer]\ninterval-short = 60000\ninterval-long = 60000\n\n[system]\nentrypoint = \"finalhour\"\ncontinue-file = {:?}\n",
            continue_file.display().to_string()
        );
        std::fs::write(dir.path().join("config.toml"), config).unwrap();
        Self { dir }
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn continue_file(&self) -> PathBuf {
        self.dir.path().join("continue")
    }

    /// Run the CLI with `input` on stdin and return (stdout, stderr, code).
    fn run(&self, args: &[&str], input: &str) -> (String, String, i32) {
        run_cli(&self.config(), self.dir.path(), args, input)
    }
}

fn run_cli(config: &Path, home: &Path, args: &[&str], input: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_finalhour"))
        .args(args)
        .arg("--config")
        .arg(config)
        .env("HOME", home)
        .env("FINALHOUR_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start CLI");

    let mut stdin = child.stdin.take().unwrap();
    match stdin.write_all(input.as_bytes()) {
        // The CLI may exit before reading, e.g. on an invalid start time.
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
        result => result.unwrap(),
    }
    drop(stdin);
    let output = child.wait_with_output().expect("Failed to wait for CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_invalid_start_is_fatal() {
    let sandbox = Sandbox::new();
    for args in [
        ["--day", "4", "--hour", "5", "--minute", "0"],
        ["--day", "1", "--hour", "24", "--minute", "0"],
        ["--day", "1", "--hour", "5", "--minute", "-1"],
    ] {
        let (_, stderr, code) = sandbox.run(&args, "quit\n");
        assert_eq!(code, 1, "started with {args:?}");
        assert!(stderr.contains("is invalid"), "stderr: {stderr}");
    }
    assert!(!sandbox.continue_file().exists());
}

#[test]
fn test_invalid_start_with_long_input_is_fatal() {
    let sandbox = Sandbox::new();
    let input = "status\n".repeat(100_000);
    let (_, stderr, code) = sandbox.run(&["--day", "0"], &input);
    assert_eq!(code, 1);
    assert!(stderr.contains("is invalid"), "stderr: {stderr}");
}

#[test]
fn test_quit_writes_resumption_line() {
    let sandbox = Sandbox::new();
    let (stdout, _, code) = sandbox.run(
        &["--day", "2", "--hour", "10", "--minute", "30"],
        "forward\nsave Alpha\nquit\n",
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("11:00"));
    assert!(stdout.contains("saved \"Alpha\" at Day 2, hour 11, min 0"));

    let line = std::fs::read_to_string(sandbox.continue_file()).unwrap();
    assert_eq!(
        line,
        "finalhour --day 2 --hour 11 --minute 0 --saves=\"Alpha@2.11.00\"\n"
    );
}

#[test]
fn test_end_of_input_also_saves() {
    let sandbox = Sandbox::new();
    let (_, _, code) = sandbox.run(&[], "");
    assert_eq!(code, 0);
    let line = std::fs::read_to_string(sandbox.continue_file()).unwrap();
    assert_eq!(line, "finalhour --day 1 --hour 5 --minute 0\n");
}

#[test]
fn test_broken_saves_are_reported_not_fatal() {
    let sandbox = Sandbox::new();
    let (stdout, _, code) = sandbox.run(
        &["--day", "1", "--hour", "5", "--minute", "0", "--saves=Alpha@2.10.30,broken,Beta@1.05.00"],
        "load Alpha\nsaves\nquit\n",
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("could not restore saves: broken"));
    assert!(stdout.contains("\"Beta\", day 1 at 05:00"));

    let line = std::fs::read_to_string(sandbox.continue_file()).unwrap();
    assert_eq!(
        line,
        "finalhour --day 2 --hour 10 --minute 30 --saves=\"Alpha@2.10.30,Beta@1.05.00\"\n"
    );
}

#[test]
fn test_status_prints_json() {
    let sandbox = Sandbox::new();
    let (stdout, _, code) = sandbox.run(&["--day", "3", "--hour", "12", "--minute", "15"], "status\nquit\n");
    assert_eq!(code, 0);

    let start = stdout.find('{').expect("no JSON in output");
    let end = stdout.rfind('}').expect("no JSON in output");
    let json: serde_json::Value = serde_json::from_str(&stdout[start..=end]).unwrap();
    assert_eq!(json["time"], "3.12.15");
    assert_eq!(json["state"], "paused");
    assert_eq!(json["period"], "morning");
    assert_eq!(json["arc_extent"], -90);
}

#[test]
fn test_config_get_and_set() {
    let sandbox = Sandbox::new();
    let (stdout, _, code) = sandbox.run(&["config", "get", "timer.interval-short"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "60000");

    let (_, _, code) = sandbox.run(&["config", "set", "timer.bell-hours", "6,18"], "");
    assert_eq!(code, 0);
    let (stdout, _, _) = sandbox.run(&["config", "get", "timer.bell-hours"], "");
    assert_eq!(stdout.trim(), "[6,18]");

    let (_, stderr, code) = sandbox.run(&["config", "get", "timer.nope"], "");
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_default_config_is_written_under_home() {
    let home = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_finalhour"))
        .current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("FINALHOUR_ENV")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to run CLI");
    assert_eq!(output.status.code(), Some(0));

    assert!(home.path().join(".config/finalhour/config.toml").exists());
    let line = std::fs::read_to_string(home.path().join("continue")).unwrap();
    assert_eq!(line, "finalhour --day 1 --hour 5 --minute 0\n");
}
