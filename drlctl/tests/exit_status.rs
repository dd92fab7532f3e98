// Exit-status tests for the drlctl binary.
//
// Runs the compiled binary with std::process::Command: 0 after a dispatch or a
// dry run, 1 when resolution fails, 2 for clap usage errors.

use std::fs;
use std::process::{Command, Output};

fn drlctl(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_drlctl"))
        .args(args)
        .output()
        .expect("Failed to run drlctl")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_default_launch_exits_zero() {
    let output = drlctl(&[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_dry_run_exits_zero() {
    for flag in ["--dry-run", "-n"] {
        let output = drlctl(&[flag]);
        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    }
}

#[test]
fn test_verbose_dry_run_prints_resolved_values() {
    let output = drlctl(&["--max-steps", "500", "--num-runs", "3", "-n", "-v"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.starts_with("Start running at "));
    assert!(text.contains("Hyper parameters are below."));
    assert!(text.contains("\"max_steps\": 500"));
    assert!(text.contains("\"num_runs\": 3"));
}

#[test]
fn test_missing_hparams_path_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-dir");

    let output = drlctl(&["--hparams", missing.to_str().unwrap(), "-n"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Config not found"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_hparams_directory_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("hparams.toml"),
        "[env_hparams]\nenv_id = \"Foo\"\n[run_hparams]\nverbose = true\n[nn_hparams]\n[agent_hparams]\n",
    )
    .unwrap();

    let output = drlctl(&["--hparams", dir.path().to_str().unwrap(), "--env-id", "Bar", "-n"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("\"env_id\": \"Bar\""));
}

#[test]
fn test_missing_group_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("hparams.toml"), "[env_hparams]\n[run_hparams]\n[nn_hparams]\n").unwrap();

    let output = drlctl(&["--hparams", dir.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("agent_hparams"));
}

#[test]
fn test_fractional_learn_rate_is_a_usage_error() {
    let output = drlctl(&["--learn-rate", "0.001", "-n"]);
    assert_eq!(output.status.code(), Some(2));
}
