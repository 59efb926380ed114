//! Integration tests for the optshape binary.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test config file.
fn create_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let config_path = dir.path().join("grammar.toml");
    fs::write(&config_path, content).unwrap();
    config_path
}

/// Get a command with config path set via env var.
fn cmd_with_config(config_path: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("optshape");
    cmd.env("OPTSHAPE_CONFIG", config_path);
    cmd
}

/// Get a command pointing at a config that does not exist.
fn cmd_without_config(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("optshape");
    cmd.env("OPTSHAPE_CONFIG", home.path().join("nonexistent.toml"));
    cmd
}

const GNU_CONFIG: &str = r#"
[grammar]
preset = "gnu"

[[options]]
short = "v"

[[options]]
long = "file"
short = "f"
arity = "required"

[commands.dig]
help_flag = "-h"

[commands.git]
"#;

#[test]
fn test_parse_permutes() {
    let dir = TempDir::new().unwrap();
    let config = create_config(&dir, GNU_CONFIG);

    let input = r#"{"action":"parse","argv":["prog","x","-v","--file=a.txt"]}"#;

    cmd_with_config(&config)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"kind":"positional","value":"x"}]"#,
        ))
        .stdout(predicate::str::contains(r#""name":"file","value":"a.txt""#));
}

#[test]
fn test_help_on_broken_command_line() {
    let dir = TempDir::new().unwrap();
    let config = create_config(&dir, GNU_CONFIG);

    let input = r#"{"action":"parse","argv":["prog","--bogus","-f","--help"]}"#;

    cmd_with_config(&config)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"help":true}"#));
}

#[test]
fn test_unknown_option() {
    let dir = TempDir::new().unwrap();
    let config = create_config(&dir, GNU_CONFIG);

    let input = r#"{"action":"parse","argv":["prog","-vx"]}"#;

    cmd_with_config(&config)
        .write_stdin(input)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown option: -x"));
}

#[test]
fn test_missing_value() {
    let dir = TempDir::new().unwrap();
    let config = create_config(&dir, GNU_CONFIG);

    let input = r#"{"action":"parse","argv":["prog","-vf"]}"#;

    cmd_with_config(&config)
        .write_stdin(input)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("option requires a value: f"));
}

#[test]
fn test_missing_program_name() {
    let dir = TempDir::new().unwrap();
    let config = create_config(&dir, GNU_CONFIG);

    cmd_with_config(&config)
        .write_stdin(r#"{"action":"parse","argv":[]}"#)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing program name"));
}

#[test]
fn test_route_repairs_order() {
    let dir = TempDir::new().unwrap();
    let config = create_config(&dir, GNU_CONFIG);

    let input = r#"{"action":"route","args":["IN","A","dig","example.com"]}"#;

    cmd_with_config(&config)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"path":["dig"],"args":["IN","A","example.com"]}"#,
        ));
}

#[test]
fn test_route_ambiguous() {
    let dir = TempDir::new().unwrap();
    let config = create_config(&dir, GNU_CONFIG);

    let input = r#"{"action":"route","args":["IN","dig","git"]}"#;

    cmd_with_config(&config)
        .write_stdin(input)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ambiguous command line: candidates dig, git"));
}

#[test]
fn test_route_help_leaf() {
    let dir = TempDir::new().unwrap();
    let config = create_config(&dir, GNU_CONFIG);

    cmd_with_config(&config)
        .write_stdin(r#"{"action":"route","args":["help","dig"]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"path":["dig"],"args":["-h"]}"#));
}

#[test]
fn test_route_usage() {
    let dir = TempDir::new().unwrap();
    let config = create_config(&dir, GNU_CONFIG);

    cmd_with_config(&config)
        .write_stdin(r#"{"action":"route","args":[]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"path":[],"usage":true}"#));
}

#[test]
fn test_no_config_uses_gnu_defaults() {
    let dir = TempDir::new().unwrap();

    // No options registered, so any option is unknown.
    cmd_without_config(&dir)
        .write_stdin(r#"{"action":"parse","argv":["prog","--","-v"]}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"kind":"separator","text":"--"}"#));

    cmd_without_config(&dir)
        .write_stdin(r#"{"action":"parse","argv":["prog","-v"]}"#)
        .assert()
        .code(2);
}

#[test]
fn test_invalid_json() {
    let dir = TempDir::new().unwrap();
    let config = create_config(&dir, GNU_CONFIG);

    cmd_with_config(&config)
        .write_stdin("not valid json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to parse JSON"));
}

#[test]
fn test_invalid_config() {
    let dir = TempDir::new().unwrap();
    let config = create_config(
        &dir,
        r#"
[[options]]
long = "file"

[[options]]
long = "file"
"#,
    );

    cmd_with_config(&config)
        .write_stdin(r#"{"action":"parse","argv":["prog"]}"#)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("long option 'file' declared twice"));
}

#[test]
fn test_project_config_merges() {
    let dir = TempDir::new().unwrap();
    let config = create_config(&dir, GNU_CONFIG);
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join(".optshape.toml"),
        "[grammar]\npermute = false\n",
    )
    .unwrap();

    let input = format!(
        r#"{{"action":"parse","argv":["prog","x","-v"],"cwd":"{}"}}"#,
        project.path().display()
    );

    cmd_with_config(&config)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"kind":"positional","value":"x"},{"kind":"positional","value":"-v"}"#,
        ));
}

#[test]
fn test_audit_log_written() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("audit.jsonl");
    let config = create_config(
        &dir,
        &format!(
            "{}\n[audit]\nenabled = true\npath = \"{}\"\n",
            GNU_CONFIG,
            log_path.display()
        ),
    );

    cmd_with_config(&config)
        .write_stdin(r#"{"action":"route","args":["IN","dig","git"]}"#)
        .assert()
        .code(2);

    let content = fs::read_to_string(&log_path).unwrap();
    assert!(content.contains(r#""action":"route""#));
    assert!(content.contains(r#""error":"ambiguous_command_line""#));
}
