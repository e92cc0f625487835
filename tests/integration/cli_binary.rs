//! Runs the `jorge` binary: stdout on success, message and remedy on stderr
//! with the error's exit code on failure.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(dir: &Path, home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jorge"))
        .current_dir(dir)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove("JORGE_LOG")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_binary_init_and_ls() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("project");
    let home = temp_dir.path().join("home");
    fs::create_dir_all(&project).unwrap();
    fs::create_dir_all(&home).unwrap();
    fs::write(project.join(".env"), "A=1").unwrap();

    let output = run(&project, &home, &["init", "-c", ".env"]);
    assert!(
        output.status.success(),
        "init should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Created new jorge project"));

    let output = run(&project, &home, &["ls"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "* default");
}

#[test]
fn test_binary_exit_code_outside_project() {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");
    fs::create_dir_all(&home).unwrap();

    let output = run(temp_dir.path(), &home, &["commit"]);
    assert_eq!(output.status.code(), Some(100));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("jorge init"), "stderr={}", stderr);
}

#[test]
fn test_binary_unknown_environment() {
    let temp_dir = TempDir::new().unwrap();
    let project = temp_dir.path().join("project");
    let home = temp_dir.path().join("home");
    fs::create_dir_all(&project).unwrap();
    fs::create_dir_all(&home).unwrap();
    fs::write(project.join(".env"), "A=1").unwrap();
    assert!(run(&project, &home, &["init", "-c", ".env"]).status.success());

    let output = run(&project, &home, &["use", "staging"]);
    assert_eq!(output.status.code(), Some(111));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("jorge use -n staging"), "stderr={}", stderr);
}
