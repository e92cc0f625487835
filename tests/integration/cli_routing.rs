//! CLI routing through `RunContext`: command output and error mapping.

use jorge::cli::{Commands, RunContext};
use jorge::config::{ProjectSettings, ToolConfig};
use jorge::error::JorgeError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn context(dir: &TempDir) -> RunContext {
    RunContext::new(dir.path().to_path_buf(), &ToolConfig::default())
}

fn init(ctx: &RunContext) -> String {
    ctx.execute(&Commands::Init {
        config: Some(PathBuf::from(".env")),
    })
    .unwrap()
}

#[test]
fn test_init_then_ls() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "A=1").unwrap();
    let ctx = context(&temp_dir);

    let output = init(&ctx);
    assert!(output.starts_with("Created new jorge project"));

    let listed = ctx
        .execute(&Commands::Ls {
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(listed, "* default");

    let gitignore = fs::read_to_string(temp_dir.path().join(".gitignore")).unwrap();
    assert!(gitignore.lines().any(|l| l == ".jorge"));
}

#[test]
fn test_init_respects_disabled_ignore_update() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "A=1").unwrap();
    let config = ToolConfig {
        project: ProjectSettings {
            update_ignore_file: false,
            ..ProjectSettings::default()
        },
        ..ToolConfig::default()
    };
    let ctx = RunContext::new(temp_dir.path().to_path_buf(), &config);

    init(&ctx);
    assert!(!temp_dir.path().join(".gitignore").exists());
}

#[test]
fn test_init_twice_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "A=1").unwrap();
    let ctx = context(&temp_dir);
    init(&ctx);

    let err = ctx
        .execute(&Commands::Init {
            config: Some(PathBuf::from(".env")),
        })
        .unwrap_err();
    assert!(matches!(err, JorgeError::AlreadyAProject { .. }));
    assert_eq!(err.code(), 101);
}

#[test]
fn test_commands_outside_project_fail() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(&temp_dir);

    let err = ctx.execute(&Commands::Commit).unwrap_err();
    assert!(matches!(err, JorgeError::NotAProject { .. }));
    assert_eq!(err.code(), 100);
}

#[test]
fn test_use_commit_restore_messages() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "A=1").unwrap();
    let ctx = context(&temp_dir);
    init(&ctx);

    let used = ctx
        .execute(&Commands::Use {
            env: "dev".to_string(),
            new: true,
        })
        .unwrap();
    assert!(used.ends_with("Using environment dev"));

    fs::write(temp_dir.path().join(".env"), "A=dev").unwrap();
    assert_eq!(ctx.execute(&Commands::Commit).unwrap(), "Target file updated");
    assert_eq!(ctx.execute(&Commands::Restore).unwrap(), "Env restored");

    let listed = ctx
        .execute(&Commands::Ls {
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(listed, "default\n* dev");
}

#[test]
fn test_empty_file_reports_nothing_to_do() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "").unwrap();
    let ctx = context(&temp_dir);
    init(&ctx);

    assert_eq!(
        ctx.execute(&Commands::Commit).unwrap(),
        "Target file is empty. Nothing to do"
    );
}

#[test]
fn test_rm_active_environment_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "A=1").unwrap();
    let ctx = context(&temp_dir);
    init(&ctx);

    let err = ctx
        .execute(&Commands::Rm {
            env: "default".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, JorgeError::RemoveActiveEnvironment(_)));
    assert!(temp_dir.path().join(".jorge/envs/default/.env").is_file());
}

#[test]
fn test_use_duplicate_environment_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "A=1").unwrap();
    let ctx = context(&temp_dir);
    init(&ctx);

    let new_dev = Commands::Use {
        env: "dev".to_string(),
        new: true,
    };
    ctx.execute(&new_dev).unwrap();
    let err = ctx.execute(&new_dev).unwrap_err();
    assert!(matches!(err, JorgeError::EnvironmentAlreadyExists(_)));

    let envs: Vec<_> = fs::read_dir(temp_dir.path().join(".jorge/envs"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name() == "dev")
        .collect();
    assert_eq!(envs.len(), 1);
}

#[test]
fn test_status_json() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "A=1").unwrap();
    let ctx = context(&temp_dir);
    init(&ctx);

    let output = ctx
        .execute(&Commands::Status {
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["state"]["currentEnv"], "default");
    assert_eq!(value["state"]["configFilePath"], ".env");
    assert_eq!(value["committed"], true);
    assert_eq!(value["environment_count"], 1);
}
