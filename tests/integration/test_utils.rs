//! Shared test utilities for integration tests
//!
//! Provides project setup and XDG isolation so tests never depend on the
//! caller's home directory or working directory.

use jorge::environment::EnvCommandService;
use jorge::project::ProjectRoot;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize XDG environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }

    fn restore(self) {
        match self.home {
            Some(orig) => std::env::set_var("HOME", orig),
            None => std::env::remove_var("HOME"),
        }
        match self.xdg_config_home {
            Some(orig) => std::env::set_var("XDG_CONFIG_HOME", orig),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir`.
///
/// A global mutex prevents parallel tests from racing on the variables;
/// the originals are restored afterwards.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_config_home = test_dir.path().join("config");
    let test_home = test_dir.path().join("home");
    fs::create_dir_all(&test_config_home).unwrap();
    fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", &test_config_home);

    let result = f();

    env_state.restore();
    result
}

/// Initialized project in a fresh temp dir tracking `.env` with `contents`.
pub fn project_with_file(contents: &str) -> (TempDir, ProjectRoot) {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), contents).unwrap();
    EnvCommandService::init(temp_dir.path(), Path::new(".env"), None).unwrap();
    let root = jorge::project::resolve_root(temp_dir.path()).unwrap();
    (temp_dir, root)
}
