//! Tool configuration: global XDG file and JORGE__ environment overrides.

use jorge::config::{global_config_path, ConfigLoader};
use std::fs;
use tempfile::TempDir;

use crate::integration::with_xdg_env;

#[test]
fn test_defaults_without_global_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.project.ignore_target(), Some(".gitignore"));
    });
}

#[test]
fn test_global_file_is_read() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let path = global_config_path().unwrap();
        assert!(path.starts_with(test_dir.path()));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            "[logging]\nlevel = \"info\"\n\n[project]\nignore_file = \".hgignore\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.project.ignore_target(), Some(".hgignore"));
    });
}

#[test]
fn test_environment_overrides_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let path = global_config_path().unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[project]\nupdate_ignore_file = true\n").unwrap();

        std::env::set_var("JORGE__PROJECT__UPDATE_IGNORE_FILE", "false");
        let config = ConfigLoader::load();
        std::env::remove_var("JORGE__PROJECT__UPDATE_IGNORE_FILE");

        let config = config.unwrap();
        assert!(!config.project.update_ignore_file);
        assert_eq!(config.project.ignore_target(), None);
    });
}

#[test]
fn test_invalid_global_file_is_config_error() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let path = global_config_path().unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[logging\nlevel = ").unwrap();

        let err = ConfigLoader::load().unwrap_err();
        assert_eq!(err.code(), 121);
        assert!(err.cause().is_some(), "parse failure should keep its cause");
    });
}
