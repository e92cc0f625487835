//! Configuration System
//!
//! Tool-wide settings, distinct from the per-project state record. Read from
//! `$XDG_CONFIG_HOME/jorge/config.toml` (or a file passed with `--settings`) and
//! overridden by `JORGE__`-prefixed environment variables.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Settings applied to new projects
    #[serde(default)]
    pub project: ProjectSettings,
}

/// Settings applied by `init`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Ignore file, relative to the project root, that receives the marker directory
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Append the marker directory to the ignore file on init
    #[serde(default = "default_true")]
    pub update_ignore_file: bool,
}

fn default_ignore_file() -> String {
    ".gitignore".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            ignore_file: default_ignore_file(),
            update_ignore_file: default_true(),
        }
    }
}

impl ProjectSettings {
    /// The ignore file `init` should update, if any.
    pub fn ignore_target(&self) -> Option<&str> {
        if self.update_ignore_file && !self.ignore_file.trim().is_empty() {
            Some(self.ignore_file.as_str())
        } else {
            None
        }
    }
}
