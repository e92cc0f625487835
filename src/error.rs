//! Error types for the jorge environment switcher.
//!
//! Every failure carries a user-facing message (its `Display`), a suggested
//! remedy, a numeric exit code and, where one exists, the underlying cause.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Domain errors surfaced by every core operation.
#[derive(Debug, Error)]
pub enum JorgeError {
    #[error("Active directory does not belong in a jorge project")]
    NotAProject { start: PathBuf },

    #[error("Directory {} already belongs to a jorge project", root.display())]
    AlreadyAProject { root: PathBuf },

    #[error("Path to .jorge is not a directory: {}", .0.display())]
    MarkerNotDirectory(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Corrupted internal jorge directory (.jorge): {} is missing", path.display())]
    StateMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not open the jorge configuration: {} is not a regular file", .0.display())]
    StateNotRegularFile(PathBuf),

    #[error("Could not read jorge config yaml file {}", path.display())]
    StateCorrupt {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Could not write jorge config yaml file {}", path.display())]
    StateWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read configuration file {}", path.display())]
    TrackedFileMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Target file is not a regular file: {}", .0.display())]
    NotARegularFile(PathBuf),

    #[error("Error constructing path {}", path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Path {} is outside the jorge project at {}", path.display(), root.display())]
    OutsideProject { path: PathBuf, root: PathBuf },

    #[error("Could not create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not create internal directory for environment '{env}'")]
    CreateEnvironmentDir {
        env: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not open target file {}", path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write to file {}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not store configuration file for environment '{env}'")]
    StoreFailed {
        env: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read the environments directory {}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not remove {}", path.display())]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Environment '{0}' already exists")]
    EnvironmentAlreadyExists(String),

    #[error("Environment '{0}' does not exist")]
    EnvironmentNotFound(String),

    #[error("Environment '{0}' is currently in use and cannot be removed")]
    RemoveActiveEnvironment(String),

    #[error("Invalid environment name: '{0}'")]
    InvalidEnvironmentName(String),

    #[error("Failed to get user input")]
    Prompt {
        #[source]
        source: dialoguer::Error,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<config::ConfigError>,
    },

    #[error("Could not open log file {}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize output")]
    Serialize(#[from] serde_json::Error),
}

impl From<config::ConfigError> for JorgeError {
    fn from(source: config::ConfigError) -> Self {
        JorgeError::Config {
            message: source.to_string(),
            source: Some(source),
        }
    }
}

impl From<dialoguer::Error> for JorgeError {
    fn from(source: dialoguer::Error) -> Self {
        JorgeError::Prompt { source }
    }
}

impl JorgeError {
    /// Configuration error without an underlying cause.
    pub fn config(message: impl Into<String>) -> Self {
        JorgeError::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Numeric code used as the process exit status. Never 0.
    pub fn code(&self) -> i32 {
        match self {
            JorgeError::NotAProject { .. } => 100,
            JorgeError::AlreadyAProject { .. } => 101,
            JorgeError::MarkerNotDirectory(_) => 2,
            JorgeError::NotADirectory(_) => 2,
            JorgeError::StateMissing { .. } => 103,
            JorgeError::StateNotRegularFile(_) => 104,
            JorgeError::StateCorrupt { .. } => 105,
            JorgeError::StateWrite { .. } => 106,
            JorgeError::TrackedFileMissing { .. } => 107,
            JorgeError::NotARegularFile(_) => 4,
            JorgeError::PathResolution { .. } => 8,
            JorgeError::OutsideProject { .. } => 8,
            JorgeError::CreateDir { .. } => 3,
            JorgeError::CreateEnvironmentDir { .. } => 108,
            JorgeError::OpenFailed { .. } => 6,
            JorgeError::WriteFailed { .. } => 7,
            JorgeError::StoreFailed { .. } => 110,
            JorgeError::ReadDir { .. } => 103,
            JorgeError::RemoveFailed { .. } => 9,
            JorgeError::EnvironmentAlreadyExists(_) => 109,
            JorgeError::EnvironmentNotFound(_) => 111,
            JorgeError::RemoveActiveEnvironment(_) => 112,
            JorgeError::InvalidEnvironmentName(_) => 113,
            JorgeError::Prompt { .. } => 120,
            JorgeError::Config { .. } => 121,
            JorgeError::LogFile { .. } => 121,
            JorgeError::Serialize(_) => 122,
        }
    }

    /// Suggested next step for the user.
    pub fn remedy(&self) -> String {
        match self {
            JorgeError::NotAProject { .. } => {
                "Please run `jorge init` to initialize a jorge project".to_string()
            }
            JorgeError::AlreadyAProject { .. } => {
                "Do not try to initialize a directory which is already a jorge project".to_string()
            }
            JorgeError::MarkerNotDirectory(path) | JorgeError::NotADirectory(path) => {
                format!("Make sure {} is a directory", path.display())
            }
            JorgeError::StateMissing { .. }
            | JorgeError::StateNotRegularFile(_)
            | JorgeError::StateCorrupt { .. }
            | JorgeError::StateWrite { .. }
            | JorgeError::ReadDir { .. } => REPAIR_REMEDY.to_string(),
            JorgeError::TrackedFileMissing { path, .. }
            | JorgeError::NotARegularFile(path)
            | JorgeError::PathResolution { path, .. }
            | JorgeError::OpenFailed { path, .. } => format!(
                "Make sure {} file exist and is readable by the user",
                path.display()
            ),
            JorgeError::OutsideProject { root, .. } => format!(
                "Choose a configuration file inside {}",
                root.display()
            ),
            JorgeError::CreateDir { .. } | JorgeError::WriteFailed { .. } => format!(
                "Make sure user {} has write access to the active directory",
                current_user()
            ),
            JorgeError::CreateEnvironmentDir { .. } | JorgeError::StoreFailed { .. } => format!(
                "Make sure user {} has write privileges to .jorge directory",
                current_user()
            ),
            JorgeError::RemoveFailed { path, .. } => {
                format!("Make sure {} is a directory", path.display())
            }
            JorgeError::EnvironmentAlreadyExists(_) => {
                "Please use an environment name that is not already in use. \
                 You can use `jorge ls` to see the list of current environments"
                    .to_string()
            }
            JorgeError::EnvironmentNotFound(env) => {
                format!("You can create environment by running `jorge use -n {}`", env)
            }
            JorgeError::RemoveActiveEnvironment(_) => {
                "Switch to another environment with `jorge use <env>` before removing this one"
                    .to_string()
            }
            JorgeError::InvalidEnvironmentName(_) => {
                "Environment names must be non-empty and must not contain path separators"
                    .to_string()
            }
            JorgeError::Prompt { .. } => {
                "Pass the configuration file path with `jorge init --config <path>`".to_string()
            }
            JorgeError::Config { .. } => {
                "Check ~/.config/jorge/config.toml and JORGE__* environment variables".to_string()
            }
            JorgeError::LogFile { path, .. } => format!(
                "Make sure user {} can write to {} or set logging.output to stderr",
                current_user(),
                path.display()
            ),
            JorgeError::Serialize(_) => "Retry with `--format text`".to_string(),
        }
    }

    /// User-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Underlying cause, for debug output.
    pub fn cause(&self) -> Option<String> {
        std::error::Error::source(self).map(|source| source.to_string())
    }
}

const REPAIR_REMEDY: &str = "Backup configuration files manually by copying files under \
     ./.jorge/envs and initialize the jorge project again using `jorge init`";

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "the current user".to_string())
}
