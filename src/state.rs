//! Persisted project state.
//!
//! The state record lives at `<root>/.jorge/config.yml` and names the active
//! environment and the tracked file (relative to the project root). It is the
//! single source of truth for which environment is active. Every mutation goes
//! through [`write`], which merges a [`StateUpdate`] into the stored record.

use crate::error::JorgeError;
use crate::project::ProjectRoot;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The stored state record.
///
/// Both keys are optional on read (absent means empty) and always written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(rename = "currentEnv", default)]
    pub current_env: String,

    #[serde(rename = "configFilePath", default)]
    pub tracked_file_path: PathBuf,
}

/// Partial update merged into the stored state by [`write`].
///
/// `None` and empty values leave the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateUpdate {
    pub current_env: Option<String>,
    pub tracked_file_path: Option<PathBuf>,
}

impl StateUpdate {
    /// Update that only switches the active environment.
    pub fn current_env(env: impl Into<String>) -> Self {
        Self {
            current_env: Some(env.into()),
            tracked_file_path: None,
        }
    }

    /// Builder: also re-point the tracked file.
    pub fn with_tracked_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.tracked_file_path = Some(path.into());
        self
    }
}

impl PersistedState {
    /// Apply `update`, returning the merged record and how many fields changed.
    pub fn merge(&self, update: &StateUpdate) -> (PersistedState, usize) {
        let mut next = self.clone();
        let mut changed = 0;

        if let Some(env) = update.current_env.as_deref() {
            if !env.is_empty() && env != self.current_env {
                debug!(from = %self.current_env, to = %env, "Found updated key 'currentEnv'");
                next.current_env = env.to_string();
                changed += 1;
            }
        }

        if let Some(path) = update.tracked_file_path.as_deref() {
            if !path.as_os_str().is_empty() && path != self.tracked_file_path {
                debug!(
                    from = %self.tracked_file_path.display(),
                    to = %path.display(),
                    "Found updated key 'configFilePath'"
                );
                next.tracked_file_path = path.to_path_buf();
                changed += 1;
            }
        }

        (next, changed)
    }

    /// Whether the tracked file has been recorded yet.
    pub fn has_tracked_file(&self) -> bool {
        !self.tracked_file_path.as_os_str().is_empty()
    }
}

/// Read the state record of a project.
///
/// A missing file is `StateMissing`; a file that is not a regular file or does
/// not parse is reported as corruption.
pub fn read(root: &ProjectRoot) -> Result<PersistedState, JorgeError> {
    let path = root.state_path();
    debug!(path = %path.display(), "Using state file");

    let meta = fs::metadata(&path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            JorgeError::StateMissing {
                path: path.clone(),
                source,
            }
        } else {
            JorgeError::OpenFailed {
                path: path.clone(),
                source,
            }
        }
    })?;

    if !meta.is_file() {
        return Err(JorgeError::StateNotRegularFile(path));
    }

    let contents = fs::read_to_string(&path).map_err(|source| JorgeError::OpenFailed {
        path: path.clone(),
        source,
    })?;

    parse(&path, &contents)
}

/// Merge `update` into the stored record and persist the result.
///
/// Starts from an empty record when the state file does not exist yet. An
/// update that changes nothing still re-persists the record.
pub fn write(root: &ProjectRoot, update: &StateUpdate) -> Result<PersistedState, JorgeError> {
    let current = match read(root) {
        Ok(state) => state,
        Err(JorgeError::StateMissing { .. }) => PersistedState::default(),
        Err(e) => return Err(e),
    };

    let (next, changed) = current.merge(update);
    if changed == 0 {
        debug!("State written without updates");
    }
    if next.current_env.is_empty() {
        return Err(JorgeError::InvalidEnvironmentName(String::new()));
    }

    persist(&root.state_path(), &next)?;
    Ok(next)
}

fn parse(path: &Path, contents: &str) -> Result<PersistedState, JorgeError> {
    if contents.trim().is_empty() {
        return Ok(PersistedState::default());
    }
    serde_yaml::from_str(contents).map_err(|source| JorgeError::StateCorrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the record to a temporary sibling, then rename it over the state file.
fn persist(path: &Path, state: &PersistedState) -> Result<(), JorgeError> {
    let to_state_write = |source: io::Error| JorgeError::StateWrite {
        path: path.to_path_buf(),
        source,
    };

    let serialized = serde_yaml::to_string(state)
        .map_err(|e| to_state_write(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    let temp_path = path.with_extension("yml.tmp");
    fs::write(&temp_path, serialized).map_err(to_state_write)?;
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        to_state_write(e)
    })?;

    debug!(path = %path.display(), "Wrote updated state file");
    Ok(())
}
