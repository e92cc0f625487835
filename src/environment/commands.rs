//! Environment command service: single entry point per environment workflow.
//!
//! Owns workflow logic; the CLI resolves the project root, calls one method per
//! command, and formats the result. Every method reads the state record it
//! needs and returns the record as it stands afterwards.

use crate::archive::{validate_env_name, EnvironmentArchive};
use crate::environment::types::{
    CommitResult, EnvEntry, InitResult, ListResult, RemoveResult, RestoreResult, StatusResult,
    UseResult,
};
use crate::error::JorgeError;
use crate::ignore;
use crate::project::{self, ProjectRoot, MARKER_DIR};
use crate::state::{self, PersistedState, StateUpdate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment created and activated by `init`.
pub const DEFAULT_ENV: &str = "default";

/// Stateless environment command service.
pub struct EnvCommandService;

impl EnvCommandService {
    /// Create a project in `cwd` tracking `tracked_file` and commit it as `default`.
    ///
    /// Any failure after the marker directory is created removes it again
    /// before the error is returned. When `ignore_file` is set, the marker
    /// directory is appended to it; failing to do so is only logged.
    pub fn init(
        cwd: &Path,
        tracked_file: &Path,
        ignore_file: Option<&str>,
    ) -> Result<InitResult, JorgeError> {
        let root = project::create_root(cwd)?;

        let (state, bytes_stored) = match Self::initialize(&root, cwd, tracked_file) {
            Ok(done) => done,
            Err(e) => {
                if let Err(rollback) = project::remove_root(&root) {
                    warn!(
                        "Jorge init failed and {} could not be removed: {}",
                        root.marker_dir().display(),
                        rollback
                    );
                }
                return Err(e);
            }
        };

        let ignore = ignore_file.and_then(|file| {
            match ignore::ensure_ignored(root.path(), file, MARKER_DIR) {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    warn!("Could not update ignore file {}: {}", file, e);
                    None
                }
            }
        });

        info!(root = %root.path().display(), "Created new jorge project");
        Ok(InitResult {
            root: root.path().to_path_buf(),
            state,
            bytes_stored,
            ignore,
        })
    }

    fn initialize(
        root: &ProjectRoot,
        cwd: &Path,
        tracked_file: &Path,
    ) -> Result<(PersistedState, u64), JorgeError> {
        let absolute = if tracked_file.is_absolute() {
            tracked_file.to_path_buf()
        } else {
            cwd.join(tracked_file)
        };

        let meta = fs::metadata(&absolute).map_err(|source| JorgeError::TrackedFileMissing {
            path: tracked_file.to_path_buf(),
            source,
        })?;
        if !meta.is_file() {
            return Err(JorgeError::NotARegularFile(tracked_file.to_path_buf()));
        }

        let relative = root.relative_path(&absolute)?;
        let state = state::write(
            root,
            &StateUpdate::current_env(DEFAULT_ENV).with_tracked_file(relative),
        )?;

        let archive = EnvironmentArchive::open(root)?;
        let bytes = archive.store(&tracked_path(root, &state)?, DEFAULT_ENV)?;
        Ok((state, bytes))
    }

    /// Switch the tracked file to `env`, optionally creating `env` from the
    /// current file contents first.
    pub fn use_env(root: &ProjectRoot, env: &str, create: bool) -> Result<UseResult, JorgeError> {
        validate_env_name(env)?;
        let current = state::read(root)?;
        let archive = EnvironmentArchive::open(root)?;
        let tracked = tracked_path(root, &current)?;

        if create {
            if archive.list()?.iter().any(|name| name == env) {
                return Err(JorgeError::EnvironmentAlreadyExists(env.to_string()));
            }
            archive.store(&tracked, env)?;
            info!(env, "Created new environment");
        }

        let bytes_restored = archive.restore(&tracked, env)?;
        let state = state::write(root, &StateUpdate::current_env(env))?;

        info!(env, bytes_restored, "Using environment");
        Ok(UseResult {
            state,
            created: create,
            bytes_restored,
        })
    }

    /// Refresh the active environment's snapshot from the tracked file.
    pub fn commit(root: &ProjectRoot) -> Result<CommitResult, JorgeError> {
        let state = state::read(root)?;
        let archive = EnvironmentArchive::open(root)?;
        let bytes_stored = archive.store(&tracked_path(root, &state)?, &state.current_env)?;

        info!(env = %state.current_env, bytes_stored, "Committed environment");
        Ok(CommitResult {
            state,
            bytes_stored,
        })
    }

    /// Overwrite the tracked file from the active environment's snapshot,
    /// discarding uncommitted edits.
    pub fn restore(root: &ProjectRoot) -> Result<RestoreResult, JorgeError> {
        let state = state::read(root)?;
        let archive = EnvironmentArchive::open(root)?;
        let bytes_restored = archive.restore(&tracked_path(root, &state)?, &state.current_env)?;

        info!(env = %state.current_env, bytes_restored, "Restored environment");
        Ok(RestoreResult {
            state,
            bytes_restored,
        })
    }

    /// All stored environments, with the active one marked. An active
    /// environment without a snapshot is reported as uncommitted.
    pub fn list(root: &ProjectRoot) -> Result<ListResult, JorgeError> {
        let archive = EnvironmentArchive::open(root)?;
        let names = archive.list()?;
        let state = state::read(root)?;

        let mut entries: Vec<EnvEntry> = names
            .into_iter()
            .map(|name| EnvEntry {
                active: name == state.current_env,
                committed: true,
                name,
            })
            .collect();

        if !entries.iter().any(|e| e.active) {
            entries.push(EnvEntry {
                name: state.current_env.clone(),
                active: true,
                committed: false,
            });
        }

        Ok(ListResult { state, entries })
    }

    /// Delete a stored environment other than the active one.
    pub fn remove(root: &ProjectRoot, env: &str) -> Result<RemoveResult, JorgeError> {
        validate_env_name(env)?;
        let state = state::read(root)?;
        if env == state.current_env {
            return Err(JorgeError::RemoveActiveEnvironment(env.to_string()));
        }

        let archive = EnvironmentArchive::open(root)?;
        if !archive.exists(env) {
            return Err(JorgeError::EnvironmentNotFound(env.to_string()));
        }
        archive.remove(env)?;

        info!(env, "Removed environment");
        Ok(RemoveResult {
            state,
            removed: env.to_string(),
        })
    }

    /// Project root, active environment, and whether it is committed.
    pub fn status(root: &ProjectRoot) -> Result<StatusResult, JorgeError> {
        let state = state::read(root)?;
        let archive = EnvironmentArchive::open(root)?;
        let committed = state
            .tracked_file_path
            .file_name()
            .map(|name| archive.has_snapshot(&state.current_env, name))
            .unwrap_or(false);
        let environment_count = archive.list()?.len();

        Ok(StatusResult {
            root: root.path().to_path_buf(),
            state,
            committed,
            environment_count,
        })
    }
}

/// Absolute path of the tracked file. A record without one cannot be acted on.
fn tracked_path(root: &ProjectRoot, state: &PersistedState) -> Result<PathBuf, JorgeError> {
    if !state.has_tracked_file() {
        return Err(JorgeError::NotARegularFile(root.state_path()));
    }
    Ok(root.join(&state.tracked_file_path))
}
