//! Environment archive.
//!
//! Snapshots of the tracked file are stored per environment under
//! `<root>/.jorge/envs/<env>/<basename>`. An environment exists exactly when
//! its archive subdirectory exists.
//!
//! Snapshot writes go to a temporary sibling and are renamed into place so a
//! failed store never leaves a truncated snapshot behind. Restores overwrite
//! the destination in place, keeping the user's file and its permissions.

use crate::error::JorgeError;
use crate::project::{create_private_dir, ProjectRoot};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Check that `name` can be used as an archive key.
///
/// Names must be a single, non-empty path component.
pub fn validate_env_name(name: &str) -> Result<(), JorgeError> {
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == OsStr::new(name)
    );
    let has_separator = name.contains('/') || name.contains('\\') || name.contains('\0');
    if name.is_empty() || has_separator || !single_normal {
        return Err(JorgeError::InvalidEnvironmentName(name.to_string()));
    }
    Ok(())
}

/// Store/restore/list/remove over per-environment snapshot copies.
#[derive(Debug, Clone)]
pub struct EnvironmentArchive {
    envs_dir: PathBuf,
}

impl EnvironmentArchive {
    /// Open the archive of a project, creating `envs/` on first use.
    pub fn open(root: &ProjectRoot) -> Result<Self, JorgeError> {
        let envs_dir = root.envs_dir();
        match fs::metadata(&envs_dir) {
            Ok(meta) if meta.is_dir() => {
                debug!(envs_dir = %envs_dir.display(), "Found the envs dir");
            }
            Ok(_) => return Err(JorgeError::NotADirectory(envs_dir)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                create_private_dir(&envs_dir).map_err(|source| JorgeError::CreateDir {
                    path: envs_dir.clone(),
                    source,
                })?;
                debug!(envs_dir = %envs_dir.display(), "Created the envs dir");
            }
            Err(source) => {
                return Err(JorgeError::OpenFailed {
                    path: envs_dir,
                    source,
                })
            }
        }
        Ok(Self { envs_dir })
    }

    /// The archive root directory (`<root>/.jorge/envs`).
    pub fn envs_dir(&self) -> &Path {
        &self.envs_dir
    }

    /// Where the snapshot of `file_name` for `env` lives.
    pub fn snapshot_path(&self, env: &str, file_name: &OsStr) -> PathBuf {
        self.envs_dir.join(env).join(file_name)
    }

    /// Copy `source` into the archive under `env`, replacing any prior snapshot.
    ///
    /// Returns the number of bytes copied; 0 is valid for an empty file.
    pub fn store(&self, source: &Path, env: &str) -> Result<u64, JorgeError> {
        validate_env_name(env)?;

        let meta = fs::metadata(source).map_err(|e| JorgeError::TrackedFileMissing {
            path: source.to_path_buf(),
            source: e,
        })?;
        if !meta.is_file() {
            return Err(JorgeError::NotARegularFile(source.to_path_buf()));
        }
        debug!(path = %source.display(), "Active configuration file is a regular file");
        let file_name = file_name_of(source)?;

        let env_dir = self.envs_dir.join(env);
        self.ensure_env_dir(env, &env_dir)?;

        let snapshot = env_dir.join(file_name);
        let temp_path = temp_sibling(&snapshot);
        let store_failed = |e: io::Error| JorgeError::StoreFailed {
            env: env.to_string(),
            path: snapshot.clone(),
            source: e,
        };

        let bytes = {
            let mut reader = File::open(source).map_err(|e| JorgeError::OpenFailed {
                path: source.to_path_buf(),
                source: e,
            })?;
            let mut writer = File::create(&temp_path).map_err(store_failed)?;
            let copied = io::copy(&mut reader, &mut writer)
                .and_then(|n| writer.flush().map(|_| n))
                .and_then(|n| writer.sync_all().map(|_| n));
            match copied {
                Ok(n) => n,
                Err(e) => {
                    drop(writer);
                    let _ = fs::remove_file(&temp_path);
                    return Err(store_failed(e));
                }
            }
        };

        fs::rename(&temp_path, &snapshot).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            store_failed(e)
        })?;

        debug!(
            bytes,
            from = %source.display(),
            to = %snapshot.display(),
            "Stored snapshot"
        );
        Ok(bytes)
    }

    /// Overwrite `destination` with the snapshot stored for `env`.
    ///
    /// The snapshot is looked up by the basename of `destination`.
    pub fn restore(&self, destination: &Path, env: &str) -> Result<u64, JorgeError> {
        validate_env_name(env)?;
        let file_name = file_name_of(destination)?;
        let snapshot = self.snapshot_path(env, file_name);

        let meta = fs::metadata(&snapshot).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                JorgeError::EnvironmentNotFound(env.to_string())
            } else {
                JorgeError::OpenFailed {
                    path: snapshot.clone(),
                    source: e,
                }
            }
        })?;
        if !meta.is_file() {
            return Err(JorgeError::NotARegularFile(snapshot));
        }

        let write_failed = |e: io::Error| JorgeError::WriteFailed {
            path: destination.to_path_buf(),
            source: e,
        };
        let mut reader = File::open(&snapshot).map_err(|e| JorgeError::OpenFailed {
            path: snapshot.clone(),
            source: e,
        })?;
        let mut writer = File::create(destination).map_err(write_failed)?;
        let bytes = io::copy(&mut reader, &mut writer).map_err(write_failed)?;
        writer.flush().map_err(write_failed)?;

        debug!(
            bytes,
            from = %snapshot.display(),
            to = %destination.display(),
            "Restored snapshot"
        );
        Ok(bytes)
    }

    /// Names of all stored environments, sorted.
    pub fn list(&self) -> Result<Vec<String>, JorgeError> {
        let read_dir_failed = |e: io::Error| JorgeError::ReadDir {
            path: self.envs_dir.clone(),
            source: e,
        };

        let mut envs = Vec::new();
        for entry in fs::read_dir(&self.envs_dir).map_err(read_dir_failed)? {
            let entry = entry.map_err(read_dir_failed)?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => envs.push(name),
                Err(raw) => warn!("Skipping non UTF-8 environment directory {:?}", raw),
            }
        }
        envs.sort();

        debug!(count = envs.len(), envs_dir = %self.envs_dir.display(), "Listed environments");
        Ok(envs)
    }

    /// Delete the environment and all of its snapshots. Irreversible.
    pub fn remove(&self, env: &str) -> Result<(), JorgeError> {
        validate_env_name(env)?;
        let env_dir = self.envs_dir.join(env);

        let meta = fs::metadata(&env_dir).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                JorgeError::EnvironmentNotFound(env.to_string())
            } else {
                JorgeError::OpenFailed {
                    path: env_dir.clone(),
                    source: e,
                }
            }
        })?;
        if !meta.is_dir() {
            return Err(JorgeError::NotADirectory(env_dir));
        }

        fs::remove_dir_all(&env_dir).map_err(|source| JorgeError::RemoveFailed {
            path: env_dir.clone(),
            source,
        })?;
        debug!(env_dir = %env_dir.display(), "Removed environment");
        Ok(())
    }

    /// Whether an environment with this exact name is stored.
    pub fn exists(&self, env: &str) -> bool {
        validate_env_name(env).is_ok() && self.envs_dir.join(env).is_dir()
    }

    /// Whether `env` holds a snapshot of `file_name`.
    pub fn has_snapshot(&self, env: &str, file_name: &OsStr) -> bool {
        validate_env_name(env).is_ok() && self.snapshot_path(env, file_name).is_file()
    }

    fn ensure_env_dir(&self, env: &str, env_dir: &Path) -> Result<(), JorgeError> {
        match fs::metadata(env_dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(JorgeError::NotADirectory(env_dir.to_path_buf())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                create_private_dir(env_dir).map_err(|source| {
                    JorgeError::CreateEnvironmentDir {
                        env: env.to_string(),
                        path: env_dir.to_path_buf(),
                        source,
                    }
                })?;
                debug!(env_dir = %env_dir.display(), "Created env dir");
                Ok(())
            }
            Err(source) => Err(JorgeError::OpenFailed {
                path: env_dir.to_path_buf(),
                source,
            }),
        }
    }
}

fn file_name_of(path: &Path) -> Result<&OsStr, JorgeError> {
    path.file_name()
        .ok_or_else(|| JorgeError::NotARegularFile(path.to_path_buf()))
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
