//! Project root discovery.
//!
//! A jorge project is any directory that holds the `.jorge` marker directory.
//! Lookup starts at a given directory and walks its ancestors up to the
//! filesystem root; the first ancestor holding the marker wins.

use crate::error::JorgeError;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Marker directory name. Its presence is what makes a directory a project.
pub const MARKER_DIR: &str = ".jorge";

/// State file name inside the marker directory.
pub const STATE_FILE: &str = "config.yml";

/// Archive directory name inside the marker directory.
pub const ENVS_DIR: &str = "envs";

/// Absolute path of a directory holding the marker directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    path: PathBuf,
}

impl ProjectRoot {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The project root directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<root>/.jorge`
    pub fn marker_dir(&self) -> PathBuf {
        self.path.join(MARKER_DIR)
    }

    /// `<root>/.jorge/config.yml`
    pub fn state_path(&self) -> PathBuf {
        self.marker_dir().join(STATE_FILE)
    }

    /// `<root>/.jorge/envs`
    pub fn envs_dir(&self) -> PathBuf {
        self.marker_dir().join(ENVS_DIR)
    }

    /// Absolute location of a root-relative path.
    pub fn join(&self, relative: &Path) -> PathBuf {
        self.path.join(relative)
    }

    /// Express an existing file path relative to the project root.
    ///
    /// Only the parent directory is canonicalized; the file name is kept as
    /// given, so a symlink is recorded under its own name rather than its
    /// target's. Files outside the root are expressed with `..` components.
    pub fn relative_path(&self, path: &Path) -> Result<PathBuf, JorgeError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| JorgeError::NotARegularFile(path.to_path_buf()))?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let parent = dunce::canonicalize(parent).map_err(|source| {
            JorgeError::PathResolution {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let relative_parent =
            lexical_relative(&self.path, &parent).ok_or_else(|| JorgeError::OutsideProject {
                path: parent.join(file_name),
                root: self.path.clone(),
            })?;
        Ok(relative_parent.join(file_name))
    }
}

/// `target` relative to `base`, both absolute. `None` when they share no
/// root (e.g. different drives).
fn lexical_relative(base: &Path, target: &Path) -> Option<PathBuf> {
    let base: Vec<Component> = base.components().collect();
    let target: Vec<Component> = target.components().collect();
    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push(Component::ParentDir);
    }
    for component in &target[common..] {
        relative.push(component);
    }
    Some(relative)
}

/// Find the project root enclosing `start`.
///
/// Walks `start` and each of its ancestors, bounded by the filesystem root.
pub fn resolve_root(start: &Path) -> Result<ProjectRoot, JorgeError> {
    let mut current = absolute_start(start)?;

    loop {
        let marker = current.join(MARKER_DIR);
        match fs::metadata(&marker) {
            Ok(meta) if meta.is_dir() => {
                debug!(root = %current.display(), "Resolved jorge dir");
                return Ok(ProjectRoot::new(current));
            }
            Ok(_) => return Err(JorgeError::MarkerNotDirectory(marker)),
            Err(_) => {}
        }
        if !current.pop() {
            break;
        }
    }

    Err(JorgeError::NotAProject {
        start: start.to_path_buf(),
    })
}

/// Establish a new project rooted at `cwd`.
///
/// Refuses when `cwd` already belongs to a project, including one rooted at
/// an ancestor, so projects never nest.
pub fn create_root(cwd: &Path) -> Result<ProjectRoot, JorgeError> {
    match resolve_root(cwd) {
        Ok(existing) => {
            return Err(JorgeError::AlreadyAProject {
                root: existing.path().to_path_buf(),
            })
        }
        Err(JorgeError::NotAProject { .. }) => {}
        Err(e) => return Err(e),
    }

    let root = ProjectRoot::new(absolute_start(cwd)?);
    let marker = root.marker_dir();
    create_private_dir(&marker).map_err(|source| JorgeError::CreateDir {
        path: marker.clone(),
        source,
    })?;
    debug!(marker = %marker.display(), "Created jorge dir");
    Ok(root)
}

/// Delete the marker directory and everything under it.
pub fn remove_root(root: &ProjectRoot) -> Result<(), JorgeError> {
    let marker = root.marker_dir();
    fs::remove_dir_all(&marker).map_err(|source| JorgeError::RemoveFailed {
        path: marker.clone(),
        source,
    })?;
    debug!(marker = %marker.display(), "Removed jorge dir");
    Ok(())
}

/// Create a directory readable only by its owner where the platform allows it.
pub(crate) fn create_private_dir(path: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(path)
}

fn absolute_start(start: &Path) -> Result<PathBuf, JorgeError> {
    dunce::canonicalize(start).map_err(|source| JorgeError::PathResolution {
        path: start.to_path_buf(),
        source,
    })
}
