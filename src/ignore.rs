//! Ignore-file integration.
//!
//! On `init` the marker directory is appended to the project's ignore file
//! (`.gitignore` by default) so snapshots never end up in version control.
//! The check is an exact, trimmed line match; the file is only ever appended to.

use crate::error::JorgeError;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Result of [`ensure_ignored`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreOutcome {
    Added,
    AlreadyPresent,
}

/// Whether `entry` appears as its own line in the ignore file, allowing the
/// anchored (`/.jorge`) and directory (`.jorge/`) spellings.
///
/// A missing ignore file contains nothing.
pub fn contains_entry(ignore_path: &Path, entry: &str) -> Result<bool, JorgeError> {
    if !ignore_path.exists() {
        return Ok(false);
    }
    let contents = fs::read_to_string(ignore_path).map_err(|source| JorgeError::OpenFailed {
        path: ignore_path.to_path_buf(),
        source,
    })?;
    Ok(contents.lines().any(|line| normalize(line) == normalize(entry)))
}

fn normalize(pattern: &str) -> &str {
    let pattern = pattern.trim();
    let pattern = pattern.strip_prefix('/').unwrap_or(pattern);
    pattern.strip_suffix('/').unwrap_or(pattern)
}

/// Append `entry` to the ignore file unless it is already listed.
/// Creates the ignore file if needed.
pub fn ensure_ignored(
    root: &Path,
    ignore_file: &str,
    entry: &str,
) -> Result<IgnoreOutcome, JorgeError> {
    let ignore_path = root.join(ignore_file);
    if contains_entry(&ignore_path, entry)? {
        debug!(path = %ignore_path.display(), entry, "Ignore entry already present");
        return Ok(IgnoreOutcome::AlreadyPresent);
    }

    let line = format!("\n{}\n", entry);
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&ignore_path)
        .and_then(|mut f| f.write_all(line.as_bytes()))
        .map_err(|source| JorgeError::WriteFailed {
            path: ignore_path.clone(),
            source,
        })?;

    debug!(path = %ignore_path.display(), entry, "Appended ignore entry");
    Ok(IgnoreOutcome::Added)
}
