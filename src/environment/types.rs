//! Workflow results. Each carries the state record as it stands after the workflow.

use crate::ignore::IgnoreOutcome;
use crate::state::PersistedState;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct InitResult {
    pub root: PathBuf,
    pub state: PersistedState,
    pub bytes_stored: u64,
    /// `None` when the ignore file was not touched.
    pub ignore: Option<IgnoreOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UseResult {
    pub state: PersistedState,
    pub created: bool,
    pub bytes_restored: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitResult {
    pub state: PersistedState,
    pub bytes_stored: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestoreResult {
    pub state: PersistedState,
    pub bytes_restored: u64,
}

/// One line of `ls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvEntry {
    pub name: String,
    pub active: bool,
    /// False only for an active environment that has no stored snapshot yet.
    pub committed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListResult {
    pub state: PersistedState,
    pub entries: Vec<EnvEntry>,
}

impl ListResult {
    /// The entry for the active environment.
    pub fn active(&self) -> Option<&EnvEntry> {
        self.entries.iter().find(|e| e.active)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveResult {
    pub state: PersistedState,
    pub removed: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResult {
    pub root: PathBuf,
    pub state: PersistedState,
    /// Whether the active environment holds a snapshot of the tracked file.
    pub committed: bool,
    pub environment_count: usize,
}
