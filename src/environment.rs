//! Environment domain: the user-facing workflows over project state and the archive.

mod commands;
mod types;

pub use commands::{EnvCommandService, DEFAULT_ENV};
pub use types::{
    CommitResult, EnvEntry, InitResult, ListResult, RemoveResult, RestoreResult, StatusResult,
    UseResult,
};
