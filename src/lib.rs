//! jorge: named environments for a single project configuration file
//!
//! A project keeps one working configuration file (e.g. `.env`) and any number
//! of stored snapshots of it under `.jorge/envs/<env>/`. Switching environment
//! overwrites the working file from the chosen snapshot; committing refreshes
//! the snapshot from the working file.

pub mod archive;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod project;
pub mod state;
