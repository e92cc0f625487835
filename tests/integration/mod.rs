//! Integration tests for the jorge environment switcher

mod cli_binary;
mod cli_routing;
mod config_integration;
mod test_utils;

pub use test_utils::{project_with_file, with_xdg_env};
