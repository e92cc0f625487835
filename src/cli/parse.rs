//! CLI parse: clap types for jorge. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// jorge - keep named copies of a local configuration file and switch between them
#[derive(Parser, Debug)]
#[command(name = "jorge")]
#[command(version)]
#[command(about = "Manage named environments of a single project configuration file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print debug logs and the underlying cause of errors
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Tool settings file (overrides ~/.config/jorge/config.toml)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a jorge project in the current directory
    Init {
        /// Path of the configuration file to track (prompted for when omitted)
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,
    },
    /// Switch the configuration file to another environment
    Use {
        /// Environment name
        #[arg(default_value = "default")]
        env: String,
        /// Create the environment from the current file before switching
        #[arg(short = 'n', long = "new")]
        new: bool,
    },
    /// Store the configuration file in the active environment
    Commit,
    /// Overwrite the configuration file with the active environment's copy
    Restore,
    /// List environments
    Ls {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Remove an environment
    Rm {
        /// Environment name
        env: String,
    },
    /// Show the project root, active environment and tracked file
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
