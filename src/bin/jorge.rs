//! jorge CLI Binary
//!
//! Command-line interface for switching a project's configuration file between environments.

use clap::Parser;
use jorge::cli::{map_error, Cli, RunContext};
use jorge::config::{ConfigLoader, ToolConfig};
use jorge::error::JorgeError;
use jorge::logging::{init_logging, LoggingConfig};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => fail(&e, cli.debug),
    };

    // Initialize logging before any command work
    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(source) => fail(
            &JorgeError::PathResolution {
                path: PathBuf::from("."),
                source,
            },
            cli.debug,
        ),
    };
    debug!(cwd = %cwd.display(), "jorge starting");

    let color = config.logging.color && std::io::stdout().is_terminal();
    let context = RunContext::new(cwd, &config).with_color(color);

    match context.execute(&cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!(code = e.code(), "Command failed: {}", e);
            fail(&e, cli.debug)
        }
    }
}

fn load_config(cli: &Cli) -> Result<ToolConfig, JorgeError> {
    match cli.settings {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Build logging configuration from the config file and CLI flags
fn build_logging_config(cli: &Cli, config: &ToolConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if cli.debug {
        logging.level = "debug".to_string();
    }
    logging
}

fn fail(e: &JorgeError, debug: bool) -> ! {
    eprintln!("{}", map_error(e, debug));
    process::exit(e.code())
}
