//! Logging
//!
//! Diagnostics go through `tracing`. Command results own stdout, so events go
//! to stderr at `warn` unless the settings file, `--log-level` or `--debug`
//! say otherwise. `JORGE_LOG` takes a full filter directive and wins over
//! everything else.

use crate::error::JorgeError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// `[logging]` table of the settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error or off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// text or json
    #[serde(default = "default_format")]
    pub format: String,

    /// stderr, stdout or file
    #[serde(default = "default_output")]
    pub output: String,

    /// Used when `output` is "file"
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// ANSI colors for text output on stderr/stdout
    #[serde(default = "default_true")]
    pub color: bool,

    /// Per-target levels, e.g. `jorge::archive = "trace"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("jorge.log")
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: default_log_file(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

/// Install the global subscriber. Fails if one is already installed.
///
/// `JORGE_LOG_FORMAT`, `JORGE_LOG_OUTPUT` and `JORGE_LOG_MODULES` override
/// the matching settings.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), JorgeError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);

    let filter = build_env_filter(config)?;
    let format = match std::env::var("JORGE_LOG_FORMAT") {
        Ok(value) => parse_format(&value)?,
        Err(_) => parse_format(&config.format)?,
    };
    let output = match std::env::var("JORGE_LOG_OUTPUT") {
        Ok(value) => parse_output(&value)?,
        Err(_) => parse_output(&config.output)?,
    };

    let writer = match output {
        Output::Stdout => BoxMakeWriter::new(std::io::stdout),
        Output::Stderr => BoxMakeWriter::new(std::io::stderr),
        Output::File => BoxMakeWriter::new(Mutex::new(open_log_file(&config.file)?)),
    };
    let ansi = config.color && output != Output::File;

    let registry = Registry::default().with(filter);
    let installed = match format {
        Format::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init(),
        Format::Text => registry
            .with(
                fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init(),
    };

    installed.map_err(|e| JorgeError::config(format!("Failed to initialize logging: {}", e)))
}

/// Open the log file for appending, creating its directory if needed.
fn open_log_file(path: &Path) -> Result<File, JorgeError> {
    let to_error = |source| JorgeError::LogFile {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, JorgeError> {
    if let Ok(filter) = EnvFilter::try_from_env("JORGE_LOG") {
        return Ok(filter);
    }
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let env_modules = std::env::var("JORGE_LOG_MODULES").unwrap_or_default();
    let env_directives = env_modules
        .split(',')
        .filter_map(|spec| spec.split_once('='))
        .map(|(target, level)| format!("{}={}", target.trim(), level.trim()));
    let config_directives = config
        .modules
        .iter()
        .map(|(target, level)| format!("{}={}", target, level));

    let mut filter = EnvFilter::new(&config.level);
    for directive in config_directives.chain(env_directives) {
        let parsed = directive.parse::<Directive>().map_err(|e| {
            JorgeError::config(format!("Invalid log directive {}: {}", directive, e))
        })?;
        filter = filter.add_directive(parsed);
    }
    Ok(filter)
}

fn parse_format(format: &str) -> Result<Format, JorgeError> {
    match format {
        "text" => Ok(Format::Text),
        "json" => Ok(Format::Json),
        other => Err(JorgeError::config(format!(
            "Invalid log format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn parse_output(output: &str) -> Result<Output, JorgeError> {
    match output {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        other => Err(JorgeError::config(format!(
            "Invalid log output: {} (must be 'stderr', 'stdout' or 'file')",
            other
        ))),
    }
}
