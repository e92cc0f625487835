//! CLI route: single route table and run context. Dispatches to the environment service and presentation.

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_commit_result, format_init_result, format_list_result_json,
    format_list_result_text, format_remove_result, format_restore_result,
    format_status_result_json, format_status_result_text, format_use_result,
};
use crate::config::{ProjectSettings, ToolConfig};
use crate::environment::EnvCommandService;
use crate::error::JorgeError;
use crate::project::{self, ProjectRoot};
use dialoguer::Input;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info_span};

/// Runtime context for CLI execution: the directory commands run from and
/// the tool settings that shape them.
pub struct RunContext {
    cwd: PathBuf,
    settings: ProjectSettings,
    color: bool,
}

impl RunContext {
    /// Create run context from the working directory and loaded tool config.
    pub fn new(cwd: PathBuf, config: &ToolConfig) -> Self {
        Self {
            cwd,
            settings: config.project.clone(),
            color: false,
        }
    }

    /// Highlight the active environment in text output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Execute a command and return its output text.
    pub fn execute(&self, command: &Commands) -> Result<String, JorgeError> {
        let span = info_span!("command", name = command_name(command));
        let _guard = span.enter();
        let started = Instant::now();

        let result = self.route(command);

        debug!(
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn route(&self, command: &Commands) -> Result<String, JorgeError> {
        match command {
            Commands::Init { config } => self.handle_init(config.as_deref()),
            Commands::Use { env, new } => {
                let result = EnvCommandService::use_env(&self.root()?, env, *new)?;
                Ok(format_use_result(&result))
            }
            Commands::Commit => {
                let result = EnvCommandService::commit(&self.root()?)?;
                Ok(format_commit_result(&result))
            }
            Commands::Restore => {
                let result = EnvCommandService::restore(&self.root()?)?;
                Ok(format_restore_result(&result))
            }
            Commands::Ls { format } => {
                let result = EnvCommandService::list(&self.root()?)?;
                match format.as_str() {
                    "json" => format_list_result_json(&result),
                    _ => Ok(format_list_result_text(&result, self.color)),
                }
            }
            Commands::Rm { env } => {
                let result = EnvCommandService::remove(&self.root()?, env)?;
                Ok(format_remove_result(&result))
            }
            Commands::Status { format } => {
                let result = EnvCommandService::status(&self.root()?)?;
                match format.as_str() {
                    "json" => format_status_result_json(&result),
                    _ => Ok(format_status_result_text(&result)),
                }
            }
        }
    }

    fn root(&self) -> Result<ProjectRoot, JorgeError> {
        project::resolve_root(&self.cwd)
    }

    fn handle_init(&self, config: Option<&Path>) -> Result<String, JorgeError> {
        let tracked = match config {
            Some(path) => path.to_path_buf(),
            None => prompt_tracked_file()?,
        };
        let result =
            EnvCommandService::init(&self.cwd, &tracked, self.settings.ignore_target())?;
        Ok(format_init_result(&result))
    }
}

/// Ask for the tracked file when `init` is run without `--config`.
fn prompt_tracked_file() -> Result<PathBuf, JorgeError> {
    let answer = Input::<String>::new()
        .with_prompt("Configuration file path")
        .interact_text()?;
    Ok(PathBuf::from(answer.trim()))
}
