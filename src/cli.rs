//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; a single route table dispatches to the environment service.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_commit_result, format_init_result, format_list_result_json,
    format_list_result_text, format_remove_result, format_restore_result,
    format_status_result_json, format_status_result_text, format_use_result,
};
pub use route::RunContext;
