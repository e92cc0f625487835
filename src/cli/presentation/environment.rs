//! Environment presentation: init, use, commit, restore, rm and ls formatters.

use crate::environment::{
    CommitResult, InitResult, ListResult, RemoveResult, RestoreResult, UseResult,
};
use crate::error::JorgeError;
use crate::ignore::IgnoreOutcome;
use crate::project::MARKER_DIR;
use owo_colors::OwoColorize;
use serde_json::json;

const EMPTY_FILE: &str = "Target file is empty. Nothing to do";

pub fn format_init_result(result: &InitResult) -> String {
    let mut lines = vec![
        "Created new jorge project".to_string(),
        format!(
            "Tracking {} in environment '{}'",
            result.state.tracked_file_path.display(),
            result.state.current_env
        ),
    ];
    if result.ignore == Some(IgnoreOutcome::Added) {
        lines.push(format!("Added {} to the ignore file", MARKER_DIR));
    }
    lines.join("\n")
}

pub fn format_use_result(result: &UseResult) -> String {
    if result.bytes_restored == 0 {
        return EMPTY_FILE.to_string();
    }
    let using = format!("Using environment {}", result.state.current_env);
    if result.created {
        format!("Created environment {}\n{}", result.state.current_env, using)
    } else {
        using
    }
}

pub fn format_commit_result(result: &CommitResult) -> String {
    if result.bytes_stored == 0 {
        EMPTY_FILE.to_string()
    } else {
        "Target file updated".to_string()
    }
}

pub fn format_restore_result(_result: &RestoreResult) -> String {
    "Env restored".to_string()
}

pub fn format_remove_result(result: &RemoveResult) -> String {
    format!("Removed environment {}", result.removed)
}

/// One environment per line; the active one is starred and, with `color`,
/// highlighted.
pub fn format_list_result_text(result: &ListResult, color: bool) -> String {
    result
        .entries
        .iter()
        .map(|entry| {
            if !entry.active {
                return entry.name.clone();
            }
            let name = if color {
                entry.name.green().bold().to_string()
            } else {
                entry.name.clone()
            };
            if entry.committed {
                format!("* {}", name)
            } else {
                format!("* {} (uncommitted)", name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_list_result_json(result: &ListResult) -> Result<String, JorgeError> {
    let out = json!({
        "current_env": result.state.current_env,
        "environments": result.entries,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}
