//! Status presentation.

use crate::environment::StatusResult;
use crate::error::JorgeError;

pub fn format_status_result_text(result: &StatusResult) -> String {
    let committed = if result.committed {
        "committed"
    } else {
        "uncommitted"
    };
    format!(
        "Project root: {}\nEnvironment: {} ({})\nTracked file: {}\nEnvironments: {}",
        result.root.display(),
        result.state.current_env,
        committed,
        result.state.tracked_file_path.display(),
        result.environment_count
    )
}

pub fn format_status_result_json(result: &StatusResult) -> Result<String, JorgeError> {
    Ok(serde_json::to_string_pretty(result)?)
}
