//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::JorgeError;

/// Render an error for the error stream: message, then remedy. With `debug`
/// the underlying cause is printed first.
pub fn map_error(e: &JorgeError, debug: bool) -> String {
    let mut lines = Vec::new();
    if debug {
        if let Some(cause) = e.cause() {
            lines.push(format!("Cause: {}", cause));
        }
    }
    lines.push(format!("Error: {}", e.message()));
    lines.push(format!("Solution: {}", e.remedy()));
    lines.join("\n")
}
