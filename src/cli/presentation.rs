//! CLI presentation: text and json formatters per command family.

mod environment;
mod status;

pub use environment::{
    format_commit_result, format_init_result, format_list_result_json,
    format_list_result_text, format_remove_result, format_restore_result, format_use_result,
};
pub use status::{format_status_result_json, format_status_result_text};
