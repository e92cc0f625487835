//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name recorded on the command span (e.g. "use", "ls").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Init { .. } => "init",
        Commands::Use { .. } => "use",
        Commands::Commit => "commit",
        Commands::Restore => "restore",
        Commands::Ls { .. } => "ls",
        Commands::Rm { .. } => "rm",
        Commands::Status { .. } => "status",
    }
}
