//! Merge rules: defaults, override order, conflict handling.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("logging.level", "warn")?
        .set_default("logging.output", "stderr")?
        .set_default("project.ignore_file", ".gitignore")?
        .set_default("project.update_ignore_file", true)
}

/// Environment overrides, applied last: `JORGE__LOGGING__LEVEL=debug` sets `logging.level`.
pub fn environment_overrides() -> Environment {
    Environment::with_prefix("JORGE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
