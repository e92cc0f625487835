//! Config loader: assembles sources in precedence order and deserializes.

use super::merge::merge_policy;
use super::sources::global_file;
use super::ToolConfig;
use crate::error::JorgeError;
use config::File;
use std::path::Path;

/// Loads [`ToolConfig`] from defaults, the global file and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the global config file (if present) and environment overrides.
    pub fn load() -> Result<ToolConfig, JorgeError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let config = builder
            .add_source(merge_policy::environment_overrides())
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load from an explicit file, which must exist, plus environment overrides.
    pub fn load_from_file(path: &Path) -> Result<ToolConfig, JorgeError> {
        if !path.is_file() {
            return Err(JorgeError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let config = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(merge_policy::environment_overrides())
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
