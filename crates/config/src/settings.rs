//! Layered settings loader
//!
//! Resolution order: built-in defaults, then an optional config file, then
//! `CHATBOT_`-prefixed environment variables (`__` as the nesting
//! separator, e.g. `CHATBOT_SESSION__EXPIRY_HOURS=48`).

use std::path::Path;

use config::{Config, Environment, File};

use crate::{ConfigError, EngineConfig};

const ENV_PREFIX: &str = "CHATBOT";

/// Load the engine configuration with file and environment overlays.
pub fn load_settings(file: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = file {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        builder = builder.add_source(File::from(path));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let overlay: EngineConfig = builder
        .build()
        .map_err(|e| ConfigError::Parse(e.to_string()))?
        .try_deserialize()
        .map_err(|e| ConfigError::Parse(e.to_string()))?;

    tracing::debug!(file = ?file, "loaded engine settings");
    Ok(overlay)
}
