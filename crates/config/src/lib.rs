//! Configuration tables for the sales chatbot engine
//!
//! All tunable data lives here: the package catalog, per-industry ROI
//! tables, lead-scoring weights, NLP thresholds, and session policy. Every
//! field carries a serde default so partial config files and environment
//! overrides compose with the built-in values.

pub mod nlp;
pub mod packages;
pub mod roi;
pub mod scoring;
pub mod session;
pub mod settings;

pub use nlp::NlpConfig;
pub use packages::{PackageCatalog, PackageSpec};
pub use roi::{IndustryRoi, RoiEntry, RoiTables};
pub use scoring::{
    BudgetPoints, BusinessTypePoints, DecisionMakerPoints, ScoringConfig, TimelinePoints,
};
pub use session::SessionConfig;
pub use settings::load_settings;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0:?}")]
    Invalid(Vec<String>),
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub nlp: NlpConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub packages: PackageCatalog,
    #[serde(default)]
    pub roi: RoiTables,
    #[serde(default)]
    pub session: SessionConfig,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = read_file(path.as_ref())?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = read_file(path.as_ref())?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = read_file(path.as_ref())?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save to a YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content =
            serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate cross-field invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.nlp.min_input_length >= self.nlp.max_input_length {
            errors.push("nlp: min_input_length must be below max_input_length".to_string());
        }
        if self.nlp.medium_confidence > self.nlp.high_confidence {
            errors.push("nlp: medium_confidence must not exceed high_confidence".to_string());
        }
        if !(self.scoring.warm_floor < self.scoring.hot_floor
            && self.scoring.hot_floor < self.scoring.qualified_floor)
        {
            errors.push("scoring: level floors must be strictly increasing".to_string());
        }
        if self.scoring.qualified_floor > 100 {
            errors.push("scoring: qualified_floor must be at most 100".to_string());
        }
        if self.packages.essential.price >= self.packages.professional.price
            || self.packages.professional.price >= self.packages.premium.price
        {
            errors.push("packages: tier prices must be strictly increasing".to_string());
        }
        if self.session.expiry_hours == 0 {
            errors.push("session: expiry_hours must be positive".to_string());
        }
        if self.session.recent_intent_window > self.session.max_intent_history {
            errors.push(
                "session: recent_intent_window must not exceed max_intent_history".to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    std::fs::read_to_string(path).map_err(|e| ConfigError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_validate_catches_inverted_floors() {
        let mut cfg = EngineConfig::default();
        cfg.scoring.hot_floor = 20;
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_yaml_round_trip() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let cfg = EngineConfig::default();
        cfg.to_yaml_file(file.path()).unwrap();

        let loaded = EngineConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[nlp]\nmin_input_length = 3").unwrap();

        let cfg = EngineConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(cfg.nlp.min_input_length, 3);
        assert_eq!(cfg.nlp.max_input_length, 500);
        assert_eq!(cfg.scoring.qualified_floor, 86);
    }
}
