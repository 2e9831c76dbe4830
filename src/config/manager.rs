use super::{fetch::FetchSection, labeling::LabelingSection, traits::ConfigSection};
use crate::error::{CandlelabError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub fetch: FetchSection,
    pub labeling: LabelingSection,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.fetch.validate()?;
        self.labeling.validate()?;
        Ok(())
    }
}

/// Loads and persists the immutable pipeline configuration. Components never
/// read ambient state; they receive the section they need by value.
pub struct ConfigManager;

impl ConfigManager {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CandlelabError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| CandlelabError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(config: &AppConfig, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(config)
            .map_err(|e| CandlelabError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| CandlelabError::Configuration(format!("Failed to write config: {}", e)))?;
        Ok(())
    }
}
