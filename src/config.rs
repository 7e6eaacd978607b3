//! Generator configuration: parameters plus the biome rule table, stored as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::biome::{BiomeRule, default_rules};
use crate::error::ConfigError;
use crate::world::GenerationParameters;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub parameters: GenerationParameters,
    /// Evaluated in order; on overlap the later rule wins.
    pub biomes: Vec<BiomeRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self { parameters: GenerationParameters::default(), biomes: default_rules() }
    }
}

impl Config {
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config = Self::from_json(&contents)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` when given, otherwise fall back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::debug!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(ConfigError::Write)?;
        }
        std::fs::write(path, json).map_err(ConfigError::Write)?;
        log::info!("config saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parameters.validate()?;
        for rule in &self.biomes {
            rule.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NormalizeMode;

    #[test]
    fn default_roundtrip() {
        let config = Config::default();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"sea_level\""));
        assert!(json.contains("Tundra"));
        assert_eq!(Config::from_json(&json).unwrap(), config);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = Config::from_json(r#"{ "parameters": { "width": 64, "seed": 9 } }"#).unwrap();
        assert_eq!(config.parameters.width, 64);
        assert_eq!(config.parameters.seed, 9);
        assert_eq!(config.parameters.height, GenerationParameters::default().height);
        assert_eq!(config.parameters.falloff.a, 1.86);
        assert_eq!(config.biomes, default_rules());
    }

    #[test]
    fn nested_overrides() {
        let json = r#"{
            "parameters": {
                "noise": { "octaves": 3, "normalize_mode": "local" },
                "humidity": { "dew_point": 4.5 }
            },
            "biomes": [
                { "name": "Only", "min_temperature": -1, "max_temperature": 1,
                  "min_prec": -1, "max_prec": 1, "color": [1, 2, 3] }
            ]
        }"#;
        let config = Config::from_json(json).unwrap();
        assert_eq!(config.parameters.noise.octaves, 3);
        assert_eq!(config.parameters.noise.normalize_mode, NormalizeMode::Local);
        assert_eq!(config.parameters.noise.persistence, 0.5);
        assert_eq!(config.parameters.humidity.dew_point, 4.5);
        assert_eq!(config.biomes.len(), 1);
        assert_eq!(config.biomes[0].color, [1, 2, 3]);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let result = Config::from_json(r#"{ "parameters": { "width": 0 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(Config::from_json("{not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config::default();
        config.parameters.seed = 77;
        config.parameters.use_true_equator = true;

        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }

    #[test]
    fn load_or_default_without_path() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
