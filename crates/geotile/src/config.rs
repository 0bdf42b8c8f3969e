//! Configuration management for the geotile tool.
//!
//! This module handles loading, validation, and conversion of the TOML
//! configuration into the settings the geotile core expects.

use geotile_core::geo::MAX_PRECISION;
use geotile_core::spawn::{RarityTable, SpawnConfig};
use geotile_core::{EligibilityGate, DEFAULT_ELIGIBILITY_RADIUS_M};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

fn default_coarse_precision() -> usize {
    7
}

fn default_fine_precision() -> usize {
    8
}

fn default_radius_m() -> f64 {
    DEFAULT_ELIGIBILITY_RADIUS_M
}

fn default_cooldown_minutes() -> u64 {
    10
}

fn default_rarity_weights() -> [f64; 5] {
    RarityTable::default().weights()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Application configuration loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tile precision settings
    #[serde(default)]
    pub tiles: TileSettings,
    /// Interaction radius settings
    #[serde(default)]
    pub eligibility: EligibilitySettings,
    /// Spawn pipeline settings
    #[serde(default)]
    pub spawn: SpawnSettings,
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Geohash lengths used for the two tile levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSettings {
    /// Characters in a coarse (map clustering) tile id
    #[serde(default = "default_coarse_precision")]
    pub coarse_precision: usize,
    /// Characters in a fine (AR proximity) tile id
    #[serde(default = "default_fine_precision")]
    pub fine_precision: usize,
}

/// Interaction radius for collecting and checking in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilitySettings {
    /// Maximum distance in meters, inclusive
    #[serde(default = "default_radius_m")]
    pub radius_m: f64,
}

/// Spawn pipeline tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSettings {
    /// Minutes a user waits between spawns for the same green-plan target
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: u64,
    /// Relative weights for common, uncommon, rare, epic and legendary
    #[serde(default = "default_rarity_weights")]
    pub rarity_weights: [f64; 5],
}

/// Logging system configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

impl Default for TileSettings {
    fn default() -> Self {
        Self {
            coarse_precision: default_coarse_precision(),
            fine_precision: default_fine_precision(),
        }
    }
}

impl Default for EligibilitySettings {
    fn default() -> Self {
        Self {
            radius_m: default_radius_m(),
        }
    }
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            cooldown_minutes: default_cooldown_minutes(),
            rarity_weights: default_rarity_weights(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, creates a default configuration file at the specified path
    /// and returns the default configuration.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// The loaded or default configuration, or an error if loading/creation failed.
    pub async fn load_from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            tokio::fs::write(path, toml_content).await?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Gate built from the configured radius.
    pub fn gate(&self) -> EligibilityGate {
        EligibilityGate::new(self.eligibility.radius_m)
    }

    /// Converts the spawn settings into the pipeline configuration.
    ///
    /// Cooldowns too large to represent in seconds saturate.
    pub fn to_spawn_config(&self) -> SpawnConfig {
        SpawnConfig {
            gate: self.gate(),
            cooldown: Duration::from_secs(self.spawn.cooldown_minutes.saturating_mul(60)),
            rarity: RarityTable::from_weights(self.spawn.rarity_weights),
        }
    }

    /// Validates the configuration for consistency and correctness.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, or an error string describing the issue.
    pub fn validate(&self) -> Result<(), String> {
        for (name, precision) in [
            ("tiles.coarse_precision", self.tiles.coarse_precision),
            ("tiles.fine_precision", self.tiles.fine_precision),
        ] {
            if precision == 0 || precision > MAX_PRECISION {
                return Err(format!(
                    "{name} must be between 1 and {MAX_PRECISION}, got {precision}"
                ));
            }
        }

        if self.tiles.coarse_precision >= self.tiles.fine_precision {
            return Err("tiles.coarse_precision must be less than tiles.fine_precision".to_string());
        }

        let radius = self.eligibility.radius_m;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(format!(
                "eligibility.radius_m must be a positive number, got {radius}"
            ));
        }

        let weights = &self.spawn.rarity_weights;
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || weights.iter().sum::<f64>() <= 0.0 {
            return Err("spawn.rarity_weights must be non-negative with a positive total".to_string());
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use tokio::fs;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.tiles.coarse_precision, 7);
        assert_eq!(config.tiles.fine_precision, 8);
        assert_eq!(config.eligibility.radius_m, 50.0);
        assert_eq!(config.spawn.cooldown_minutes, 10);
        assert_eq!(config.spawn.rarity_weights, [50.0, 25.0, 15.0, 8.0, 2.0]);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_to_spawn_config() {
        let mut config = AppConfig::default();
        config.spawn.cooldown_minutes = 3;
        config.eligibility.radius_m = 75.0;

        let spawn = config.to_spawn_config();
        assert_eq!(spawn.cooldown, Duration::from_secs(180));
        assert_eq!(spawn.gate.radius_m, 75.0);
        assert_eq!(spawn.rarity, RarityTable::default());
    }

    #[test]
    fn test_huge_cooldown_saturates() {
        let mut config = AppConfig::default();
        config.spawn.cooldown_minutes = u64::MAX / 2;
        assert!(config.validate().is_ok());

        let spawn = config.to_spawn_config();
        assert_eq!(spawn.cooldown, Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_validate_precisions() {
        let mut config = AppConfig::default();
        config.tiles.coarse_precision = 0;
        assert!(config.validate().unwrap_err().contains("coarse_precision"));

        let mut config = AppConfig::default();
        config.tiles.fine_precision = 13;
        assert!(config.validate().unwrap_err().contains("fine_precision"));

        let mut config = AppConfig::default();
        config.tiles.coarse_precision = 8;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_radius_and_weights() {
        let mut config = AppConfig::default();
        config.eligibility.radius_m = 0.0;
        assert!(config.validate().is_err());

        config.eligibility.radius_m = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.spawn.rarity_weights = [0.0; 5];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log level: verbose"));
    }

    #[tokio::test]
    async fn test_load_from_nonexistent_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geotile.toml");

        let config = AppConfig::load_from_file(&path).await.unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        // The created file loads back to the same settings.
        let reloaded = AppConfig::load_from_file(&path).await.unwrap();
        assert_eq!(reloaded, config);
    }

    #[tokio::test]
    async fn test_load_from_existing_file() {
        let toml_content = r#"
[tiles]
coarse_precision = 6
fine_precision = 9

[eligibility]
radius_m = 30.0

[logging]
level = "debug"
json_format = true
"#;

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), toml_content).await.unwrap();

        let config = AppConfig::load_from_file(&temp_file.path().to_path_buf())
            .await
            .unwrap();

        assert_eq!(config.tiles.coarse_precision, 6);
        assert_eq!(config.tiles.fine_precision, 9);
        assert_eq!(config.eligibility.radius_m, 30.0);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
        // Missing section falls back to defaults
        assert_eq!(config.spawn, SpawnSettings::default());
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_load_from_invalid_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "[tiles\ncoarse_precision = ")
            .await
            .unwrap();

        let result = AppConfig::load_from_file(&temp_file.path().to_path_buf()).await;
        assert!(result.is_err());
    }
}
