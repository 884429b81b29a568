// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Configuration module

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::Result;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level used when neither RUST_LOG nor a command line flag sets one
    pub log_level: String,

    /// Simulation configuration
    pub simulation: SimulationConfig,

    /// Analytics configuration
    pub analytics: AnalyticsConfig,

    /// Export configuration
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            simulation: SimulationConfig::default(),
            analytics: AnalyticsConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("fleetwatch"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of simulated vehicles
    pub fleet_size: usize,

    /// Fleet tick interval in milliseconds
    pub tick_interval_ms: u64,

    /// Per-vehicle, per-tick anomaly probability
    pub anomaly_probability: f64,

    /// Maximum retained anomalies
    pub anomaly_capacity: usize,

    /// Maximum retained system events
    pub event_log_capacity: usize,

    /// Absolute acceleration (m/s²) counted as a harsh event
    pub harsh_event_threshold: f64,

    /// Distance driven in-session before a vehicle reports maintenance.
    /// A tick advances a vehicle by speed/3600 km, about 0.02 km on average,
    /// so the default comes due after roughly 250 ticks.
    pub maintenance_interval_km: f64,

    /// Fixed RNG seed for reproducible runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fleet_size: 20,
            tick_interval_ms: 2000,
            anomaly_probability: 0.05,
            anomaly_capacity: 1000,
            event_log_capacity: 10,
            harsh_event_threshold: 2.5,
            maintenance_interval_km: 5.0,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// How per-vehicle statistics are produced
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsMode {
    /// Baseline-plus-variance model; fresh random values on every request
    Synthetic,
    /// Aggregation over each vehicle's retained reading history
    #[default]
    History,
}

/// Analytics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub mode: AnalyticsMode,

    /// Samples retained per metric per vehicle
    pub history_size: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            mode: AnalyticsMode::History,
            history_size: 200,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output directory for exported artifacts
    pub directory: PathBuf,

    /// Number of most recent anomalies included in the JSON report
    pub recent_anomalies: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./exports"),
            recent_anomalies: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_cadence() {
        let config = Config::default();
        assert_eq!(config.simulation.fleet_size, 20);
        assert_eq!(config.simulation.tick_interval(), Duration::from_millis(2000));
        assert_eq!(config.simulation.anomaly_capacity, 1000);
        assert_eq!(config.simulation.event_log_capacity, 10);
        assert_eq!(config.analytics.mode, AnalyticsMode::History);
    }

    #[test]
    fn test_harsh_threshold_within_generated_range() {
        let config = Config::default();
        let span = crate::telemetry::ReadingGenerator::default().acceleration_span;
        assert!(config.simulation.harsh_event_threshold < span);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load_or_create(&path).unwrap();
        assert!(path.exists());

        config.simulation.seed = Some(42);
        config.analytics.mode = AnalyticsMode::Synthetic;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.simulation.seed, Some(42));
        assert_eq!(loaded.analytics.mode, AnalyticsMode::Synthetic);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let text = "log_level = \"debug\"\n[simulation]\nfleet_size = 3\n";
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.simulation.fleet_size, 3);
        assert_eq!(config.simulation.tick_interval_ms, 2000);
        assert_eq!(config.export.recent_anomalies, 100);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "simulation = 5").unwrap();

        assert!(matches!(Config::load(&path), Err(crate::FleetError::Config(_))));
    }
}
