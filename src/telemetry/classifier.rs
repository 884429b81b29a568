// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Vehicle operating-state classification

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SensorReading;

pub const CRITICAL_TEMPERATURE: f64 = 105.0;
pub const CRITICAL_SPEED: f64 = 150.0;
pub const WARNING_TEMPERATURE: f64 = 100.0;
pub const WARNING_SPEED: f64 = 130.0;

/// Discrete operating state of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleState {
    #[default]
    Normal,
    Warning,
    Critical,
    Offline,
    /// Running normally but past its service interval
    Maintenance,
}

impl VehicleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleState::Normal => "NORMAL",
            VehicleState::Warning => "WARNING",
            VehicleState::Critical => "CRITICAL",
            VehicleState::Offline => "OFFLINE",
            VehicleState::Maintenance => "MAINTENANCE",
        }
    }

    /// Downgrade a `Normal` vehicle to `Maintenance` when its service is due.
    /// Any other state already demands more attention and is kept.
    pub fn with_service_due(self, due: bool) -> Self {
        match self {
            VehicleState::Normal if due => VehicleState::Maintenance,
            other => other,
        }
    }

    pub fn is_active(&self) -> bool {
        *self != VehicleState::Offline
    }
}

impl fmt::Display for VehicleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a reading. First matching rule wins; there is no hysteresis.
pub fn classify(reading: &SensorReading, engine_on: bool) -> VehicleState {
    if reading.temperature > CRITICAL_TEMPERATURE || reading.speed > CRITICAL_SPEED {
        VehicleState::Critical
    } else if reading.temperature > WARNING_TEMPERATURE || reading.speed > WARNING_SPEED {
        VehicleState::Warning
    } else if !engine_on {
        VehicleState::Offline
    } else {
        VehicleState::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: f64, speed: f64) -> SensorReading {
        SensorReading {
            temperature,
            speed,
            ..SensorReading::nominal()
        }
    }

    #[test]
    fn test_overheating_is_critical() {
        assert_eq!(classify(&reading(106.0, 40.0), true), VehicleState::Critical);
    }

    #[test]
    fn test_engine_off_is_offline() {
        assert_eq!(classify(&reading(90.0, 40.0), false), VehicleState::Offline);
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(classify(&reading(90.0, 151.0), true), VehicleState::Critical);
        assert_eq!(classify(&reading(101.0, 40.0), true), VehicleState::Warning);
        assert_eq!(classify(&reading(90.0, 131.0), true), VehicleState::Warning);
        // Thermal and speed limits outrank engine state
        assert_eq!(classify(&reading(106.0, 40.0), false), VehicleState::Critical);
        assert_eq!(classify(&reading(101.0, 40.0), false), VehicleState::Warning);
        assert_eq!(classify(&reading(90.0, 40.0), true), VehicleState::Normal);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        assert_eq!(classify(&reading(105.0, 150.0), true), VehicleState::Warning);
        assert_eq!(classify(&reading(100.0, 130.0), true), VehicleState::Normal);
    }

    #[test]
    fn test_deterministic() {
        let r = reading(102.5, 90.0);
        let first = classify(&r, true);
        for _ in 0..100 {
            assert_eq!(classify(&r, true), first);
        }
    }

    #[test]
    fn test_service_due_only_overrides_normal() {
        assert_eq!(VehicleState::Normal.with_service_due(true), VehicleState::Maintenance);
        assert_eq!(VehicleState::Normal.with_service_due(false), VehicleState::Normal);
        assert_eq!(VehicleState::Critical.with_service_due(true), VehicleState::Critical);
        assert_eq!(VehicleState::Offline.with_service_due(true), VehicleState::Offline);
    }
}
