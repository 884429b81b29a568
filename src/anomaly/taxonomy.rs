// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Fault taxonomy and priority derivation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fault categories an anomaly can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyType {
    SpeedOutOfRange,
    RpmOutOfRange,
    TempOutOfRange,
    SuddenSpeedChange,
    SuddenRpmChange,
    SuddenTempChange,
    EngineStall,
    OverheatingPattern,
    ErraticBehavior,
    SensorFailure,
    FuelLeak,
    MaintenanceRequired,
    GeofenceViolation,
    HarshAcceleration,
    HarshBraking,
}

impl AnomalyType {
    pub const ALL: [AnomalyType; 15] = [
        AnomalyType::SpeedOutOfRange,
        AnomalyType::RpmOutOfRange,
        AnomalyType::TempOutOfRange,
        AnomalyType::SuddenSpeedChange,
        AnomalyType::SuddenRpmChange,
        AnomalyType::SuddenTempChange,
        AnomalyType::EngineStall,
        AnomalyType::OverheatingPattern,
        AnomalyType::ErraticBehavior,
        AnomalyType::SensorFailure,
        AnomalyType::FuelLeak,
        AnomalyType::MaintenanceRequired,
        AnomalyType::GeofenceViolation,
        AnomalyType::HarshAcceleration,
        AnomalyType::HarshBraking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyType::SpeedOutOfRange => "SPEED_OUT_OF_RANGE",
            AnomalyType::RpmOutOfRange => "RPM_OUT_OF_RANGE",
            AnomalyType::TempOutOfRange => "TEMP_OUT_OF_RANGE",
            AnomalyType::SuddenSpeedChange => "SUDDEN_SPEED_CHANGE",
            AnomalyType::SuddenRpmChange => "SUDDEN_RPM_CHANGE",
            AnomalyType::SuddenTempChange => "SUDDEN_TEMP_CHANGE",
            AnomalyType::EngineStall => "ENGINE_STALL",
            AnomalyType::OverheatingPattern => "OVERHEATING_PATTERN",
            AnomalyType::ErraticBehavior => "ERRATIC_BEHAVIOR",
            AnomalyType::SensorFailure => "SENSOR_FAILURE",
            AnomalyType::FuelLeak => "FUEL_LEAK",
            AnomalyType::MaintenanceRequired => "MAINTENANCE_REQUIRED",
            AnomalyType::GeofenceViolation => "GEOFENCE_VIOLATION",
            AnomalyType::HarshAcceleration => "HARSH_ACCELERATION",
            AnomalyType::HarshBraking => "HARSH_BRAKING",
        }
    }

    /// Sensor family: the lower-cased first word of the type name
    pub fn sensor_name(&self) -> &'static str {
        match self {
            AnomalyType::SpeedOutOfRange => "speed",
            AnomalyType::RpmOutOfRange => "rpm",
            AnomalyType::TempOutOfRange => "temp",
            AnomalyType::SuddenSpeedChange
            | AnomalyType::SuddenRpmChange
            | AnomalyType::SuddenTempChange => "sudden",
            AnomalyType::EngineStall => "engine",
            AnomalyType::OverheatingPattern => "overheating",
            AnomalyType::ErraticBehavior => "erratic",
            AnomalyType::SensorFailure => "sensor",
            AnomalyType::FuelLeak => "fuel",
            AnomalyType::MaintenanceRequired => "maintenance",
            AnomalyType::GeofenceViolation => "geofence",
            AnomalyType::HarshAcceleration | AnomalyType::HarshBraking => "harsh",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnomalyType::SpeedOutOfRange => "Vehicle speed exceeded safe limits",
            AnomalyType::RpmOutOfRange => "Engine RPM outside normal operating range",
            AnomalyType::TempOutOfRange => "Engine temperature abnormal",
            AnomalyType::SuddenSpeedChange => "Rapid acceleration or deceleration detected",
            AnomalyType::SuddenRpmChange => "Sudden RPM spike detected",
            AnomalyType::SuddenTempChange => "Rapid temperature change",
            AnomalyType::EngineStall => "Engine stall pattern detected",
            AnomalyType::OverheatingPattern => "Progressive overheating detected",
            AnomalyType::ErraticBehavior => "Erratic driving pattern detected",
            AnomalyType::SensorFailure => "Sensor inconsistency detected",
            AnomalyType::FuelLeak => "Potential fuel leak detected",
            AnomalyType::MaintenanceRequired => "Scheduled maintenance due",
            AnomalyType::GeofenceViolation => "Vehicle entered restricted area",
            AnomalyType::HarshAcceleration => "Harsh acceleration detected",
            AnomalyType::HarshBraking => "Harsh braking detected",
        }
    }
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert priority derived from severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// `>= 4` critical, `3` high, `2` medium, anything lower is low
    pub fn from_severity(severity: u8) -> Self {
        match severity {
            s if s >= 4 => Priority::Critical,
            3 => Priority::High,
            2 => Priority::Medium,
            _ => Priority::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_thresholds() {
        assert_eq!(Priority::from_severity(0), Priority::Low);
        assert_eq!(Priority::from_severity(1), Priority::Low);
        assert_eq!(Priority::from_severity(2), Priority::Medium);
        assert_eq!(Priority::from_severity(3), Priority::High);
        assert_eq!(Priority::from_severity(4), Priority::Critical);
        assert_eq!(Priority::from_severity(5), Priority::Critical);
        assert_eq!(Priority::from_severity(u8::MAX), Priority::Critical);
    }

    #[test]
    fn test_priority_monotonic_in_severity() {
        for s in 0..u8::MAX {
            assert!(Priority::from_severity(s) <= Priority::from_severity(s + 1));
        }
    }

    #[test]
    fn test_taxonomy_is_complete_and_distinct() {
        let mut names: Vec<_> = AnomalyType::ALL.iter().map(|t| t.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 15);
    }

    #[test]
    fn test_sensor_names() {
        assert_eq!(AnomalyType::SpeedOutOfRange.sensor_name(), "speed");
        assert_eq!(AnomalyType::TempOutOfRange.sensor_name(), "temp");
        assert_eq!(AnomalyType::SuddenRpmChange.sensor_name(), "sudden");
        assert_eq!(AnomalyType::HarshBraking.sensor_name(), "harsh");
        for t in AnomalyType::ALL {
            let prefix = t.as_str().split('_').next().unwrap().to_lowercase();
            assert_eq!(t.sensor_name(), prefix);
        }
    }

    #[test]
    fn test_serde_uses_wire_names() {
        for t in AnomalyType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }
}
