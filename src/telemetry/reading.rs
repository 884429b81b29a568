// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Sensor reading snapshot

use serde::{Deserialize, Serialize};

/// Instantaneous vehicle telemetry.
///
/// A reading is replaced wholesale on every tick and is never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    /// km/h
    pub speed: f64,
    pub rpm: f64,
    /// Engine temperature in °C
    pub temperature: f64,
    /// Percent of tank
    pub fuel_level: f64,
    /// Percent
    pub throttle_position: f64,
    pub engine_on: bool,
    pub latitude: f64,
    pub longitude: f64,
    /// m/s², negative when braking
    pub acceleration: f64,
    /// bar
    pub brake_pressure: f64,
    /// bar
    pub oil_pressure: f64,
    /// V
    pub battery_voltage: f64,
    /// km
    pub odometer: f64,
    pub abs_active: bool,
    pub traction_control_active: bool,
}

impl SensorReading {
    /// A running vehicle at nominal values, used as a starting point in tests
    /// and for vehicles that have not produced telemetry yet.
    pub fn nominal() -> Self {
        Self {
            speed: 50.0,
            rpm: 2000.0,
            temperature: 90.0,
            fuel_level: 50.0,
            throttle_position: 20.0,
            engine_on: true,
            latitude: 40.7128,
            longitude: -74.006,
            acceleration: 0.0,
            brake_pressure: 0.0,
            oil_pressure: 4.0,
            battery_voltage: 12.6,
            odometer: 0.0,
            abs_active: false,
            traction_control_active: false,
        }
    }
}

impl Default for SensorReading {
    fn default() -> Self {
        Self::nominal()
    }
}
