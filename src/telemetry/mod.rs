// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Telemetry module - synthetic readings and operating-state classification

mod reading;
mod generator;
mod classifier;

pub use reading::SensorReading;
pub use generator::{ReadingGenerator, TelemetrySource};
pub use classifier::{classify, VehicleState};
