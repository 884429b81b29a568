// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Synthetic reading generator

use rand::Rng;
use std::ops::Range;

use super::SensorReading;

/// Anything able to produce the next reading for a vehicle.
pub trait TelemetrySource {
    /// Produce a fresh reading. `previous` is `None` on initialization.
    fn next_reading<R: Rng + ?Sized>(&self, rng: &mut R, previous: Option<&SensorReading>) -> SensorReading;
}

/// Produces bounded, uniformly distributed readings around plausible baselines.
#[derive(Debug, Clone)]
pub struct ReadingGenerator {
    pub speed: Range<f64>,
    pub rpm: Range<f64>,
    pub temperature: Range<f64>,
    pub fuel_level: Range<f64>,
    pub battery_voltage: Range<f64>,
    pub oil_pressure: Range<f64>,
    pub brake_pressure: Range<f64>,
    /// Symmetric bound on acceleration, m/s²
    pub acceleration_span: f64,
    /// Centre of the simulated operating area
    pub origin: (f64, f64),
    /// Side of the square operating area, degrees
    pub area_span: f64,
    pub engine_off_probability: f64,
    pub abs_probability: f64,
    pub traction_control_probability: f64,
    pub initial_odometer_max: f64,
}

impl Default for ReadingGenerator {
    fn default() -> Self {
        Self {
            speed: 20.0..120.0,
            rpm: 800.0..6000.0,
            temperature: 80.0..95.0,
            fuel_level: 10.0..95.0,
            battery_voltage: 11.5..14.5,
            oil_pressure: 2.0..6.0,
            brake_pressure: 0.0..10.0,
            acceleration_span: 3.0,
            origin: (40.7128, -74.006),
            area_span: 0.1,
            engine_off_probability: 0.05,
            abs_probability: 0.1,
            traction_control_probability: 0.05,
            initial_odometer_max: 200_000.0,
        }
    }
}

impl ReadingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn sample<R: Rng + ?Sized>(rng: &mut R, range: &Range<f64>) -> f64 {
        if range.start < range.end {
            rng.gen_range(range.clone())
        } else {
            range.start
        }
    }

    fn sample_position<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let (lat, lon) = self.origin;
        (
            lat + (rng.gen::<f64>() - 0.5) * self.area_span,
            lon + (rng.gen::<f64>() - 0.5) * self.area_span,
        )
    }

    fn advance_odometer<R: Rng + ?Sized>(&self, rng: &mut R, previous: Option<&SensorReading>, speed: f64) -> f64 {
        match previous {
            Some(prev) => prev.odometer + speed / 3600.0,
            None => rng.gen_range(0.0..self.initial_odometer_max.max(1.0)).floor(),
        }
    }
}

impl TelemetrySource for ReadingGenerator {
    fn next_reading<R: Rng + ?Sized>(&self, rng: &mut R, previous: Option<&SensorReading>) -> SensorReading {
        let speed = Self::sample(rng, &self.speed).max(0.0);
        let rpm = Self::sample(rng, &self.rpm).max(0.0);
        let temperature = Self::sample(rng, &self.temperature);
        let fuel_level = Self::sample(rng, &self.fuel_level).clamp(0.0, 100.0);
        let throttle_position = rng.gen_range(0.0..100.0);
        let engine_on = !rng.gen_bool(self.engine_off_probability.clamp(0.0, 1.0));
        let (latitude, longitude) = self.sample_position(rng);
        let acceleration = (rng.gen::<f64>() - 0.5) * 2.0 * self.acceleration_span;
        let brake_pressure = Self::sample(rng, &self.brake_pressure).max(0.0);
        let oil_pressure = Self::sample(rng, &self.oil_pressure).max(0.0);
        let battery_voltage = Self::sample(rng, &self.battery_voltage);
        let odometer = self.advance_odometer(rng, previous, speed);
        let abs_active = rng.gen_bool(self.abs_probability.clamp(0.0, 1.0));
        let traction_control_active = rng.gen_bool(self.traction_control_probability.clamp(0.0, 1.0));

        SensorReading {
            speed,
            rpm,
            temperature,
            fuel_level,
            throttle_position,
            engine_on,
            latitude,
            longitude,
            acceleration,
            brake_pressure,
            oil_pressure,
            battery_voltage,
            odometer,
            abs_active,
            traction_control_active,
        }
    }
}
