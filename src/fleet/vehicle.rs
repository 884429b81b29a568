// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Vehicle identity and cumulative counters

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::telemetry::{classify, SensorReading, VehicleState};

/// Stable vehicle identifier, the join key across every component
pub type VehicleId = u32;

/// Demo fleet catalog: (make/model, license plate)
pub const VEHICLE_CATALOG: [(&str, &str); 20] = [
    ("Honda Civic", "ABC-123"),
    ("Toyota Camry", "DEF-456"),
    ("Ford F-150", "GHI-789"),
    ("BMW X3", "JKL-012"),
    ("Tesla Model 3", "MNO-345"),
    ("Chevrolet Silverado", "PQR-678"),
    ("Nissan Altima", "STU-901"),
    ("Hyundai Elantra", "VWX-234"),
    ("Mercedes C-Class", "YZA-567"),
    ("Audi A4", "BCD-890"),
    ("Volkswagen Jetta", "EFG-123"),
    ("Subaru Outback", "HIJ-456"),
    ("Mazda CX-5", "KLM-789"),
    ("Jeep Wrangler", "NOP-012"),
    ("Kia Sorento", "QRS-345"),
    ("Volvo XC90", "TUV-678"),
    ("Lexus RX", "WXY-901"),
    ("Acura MDX", "ZAB-234"),
    ("Infiniti Q50", "CDE-567"),
    ("Cadillac Escalade", "FGH-890"),
];

/// Thresholds the fleet applies when folding a reading into a vehicle
#[derive(Debug, Clone, Copy)]
pub struct UpdatePolicy {
    pub harsh_event_threshold: f64,
    pub maintenance_interval_km: f64,
}

impl Default for UpdatePolicy {
    fn default() -> Self {
        Self {
            harsh_event_threshold: 2.5,
            maintenance_interval_km: 5.0,
        }
    }
}

/// A simulated vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub make_model: String,
    pub license_plate: String,
    pub state: VehicleState,
    pub last_seen: DateTime<Utc>,
    /// km
    pub total_distance: f64,
    /// Exponentially smoothed (weight 0.5), not an arithmetic mean
    pub avg_speed: f64,
    pub max_speed: f64,
    pub harsh_events: u32,
    pub total_anomalies: u32,
    /// `total_distance` at the last service
    pub service_distance: f64,
    pub current_reading: SensorReading,
}

impl Vehicle {
    pub fn new(id: VehicleId, make_model: &str, license_plate: &str, reading: SensorReading) -> Self {
        let state = classify(&reading, reading.engine_on);
        Self {
            id,
            make_model: make_model.to_string(),
            license_plate: license_plate.to_string(),
            state,
            last_seen: Utc::now(),
            total_distance: 0.0,
            avg_speed: reading.speed,
            max_speed: reading.speed,
            harsh_events: 0,
            total_anomalies: 0,
            service_distance: 0.0,
            current_reading: reading,
        }
    }

    /// A vehicle with a randomized prior history, as the demo fleet starts out.
    pub fn seeded<R: Rng + ?Sized>(
        rng: &mut R,
        id: VehicleId,
        make_model: &str,
        license_plate: &str,
        reading: SensorReading,
    ) -> Self {
        let mut vehicle = Self::new(id, make_model, license_plate, reading);
        vehicle.total_distance = rng.gen_range(0.0..50_000.0);
        vehicle.service_distance = vehicle.total_distance;
        vehicle.avg_speed = rng.gen_range(45.0..75.0);
        vehicle.max_speed = rng.gen_range(80.0..120.0_f64).max(vehicle.current_reading.speed);
        vehicle.harsh_events = rng.gen_range(0..20);
        vehicle.total_anomalies = rng.gen_range(0..50);
        vehicle
    }

    pub fn distance_since_service(&self) -> f64 {
        self.total_distance - self.service_distance
    }

    pub fn service_due(&self, interval_km: f64) -> bool {
        self.distance_since_service() >= interval_km
    }

    /// Fold a fresh reading into the counters and re-derive the state.
    pub fn apply_reading(&mut self, reading: SensorReading, now: DateTime<Utc>, policy: &UpdatePolicy) {
        let speed = reading.speed;

        // One tick is treated as speed/3600, not integrated over wall time
        self.total_distance += speed / 3600.0;
        self.avg_speed = (self.avg_speed + speed) / 2.0;
        self.max_speed = self.max_speed.max(speed);

        if reading.acceleration.abs() > policy.harsh_event_threshold {
            self.harsh_events += 1;
        }

        self.state = classify(&reading, reading.engine_on)
            .with_service_due(self.service_due(policy.maintenance_interval_km));
        self.last_seen = now;
        self.current_reading = reading;
    }

    pub fn record_anomaly(&mut self) {
        self.total_anomalies += 1;
    }

    /// Reset the service interval to the current distance.
    pub fn mark_serviced(&mut self) {
        self.service_distance = self.total_distance;
        if self.state == VehicleState::Maintenance {
            self.state = classify(&self.current_reading, self.current_reading.engine_on);
        }
    }
}
