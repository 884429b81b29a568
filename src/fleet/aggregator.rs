// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Fleet aggregator - owns the vehicle arena and advances it one tick at a time

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

use super::history::VehicleHistory;
use super::vehicle::{UpdatePolicy, Vehicle, VehicleId, VEHICLE_CATALOG};
use crate::anomaly::{Anomaly, AnomalyEmitter};
use crate::config::{AnalyticsConfig, SimulationConfig};
use crate::telemetry::{ReadingGenerator, TelemetrySource};

/// Result of advancing the fleet by one tick
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub readings: usize,
    pub anomalies: Vec<Anomaly>,
}

struct FleetEntry {
    vehicle: Vehicle,
    history: VehicleHistory,
}

/// Owns every vehicle; the only component that mutates them.
///
/// Vehicles are stored in an arena where index `i` holds id `i + 1`.
pub struct FleetAggregator {
    entries: Vec<FleetEntry>,
    generator: ReadingGenerator,
    emitter: AnomalyEmitter,
    policy: UpdatePolicy,
}

impl FleetAggregator {
    /// Build the demo fleet. Catalog entries are reused when `fleet_size`
    /// exceeds the catalog.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, simulation: &SimulationConfig, analytics: &AnalyticsConfig) -> Self {
        let generator = ReadingGenerator::new();
        let entries = (0..simulation.fleet_size)
            .map(|index| {
                let (make_model, plate) = VEHICLE_CATALOG[index % VEHICLE_CATALOG.len()];
                let reading = generator.next_reading(rng, None);
                let vehicle = Vehicle::seeded(rng, index as VehicleId + 1, make_model, plate, reading);
                let mut history = VehicleHistory::new(analytics.history_size);
                history.record(&vehicle.current_reading);
                FleetEntry { vehicle, history }
            })
            .collect::<Vec<_>>();

        info!("Fleet initialized with {} vehicles", entries.len());

        Self {
            entries,
            generator,
            emitter: AnomalyEmitter::new(simulation.anomaly_probability),
            policy: UpdatePolicy {
                harsh_event_threshold: simulation.harsh_event_threshold,
                maintenance_interval_km: simulation.maintenance_interval_km,
            },
        }
    }

    /// Build from explicit vehicles, mainly for deterministic scenarios.
    pub fn from_vehicles(vehicles: Vec<Vehicle>, emitter: AnomalyEmitter, policy: UpdatePolicy, history_size: usize) -> Self {
        let entries = vehicles
            .into_iter()
            .map(|vehicle| {
                let mut history = VehicleHistory::new(history_size);
                history.record(&vehicle.current_reading);
                FleetEntry { vehicle, history }
            })
            .collect();

        Self {
            entries,
            generator: ReadingGenerator::new(),
            emitter,
            policy,
        }
    }

    pub fn with_generator(mut self, generator: ReadingGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, id: VehicleId) -> Option<&FleetEntry> {
        self.position(id).map(|index| &self.entries[index])
    }

    fn entry_mut(&mut self, id: VehicleId) -> Option<&mut FleetEntry> {
        self.position(id).map(|index| &mut self.entries[index])
    }

    fn position(&self, id: VehicleId) -> Option<usize> {
        let slot = (id as usize).checked_sub(1);
        match slot.and_then(|s| self.entries.get(s)) {
            Some(entry) if entry.vehicle.id == id => slot,
            _ => self.entries.iter().position(|e| e.vehicle.id == id),
        }
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.entry(id).map(|e| &e.vehicle)
    }

    pub fn history(&self, id: VehicleId) -> Option<&VehicleHistory> {
        self.entry(id).map(|e| &e.history)
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.entries.iter().map(|e| &e.vehicle)
    }

    pub fn snapshot(&self) -> Vec<Vehicle> {
        self.vehicles().cloned().collect()
    }

    /// Reset the service interval of one vehicle. Returns `false` for unknown ids.
    pub fn mark_serviced(&mut self, id: VehicleId) -> bool {
        match self.entry_mut(id) {
            Some(entry) => {
                entry.vehicle.mark_serviced();
                info!("Vehicle {} marked as serviced", id);
                true
            }
            None => false,
        }
    }

    /// Generate, classify and accumulate one reading per vehicle, then roll
    /// the anomaly emitter for each of them.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, now: DateTime<Utc>) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        for entry in self.entries.iter_mut() {
            let reading = self.generator.next_reading(rng, Some(&entry.vehicle.current_reading));
            entry.history.record(&reading);

            let previous_state = entry.vehicle.state;
            entry.vehicle.apply_reading(reading, now, &self.policy);
            outcome.readings += 1;

            if entry.vehicle.state != previous_state {
                debug!("Vehicle {} state {} -> {}", entry.vehicle.id, previous_state, entry.vehicle.state);
            }
        }

        for entry in self.entries.iter_mut() {
            if let Some(anomaly) = self.emitter.roll(rng, entry.vehicle.id) {
                entry.vehicle.record_anomaly();
                if anomaly.is_critical() {
                    warn!(
                        "Critical anomaly on vehicle {}: {} (severity {})",
                        anomaly.vehicle_id, anomaly.anomaly_type, anomaly.severity
                    );
                } else {
                    debug!(
                        "Anomaly on vehicle {}: {} (severity {})",
                        anomaly.vehicle_id, anomaly.anomaly_type, anomaly.severity
                    );
                }
                outcome.anomalies.push(anomaly);
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{SensorReading, VehicleState};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fleet(size: usize, probability: f64) -> (FleetAggregator, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let simulation = SimulationConfig {
            fleet_size: size,
            anomaly_probability: probability,
            ..SimulationConfig::default()
        };
        let fleet = FleetAggregator::new(&mut rng, &simulation, &AnalyticsConfig::default());
        (fleet, rng)
    }

    #[test]
    fn test_initial_fleet_uses_catalog() {
        let (fleet, _) = fleet(22, 0.05);
        assert_eq!(fleet.len(), 22);
        let ids: Vec<_> = fleet.vehicles().map(|v| v.id).collect();
        assert_eq!(ids, (1..=22).collect::<Vec<_>>());
        assert_eq!(fleet.vehicle(1).unwrap().make_model, "Honda Civic");
        assert_eq!(fleet.vehicle(21).unwrap().license_plate, "ABC-123");
        assert!(fleet.vehicle(0).is_none());
        assert!(fleet.vehicle(23).is_none());
    }

    #[test]
    fn test_max_speed_non_decreasing() {
        let (mut fleet, mut rng) = fleet(5, 0.05);
        let mut previous: Vec<f64> = fleet.vehicles().map(|v| v.max_speed).collect();

        for _ in 0..300 {
            fleet.tick(&mut rng, Utc::now());
            for (v, prev) in fleet.vehicles().zip(previous.iter_mut()) {
                assert!(v.max_speed >= *prev);
                assert!(v.max_speed >= v.current_reading.speed);
                *prev = v.max_speed;
            }
        }
    }

    #[test]
    fn test_tick_counts_readings_and_anomalies() {
        let (mut fleet, mut rng) = fleet(4, 1.0);
        let before: Vec<u32> = fleet.vehicles().map(|v| v.total_anomalies).collect();

        let outcome = fleet.tick(&mut rng, Utc::now());
        assert_eq!(outcome.readings, 4);
        assert_eq!(outcome.anomalies.len(), 4);

        for (v, b) in fleet.vehicles().zip(before) {
            assert_eq!(v.total_anomalies, b + 1);
        }
        assert_eq!(fleet.history(1).unwrap().len(), 2);
    }

    #[test]
    fn test_single_vehicle_overheating_scenario() {
        let vehicle = Vehicle::new(1, "Honda Civic", "ABC-123", SensorReading::nominal());
        let mut fleet = FleetAggregator::from_vehicles(vec![vehicle], AnomalyEmitter::new(0.0), UpdatePolicy::default(), 10)
            .with_generator(ReadingGenerator {
                temperature: 106.0..106.0,
                engine_off_probability: 0.0,
                ..ReadingGenerator::default()
            });
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = fleet.tick(&mut rng, Utc::now());
        assert!(outcome.anomalies.is_empty());
        assert_eq!(fleet.vehicle(1).unwrap().state, VehicleState::Critical);
    }

    #[test]
    fn test_mark_serviced_unknown_vehicle() {
        let (mut fleet, _) = fleet(2, 0.0);
        assert!(fleet.mark_serviced(2));
        assert!(!fleet.mark_serviced(9));
    }
}
