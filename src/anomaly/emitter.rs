// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Stochastic anomaly emission

use rand::prelude::*;
use rand_distr::Uniform;

use super::{Anomaly, AnomalyType};
use crate::fleet::VehicleId;

/// Rolls one independent Bernoulli trial per vehicle per tick.
///
/// Emission is not derived from the vehicle's reading, so a vehicle can be
/// classified `Normal` and still raise a critical anomaly in the same tick.
#[derive(Debug, Clone)]
pub struct AnomalyEmitter {
    probability: f64,
    location_probability: f64,
    location_label: String,
    severity: Uniform<u8>,
    max_value: f64,
    max_ml_score: f64,
}

impl Default for AnomalyEmitter {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl AnomalyEmitter {
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            location_probability: 0.3,
            location_label: "Downtown Area".to_string(),
            severity: Uniform::new_inclusive(1, 5),
            max_value: 100.0,
            max_ml_score: 5.0,
        }
    }

    /// Roll for `vehicle_id`; `None` when the trial fails.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R, vehicle_id: VehicleId) -> Option<Anomaly> {
        if rng.gen::<f64>() < self.probability {
            Some(self.generate(rng, vehicle_id))
        } else {
            None
        }
    }

    /// Unconditionally produce an anomaly with a random type and severity.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, vehicle_id: VehicleId) -> Anomaly {
        let anomaly_type = *AnomalyType::ALL
            .choose(rng)
            .unwrap_or(&AnomalyType::SensorFailure);
        let severity = self.severity.sample(rng);
        let value = rng.gen_range(0.0..self.max_value);

        let mut anomaly = Anomaly::new(vehicle_id, anomaly_type, severity, value)
            .with_ml_score(rng.gen_range(0.0..self.max_ml_score));

        if rng.gen::<f64>() < self.location_probability {
            anomaly = anomaly.with_location(self.location_label.clone());
        }

        anomaly
    }
}
