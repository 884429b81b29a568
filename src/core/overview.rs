// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Fleet-wide rollup

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::anomaly::{Anomaly, AnomalyType};
use crate::fleet::Vehicle;
use crate::telemetry::VehicleState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetOverview {
    pub total_vehicles: usize,
    /// Vehicles not OFFLINE
    pub active_vehicles: usize,
    pub critical_vehicles: usize,
    pub average_speed: f64,
    pub total_distance: f64,
    pub total_anomalies: usize,
    pub critical_anomalies: usize,
    pub most_common_anomaly: Option<AnomalyType>,
    pub anomaly_rate: f64,
}

impl FleetOverview {
    pub fn compute<'a>(
        vehicles: impl IntoIterator<Item = &'a Vehicle>,
        anomalies: impl IntoIterator<Item = &'a Anomaly>,
        total_readings: u64,
    ) -> Self {
        let mut total_vehicles = 0;
        let mut active_vehicles = 0;
        let mut critical_vehicles = 0;
        let mut speed_sum = 0.0;
        let mut total_distance = 0.0;

        for vehicle in vehicles {
            total_vehicles += 1;
            if vehicle.state.is_active() {
                active_vehicles += 1;
            }
            if vehicle.state == VehicleState::Critical {
                critical_vehicles += 1;
            }
            speed_sum += vehicle.avg_speed;
            total_distance += vehicle.total_distance;
        }

        let mut counts: HashMap<AnomalyType, usize> = HashMap::new();
        let mut total_anomalies = 0;
        let mut critical_anomalies = 0;
        for anomaly in anomalies {
            total_anomalies += 1;
            if anomaly.is_critical() {
                critical_anomalies += 1;
            }
            *counts.entry(anomaly.anomaly_type).or_default() += 1;
        }

        // Ties go to the earlier taxonomy entry
        let most_common_anomaly = counts
            .into_iter()
            .max_by(|(ta, ca), (tb, cb)| ca.cmp(cb).then(tb.cmp(ta)))
            .map(|(t, _)| t);

        Self {
            total_vehicles,
            active_vehicles,
            critical_vehicles,
            average_speed: if total_vehicles == 0 {
                0.0
            } else {
                speed_sum / total_vehicles as f64
            },
            total_distance,
            total_anomalies,
            critical_anomalies,
            most_common_anomaly,
            anomaly_rate: if total_readings == 0 {
                0.0
            } else {
                total_anomalies as f64 / total_readings as f64
            },
        }
    }
}
