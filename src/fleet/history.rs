// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Per-vehicle ring buffer of recent metric samples

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::telemetry::SensorReading;

/// Metrics tracked for analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Speed,
    Rpm,
    Temperature,
    Fuel,
    Acceleration,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Speed,
        Metric::Rpm,
        Metric::Temperature,
        Metric::Fuel,
        Metric::Acceleration,
    ];

    pub fn extract(&self, reading: &SensorReading) -> f64 {
        match self {
            Metric::Speed => reading.speed,
            Metric::Rpm => reading.rpm,
            Metric::Temperature => reading.temperature,
            Metric::Fuel => reading.fuel_level,
            Metric::Acceleration => reading.acceleration,
        }
    }

    fn index(&self) -> usize {
        match self {
            Metric::Speed => 0,
            Metric::Rpm => 1,
            Metric::Temperature => 2,
            Metric::Fuel => 3,
            Metric::Acceleration => 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VehicleHistory {
    series: [VecDeque<f64>; 5],
    capacity: usize,
}

impl VehicleHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            series: std::array::from_fn(|_| VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn record(&mut self, reading: &SensorReading) {
        for metric in Metric::ALL {
            let series = &mut self.series[metric.index()];
            if series.len() == self.capacity {
                series.pop_front();
            }
            series.push_back(metric.extract(reading));
        }
    }

    /// Samples for `metric`, oldest first
    pub fn samples(&self, metric: Metric) -> Vec<f64> {
        self.series[metric.index()].iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.series[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.series[0].is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let mut history = VehicleHistory::new(3);
        for speed in [10.0, 20.0, 30.0, 40.0] {
            history.record(&SensorReading {
                speed,
                ..SensorReading::nominal()
            });
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.samples(Metric::Speed), vec![20.0, 30.0, 40.0]);
        assert_eq!(history.samples(Metric::Temperature), vec![90.0; 3]);
    }

    #[test]
    fn test_extract_maps_fields() {
        let reading = SensorReading {
            fuel_level: 33.0,
            acceleration: -1.5,
            ..SensorReading::nominal()
        };
        assert_eq!(Metric::Fuel.extract(&reading), 33.0);
        assert_eq!(Metric::Acceleration.extract(&reading), -1.5);
        assert_eq!(Metric::Rpm.extract(&reading), 2000.0);
    }
}
