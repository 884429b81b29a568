// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Bounded, append-only anomaly buffer

use std::collections::VecDeque;

use super::Anomaly;
use crate::fleet::VehicleId;

/// FIFO buffer of the most recent anomalies; the oldest entry is evicted once
/// `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct AnomalyBuffer {
    entries: VecDeque<Anomaly>,
    capacity: usize,
}

impl AnomalyBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, anomaly: Anomaly) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(anomaly);
    }

    pub fn extend(&mut self, anomalies: impl IntoIterator<Item = Anomaly>) {
        for anomaly in anomalies {
            self.push(anomaly);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Anomaly> {
        self.entries.iter()
    }

    pub fn for_vehicle(&self, vehicle_id: VehicleId) -> impl Iterator<Item = &Anomaly> {
        self.entries.iter().filter(move |a| a.vehicle_id == vehicle_id)
    }

    pub fn to_vec(&self) -> Vec<Anomaly> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anomaly::AnomalyType;

    fn anomaly(vehicle_id: VehicleId, value: f64) -> Anomaly {
        Anomaly::new(vehicle_id, AnomalyType::SensorFailure, 2, value)
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut buffer = AnomalyBuffer::new(1000);
        for i in 0..2500 {
            buffer.push(anomaly(1, i as f64));
            assert!(buffer.len() <= 1000);
        }
        assert_eq!(buffer.len(), 1000);
        assert_eq!(buffer.iter().next().unwrap().value, 1500.0);
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut buffer = AnomalyBuffer::new(1000);
        for i in 0..1001 {
            buffer.push(anomaly(1, i as f64));
        }
        // Entry 0 is the only one discarded
        assert_eq!(buffer.iter().next().unwrap().value, 1.0);
        assert_eq!(buffer.iter().last().unwrap().value, 1000.0);

        let timestamps: Vec<_> = buffer.iter().map(|a| a.timestamp).collect();
        assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_extend_and_filter() {
        let mut buffer = AnomalyBuffer::new(10);
        buffer.extend((0..6).map(|i| anomaly(i % 2, i as f64)));

        let values: Vec<_> = buffer.to_vec().iter().map(|a| a.value).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(buffer.for_vehicle(1).count(), 3);
        assert_eq!(buffer.for_vehicle(7).count(), 0);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut buffer = AnomalyBuffer::new(0);
        buffer.push(anomaly(1, 1.0));
        buffer.push(anomaly(1, 2.0));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.iter().next().unwrap().value, 2.0);
    }
}
