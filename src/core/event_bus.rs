// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Event bus for fleet notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

use crate::anomaly::Anomaly;
use crate::core::RunState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FleetEventPayload {
    TickCompleted {
        tick: u64,
        readings: usize,
        anomalies: usize,
    },
    AnomalyEmitted(Anomaly),
    Lifecycle {
        state: RunState,
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetEvent {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub payload: FleetEventPayload,
}

/// Fan-out of fleet events to any number of subscribers.
///
/// Slow subscribers lag and lose the oldest events; publishing never blocks
/// and never fails when nobody is listening.
pub struct EventBus {
    tx: broadcast::Sender<FleetEvent>,
    counter: AtomicU64,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            counter: AtomicU64::new(0),
        }
    }

    pub fn publish_tick(&self, tick: u64, readings: usize, anomalies: usize) {
        self.publish(FleetEventPayload::TickCompleted {
            tick,
            readings,
            anomalies,
        });
    }

    pub fn publish_anomaly(&self, anomaly: Anomaly) {
        self.publish(FleetEventPayload::AnomalyEmitted(anomaly));
    }

    pub fn publish_lifecycle(&self, state: RunState, message: &str) {
        self.publish(FleetEventPayload::Lifecycle {
            state,
            message: message.to_string(),
        });
    }

    fn publish(&self, payload: FleetEventPayload) {
        let id = self.counter.fetch_add(1, Ordering::Relaxed);
        let event = FleetEvent {
            id,
            timestamp: Utc::now(),
            payload,
        };
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FleetEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
