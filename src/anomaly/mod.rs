// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Anomaly module - fault taxonomy, stochastic emission and the bounded buffer

mod taxonomy;
mod emitter;
mod buffer;

pub use taxonomy::{AnomalyType, Priority};
pub use emitter::AnomalyEmitter;
pub use buffer::AnomalyBuffer;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fleet::VehicleId;

/// A discrete synthetic fault event.
///
/// Anomalies are immutable once created apart from `acknowledged`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub vehicle_id: VehicleId,
    pub sensor_name: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
    pub description: String,
    /// 1 (least) to 5 (most severe)
    pub severity: u8,
    pub priority: Priority,
    pub acknowledged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ml_score: Option<f64>,
}

impl Anomaly {
    /// Build an anomaly of `anomaly_type`, deriving sensor name, description and
    /// priority from the taxonomy.
    pub fn new(vehicle_id: VehicleId, anomaly_type: AnomalyType, severity: u8, value: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            vehicle_id,
            sensor_name: anomaly_type.sensor_name().to_string(),
            value,
            anomaly_type,
            description: anomaly_type.description().to_string(),
            severity,
            priority: Priority::from_severity(severity),
            acknowledged: false,
            location: None,
            ml_score: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_ml_score(mut self, score: f64) -> Self {
        self.ml_score = Some(score);
        self
    }

    pub fn acknowledge(&mut self) {
        self.acknowledged = true;
    }

    pub fn is_critical(&self) -> bool {
        self.priority == Priority::Critical
    }
}
