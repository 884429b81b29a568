// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Heuristic predictions

use serde::{Deserialize, Serialize};

use super::{AnomalySummary, Statistics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub severity: PredictionSeverity,
    /// 0..=1
    pub confidence: f64,
}

impl Prediction {
    fn new(kind: &str, description: &str, severity: PredictionSeverity, confidence: f64) -> Self {
        Self {
            kind: kind.to_string(),
            description: description.to_string(),
            severity,
            confidence,
        }
    }
}

pub const MAINTENANCE_DUE: &str = "Maintenance Due";
pub const FUEL_EFFICIENCY: &str = "Fuel Efficiency";
pub const TEMPERATURE_TREND: &str = "Temperature Trend";

/// The fixed prediction set returned in synthetic mode, independent of the data.
pub fn fixed_predictions() -> Vec<Prediction> {
    vec![
        Prediction::new(
            MAINTENANCE_DUE,
            "Vehicle may require maintenance within 1000 km",
            PredictionSeverity::Medium,
            0.75,
        ),
        Prediction::new(
            FUEL_EFFICIENCY,
            "Fuel consumption pattern suggests potential optimization",
            PredictionSeverity::Low,
            0.65,
        ),
        Prediction::new(
            TEMPERATURE_TREND,
            "Engine temperature showing gradual increase",
            PredictionSeverity::Medium,
            0.82,
        ),
    ]
}

fn sample_confidence(samples: usize) -> f64 {
    (0.5 + samples as f64 / 500.0).min(0.9)
}

/// The same three prediction types, graded from retained statistics.
pub fn derived_predictions(
    fuel: &Statistics,
    temperature: &Statistics,
    summary: &AnomalySummary,
    samples: usize,
) -> Vec<Prediction> {
    let pressure = summary.critical * 2 + summary.high;
    let maintenance = if summary.critical >= 3 {
        Prediction::new(
            MAINTENANCE_DUE,
            "Repeated critical faults, schedule an inspection now",
            PredictionSeverity::High,
            (0.6 + 0.05 * pressure as f64).min(0.95),
        )
    } else if pressure >= 2 {
        Prediction::new(
            MAINTENANCE_DUE,
            "Vehicle may require maintenance within 1000 km",
            PredictionSeverity::Medium,
            (0.5 + 0.05 * pressure as f64).min(0.9),
        )
    } else {
        Prediction::new(
            MAINTENANCE_DUE,
            "No maintenance indicators in recent anomalies",
            PredictionSeverity::Low,
            0.6,
        )
    };

    let efficiency = if fuel.trend_slope < -0.5 {
        Prediction::new(
            FUEL_EFFICIENCY,
            "Fuel level dropping faster than expected",
            PredictionSeverity::Medium,
            sample_confidence(samples),
        )
    } else {
        Prediction::new(
            FUEL_EFFICIENCY,
            "Fuel consumption pattern suggests potential optimization",
            PredictionSeverity::Low,
            sample_confidence(samples),
        )
    };

    let thermal = if temperature.trend_slope > 0.05 {
        let severity = if temperature.max > 105.0 {
            PredictionSeverity::High
        } else {
            PredictionSeverity::Medium
        };
        Prediction::new(
            TEMPERATURE_TREND,
            "Engine temperature showing gradual increase",
            severity,
            sample_confidence(samples),
        )
    } else if temperature.trend_slope < -0.05 {
        Prediction::new(
            TEMPERATURE_TREND,
            "Engine temperature trending down",
            PredictionSeverity::Low,
            sample_confidence(samples),
        )
    } else {
        Prediction::new(
            TEMPERATURE_TREND,
            "Engine temperature stable",
            PredictionSeverity::Low,
            sample_confidence(samples),
        )
    };

    vec![maintenance, efficiency, thermal]
}
