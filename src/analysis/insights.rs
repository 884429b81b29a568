// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Rule-based insights over a vehicle's analytics

use serde::{Deserialize, Serialize};

use super::VehicleAnalytics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightTone {
    Positive,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub category: String,
    pub message: String,
    pub confidence: f64,
    pub tone: InsightTone,
}

fn insight(category: &str, message: &str, confidence: f64, tone: InsightTone) -> Insight {
    Insight {
        category: category.to_string(),
        message: message.to_string(),
        confidence,
        tone,
    }
}

pub fn insights(analytics: &VehicleAnalytics) -> Vec<Insight> {
    let performance = if analytics.speed.mean > 70.0 {
        insight("Performance", "Vehicle shows excellent highway performance", 0.87, InsightTone::Positive)
    } else {
        insight("Performance", "Consider optimizing for better speed efficiency", 0.87, InsightTone::Warning)
    };

    let maintenance = if analytics.temperature.max > 105.0 {
        insight(
            "Maintenance",
            "Engine running hot - cooling system check recommended",
            0.92,
            InsightTone::Critical,
        )
    } else {
        insight("Maintenance", "Engine temperature within optimal range", 0.92, InsightTone::Positive)
    };

    let efficiency = if analytics.fuel.trend_slope < -0.5 {
        insight("Efficiency", "Fuel consumption rate is concerning", 0.78, InsightTone::Warning)
    } else {
        insight("Efficiency", "Fuel efficiency is stable", 0.78, InsightTone::Positive)
    };

    let safety = if analytics.anomaly_summary.critical > 5 {
        insight(
            "Safety",
            "Multiple critical anomalies detected - immediate inspection required",
            0.95,
            InsightTone::Critical,
        )
    } else {
        insight(
            "Safety",
            "Vehicle safety parameters are within acceptable limits",
            0.95,
            InsightTone::Positive,
        )
    };

    vec![performance, maintenance, efficiency, safety]
}
