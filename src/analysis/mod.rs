// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Analysis module - per-vehicle statistics, anomaly summaries, predictions and insights

mod insights;
mod predictions;
mod statistics;
mod synthetic;

pub use insights::{insights, Insight, InsightTone};
pub use predictions::{Prediction, PredictionSeverity};
pub use statistics::{StatisticalAnalyzer, Statistics};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::anomaly::Anomaly;
use crate::config::{AnalyticsConfig, AnalyticsMode};
use crate::fleet::{Metric, Vehicle, VehicleHistory};

/// Anomaly counts bucketed by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalySummary {
    /// severity >= 4
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl AnomalySummary {
    /// Severities outside 1..=5 are not counted.
    pub fn from_severities(severities: impl IntoIterator<Item = u8>) -> Self {
        let mut summary = Self::default();
        for severity in severities {
            match severity {
                4..=u8::MAX => summary.critical += 1,
                3 => summary.high += 1,
                2 => summary.medium += 1,
                1 => summary.low += 1,
                _ => {}
            }
        }
        summary
    }

    pub fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleAnalytics {
    pub speed: Statistics,
    pub rpm: Statistics,
    pub temperature: Statistics,
    pub fuel: Statistics,
    pub acceleration: Statistics,
    pub anomaly_summary: AnomalySummary,
    pub predictions: Vec<Prediction>,
}

impl VehicleAnalytics {
    /// All-zero analytics, returned for unknown vehicles
    pub fn empty() -> Self {
        Self {
            speed: Statistics::default(),
            rpm: Statistics::default(),
            temperature: Statistics::default(),
            fuel: Statistics::default(),
            acceleration: Statistics::default(),
            anomaly_summary: AnomalySummary::default(),
            predictions: Vec::new(),
        }
    }

    pub fn metric(&self, metric: Metric) -> &Statistics {
        match metric {
            Metric::Speed => &self.speed,
            Metric::Rpm => &self.rpm,
            Metric::Temperature => &self.temperature,
            Metric::Fuel => &self.fuel,
            Metric::Acceleration => &self.acceleration,
        }
    }

    fn metric_mut(&mut self, metric: Metric) -> &mut Statistics {
        match metric {
            Metric::Speed => &mut self.speed,
            Metric::Rpm => &mut self.rpm,
            Metric::Temperature => &mut self.temperature,
            Metric::Fuel => &mut self.fuel,
            Metric::Acceleration => &mut self.acceleration,
        }
    }
}

/// Point-in-time copy of everything analytics needs for one vehicle.
#[derive(Debug, Clone)]
pub struct AnalyticsInput {
    pub vehicle: Vehicle,
    pub history: VehicleHistory,
    /// Anomalies for this vehicle still in the live buffer
    pub anomalies: Vec<Anomaly>,
}

pub struct AnalyticsEngine {
    mode: AnalyticsMode,
    analyzer: StatisticalAnalyzer,
}

impl AnalyticsEngine {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            mode: config.mode,
            analyzer: StatisticalAnalyzer::new(),
        }
    }

    pub fn mode(&self) -> AnalyticsMode {
        self.mode
    }

    /// Analytics for one vehicle. `None` (unknown vehicle) yields [`VehicleAnalytics::empty`].
    pub fn analyze<R: Rng + ?Sized>(&self, rng: &mut R, input: Option<&AnalyticsInput>) -> VehicleAnalytics {
        let Some(input) = input else {
            return VehicleAnalytics::empty();
        };

        let anomaly_summary = AnomalySummary::from_severities(input.anomalies.iter().map(|a| a.severity));
        let mut analytics = VehicleAnalytics {
            anomaly_summary,
            ..VehicleAnalytics::empty()
        };

        match self.mode {
            AnalyticsMode::Synthetic => {
                for metric in Metric::ALL {
                    let (base, variance) = synthetic::baseline(metric, input.vehicle.avg_speed);
                    *analytics.metric_mut(metric) = synthetic::synthetic_statistics(rng, base, variance);
                }
                analytics.predictions = predictions::fixed_predictions();
            }
            AnalyticsMode::History => {
                for metric in Metric::ALL {
                    *analytics.metric_mut(metric) = self.analyzer.summarize(&input.history.samples(metric));
                }
                analytics.predictions = predictions::derived_predictions(
                    &analytics.fuel,
                    &analytics.temperature,
                    &anomaly_summary,
                    input.history.len(),
                );
            }
        }

        debug!(
            "Analytics for vehicle {} ({:?}): {} anomalies summarized",
            input.vehicle.id,
            self.mode,
            anomaly_summary.total()
        );

        analytics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anomaly::AnomalyType;
    use crate::telemetry::SensorReading;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn input_with(temps: &[f64], severities: &[u8]) -> AnalyticsInput {
        let mut history = VehicleHistory::new(200);
        for &temperature in temps {
            history.record(&SensorReading {
                temperature,
                ..SensorReading::nominal()
            });
        }
        AnalyticsInput {
            vehicle: Vehicle::new(1, "Toyota Camry", "ABC-123", SensorReading::nominal()),
            history,
            anomalies: severities
                .iter()
                .map(|&s| Anomaly::new(1, AnomalyType::OverheatingPattern, s, 0.0))
                .collect(),
        }
    }

    fn engine(mode: AnalyticsMode) -> AnalyticsEngine {
        AnalyticsEngine::new(&AnalyticsConfig {
            mode,
            ..AnalyticsConfig::default()
        })
    }

    #[test]
    fn test_summary_buckets() {
        let summary = AnomalySummary::from_severities([5, 4, 3, 2, 1, 1]);
        assert_eq!(
            summary,
            AnomalySummary {
                critical: 2,
                high: 1,
                medium: 1,
                low: 2
            }
        );
        assert_eq!(summary.total(), 6);
    }

    #[test]
    fn test_severity_four_is_critical_and_zero_ignored() {
        let summary = AnomalySummary::from_severities([4]);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.high, 0);

        let summary = AnomalySummary::from_severities([0]);
        assert_eq!(summary, AnomalySummary::default());
    }

    #[test]
    fn test_unknown_vehicle_is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for mode in [AnalyticsMode::History, AnalyticsMode::Synthetic] {
            let analytics = engine(mode).analyze(&mut rng, None);
            assert_eq!(analytics, VehicleAnalytics::empty());
            assert!(analytics.predictions.is_empty());
        }
    }

    #[test]
    fn test_history_mode_uses_samples() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let input = input_with(&[90.0, 95.0, 100.0, 108.0], &[5, 3]);
        let analytics = engine(AnalyticsMode::History).analyze(&mut rng, Some(&input));

        assert_eq!(analytics.temperature.max, 108.0);
        assert_eq!(analytics.temperature.min, 90.0);
        assert!((analytics.temperature.mean - 98.25).abs() < 1e-9);
        assert_eq!(analytics.speed.mean, 50.0);
        assert_eq!(analytics.anomaly_summary.critical, 1);
        assert_eq!(analytics.anomaly_summary.high, 1);
        assert_eq!(analytics.predictions.len(), 3);
        assert_eq!(analytics.predictions[2].severity, PredictionSeverity::High);

        // Same snapshot, same answer
        let again = engine(AnalyticsMode::History).analyze(&mut rng, Some(&input));
        assert_eq!(analytics, again);
    }

    #[test]
    fn test_synthetic_mode_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let input = input_with(&[], &[4, 4, 1]);
        let analytics = engine(AnalyticsMode::Synthetic).analyze(&mut rng, Some(&input));

        assert_eq!(analytics.rpm.min, 3000.0 - 800.0);
        assert_eq!(analytics.temperature.max, 90.0 + 12.0);
        assert_eq!(analytics.anomaly_summary.critical, 2);
        assert_eq!(analytics.anomaly_summary.low, 1);
        let confidences: Vec<_> = analytics.predictions.iter().map(|p| p.confidence).collect();
        assert_eq!(confidences, vec![0.75, 0.65, 0.82]);
    }
}
