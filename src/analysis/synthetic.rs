// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Baseline-plus-variance statistics model

use rand::Rng;

use super::Statistics;
use crate::fleet::Metric;

/// (baseline, variance) used for `metric`. Speed is anchored to the vehicle's
/// smoothed average; the rest use fixed operating points.
pub fn baseline(metric: Metric, avg_speed: f64) -> (f64, f64) {
    match metric {
        Metric::Speed => (avg_speed, 20.0),
        Metric::Rpm => (3000.0, 1000.0),
        Metric::Temperature => (90.0, 10.0),
        Metric::Fuel => (50.0, 30.0),
        Metric::Acceleration => (0.0, 2.0),
    }
}

/// Perturb `base` by bounded random terms scaled by `variance`.
///
/// Not computed from any sample history: two calls give different results.
pub fn synthetic_statistics<R: Rng + ?Sized>(rng: &mut R, base: f64, variance: f64) -> Statistics {
    Statistics {
        mean: base + (rng.gen::<f64>() - 0.5) * variance,
        median: base + (rng.gen::<f64>() - 0.5) * variance * 0.8,
        std_deviation: variance * 0.3 + rng.gen::<f64>() * variance * 0.2,
        min: base - variance * 0.8,
        max: base + variance * 1.2,
        percentile95: base + variance * 0.9,
        trend_slope: (rng.gen::<f64>() - 0.5) * 0.5,
        coefficient_of_variation: 0.1 + rng.gen::<f64>() * 0.3,
        outlier_count: rng.gen_range(0..10),
    }
}
