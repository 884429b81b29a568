// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Descriptive statistics over a metric's samples

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics as _;

/// Statistical summary of one scalar metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub mean: f64,
    pub median: f64,
    pub std_deviation: f64,
    pub min: f64,
    pub max: f64,
    pub percentile95: f64,
    pub trend_slope: f64,
    pub coefficient_of_variation: f64,
    pub outlier_count: u32,
}

/// Samples further than this many standard deviations from the mean are outliers
const OUTLIER_SIGMA: f64 = 2.0;

pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Summarize `data` (oldest first). Empty input yields the zero summary.
    pub fn summarize(&self, data: &[f64]) -> Statistics {
        if data.is_empty() {
            return Statistics::default();
        }

        let count = data.len();
        let mean = data.iter().mean();
        let std_deviation = if count > 1 { data.iter().population_std_dev() } else { 0.0 };

        let mut sorted = data.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        let coefficient_of_variation = if mean.abs() > 1e-10 {
            std_deviation / mean.abs()
        } else {
            0.0
        };

        let lower = mean - OUTLIER_SIGMA * std_deviation;
        let upper = mean + OUTLIER_SIGMA * std_deviation;
        let outlier_count = data.iter().filter(|&&x| x < lower || x > upper).count() as u32;

        Statistics {
            mean,
            median,
            std_deviation,
            min: sorted[0],
            max: sorted[count - 1],
            percentile95: self.percentile(&sorted, 0.95),
            trend_slope: self.trend_slope(data),
            coefficient_of_variation,
            outlier_count,
        }
    }

    /// Nearest-rank-below percentile on pre-sorted data: `sorted[floor(p * (n - 1))]`
    pub fn percentile(&self, sorted: &[f64], p: f64) -> f64 {
        if sorted.is_empty() {
            return 0.0;
        }
        let idx = (p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64).floor() as usize;
        sorted[idx.min(sorted.len() - 1)]
    }

    /// Least-squares slope of the samples against their index
    pub fn trend_slope(&self, data: &[f64]) -> f64 {
        let n = data.len();
        if n < 2 {
            return 0.0;
        }

        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
        for (i, &y) in data.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_x2 += x * x;
        }

        let n = n as f64;
        let denom = n * sum_x2 - sum_x * sum_x;
        if denom.abs() < f64::EPSILON {
            0.0
        } else {
            (n * sum_xy - sum_x * sum_y) / denom
        }
    }
}

impl Default for StatisticalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
