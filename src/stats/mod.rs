// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! System statistics - throughput counters, placeholder gauges and the event log

mod event_log;

pub use event_log::{EventKind, EventLog, SystemEvent};

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Process-wide counters and gauges.
///
/// `readings_per_second`, `system_health`, `memory_usage` and `cpu_usage` are
/// sampled from fixed bands; they are display placeholders, not measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub total_readings: u64,
    pub total_anomalies: u64,
    pub readings_per_second: u32,
    /// Percent
    pub system_health: f64,
    /// MB
    pub memory_usage: f64,
    /// Percent
    pub cpu_usage: f64,
    pub uptime: String,
    /// Most recent first
    pub recent_events: Vec<SystemEvent>,
}

impl SystemStats {
    /// Anomalies per reading; zero before the first reading.
    pub fn anomaly_rate(&self) -> f64 {
        if self.total_readings == 0 {
            0.0
        } else {
            self.total_anomalies as f64 / self.total_readings as f64
        }
    }
}

/// Format elapsed time as `{hours}h {minutes}m`.
pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
}

pub struct SystemStatsAggregator {
    started: Instant,
    total_readings: u64,
    total_anomalies: u64,
    readings_per_second: u32,
    system_health: f64,
    memory_usage: f64,
    cpu_usage: f64,
    uptime: String,
    events: EventLog,
}

impl SystemStatsAggregator {
    pub fn new(event_log_capacity: usize) -> Self {
        Self::started_at(Instant::now(), event_log_capacity)
    }

    pub fn started_at(started: Instant, event_log_capacity: usize) -> Self {
        Self {
            started,
            total_readings: 0,
            total_anomalies: 0,
            readings_per_second: 0,
            system_health: 98.5,
            memory_usage: 245.7,
            cpu_usage: 23.4,
            uptime: format_uptime(Duration::ZERO),
            events: EventLog::new(event_log_capacity),
        }
    }

    /// Fold one fleet tick into the counters and resample the gauges.
    pub fn on_tick<R: Rng + ?Sized>(&mut self, rng: &mut R, readings: usize, live_anomalies: usize, now: Instant) {
        self.total_readings += readings as u64;
        self.total_anomalies = live_anomalies as u64;
        self.readings_per_second = rng.gen_range(10..30);
        self.system_health = rng.gen_range(95.0..100.0);
        self.memory_usage = rng.gen_range(200.0..300.0);
        self.cpu_usage = rng.gen_range(15.0..35.0);
        self.uptime = format_uptime(now.saturating_duration_since(self.started));
    }

    pub fn record_event(&mut self, kind: EventKind, message: impl Into<String>) {
        self.events.push(SystemEvent::now(kind, message));
    }

    pub fn total_readings(&self) -> u64 {
        self.total_readings
    }

    pub fn snapshot(&self) -> SystemStats {
        SystemStats {
            total_readings: self.total_readings,
            total_anomalies: self.total_anomalies,
            readings_per_second: self.readings_per_second,
            system_health: self.system_health,
            memory_usage: self.memory_usage,
            cpu_usage: self.cpu_usage,
            uptime: self.uptime.clone(),
            recent_events: self.events.to_vec(),
        }
    }
}
