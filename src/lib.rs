// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! FleetWatch - Vehicle Fleet Telemetry Simulation and Analytics
//!
//! Simulates a fleet of vehicles, derives per-vehicle operating state,
//! injects fault anomalies and computes rolling statistics and predictions:
//! - Synthetic sensor readings with bounded ranges and odometer continuity
//! - Rule-based state classification with a maintenance override
//! - Capped anomaly buffer and event log
//! - History-backed or synthetic per-vehicle analytics
//! - CSV/JSON snapshot export
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      FleetWatch Engine                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌────────────┐  ┌──────────┐  ┌───────────┐  │
//! │  │ Telemetry │→ │   Fleet    │→ │ Anomaly  │→ │  System   │  │
//! │  │ Generator │  │ Aggregator │  │  Buffer  │  │  Stats    │  │
//! │  └───────────┘  └────────────┘  └──────────┘  └───────────┘  │
//! │        ↓              ↓              ↓              ↓        │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │          Scheduler (tick) + Event Bus                   │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │        ↓              ↓                             ↓        │
//! │  ┌───────────┐  ┌────────────┐              ┌───────────┐    │
//! │  │ Analytics │  │  Overview  │              │  Export   │    │
//! │  └───────────┘  └────────────┘              └───────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod analysis;
pub mod anomaly;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod fleet;
pub mod stats;
pub mod telemetry;

// Re-exports for convenience
pub use analysis::{AnalyticsEngine, VehicleAnalytics};
pub use anomaly::Anomaly;
pub use config::Config;
pub use core::{Engine, EventBus, FleetOverview, RunState};
pub use error::{FleetError, Result};
pub use export::Exporter;
pub use fleet::{Vehicle, VehicleId};
pub use stats::SystemStats;
pub use telemetry::{SensorReading, VehicleState};

/// FleetWatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// FleetWatch name
pub const NAME: &str = "FleetWatch";

/// Build info
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION.to_string(),
        target: std::env::consts::ARCH.to_string(),
        os: std::env::consts::OS.to_string(),
    }
}

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version string
    pub version: String,
    /// Target architecture
    pub target: String,
    /// Operating system
    pub os: String,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{} ({}-{})", NAME, self.version, self.target, self.os)
    }
}
