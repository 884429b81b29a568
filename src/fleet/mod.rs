// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Fleet module - vehicles, their counters and retained history

mod vehicle;
mod history;
mod aggregator;

pub use vehicle::{UpdatePolicy, Vehicle, VehicleId, VEHICLE_CATALOG};
pub use history::{Metric, VehicleHistory};
pub use aggregator::{FleetAggregator, TickOutcome};
