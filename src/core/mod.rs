// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Core engine module - ties the fleet, anomaly buffer, stats and analytics together

mod engine;
mod event_bus;
mod overview;
mod scheduler;

pub use engine::{Engine, TickSummary};
pub use event_bus::{EventBus, FleetEvent, FleetEventPayload};
pub use overview::FleetOverview;
pub use scheduler::{RunState, Scheduler};
