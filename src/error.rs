// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Error types

use thiserror::Error;

use crate::fleet::VehicleId;

/// Errors surfaced by the configuration and export layers.
///
/// The simulation itself is total: generation, classification and analytics
/// never fail. Only the outer edges that touch the filesystem do.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown vehicle id {0}")]
    UnknownVehicle(VehicleId),
}

pub type Result<T> = std::result::Result<T, FleetError>;
