// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Snapshot export - vehicles CSV, anomalies CSV and a JSON report

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::anomaly::Anomaly;
use crate::config::ExportConfig;
use crate::error::Result;
use crate::fleet::Vehicle;
use crate::stats::SystemStats;

/// Everything an export needs, copied out of the engine at one instant
#[derive(Debug, Clone)]
pub struct ExportSnapshot {
    pub taken_at: DateTime<Utc>,
    pub system_stats: SystemStats,
    pub vehicles: Vec<Vehicle>,
    /// Live anomaly buffer, oldest first
    pub anomalies: Vec<Anomaly>,
}

/// Paths of the artifacts written by one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifacts {
    pub vehicles_csv: PathBuf,
    pub anomalies_csv: PathBuf,
    pub report_json: PathBuf,
}

#[derive(Debug, Serialize)]
struct VehicleRecord {
    #[serde(rename = "Vehicle ID")]
    id: u32,
    #[serde(rename = "Make Model")]
    make_model: String,
    #[serde(rename = "License Plate")]
    license_plate: String,
    #[serde(rename = "State")]
    state: &'static str,
    #[serde(rename = "Total Distance (km)")]
    total_distance: String,
    #[serde(rename = "Avg Speed (km/h)")]
    avg_speed: String,
    #[serde(rename = "Max Speed (km/h)")]
    max_speed: String,
    #[serde(rename = "Harsh Events")]
    harsh_events: u32,
    #[serde(rename = "Total Anomalies")]
    total_anomalies: u32,
    #[serde(rename = "Current Speed")]
    speed: String,
    #[serde(rename = "Current RPM")]
    rpm: String,
    #[serde(rename = "Current Temperature")]
    temperature: String,
    #[serde(rename = "Current Fuel Level")]
    fuel_level: String,
    #[serde(rename = "Latitude")]
    latitude: String,
    #[serde(rename = "Longitude")]
    longitude: String,
    #[serde(rename = "Last Seen")]
    last_seen: String,
}

impl From<&Vehicle> for VehicleRecord {
    fn from(v: &Vehicle) -> Self {
        let r = &v.current_reading;
        Self {
            id: v.id,
            make_model: v.make_model.clone(),
            license_plate: v.license_plate.clone(),
            state: v.state.as_str(),
            total_distance: format!("{:.2}", v.total_distance),
            avg_speed: format!("{:.2}", v.avg_speed),
            max_speed: format!("{:.2}", v.max_speed),
            harsh_events: v.harsh_events,
            total_anomalies: v.total_anomalies,
            speed: format!("{:.2}", r.speed),
            rpm: format!("{:.0}", r.rpm),
            temperature: format!("{:.2}", r.temperature),
            fuel_level: format!("{:.2}", r.fuel_level),
            latitude: format!("{:.6}", r.latitude),
            longitude: format!("{:.6}", r.longitude),
            last_seen: v.last_seen.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AnomalyRecord {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Vehicle ID")]
    vehicle_id: u32,
    #[serde(rename = "Sensor Name")]
    sensor_name: String,
    #[serde(rename = "Value")]
    value: String,
    #[serde(rename = "Type")]
    anomaly_type: &'static str,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Severity")]
    severity: u8,
    #[serde(rename = "Priority")]
    priority: &'static str,
    #[serde(rename = "Acknowledged")]
    acknowledged: bool,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "ML Score")]
    ml_score: String,
}

impl From<&Anomaly> for AnomalyRecord {
    fn from(a: &Anomaly) -> Self {
        Self {
            timestamp: a.timestamp.to_rfc3339(),
            vehicle_id: a.vehicle_id,
            sensor_name: a.sensor_name.clone(),
            value: format!("{:.2}", a.value),
            anomaly_type: a.anomaly_type.as_str(),
            description: a.description.clone(),
            severity: a.severity,
            priority: a.priority.as_str(),
            acknowledged: a.acknowledged,
            location: a.location.clone().unwrap_or_default(),
            ml_score: a.ml_score.map(|s| format!("{:.2}", s)).unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    export_timestamp: DateTime<Utc>,
    system_stats: &'a SystemStats,
    total_vehicles: usize,
    total_anomalies: usize,
    vehicles: Vec<ReportVehicle<'a>>,
    recent_anomalies: &'a [Anomaly],
}

/// A vehicle plus a flattened digest of its live reading
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportVehicle<'a> {
    #[serde(flatten)]
    vehicle: &'a Vehicle,
    sensor_readings: SensorDigest,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SensorDigest {
    speed: f64,
    rpm: f64,
    temperature: f64,
    fuel_level: f64,
    location: Location,
}

#[derive(Serialize)]
struct Location {
    latitude: f64,
    longitude: f64,
}

impl<'a> From<&'a Vehicle> for ReportVehicle<'a> {
    fn from(vehicle: &'a Vehicle) -> Self {
        let r = &vehicle.current_reading;
        Self {
            vehicle,
            sensor_readings: SensorDigest {
                speed: r.speed,
                rpm: r.rpm,
                temperature: r.temperature,
                fuel_level: r.fuel_level,
                location: Location {
                    latitude: r.latitude,
                    longitude: r.longitude,
                },
            },
        }
    }
}

/// Writes snapshot artifacts into a directory
pub struct Exporter {
    directory: PathBuf,
    recent_anomalies: usize,
}

impl Exporter {
    pub fn new(directory: impl Into<PathBuf>, recent_anomalies: usize) -> Self {
        Self {
            directory: directory.into(),
            recent_anomalies,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(&config.directory, config.recent_anomalies)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Artifact paths for a given export date
    pub fn artifact_paths(&self, date: NaiveDate) -> ExportArtifacts {
        let stamp = date.format("%Y-%m-%d");
        ExportArtifacts {
            vehicles_csv: self.directory.join(format!("vehicles_data_{}.csv", stamp)),
            anomalies_csv: self.directory.join(format!("anomalies_data_{}.csv", stamp)),
            report_json: self.directory.join(format!("telematics_report_{}.json", stamp)),
        }
    }

    /// Write all three artifacts. Same-day exports overwrite each other.
    pub fn export(&self, snapshot: &ExportSnapshot) -> Result<ExportArtifacts> {
        std::fs::create_dir_all(&self.directory)?;
        let paths = self.artifact_paths(snapshot.taken_at.date_naive());

        self.write_vehicles(&paths.vehicles_csv, &snapshot.vehicles)?;
        self.write_anomalies(&paths.anomalies_csv, &snapshot.anomalies)?;
        self.write_report(&paths.report_json, snapshot)?;

        info!(
            "Exported {} vehicles and {} anomalies to {:?}",
            snapshot.vehicles.len(),
            snapshot.anomalies.len(),
            self.directory
        );
        Ok(paths)
    }

    fn write_vehicles(&self, path: &Path, vehicles: &[Vehicle]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        if vehicles.is_empty() {
            writer.write_record(VEHICLE_HEADER)?;
        }
        for vehicle in vehicles {
            writer.serialize(VehicleRecord::from(vehicle))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_anomalies(&self, path: &Path, anomalies: &[Anomaly]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        // serialize() only emits the header alongside the first record
        if anomalies.is_empty() {
            writer.write_record(ANOMALY_HEADER)?;
        }
        for anomaly in anomalies {
            writer.serialize(AnomalyRecord::from(anomaly))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_report(&self, path: &Path, snapshot: &ExportSnapshot) -> Result<()> {
        let recent_start = snapshot.anomalies.len().saturating_sub(self.recent_anomalies);
        let report = Report {
            export_timestamp: snapshot.taken_at,
            system_stats: &snapshot.system_stats,
            total_vehicles: snapshot.vehicles.len(),
            total_anomalies: snapshot.anomalies.len(),
            vehicles: snapshot.vehicles.iter().map(ReportVehicle::from).collect(),
            recent_anomalies: &snapshot.anomalies[recent_start..],
        };
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &report)?;
        Ok(())
    }
}

const VEHICLE_HEADER: [&str; 16] = [
    "Vehicle ID",
    "Make Model",
    "License Plate",
    "State",
    "Total Distance (km)",
    "Avg Speed (km/h)",
    "Max Speed (km/h)",
    "Harsh Events",
    "Total Anomalies",
    "Current Speed",
    "Current RPM",
    "Current Temperature",
    "Current Fuel Level",
    "Latitude",
    "Longitude",
    "Last Seen",
];

const ANOMALY_HEADER: [&str; 11] = [
    "Timestamp",
    "Vehicle ID",
    "Sensor Name",
    "Value",
    "Type",
    "Description",
    "Severity",
    "Priority",
    "Acknowledged",
    "Location",
    "ML Score",
];
