// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! Fleet engine - owns the simulation state and exposes the query and lifecycle surface

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::event_bus::{EventBus, FleetEvent};
use super::overview::FleetOverview;
use super::scheduler::{RunState, Scheduler};
use crate::analysis::{insights, AnalyticsEngine, AnalyticsInput, Insight, VehicleAnalytics};
use crate::anomaly::{Anomaly, AnomalyBuffer};
use crate::config::Config;
use crate::error::{FleetError, Result};
use crate::export::{ExportArtifacts, ExportSnapshot, Exporter};
use crate::fleet::{FleetAggregator, Vehicle, VehicleId};
use crate::stats::{EventKind, SystemStats, SystemStatsAggregator};

/// Everything a tick mutates. Guarded by one lock so a tick is atomic to readers.
struct EngineState {
    fleet: FleetAggregator,
    anomalies: AnomalyBuffer,
    stats: SystemStatsAggregator,
    rng: ChaCha8Rng,
    ticks: u64,
}

struct Shared {
    state: RwLock<EngineState>,
    analytics: AnalyticsEngine,
    analytics_rng: Mutex<ChaCha8Rng>,
    bus: EventBus,
}

impl Shared {
    fn tick(&self) -> TickSummary {
        let now = Utc::now();
        let (summary, emitted) = {
            let mut guard = self.state.write();
            let state = &mut *guard;

            let outcome = state.fleet.tick(&mut state.rng, now);
            state.anomalies.extend(outcome.anomalies.iter().cloned());
            state.ticks += 1;
            state
                .stats
                .on_tick(&mut state.rng, outcome.readings, state.anomalies.len(), Instant::now());

            let summary = TickSummary {
                tick: state.ticks,
                readings: outcome.readings,
                emitted: outcome.anomalies.len(),
                live_anomalies: state.anomalies.len(),
            };
            (summary, outcome.anomalies)
        };

        debug!(
            "Tick {}: {} readings, {} new anomalies, {} live",
            summary.tick, summary.readings, summary.emitted, summary.live_anomalies
        );

        for anomaly in emitted {
            self.bus.publish_anomaly(anomaly);
        }
        self.bus.publish_tick(summary.tick, summary.readings, summary.emitted);
        summary
    }

    fn record_event(&self, kind: EventKind, message: &str) {
        self.state.write().stats.record_event(kind, message);
    }
}

/// Result of one engine tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub tick: u64,
    pub readings: usize,
    pub emitted: usize,
    pub live_anomalies: usize,
}

/// Fleet simulation engine.
///
/// Readers take a consistent snapshot under a read lock; a tick holds the
/// write lock for its whole duration. Analytics computation runs outside the
/// state lock on its own RNG.
pub struct Engine {
    config: Arc<Config>,
    shared: Arc<Shared>,
    scheduler: Scheduler,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        let mut rng = match config.simulation.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let fleet = FleetAggregator::new(&mut rng, &config.simulation, &config.analytics);
        Self::assemble(config, fleet, rng)
    }

    /// Build around a prepared fleet; the engine RNG is seeded from `seed`.
    pub fn with_fleet(config: Config, fleet: FleetAggregator, seed: u64) -> Self {
        Self::assemble(config, fleet, ChaCha8Rng::seed_from_u64(seed))
    }

    fn assemble(config: Config, fleet: FleetAggregator, mut rng: ChaCha8Rng) -> Self {
        let analytics_rng = ChaCha8Rng::seed_from_u64(rng.gen());
        let mut stats = SystemStatsAggregator::new(config.simulation.event_log_capacity);
        stats.record_event(EventKind::Info, "System initialized successfully");
        stats.record_event(EventKind::Info, format!("{} vehicles connected", fleet.len()));

        info!(
            "Engine ready: {} vehicles, tick every {:?}, analytics {:?}",
            fleet.len(),
            config.simulation.tick_interval(),
            config.analytics.mode
        );

        let shared = Shared {
            state: RwLock::new(EngineState {
                fleet,
                anomalies: AnomalyBuffer::new(config.simulation.anomaly_capacity),
                stats,
                rng,
                ticks: 0,
            }),
            analytics: AnalyticsEngine::new(&config.analytics),
            analytics_rng: Mutex::new(analytics_rng),
            bus: EventBus::default(),
        };

        Self {
            scheduler: Scheduler::new(config.simulation.tick_interval()),
            config: Arc::new(config),
            shared: Arc::new(shared),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Advance the fleet by one tick immediately, regardless of run state.
    pub fn tick(&self) -> TickSummary {
        self.shared.tick()
    }

    pub fn tick_count(&self) -> u64 {
        self.shared.state.read().ticks
    }

    // ---- queries ----

    pub fn list_vehicles(&self) -> Vec<Vehicle> {
        self.shared.state.read().fleet.snapshot()
    }

    pub fn vehicle(&self, id: VehicleId) -> Result<Vehicle> {
        self.shared
            .state
            .read()
            .fleet
            .vehicle(id)
            .cloned()
            .ok_or(FleetError::UnknownVehicle(id))
    }

    /// Live anomaly buffer, oldest first
    pub fn list_anomalies(&self) -> Vec<Anomaly> {
        self.shared.state.read().anomalies.to_vec()
    }

    pub fn current_system_stats(&self) -> SystemStats {
        self.shared.state.read().stats.snapshot()
    }

    /// Analytics for one vehicle; an unknown id yields the empty record.
    pub fn analytics(&self, id: VehicleId) -> VehicleAnalytics {
        let input = {
            let state = self.shared.state.read();
            match (state.fleet.vehicle(id), state.fleet.history(id)) {
                (Some(vehicle), Some(history)) => Some(AnalyticsInput {
                    vehicle: vehicle.clone(),
                    history: history.clone(),
                    anomalies: state.anomalies.for_vehicle(id).cloned().collect(),
                }),
                _ => None,
            }
        };

        let mut rng = self.shared.analytics_rng.lock();
        self.shared.analytics.analyze(&mut *rng, input.as_ref())
    }

    /// Insights for one vehicle; empty for an unknown id.
    pub fn insights(&self, id: VehicleId) -> Vec<Insight> {
        if self.shared.state.read().fleet.vehicle(id).is_none() {
            return Vec::new();
        }
        insights(&self.analytics(id))
    }

    pub fn fleet_overview(&self) -> FleetOverview {
        let state = self.shared.state.read();
        FleetOverview::compute(state.fleet.vehicles(), state.anomalies.iter(), state.stats.total_readings())
    }

    /// Reset a vehicle's service interval.
    pub fn mark_serviced(&self, id: VehicleId) -> Result<()> {
        if self.shared.state.write().fleet.mark_serviced(id) {
            info!("Vehicle {} serviced", id);
            Ok(())
        } else {
            Err(FleetError::UnknownVehicle(id))
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FleetEvent> {
        self.shared.bus.subscribe()
    }

    // ---- lifecycle ----

    pub fn run_state(&self) -> RunState {
        self.scheduler.state()
    }

    pub fn watch_state(&self) -> watch::Receiver<RunState> {
        self.scheduler.watch()
    }

    /// Start (or resume) the periodic tick. Needs a tokio runtime.
    pub fn start(&self) -> bool {
        let was_paused = self.scheduler.state() == RunState::Paused;
        let shared = Arc::clone(&self.shared);
        if !self.scheduler.start(move || {
            shared.tick();
        }) {
            return false;
        }

        let message = if was_paused { "Simulation resumed" } else { "Simulation started" };
        self.lifecycle(RunState::Running, message);
        true
    }

    pub fn pause(&self) -> bool {
        if !self.scheduler.pause() {
            return false;
        }
        self.lifecycle(RunState::Paused, "Simulation paused");
        true
    }

    pub fn resume(&self) -> bool {
        if !self.scheduler.resume() {
            return false;
        }
        self.lifecycle(RunState::Running, "Simulation resumed");
        true
    }

    pub fn stop(&self) -> bool {
        if !self.scheduler.stop() {
            return false;
        }
        self.lifecycle(RunState::Stopped, "Simulation stopped");
        true
    }

    fn lifecycle(&self, state: RunState, message: &str) {
        info!("{}", message);
        self.shared.record_event(EventKind::Info, message);
        self.shared.bus.publish_lifecycle(state, message);
    }

    // ---- export ----

    /// Copy out the records an exporter consumes.
    pub fn export_snapshot(&self) -> ExportSnapshot {
        let state = self.shared.state.read();
        ExportSnapshot {
            taken_at: Utc::now(),
            system_stats: state.stats.snapshot(),
            vehicles: state.fleet.snapshot(),
            anomalies: state.anomalies.to_vec(),
        }
    }

    /// Write a snapshot through `exporter`, logging the outcome to the event log.
    pub fn export(&self, exporter: &Exporter) -> Result<ExportArtifacts> {
        let artifacts = match exporter.export(&self.export_snapshot()) {
            Ok(artifacts) => artifacts,
            Err(e) => {
                warn!("Export to {:?} failed: {}", exporter.directory(), e);
                self.shared.record_event(EventKind::Error, &format!("Data export failed: {}", e));
                return Err(e);
            }
        };
        info!(
            "Export written: {:?}, {:?}, {:?}",
            artifacts.vehicles_csv, artifacts.anomalies_csv, artifacts.report_json
        );
        self.shared
            .record_event(EventKind::Info, "Data exported successfully (CSV + JSON files downloaded)");
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anomaly::AnomalyEmitter;
    use crate::config::AnalyticsMode;
    use crate::core::FleetEventPayload;
    use crate::fleet::UpdatePolicy;
    use crate::telemetry::{ReadingGenerator, SensorReading, VehicleState};
    use std::time::Duration;

    fn config(fleet_size: usize, probability: f64) -> Config {
        let mut config = Config::default();
        config.simulation.fleet_size = fleet_size;
        config.simulation.anomaly_probability = probability;
        config.simulation.seed = Some(42);
        config
    }

    /// One vehicle whose readings are pinned to fixed values.
    fn pinned_engine(speed: f64, temperature: f64, probability: f64) -> Engine {
        let generator = ReadingGenerator {
            speed: speed..speed,
            temperature: temperature..temperature,
            engine_off_probability: 0.0,
            ..ReadingGenerator::new()
        };
        let initial = SensorReading {
            speed,
            temperature,
            ..SensorReading::nominal()
        };
        let fleet = FleetAggregator::from_vehicles(
            vec![Vehicle::new(1, "Toyota Camry", "ABC-123", initial)],
            AnomalyEmitter::new(probability),
            UpdatePolicy::default(),
            200,
        )
        .with_generator(generator);
        Engine::with_fleet(config(1, probability), fleet, 7)
    }

    #[test]
    fn test_initial_events() {
        let engine = Engine::new(config(20, 0.05));
        assert_eq!(engine.list_vehicles().len(), 20);
        let stats = engine.current_system_stats();
        assert_eq!(stats.recent_events[0].message, "20 vehicles connected");
        assert_eq!(stats.recent_events[1].message, "System initialized successfully");
        assert_eq!(stats.total_readings, 0);
        assert_eq!(stats.anomaly_rate(), 0.0);
    }

    #[test]
    fn test_tick_accumulates_readings() {
        let engine = Engine::new(config(20, 0.05));
        for _ in 0..5 {
            engine.tick();
        }
        let stats = engine.current_system_stats();
        assert_eq!(stats.total_readings, 100);
        assert_eq!(stats.total_anomalies as usize, engine.list_anomalies().len());
        assert_eq!(engine.tick_count(), 5);
    }

    #[test]
    fn test_anomaly_buffer_capped() {
        let engine = Engine::new(config(20, 1.0));
        // 20 anomalies per tick
        for _ in 0..60 {
            engine.tick();
        }
        let anomalies = engine.list_anomalies();
        assert_eq!(anomalies.len(), 1000);
        assert_eq!(engine.current_system_stats().total_anomalies, 1000);
        assert!(anomalies.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_critical_temperature_scenario() {
        let engine = pinned_engine(60.0, 110.0, 0.0);
        engine.tick();
        let vehicle = engine.vehicle(1).unwrap();
        assert_eq!(vehicle.state, VehicleState::Critical);
        assert_eq!(vehicle.current_reading.temperature, 110.0);
    }

    #[test]
    fn test_distance_and_average_scenario() {
        let engine = pinned_engine(72.0, 90.0, 0.0);
        let before = engine.vehicle(1).unwrap();
        engine.tick();
        let after = engine.vehicle(1).unwrap();
        assert!((after.total_distance - before.total_distance - 0.02).abs() < 1e-9);
        assert!((after.avg_speed - 72.0).abs() < 1e-9);
        assert_eq!(after.state, VehicleState::Normal);
    }

    fn harsh_total(engine: &Engine) -> u32 {
        engine.list_vehicles().iter().map(|v| v.harsh_events).sum()
    }

    #[test]
    fn test_default_config_counts_harsh_events() {
        let mut config = Config::default();
        config.simulation.seed = Some(1);
        let engine = Engine::new(config);

        let before = harsh_total(&engine);
        for _ in 0..50 {
            engine.tick();
        }
        assert!(harsh_total(&engine) > before);
    }

    #[test]
    fn test_default_config_reaches_maintenance() {
        let mut config = Config::default();
        config.simulation.seed = Some(1);
        let engine = Engine::new(config);

        for _ in 0..400 {
            engine.tick();
        }
        let due: Vec<_> = engine
            .list_vehicles()
            .into_iter()
            .filter(|v| v.state == VehicleState::Maintenance)
            .collect();
        assert!(!due.is_empty());

        let id = due[0].id;
        engine.mark_serviced(id).unwrap();
        let serviced = engine.vehicle(id).unwrap();
        assert_ne!(serviced.state, VehicleState::Maintenance);
        assert_eq!(serviced.distance_since_service(), 0.0);
    }

    #[test]
    fn test_unknown_vehicle() {
        let engine = pinned_engine(50.0, 90.0, 0.0);
        assert!(matches!(engine.vehicle(99), Err(FleetError::UnknownVehicle(99))));
        assert_eq!(engine.analytics(99), VehicleAnalytics::empty());
        assert!(engine.insights(99).is_empty());
        assert!(engine.mark_serviced(99).is_err());
        assert!(engine.mark_serviced(1).is_ok());
    }

    #[test]
    fn test_analytics_reflects_anomalies() {
        let engine = pinned_engine(50.0, 90.0, 1.0);
        for _ in 0..10 {
            engine.tick();
        }
        let analytics = engine.analytics(1);
        assert_eq!(analytics.anomaly_summary.total(), 10);
        assert_eq!(analytics.speed.mean, 50.0);
        assert_eq!(analytics.predictions.len(), 3);
        assert_eq!(engine.config().analytics.mode, AnalyticsMode::History);
        assert_eq!(engine.insights(1).len(), 4);
    }

    #[test]
    fn test_overview() {
        let engine = pinned_engine(50.0, 90.0, 1.0);
        engine.tick();
        engine.tick();
        let overview = engine.fleet_overview();
        assert_eq!(overview.total_vehicles, 1);
        assert_eq!(overview.total_anomalies, 2);
        assert!((overview.anomaly_rate - 1.0).abs() < 1e-12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lifecycle_events() {
        let engine = pinned_engine(50.0, 90.0, 0.0);
        let mut events = engine.subscribe();

        assert!(engine.start());
        assert!(!engine.start());
        assert!(engine.pause());
        assert!(engine.resume());
        assert!(engine.stop());
        assert_eq!(engine.run_state(), RunState::Stopped);

        let messages: Vec<_> = engine
            .current_system_stats()
            .recent_events
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(
            &messages[..4],
            &["Simulation stopped", "Simulation resumed", "Simulation paused", "Simulation started"]
        );

        let first = events.recv().await.unwrap();
        assert!(matches!(
            first.payload,
            FleetEventPayload::Lifecycle {
                state: RunState::Running,
                ..
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_state_follows_transitions() {
        let engine = pinned_engine(50.0, 90.0, 0.0);
        let state = engine.watch_state();
        assert_eq!(*state.borrow(), RunState::Stopped);

        engine.start();
        assert_eq!(*state.borrow(), RunState::Running);
        engine.pause();
        assert_eq!(*state.borrow(), RunState::Paused);
        engine.stop();
        assert_eq!(*state.borrow(), RunState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_ticks_and_pause() {
        let engine = pinned_engine(50.0, 90.0, 0.0);
        engine.start();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        tokio::time::advance(Duration::from_millis(2000 * 3 + 100)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        let ticked = engine.tick_count();
        assert!(ticked >= 1);

        engine.pause();
        let readings = engine.current_system_stats().total_readings;
        tokio::time::advance(Duration::from_secs(60)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(engine.current_system_stats().total_readings, readings);

        engine.stop();
    }

    #[test]
    fn test_event_log_capped_newest_first() {
        let engine = pinned_engine(50.0, 90.0, 0.0);
        for i in 0..15 {
            engine.shared.record_event(EventKind::Info, &format!("event {}", i));
        }
        let events = engine.current_system_stats().recent_events;
        assert_eq!(events.len(), 10);
        assert_eq!(events[0].message, "event 14");
    }

    #[test]
    fn test_export_records_event() {
        let dir = tempfile::tempdir().unwrap();
        let engine = pinned_engine(50.0, 90.0, 1.0);
        engine.tick();
        let artifacts = engine.export(&Exporter::new(dir.path(), 100)).unwrap();
        assert!(artifacts.vehicles_csv.exists());
        assert!(artifacts.anomalies_csv.exists());
        assert!(artifacts.report_json.exists());
        assert_eq!(
            engine.current_system_stats().recent_events[0].message,
            "Data exported successfully (CSV + JSON files downloaded)"
        );
    }

    #[test]
    fn test_failed_export_records_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let engine = pinned_engine(50.0, 90.0, 0.0);
        assert!(engine.export(&Exporter::new(blocker.join("out"), 100)).is_err());

        let latest = &engine.current_system_stats().recent_events[0];
        assert_eq!(latest.kind, EventKind::Error);
        assert!(latest.message.starts_with("Data export failed"));
    }
}
