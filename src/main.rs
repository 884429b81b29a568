// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/fleetwatch

//! FleetWatch - Vehicle Fleet Telemetry Simulation and Analytics
//!
//! Runs the fleet simulation headless, logging a periodic status line.
//! Stops on Ctrl+C or after a fixed number of ticks, optionally exporting
//! a snapshot on the way out.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fleetwatch::config::AnalyticsMode;
use fleetwatch::{build_info, Config, Engine, Exporter, VERSION};

/// Interval between status lines
const STATUS_INTERVAL: Duration = Duration::from_secs(10);

/// FleetWatch - Vehicle Fleet Telemetry Simulation and Analytics
#[derive(Parser, Debug)]
#[command(name = "fleetwatch")]
#[command(author = "bad-antics")]
#[command(version = VERSION)]
#[command(about = "Vehicle fleet telemetry simulation and analytics")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Number of simulated vehicles
    #[arg(long)]
    fleet_size: Option<usize>,

    /// Tick interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Export a snapshot on shutdown
    #[arg(long)]
    export: bool,

    /// Use the synthetic analytics model instead of retained history
    #[arg(long)]
    synthetic_analytics: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load or create configuration
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Initialize logging: RUST_LOG, then the command line flags, then the config file
    let log_level = if args.trace {
        "trace"
    } else if args.debug {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{}", build_info());

    // Override with command line args
    if let Some(fleet_size) = args.fleet_size {
        config.simulation.fleet_size = fleet_size;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.simulation.tick_interval_ms = interval_ms;
    }
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    if args.synthetic_analytics {
        config.analytics.mode = AnalyticsMode::Synthetic;
    }

    info!("Configuration loaded from {:?}", config_path);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_headless(config, args.ticks, args.export))?;

    Ok(())
}

/// Run the simulation until Ctrl+C or the tick limit
async fn run_headless(config: Config, max_ticks: Option<u64>, export: bool) -> Result<()> {
    let exporter = Exporter::from_config(&config.export);
    let engine = Engine::new(config);

    engine.start();
    info!("Press Ctrl+C to shutdown");

    let mut status = tokio::time::interval(STATUS_INTERVAL);
    status.tick().await;
    let mut events = engine.subscribe();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
            _ = status.tick() => {
                let stats = engine.current_system_stats();
                let overview = engine.fleet_overview();
                info!(
                    "uptime {} | readings {} | live anomalies {} | active {}/{} | critical {}",
                    stats.uptime,
                    stats.total_readings,
                    stats.total_anomalies,
                    overview.active_vehicles,
                    overview.total_vehicles,
                    overview.critical_vehicles
                );
            }
            event = events.recv() => {
                match event {
                    Ok(_) => {
                        if max_ticks.is_some_and(|limit| engine.tick_count() >= limit) {
                            info!("Reached {} ticks", engine.tick_count());
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Status loop lagged, skipped {} events", skipped);
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    engine.stop();

    if export {
        let artifacts = engine.export(&exporter)?;
        info!("Vehicles: {:?}", artifacts.vehicles_csv);
        info!("Anomalies: {:?}", artifacts.anomalies_csv);
        info!("Report: {:?}", artifacts.report_json);
    }

    info!("FleetWatch shutdown complete");
    Ok(())
}
