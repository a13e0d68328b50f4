//! Command implementations for the airport weather CLI
//!
//! Each command builds a store (configuration, airport file, optional
//! measurement updates), runs its operation and prints the result to stdout.
//! Logs go to stderr.

use crate::app::models::{Measurement, MeasurementKind};
use crate::app::services::airport_loader::LoadStats;
use crate::app::services::stats_aggregator::StatsSnapshot;
use crate::app::services::update_engine::UpdateOutcome;
use crate::cli::args::{
    Args, Commands, OutputFormat, PingArgs, QueryArgs, StoreArgs, parse_query_pair,
};
use crate::config::StoreConfig;
use crate::{AtmosphericRecord, Error, Result, WeatherService};
use chrono::Utc;
use colored::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// One measurement update read from a measurements file
#[derive(Debug, Clone, Deserialize)]
pub struct MeasurementUpdate {
    pub iata: String,
    pub kind: String,
    pub point: Measurement,
}

/// Main command runner
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    let show_progress = args.show_progress();
    match args.command {
        Some(Commands::Load(store)) => run_load(&store, show_progress).await,
        Some(Commands::Query(query)) => run_query(&query, show_progress).await,
        Some(Commands::Ping(ping)) => run_ping(&ping, show_progress).await,
        None => Err(Error::bad_request("No command given")),
    }
}

/// Set up tracing to stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("airport_weather={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Build and seed a store from the shared store arguments
pub async fn build_service(
    store: &StoreArgs,
    show_progress: bool,
) -> Result<(WeatherService, LoadStats)> {
    store.validate()?;

    let config = match &store.config {
        Some(path) => StoreConfig::from_file(path)?,
        None => StoreConfig::default(),
    };
    let service = WeatherService::new(config)?;
    let load_stats = service.load_airport_file(&store.file, show_progress).await?;

    if let Some(path) = &store.measurements {
        let updates = read_measurement_updates(path).await?;
        let applied = apply_measurement_updates(&service, &updates);
        info!(
            "Applied {} of {} measurement updates from {}",
            applied,
            updates.len(),
            path.display()
        );
    }

    Ok((service, load_stats))
}

/// Read a JSON array of measurement updates
pub async fn read_measurement_updates(path: &Path) -> Result<Vec<MeasurementUpdate>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::json(format!("Failed to parse {}", path.display()), e))
}

/// Apply updates, logging and skipping any that fail; returns how many were stored
pub fn apply_measurement_updates(
    service: &WeatherService,
    updates: &[MeasurementUpdate],
) -> usize {
    let now = Utc::now();
    updates
        .iter()
        .filter(|update| {
            let result = update
                .kind
                .parse::<MeasurementKind>()
                .and_then(|kind| {
                    service.update_weather_at(&update.iata, kind, update.point, now)
                });
            match result {
                Ok(outcome) => {
                    debug!("{} {} -> {:?}", update.iata, update.kind, outcome);
                    outcome == UpdateOutcome::Applied
                }
                Err(e) => {
                    warn!("Skipping measurement update for {}: {}", update.iata, e);
                    false
                }
            }
        })
        .count()
}

async fn run_load(store: &StoreArgs, show_progress: bool) -> Result<()> {
    let (service, load_stats) = build_service(store, show_progress).await?;

    println!("\n{}", "Airport Load Summary".bright_green().bold());
    println!("  {}", load_stats.summary());
    println!(
        "  Airports registered: {}",
        service.registry().len().to_string().bright_white().bold()
    );
    if load_stats.has_errors() {
        println!(
            "  Rows skipped: {}",
            load_stats.rows_skipped.to_string().bright_red().bold()
        );
        for error in load_stats.errors.iter().take(10) {
            println!("    {}", error);
        }
    }
    Ok(())
}

async fn run_query(query: &QueryArgs, show_progress: bool) -> Result<()> {
    let (service, _) = build_service(&query.store, show_progress).await?;

    let records = service.weather(&query.iata, &query.radius)?;
    print_output(&records, query.format, || {
        format!(
            "{} {} record(s) within {} km of {}",
            "Query:".bright_green().bold(),
            records.len(),
            radius_label(&query.radius),
            query.iata
        )
    })
}

async fn run_ping(ping: &PingArgs, show_progress: bool) -> Result<()> {
    let (service, _) = build_service(&ping.store, show_progress).await?;

    for pair in &ping.queries {
        let (iata, radius) = parse_query_pair(pair)?;
        if let Err(e) = service.weather(&iata, &radius) {
            warn!("Query {} failed: {}", pair, e);
        }
    }

    let snapshot = service.ping();
    print_output(&snapshot, ping.format, || summarize_snapshot(&snapshot))
}

fn radius_label(radius: &str) -> &str {
    match radius.trim() {
        "" => "0",
        trimmed => trimmed,
    }
}

fn summarize_snapshot(snapshot: &StatsSnapshot) -> String {
    let mut lines = vec![format!(
        "{} {}",
        "Ping:".bright_green().bold(),
        snapshot.summary()
    )];
    let mut busiest: Vec<_> = snapshot
        .iata_frequency
        .iter()
        .filter(|(_, fraction)| **fraction > 0.0)
        .collect();
    busiest.sort_by(|a, b| b.1.total_cmp(a.1));
    for (iata, fraction) in busiest.into_iter().take(10) {
        lines.push(format!("  {} {:.3}", iata, fraction));
    }
    lines.join("\n")
}

fn print_output<T: Serialize>(
    value: &T,
    format: OutputFormat,
    summary: impl FnOnce() -> String,
) -> Result<()> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Summary => summary(),
    };
    println!("{}", text);
    Ok(())
}
