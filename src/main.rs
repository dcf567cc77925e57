// SPDX-License-Identifier: MIT

//! Stridekeeper replay harness
//!
//! Feeds a JSON fixture of raw step readings through the reconciliation
//! and streak pipeline, logging what the app shell would do with each
//! result. Useful for eyeballing ratchet and shield behavior against
//! captured sensor data.

use std::sync::Arc;

use stridekeeper::{
    config::Config,
    events::TrackerEvent,
    models::RawStepReading,
    store::{MemoryStore, TrackerStore},
    time_utils::{day_of, format_utc_rfc3339},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        goal = config.daily_step_goal,
        ceiling = config.step_ceiling_per_day,
        "Starting stridekeeper replay"
    );

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/sample_readings.json".to_string());
    let raw = std::fs::read_to_string(&path)?;
    let readings: Vec<RawStepReading> = serde_json::from_str(&raw)?;
    tracing::info!(count = readings.len(), path = %path, "Loaded readings");

    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(config, store.clone());

    state.events.subscribe(|event| match event {
        TrackerEvent::StepsIncreased { date, steps, .. } => {
            tracing::info!(%date, steps, "Display refresh");
        }
        TrackerEvent::IntegrityWarning(warning) => {
            tracing::warn!(warning = %warning, "Advisory banner");
        }
        other => tracing::debug!(event = ?other, "Event"),
    });

    let now = chrono::Utc::now();
    let summary = state.tracker.ingest(&readings, now);
    tracing::info!(
        did_increase = summary.did_increase,
        days_closed = summary.days_closed,
        warnings = summary.warnings,
        "Batch ingested"
    );

    let report = state.tracker.close_out_through(day_of(now), now);
    tracing::info!(
        shields_deployed = report.shields_deployed,
        streak_broken = report.streak_broken,
        "Ledger swept"
    );

    if let Some(record) = store.current_record() {
        tracing::info!(
            date = %record.date,
            steps = record.steps,
            distance_meters = record.distance_meters,
            last_updated = %format_utc_rfc3339(record.last_updated),
            "Current day"
        );
    }

    let streak = store.streak_state();
    let shields = store.shield_inventory();
    tracing::info!(
        current = streak.current_streak,
        longest = streak.longest_streak,
        available_shields = shields.available_shields,
        "Streak summary"
    );

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stridekeeper=debug".parse().expect("valid directive"))
                .add_directive("info".parse().expect("valid directive")),
        )
        .with(format)
        .init();
}
