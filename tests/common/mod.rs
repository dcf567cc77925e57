// SPDX-License-Identifier: MIT

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use stridekeeper::config::Config;
use stridekeeper::models::{RawStepReading, StepSource};
use stridekeeper::store::MemoryStore;
use stridekeeper::AppState;

#[allow(dead_code)]
pub fn day(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

#[allow(dead_code)]
pub fn at_noon(date: &str) -> DateTime<Utc> {
    let d = day(date);
    Utc.from_utc_datetime(&d.and_hms_opt(12, 0, 0).expect("valid time"))
}

#[allow(dead_code)]
pub fn reading(source: StepSource, date: &str, steps: i64, distance: f64) -> RawStepReading {
    RawStepReading::new(source, day(date), steps, distance, at_noon(date))
}

/// Create a test app over an in-memory store.
/// Returns the shared state and the store for direct inspection.
#[allow(dead_code)]
pub fn create_test_app() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(Config::default(), store.clone());
    (state, store)
}
