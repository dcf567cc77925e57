// SPDX-License-Identifier: MIT

//! Stridekeeper: step reconciliation and streak bookkeeping.
//!
//! This crate is the pure core of a walking app: it merges step readings
//! from multiple devices into a monotonic daily total and keeps the streak
//! and shield ledger consistent as days close. Sensors, persistence, sync
//! transports, and UI are external collaborators behind narrow seams.

pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod services;
pub mod store;
pub mod time_utils;

use std::sync::Arc;

use config::Config;
use events::EventBus;
use services::TrackerService;
use store::TrackerStore;

/// Shared application state, constructed once at startup.
pub struct AppState {
    pub config: Config,
    pub tracker: TrackerService,
    pub events: Arc<EventBus>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn TrackerStore>) -> Self {
        let events = Arc::new(EventBus::new());
        Self {
            tracker: TrackerService::new(config.clone(), store, events.clone()),
            config,
            events,
        }
    }
}
