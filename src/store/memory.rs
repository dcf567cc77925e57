// SPDX-License-Identifier: MIT

//! In-memory implementation of [`TrackerStore`].

use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;
use dashmap::DashMap;

use crate::models::{DailyLog, DailyStepRecord, ShieldInventory, StreakState};
use crate::store::TrackerStore;

/// Dashmap-backed store for tests and the replay binary.
#[derive(Default)]
pub struct MemoryStore {
    current: RwLock<Option<DailyStepRecord>>,
    logs: DashMap<NaiveDate, DailyLog>,
    streak: RwLock<StreakState>,
    shields: RwLock<ShieldInventory>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrackerStore for MemoryStore {
    fn current_record(&self) -> Option<DailyStepRecord> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn put_current_record(&self, record: &DailyStepRecord) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(record.clone());
    }

    fn log_for(&self, date: NaiveDate) -> Option<DailyLog> {
        self.logs.get(&date).map(|log| log.value().clone())
    }

    fn put_log(&self, log: &DailyLog) {
        self.logs.insert(log.date, log.clone());
    }

    fn daily_logs(&self) -> Vec<DailyLog> {
        self.logs.iter().map(|entry| entry.value().clone()).collect()
    }

    fn streak_state(&self) -> StreakState {
        self.streak
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn put_streak_state(&self, state: &StreakState) {
        *self.streak.write().unwrap_or_else(PoisonError::into_inner) = state.clone();
    }

    fn shield_inventory(&self) -> ShieldInventory {
        self.shields
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn put_shield_inventory(&self, inventory: &ShieldInventory) {
        *self
            .shields
            .write()
            .unwrap_or_else(PoisonError::into_inner) = inventory.clone();
    }
}
