// SPDX-License-Identifier: MIT

//! Persistence seam.
//!
//! The core never performs I/O: everything it reads or writes goes through
//! this trait. Records are per-day keyed and conflicts are resolved by the
//! ratchet itself, so last-write-wins per record is all an implementation
//! has to provide. The in-memory store backs tests and the replay binary;
//! the production app plugs its key-value store in behind the same surface.

pub mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;

use crate::models::{DailyLog, DailyStepRecord, ShieldInventory, StreakState};

pub trait TrackerStore: Send + Sync {
    /// The live record for the current (open) day.
    fn current_record(&self) -> Option<DailyStepRecord>;
    fn put_current_record(&self, record: &DailyStepRecord);

    fn log_for(&self, date: NaiveDate) -> Option<DailyLog>;
    fn put_log(&self, log: &DailyLog);
    /// All closed-day logs. The ledger's chain walks need history, so the
    /// working set is loaded wholesale; logs are one small record per day.
    fn daily_logs(&self) -> Vec<DailyLog>;

    fn streak_state(&self) -> StreakState;
    fn put_streak_state(&self, state: &StreakState);

    fn shield_inventory(&self) -> ShieldInventory;
    fn put_shield_inventory(&self, inventory: &ShieldInventory);
}
