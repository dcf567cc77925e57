// SPDX-License-Identifier: MIT

//! Streak state and shield inventory records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Consecutive-qualifying-day bookkeeping.
///
/// Invariants: `longest_streak >= current_streak`; `current_streak == 0`
/// iff `last_goal_met_date` is absent or the chain ending there was broken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Most recent day that counted toward the streak (via goal or shield).
    pub last_goal_met_date: Option<NaiveDate>,
    pub streak_start_date: Option<NaiveDate>,
}

impl StreakState {
    pub fn is_active(&self) -> bool {
        self.current_streak > 0
    }

    /// Fold one qualifying day into the streak.
    ///
    /// Extends the chain when `date` is the day after the last qualifying
    /// day, ignores duplicate evaluations of that day, and otherwise
    /// starts a fresh one-day streak (callers bridge or break gaps before
    /// getting here).
    pub fn record_qualifying_day(&mut self, date: NaiveDate) {
        match self.last_goal_met_date {
            Some(last) if date == last => {}
            Some(last) if self.is_active() && last.succ_opt() == Some(date) => {
                self.current_streak += 1;
                self.last_goal_met_date = Some(date);
            }
            _ => {
                self.current_streak = 1;
                self.streak_start_date = Some(date);
                self.last_goal_met_date = Some(date);
            }
        }
        self.longest_streak = self.longest_streak.max(self.current_streak);
    }

    /// Break the current chain. `last_goal_met_date` is kept for display
    /// ("last active on..."); `longest_streak` is a high-water mark and
    /// never resets.
    pub fn break_streak(&mut self) {
        self.current_streak = 0;
        self.streak_start_date = None;
    }
}

/// Consumable shield tokens that keep missed days from breaking a streak.
///
/// Invariant: `available_shields` never exceeds the tier cap; operations
/// that would overflow clamp instead of erroring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldInventory {
    pub available_shields: u32,
    /// Incremented on every consumption (auto or manual); reset only by
    /// the external monthly scheduler.
    pub shields_used_this_month: u32,
    /// Cumulative count ever purchased, for accounting/analytics. Counts
    /// the full requested amount even when the bank clamps.
    pub purchased_shields: u32,
}

impl ShieldInventory {
    /// Add shields, clamping the bank to `cap`. Returns how many were
    /// actually banked; the overflow is discarded, not held for later.
    pub fn grant(&mut self, amount: u32, cap: u32) -> u32 {
        self.purchased_shields = self.purchased_shields.saturating_add(amount);
        let before = self.available_shields;
        self.available_shields = before.saturating_add(amount).min(cap);
        self.available_shields.saturating_sub(before)
    }

    /// Consume one shield. Returns `false` when the bank is empty.
    pub fn consume(&mut self) -> bool {
        if self.available_shields == 0 {
            return false;
        }
        self.available_shields -= 1;
        self.shields_used_this_month = self.shields_used_this_month.saturating_add(1);
        true
    }

    /// Monthly counter reset, driven by the external scheduler.
    pub fn reset_monthly_usage(&mut self) {
        self.shields_used_this_month = 0;
    }
}
