// SPDX-License-Identifier: MIT

//! Per-day step records: the live ratcheted total and the closed-day log.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Best-known totals for a single day.
///
/// Invariant: for a fixed `date`, `steps` and `distance_meters` never
/// decrease. The record is superseded at day rollover, not mutated across
/// dates: the old one is archived as a [`DailyLog`] candidate and a new
/// record starts at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStepRecord {
    pub date: NaiveDate,
    pub steps: u32,
    pub distance_meters: f64,
    pub last_updated: DateTime<Utc>,
}

impl DailyStepRecord {
    /// Fresh record for the first observation of a new day.
    pub fn zero(date: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            date,
            steps: 0,
            distance_meters: 0.0,
            last_updated: now,
        }
    }

    /// Raise the totals to at least the given values.
    ///
    /// Steps and distance ratchet independently; neither is derived from
    /// the other and the two sources can disagree. Returns `true` only
    /// when `steps` strictly increased, which is the persistence trigger.
    pub fn ratchet(&mut self, steps: u32, distance_meters: f64, now: DateTime<Utc>) -> bool {
        let increased = steps > self.steps;
        if increased {
            self.steps = steps;
        }
        if distance_meters > self.distance_meters {
            self.distance_meters = distance_meters;
        }
        if increased {
            self.last_updated = now;
        }
        increased
    }
}

/// Historical ledger entry for a single closed day.
///
/// At most one log exists per date. `shield_used` means the day counts
/// as qualifying for streak purposes even though `steps` is below goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub id: Uuid,
    pub date: NaiveDate,
    pub steps: u32,
    pub goal_met: bool,
    pub shield_used: bool,
    /// Walk sessions finished on this day.
    #[serde(default)]
    pub tracked_walk_ids: HashSet<Uuid>,
}

impl DailyLog {
    /// Log for a day closing with the given step total.
    pub fn closed(date: NaiveDate, steps: u32, goal: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            steps,
            goal_met: steps >= goal,
            shield_used: false,
            tracked_walk_ids: HashSet::new(),
        }
    }

    /// Log for a day known to have missed the goal (e.g. a gap day the
    /// ledger back-fills with no recorded steps).
    pub fn missed(date: NaiveDate, steps: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            steps,
            goal_met: false,
            shield_used: false,
            tracked_walk_ids: HashSet::new(),
        }
    }

    /// Whether the day counts toward the streak, via goal or shield.
    pub fn qualifies(&self) -> bool {
        self.goal_met || self.shield_used
    }

    /// Attach a finished walk session. Returns `false` on duplicates.
    pub fn attach_walk(&mut self, walk_id: Uuid) -> bool {
        self.tracked_walk_ids.insert(walk_id)
    }
}
