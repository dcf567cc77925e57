// SPDX-License-Identifier: MIT

//! Streak bookkeeping and shield deployment.
//!
//! Evaluates closed days against the step goal, bridges gaps of missed
//! days with banked shields (oldest missed day first), and exposes the
//! manual repair and purchase operations. Every operation is idempotent:
//! days already resolved (goal met or shielded) are skipped, so re-running
//! an evaluation with no new data changes nothing.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::{Config, Tier};
use crate::error::{Result, TrackerError};
use crate::models::{DailyLog, ShieldInventory, StreakState};

/// Caller-owned working set the ledger operates on.
///
/// The ledger never performs I/O; the caller loads these from its store,
/// lets the ledger mutate them, and writes them back.
#[derive(Debug, Clone, Default)]
pub struct LedgerBooks {
    pub streak: StreakState,
    pub shields: ShieldInventory,
    pub logs: BTreeMap<NaiveDate, DailyLog>,
}

impl LedgerBooks {
    pub fn new(streak: StreakState, shields: ShieldInventory, logs: Vec<DailyLog>) -> Self {
        Self {
            streak,
            shields,
            logs: logs.into_iter().map(|log| (log.date, log)).collect(),
        }
    }
}

/// Outcome of closing a single day.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DayOutcome {
    pub goal_met: bool,
    pub shields_deployed: u32,
    pub streak_broken: bool,
    pub current_streak: u32,
}

/// Outcome of a missed-day sweep.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeployReport {
    pub shields_deployed: u32,
    pub streak_broken: bool,
}

/// Outcome of a manual repair.
#[derive(Debug, PartialEq, Eq)]
pub struct RepairOutcome {
    /// Zero when the day was already resolved (repair raced another
    /// operation and lost; first one wins).
    pub shields_spent: u32,
    pub current_streak: u32,
}

/// Maintains streak and shield consistency as days close.
///
/// Pure and synchronous, like the reconciler: all state lives in the
/// [`LedgerBooks`] the caller passes in.
pub struct StreakLedger {
    daily_step_goal: u32,
    repair_window_days: i64,
    max_banked_free: u32,
    max_banked_pro: u32,
}

impl StreakLedger {
    pub fn new(config: &Config) -> Self {
        Self {
            daily_step_goal: config.daily_step_goal,
            repair_window_days: config.repair_window_days,
            max_banked_free: config.max_banked_shields_free,
            max_banked_pro: config.max_banked_shields_pro,
        }
    }

    /// Evaluate a day that has closed with the given step total.
    ///
    /// Re-runnable: closing a day that already qualified is a no-op apart
    /// from ratcheting the logged step count upward.
    pub fn close_day(&self, books: &mut LedgerBooks, date: NaiveDate, steps: u32) -> DayOutcome {
        if let Some(log) = books.logs.get_mut(&date) {
            if log.qualifies() {
                log.steps = log.steps.max(steps);
                return DayOutcome {
                    goal_met: log.goal_met,
                    shields_deployed: 0,
                    streak_broken: false,
                    current_streak: books.streak.current_streak,
                };
            }
        }

        let met = steps >= self.daily_step_goal;

        // Resolve the gap of days between the last qualifying day and this
        // one before folding this day in.
        let gap = self.resolve_gap(books, date);
        let mut outcome = DayOutcome {
            goal_met: met,
            shields_deployed: gap.shields_deployed,
            streak_broken: gap.streak_broken,
            current_streak: 0,
        };

        let entry = books
            .logs
            .entry(date)
            .or_insert_with(|| DailyLog::closed(date, steps, self.daily_step_goal));
        entry.steps = entry.steps.max(steps);
        entry.goal_met = entry.goal_met || met;

        let tip = books.streak.last_goal_met_date;
        if met {
            let extends_chain =
                books.streak.is_active() && tip.and_then(|last| last.succ_opt()) == Some(date);
            if extends_chain {
                books.streak.record_qualifying_day(date);
            } else {
                // Anything else: a late sync behind the chain tip, an
                // upgrade of the very day whose miss broke the chain, or a
                // fresh start. Re-walk the logs instead of guessing.
                self.recompute_streak(books);
            }
        } else if books.streak.is_active() && tip.map_or(true, |last| date > last) {
            // Missed day at the end of an intact chain: shield it or break.
            if books.shields.consume() {
                entry.shield_used = true;
                outcome.shields_deployed += 1;
                books.streak.record_qualifying_day(date);
                tracing::info!(date = %date, "Shield auto-deployed on day close");
            } else {
                books.streak.break_streak();
                outcome.streak_broken = true;
                tracing::info!(date = %date, "Streak broken: no shields left");
            }
        }
        // A miss behind the chain tip, or with no streak to protect, is
        // recorded plainly: it threatens nothing, so no shield moves.

        outcome.current_streak = books.streak.current_streak;
        outcome
    }

    /// Sweep the missed days before `today` and deploy shields to keep the
    /// chain intact. Days already resolved consume nothing, so calling this
    /// twice in a row deploys zero shields the second time.
    pub fn check_and_deploy(&self, books: &mut LedgerBooks, today: NaiveDate) -> DeployReport {
        self.resolve_gap(books, today)
    }

    /// Walk the unresolved days in `(last_goal_met_date, up_to)` in order,
    /// consuming one shield per missed day until the bank runs dry.
    fn resolve_gap(&self, books: &mut LedgerBooks, up_to: NaiveDate) -> DeployReport {
        let mut report = DeployReport::default();
        if !books.streak.is_active() {
            // No streak to protect.
            return report;
        }
        let Some(last) = books.streak.last_goal_met_date else {
            return report;
        };

        let mut day = match last.succ_opt() {
            Some(next) => next,
            None => return report,
        };
        while day < up_to {
            let resolved = books.logs.get(&day).is_some_and(DailyLog::qualifies);
            if resolved {
                // Late-arriving sync already satisfied this day.
                books.streak.record_qualifying_day(day);
            } else if books.streak.is_active() {
                if books.shields.consume() {
                    let entry = books
                        .logs
                        .entry(day)
                        .or_insert_with(|| DailyLog::missed(day, 0));
                    entry.shield_used = true;
                    report.shields_deployed += 1;
                    books.streak.record_qualifying_day(day);
                    tracing::info!(date = %day, "Shield auto-deployed to bridge missed day");
                } else {
                    books
                        .logs
                        .entry(day)
                        .or_insert_with(|| DailyLog::missed(day, 0));
                    books.streak.break_streak();
                    report.streak_broken = true;
                    tracing::info!(date = %day, "Streak broken: gap exceeds banked shields");
                }
            } else {
                // Past the break: remaining misses are recorded plainly, but
                // a qualifying log later in the gap restarts the chain above.
                books
                    .logs
                    .entry(day)
                    .or_insert_with(|| DailyLog::missed(day, 0));
            }

            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        report
    }

    /// Manually spend a shield on a specific missed day.
    ///
    /// Fails when the day is outside the repair window, not closed yet, or
    /// the bank is empty. Repairing an already-resolved day succeeds as a
    /// no-op (`shields_spent == 0`): whichever operation ran first wins.
    pub fn repair_day(
        &self,
        books: &mut LedgerBooks,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<RepairOutcome> {
        let days_ago = (today - date).num_days();
        if days_ago <= 0 {
            return Err(TrackerError::DayNotClosed(date));
        }
        if days_ago > self.repair_window_days {
            return Err(TrackerError::RepairWindowExpired {
                date,
                days_ago,
                window_days: self.repair_window_days,
            });
        }

        if books.logs.get(&date).is_some_and(DailyLog::qualifies) {
            return Ok(RepairOutcome {
                shields_spent: 0,
                current_streak: books.streak.current_streak,
            });
        }

        if !books.shields.consume() {
            return Err(TrackerError::InsufficientShields);
        }
        let entry = books
            .logs
            .entry(date)
            .or_insert_with(|| DailyLog::missed(date, 0));
        entry.shield_used = true;
        tracing::info!(date = %date, "Shield manually applied");

        // The repaired day may or may not reconnect the chain; re-walk it
        // instead of incrementing blindly.
        self.recompute_streak(books);

        Ok(RepairOutcome {
            shields_spent: 1,
            current_streak: books.streak.current_streak,
        })
    }

    /// Recompute the streak by walking backward from the most recent
    /// qualifying day through the contiguous qualifying chain.
    pub fn recompute_streak(&self, books: &mut LedgerBooks) {
        let latest = books
            .logs
            .iter()
            .rev()
            .find(|(_, log)| log.qualifies())
            .map(|(date, _)| *date);
        let Some(latest) = latest else {
            books.streak.break_streak();
            books.streak.last_goal_met_date = None;
            return;
        };

        let mut length = 1u32;
        let mut start = latest;
        let mut cursor = latest;
        while let Some(previous) = cursor.pred_opt() {
            match books.logs.get(&previous) {
                Some(log) if log.qualifies() => {
                    length += 1;
                    start = previous;
                    cursor = previous;
                }
                _ => break,
            }
        }

        books.streak.current_streak = length;
        books.streak.streak_start_date = Some(start);
        books.streak.last_goal_met_date = Some(latest);
        books.streak.longest_streak = books.streak.longest_streak.max(length);
    }

    /// Bank purchased shields, clamping to the tier cap. Returns how many
    /// were actually banked; `purchased_shields` records the full amount.
    pub fn purchase_shields(
        &self,
        shields: &mut ShieldInventory,
        amount: u32,
        tier: Tier,
    ) -> u32 {
        let cap = match tier {
            Tier::Free => self.max_banked_free,
            Tier::Pro => self.max_banked_pro,
        };
        let granted = shields.grant(amount, cap);
        tracing::debug!(requested = amount, granted, cap, "Shields purchased");
        granted
    }
}
