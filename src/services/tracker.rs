// SPDX-License-Identifier: MIT

//! Tracker orchestration service.
//!
//! Handles the core workflow:
//! 1. Validate and reconcile incoming readings against the stored record
//! 2. Persist the record when the ratchet moved, archive rolled-over days
//! 3. Feed closed days through the streak ledger
//! 4. Publish events for the UI layer
//!
//! The reconciler and ledger stay pure; this is the one place that touches
//! the store and the event bus, constructed once at startup and handed to
//! call sites by reference.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::config::{Config, Tier};
use crate::error::Result;
use crate::events::{EventBus, TrackerEvent};
use crate::models::{DailyLog, DailyStepRecord, RawStepReading};
use crate::services::streak::{DeployReport, LedgerBooks, RepairOutcome, StreakLedger};
use crate::services::StepReconciler;
use crate::store::TrackerStore;

pub struct TrackerService {
    config: Config,
    reconciler: StepReconciler,
    ledger: StreakLedger,
    store: Arc<dyn TrackerStore>,
    events: Arc<EventBus>,
}

/// Result of ingesting one batch of readings.
#[derive(Debug)]
pub struct IngestSummary {
    pub did_increase: bool,
    pub days_closed: u32,
    pub warnings: u32,
}

impl TrackerService {
    pub fn new(config: Config, store: Arc<dyn TrackerStore>, events: Arc<EventBus>) -> Self {
        Self {
            reconciler: StepReconciler::new(&config),
            ledger: StreakLedger::new(&config),
            config,
            store,
            events,
        }
    }

    /// Ingest a batch of raw readings from the sensor/health collaborators.
    ///
    /// The record is persisted only when the ratchet moved or a rollover
    /// happened; idempotent re-delivery writes and publishes nothing.
    pub fn ingest(&self, readings: &[RawStepReading], now: DateTime<Utc>) -> IngestSummary {
        let previous = self.store.current_record();
        let outcome = self.reconciler.apply_batch(previous, readings, now);

        for warning in &outcome.warnings {
            self.events
                .publish(&TrackerEvent::IntegrityWarning(warning.clone()));
        }

        for closed in &outcome.closed_days {
            self.close_record(closed);
        }

        if let Some(record) = &outcome.record {
            if outcome.did_increase || !outcome.closed_days.is_empty() {
                self.store.put_current_record(record);
            }
            if outcome.did_increase {
                tracing::debug!(date = %record.date, steps = record.steps, "Ratchet advanced");
                self.events.publish(&TrackerEvent::StepsIncreased {
                    date: record.date,
                    steps: record.steps,
                    distance_meters: record.distance_meters,
                });
            }
        }

        IngestSummary {
            did_increase: outcome.did_increase,
            days_closed: outcome.closed_days.len() as u32,
            warnings: outcome.warnings.len() as u32,
        }
    }

    /// Close out any finished days up to `today` and sweep the ledger for
    /// missed days. Safe to run opportunistically; everything downstream
    /// is idempotent.
    pub fn close_out_through(&self, today: NaiveDate, now: DateTime<Utc>) -> DeployReport {
        if let Some(record) = self.store.current_record() {
            if record.date < today {
                self.close_record(&record);
                self.store
                    .put_current_record(&DailyStepRecord::zero(today, now));
            }
        }

        let mut previous_streak = 0;
        let report = self.with_books(|books, ledger| {
            previous_streak = books.streak.current_streak;
            ledger.check_and_deploy(books, today)
        });

        if report.shields_deployed > 0 {
            self.events.publish(&TrackerEvent::ShieldsDeployed {
                count: report.shields_deployed,
                manual: false,
            });
        }
        if report.streak_broken {
            self.events
                .publish(&TrackerEvent::StreakBroken { previous_streak });
        }
        report
    }

    /// Manually spend a shield on a missed day within the repair window.
    pub fn repair_missed_day(&self, date: NaiveDate, today: NaiveDate) -> Result<RepairOutcome> {
        let outcome = self.with_books(|books, ledger| ledger.repair_day(books, date, today))?;

        if outcome.shields_spent > 0 {
            self.events.publish(&TrackerEvent::ShieldsDeployed {
                count: outcome.shields_spent,
                manual: true,
            });
        }
        Ok(outcome)
    }

    /// Bank purchased shields, clamped to the tier cap.
    pub fn purchase_shields(&self, amount: u32, tier: Tier) -> u32 {
        let mut inventory = self.store.shield_inventory();
        let granted = self.ledger.purchase_shields(&mut inventory, amount, tier);
        self.store.put_shield_inventory(&inventory);

        self.events.publish(&TrackerEvent::ShieldsPurchased {
            requested: amount,
            granted,
        });
        granted
    }

    /// Attach a finished walk session to the day's log.
    pub fn record_walk(&self, date: NaiveDate, walk_id: Uuid) {
        let mut log = self
            .store
            .log_for(date)
            .unwrap_or_else(|| DailyLog::missed(date, 0));
        if log.attach_walk(walk_id) {
            self.store.put_log(&log);
        }
    }

    /// Whether the open record for `date` already meets the goal. This is
    /// the single fact the reconciler side shares with the streak side.
    pub fn goal_met_today(&self) -> bool {
        self.store
            .current_record()
            .is_some_and(|record| record.steps >= self.config.daily_step_goal)
    }

    /// Archive one rolled-over record into the ledger.
    fn close_record(&self, record: &DailyStepRecord) {
        let mut previous_streak = 0;
        let outcome = self.with_books(|books, ledger| {
            previous_streak = books.streak.current_streak;
            ledger.close_day(books, record.date, record.steps)
        });

        tracing::info!(
            date = %record.date,
            steps = record.steps,
            goal_met = outcome.goal_met,
            "Day closed"
        );
        self.events.publish(&TrackerEvent::DayClosed {
            date: record.date,
            goal_met: outcome.goal_met,
        });
        if outcome.shields_deployed > 0 {
            self.events.publish(&TrackerEvent::ShieldsDeployed {
                count: outcome.shields_deployed,
                manual: false,
            });
        }
        if outcome.streak_broken {
            self.events
                .publish(&TrackerEvent::StreakBroken { previous_streak });
        }
    }

    /// Load the ledger working set, run `operation`, write everything back.
    fn with_books<T>(&self, operation: impl FnOnce(&mut LedgerBooks, &StreakLedger) -> T) -> T {
        let mut books = LedgerBooks::new(
            self.store.streak_state(),
            self.store.shield_inventory(),
            self.store.daily_logs(),
        );

        let result = operation(&mut books, &self.ledger);

        self.store.put_streak_state(&books.streak);
        self.store.put_shield_inventory(&books.shields);
        for log in books.logs.values() {
            self.store.put_log(log);
        }
        result
    }
}
