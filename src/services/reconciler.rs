// SPDX-License-Identifier: MIT

//! Step-count reconciliation: the monotonic ratchet.
//!
//! Merges readings from the motion coprocessor, the verified health query,
//! and the replayed cache into one non-decreasing daily total. The merge is
//! a max-fold, so same-day readings commute and re-delivery is a no-op:
//! applying A then B always lands on the same record as B then A.

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::models::{DailyStepRecord, RawStepReading, StepObservation, StepSource};

/// Reconciles incoming readings against the stored daily record.
///
/// Pure and synchronous: no I/O, no clocks, no shared state. Persistence
/// and notification fan-out belong to the caller.
pub struct StepReconciler {
    step_ceiling_per_day: u32,
    max_stride_meters: f64,
}

/// Result of applying one batch of readings.
#[derive(Debug)]
pub struct ReconcileOutcome {
    /// Updated record for the newest date seen. `None` only when there was
    /// no previous record and no valid reading.
    pub record: Option<DailyStepRecord>,
    /// True when the surviving record's steps strictly increased. This is
    /// the only signal that should trigger persistence of the live record
    /// and a display refresh.
    pub did_increase: bool,
    /// Records archived by day rollover, oldest first. Candidates for
    /// ledger close-out; the caller must process these even when
    /// `did_increase` is false.
    pub closed_days: Vec<DailyStepRecord>,
    /// Readings discarded at the boundary, for the UI advisory banner.
    pub warnings: Vec<IntegrityWarning>,
}

/// A reading was discarded as corrupt or malformed. Non-fatal: prior state
/// is kept and tracking continues.
// The originating source is named `source_id` because a thiserror field
// called `source` would be treated as the error's cause.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrityWarning {
    #[error("Negative step count {steps} from {source_id:?}")]
    NegativeCount { source_id: StepSource, steps: i64 },

    #[error("Step count {steps} from {source_id:?} exceeds daily ceiling {ceiling}")]
    CeilingExceeded {
        source_id: StepSource,
        steps: i64,
        ceiling: u32,
    },

    #[error("Distance {distance_meters}m is implausible for {steps} steps from {source_id:?}")]
    ImplausibleStride {
        source_id: StepSource,
        steps: u32,
        distance_meters: f64,
    },

    #[error("Non-finite or negative distance from {source_id:?}")]
    InvalidDistance { source_id: StepSource },
}

impl StepReconciler {
    pub fn new(config: &Config) -> Self {
        Self {
            step_ceiling_per_day: config.step_ceiling_per_day,
            max_stride_meters: config.max_stride_meters,
        }
    }

    /// Apply a batch of raw readings to the stored record.
    ///
    /// Readings are validated, then processed in strict date order. A
    /// reading for a later date rolls the record over (the old one is
    /// archived into `closed_days`); a reading for an earlier date than
    /// the current record is stale and dropped, so residual observations
    /// arriving after rollover cannot touch the new day.
    pub fn apply_batch(
        &self,
        previous: Option<DailyStepRecord>,
        readings: &[RawStepReading],
        now: DateTime<Utc>,
    ) -> ReconcileOutcome {
        let mut warnings = Vec::new();
        let mut observations: Vec<StepObservation> = readings
            .iter()
            .filter_map(|reading| match self.validate(reading) {
                Ok(observation) => Some(observation),
                Err(warning) => {
                    tracing::warn!(warning = %warning, "Discarding corrupt step reading");
                    warnings.push(warning);
                    None
                }
            })
            .collect();
        // Stable sort: same-day readings keep arrival order, though the
        // max-fold makes that order irrelevant.
        observations.sort_by_key(|observation| observation.date);

        let mut record = previous;
        let mut closed_days = Vec::new();
        let mut did_increase = false;

        for observation in observations {
            match &mut record {
                None => {
                    let mut fresh = DailyStepRecord::zero(observation.date, now);
                    if fresh.ratchet(observation.steps, observation.distance_meters, now) {
                        did_increase = true;
                    }
                    record = Some(fresh);
                }
                Some(current) if observation.date == current.date => {
                    if current.ratchet(observation.steps, observation.distance_meters, now) {
                        did_increase = true;
                    }
                }
                Some(current) if observation.date > current.date => {
                    tracing::info!(
                        closed = %current.date,
                        opened = %observation.date,
                        steps = current.steps,
                        "Day rollover"
                    );
                    closed_days.push(current.clone());
                    let mut fresh = DailyStepRecord::zero(observation.date, now);
                    if fresh.ratchet(observation.steps, observation.distance_meters, now) {
                        did_increase = true;
                    }
                    *current = fresh;
                }
                Some(current) => {
                    tracing::debug!(
                        date = %observation.date,
                        current = %current.date,
                        "Dropping stale reading for an archived day"
                    );
                }
            }
        }

        ReconcileOutcome {
            record,
            did_increase,
            closed_days,
            warnings,
        }
    }

    /// Validate a raw reading into an observation, or explain why not.
    fn validate(&self, reading: &RawStepReading) -> Result<StepObservation, IntegrityWarning> {
        if reading.steps < 0 {
            return Err(IntegrityWarning::NegativeCount {
                source_id: reading.source,
                steps: reading.steps,
            });
        }
        if reading.steps > i64::from(self.step_ceiling_per_day) {
            return Err(IntegrityWarning::CeilingExceeded {
                source_id: reading.source,
                steps: reading.steps,
                ceiling: self.step_ceiling_per_day,
            });
        }
        if !reading.distance_meters.is_finite() || reading.distance_meters < 0.0 {
            return Err(IntegrityWarning::InvalidDistance {
                source_id: reading.source,
            });
        }
        let steps = reading.steps as u32;
        if steps > 0 && reading.distance_meters / f64::from(steps) > self.max_stride_meters {
            return Err(IntegrityWarning::ImplausibleStride {
                source_id: reading.source,
                steps,
                distance_meters: reading.distance_meters,
            });
        }

        Ok(StepObservation {
            source: reading.source,
            date: reading.date,
            steps,
            distance_meters: reading.distance_meters,
            observed_at: reading.observed_at,
        })
    }
}
