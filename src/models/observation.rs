// SPDX-License-Identifier: MIT

//! Step reading types delivered by the sensor/health collaborators.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Where a step reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepSource {
    /// On-device motion coprocessor. Live, but may lag the health store.
    DeviceMotion,
    /// Verified health-data query. Authoritative, but may lag the pedometer.
    VerifiedHealth,
    /// Previously persisted value replayed at startup or after a sync nudge.
    Cached,
}

/// A validated reading from one source for one calendar day.
///
/// Ephemeral: consumed by the reconciler immediately, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepObservation {
    pub source: StepSource,
    /// Device-local calendar day the reading is for.
    pub date: NaiveDate,
    pub steps: u32,
    pub distance_meters: f64,
    pub observed_at: DateTime<Utc>,
}

/// Unvalidated reading as delivered by upstream collaborators.
///
/// Counts are signed because upstream payloads have produced negative
/// values in the wild; the reconciler rejects them at the boundary
/// instead of propagating a crash into step tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStepReading {
    pub source: StepSource,
    pub date: NaiveDate,
    pub steps: i64,
    pub distance_meters: f64,
    pub observed_at: DateTime<Utc>,
}

impl RawStepReading {
    pub fn new(
        source: StepSource,
        date: NaiveDate,
        steps: i64,
        distance_meters: f64,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source,
            date,
            steps,
            distance_meters,
            observed_at,
        }
    }
}
