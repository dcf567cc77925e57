// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod intervals;
pub mod reconciler;
pub mod streak;
pub mod tracker;

pub use intervals::{preset_programs, IntervalProgram, Phase, PhaseKind};
pub use reconciler::{IntegrityWarning, ReconcileOutcome, StepReconciler};
pub use streak::{DayOutcome, DeployReport, LedgerBooks, RepairOutcome, StreakLedger};
pub use tracker::{IngestSummary, TrackerService};
