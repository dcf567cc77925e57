// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod daily;
pub mod observation;
pub mod streak;

pub use daily::{DailyLog, DailyStepRecord};
pub use observation::{RawStepReading, StepObservation, StepSource};
pub use streak::{ShieldInventory, StreakState};
