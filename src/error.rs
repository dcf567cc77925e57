// SPDX-License-Identifier: MIT

//! Application error types.
//!
//! Expected, user-facing failures are their own variants so the UI layer
//! can present them without string matching. Everything the core does is
//! total: every operation returns either a value or one of these.

use chrono::NaiveDate;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Repair window expired: {date} was {days_ago} days ago (window is {window_days} days)")]
    RepairWindowExpired {
        date: NaiveDate,
        days_ago: i64,
        window_days: i64,
    },

    #[error("No shields available")]
    InsufficientShields,

    #[error("Day is not closed yet: {0}")]
    DayNotClosed(NaiveDate),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
