// SPDX-License-Identifier: MIT

//! Worked scenarios for the ratchet and the shield ledger, exercised
//! through the public API the app shell uses.

mod common;

use std::collections::BTreeMap;

use common::{at_noon, day, reading};
use stridekeeper::config::Config;
use stridekeeper::error::TrackerError;
use stridekeeper::models::{DailyLog, DailyStepRecord, ShieldInventory, StepSource, StreakState};
use stridekeeper::services::{LedgerBooks, StepReconciler, StreakLedger};

fn books(streak_len: u32, last: &str, shields: u32) -> LedgerBooks {
    let last = day(last);
    let mut logs = BTreeMap::new();
    let mut cursor = last;
    for _ in 0..streak_len {
        logs.insert(cursor, DailyLog::closed(cursor, 8_000, 7_000));
        cursor = cursor.pred_opt().expect("valid date");
    }
    LedgerBooks {
        streak: StreakState {
            current_streak: streak_len,
            longest_streak: streak_len,
            last_goal_met_date: Some(last),
            streak_start_date: Some(cursor.succ_opt().expect("valid date")),
        },
        shields: ShieldInventory {
            available_shields: shields,
            ..Default::default()
        },
        logs,
    }
}

#[test]
fn scenario_live_sources_reconcile_to_max() {
    // Device motion 4,800; verified health 4,950; cached record 4,900
    let reconciler = StepReconciler::new(&Config::default());
    let cached = DailyStepRecord {
        date: day("2026-08-25"),
        steps: 4_900,
        distance_meters: 3_500.0,
        last_updated: at_noon("2026-08-25"),
    };
    let batch = vec![
        reading(StepSource::DeviceMotion, "2026-08-25", 4_800, 3_400.0),
        reading(StepSource::VerifiedHealth, "2026-08-25", 4_950, 3_560.0),
    ];

    let outcome = reconciler.apply_batch(Some(cached), &batch, at_noon("2026-08-25"));
    let record = outcome.record.expect("record");

    assert_eq!(record.steps, 4_950);
    assert!(outcome.did_increase);

    // Same inputs reapplied: total unchanged, no second increase signal
    let again = reconciler.apply_batch(Some(record.clone()), &batch, at_noon("2026-08-25"));
    assert_eq!(again.record.expect("record").steps, 4_950);
    assert!(!again.did_increase);
}

#[test]
fn scenario_single_missed_day_bridged_by_one_shield() {
    // currentStreak = 5, availableShields = 2, one missed day two days ago
    let ledger = StreakLedger::new(&Config::default());
    let mut state = books(5, "2026-08-25", 2);

    let report = ledger.check_and_deploy(&mut state, day("2026-08-27"));

    assert_eq!(report.shields_deployed, 1);
    assert!(!report.streak_broken);
    assert_eq!(state.shields.available_shields, 1);
    assert!(state.logs[&day("2026-08-26")].shield_used);
    assert_eq!(state.streak.current_streak, 6, "streak counts the bridged day");
}

#[test]
fn scenario_four_missed_days_exhaust_two_shields_and_break() {
    // currentStreak = 10, availableShields = 2, four consecutive missed days
    let ledger = StreakLedger::new(&Config::default());
    let mut state = books(10, "2026-08-20", 2);

    let report = ledger.check_and_deploy(&mut state, day("2026-08-25"));

    assert_eq!(report.shields_deployed, 2);
    assert!(report.streak_broken);
    assert_eq!(state.shields.available_shields, 0);
    assert_eq!(state.streak.current_streak, 0);
    // Oldest missed days were shielded first
    assert!(state.logs[&day("2026-08-21")].shield_used);
    assert!(state.logs[&day("2026-08-22")].shield_used);
    assert!(!state.logs[&day("2026-08-23")].shield_used);
    assert!(!state.logs[&day("2026-08-24")].shield_used);
}

#[test]
fn scenario_repair_outside_window_fails_cleanly() {
    let ledger = StreakLedger::new(&Config::default());
    let mut state = books(0, "2026-08-18", 3);
    state
        .logs
        .insert(day("2026-08-18"), DailyLog::missed(day("2026-08-18"), 900));

    let before = state.clone();
    let result = ledger.repair_day(&mut state, day("2026-08-18"), day("2026-08-28"));

    assert!(matches!(
        result,
        Err(TrackerError::RepairWindowExpired { days_ago: 10, .. })
    ));
    assert_eq!(state.shields, before.shields, "no state change on failure");
    assert_eq!(state.logs, before.logs, "no state change on failure");
}

#[test]
fn scenario_auto_deploy_then_manual_repair_is_noop() {
    // Both operations target the same gap; the first to run wins.
    let ledger = StreakLedger::new(&Config::default());
    let mut state = books(5, "2026-08-25", 2);

    let report = ledger.check_and_deploy(&mut state, day("2026-08-27"));
    assert_eq!(report.shields_deployed, 1);

    let outcome = ledger
        .repair_day(&mut state, day("2026-08-26"), day("2026-08-27"))
        .expect("no-op repair");
    assert_eq!(outcome.shields_spent, 0);
    assert_eq!(state.shields.available_shields, 1);
}
