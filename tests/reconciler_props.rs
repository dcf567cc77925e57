// SPDX-License-Identifier: MIT

//! Property-based tests for the monotonic ratchet.
//!
//! Same-day readings may arrive in any order from overlapping sources;
//! the reconciled record must not depend on that order, must never
//! regress, and must treat re-delivery as a no-op.

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use stridekeeper::config::Config;
use stridekeeper::models::{RawStepReading, StepSource};
use stridekeeper::services::StepReconciler;

const CEILING: u32 = 100_000;

fn test_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 25).expect("valid date")
}

fn arb_source() -> impl Strategy<Value = StepSource> {
    prop_oneof![
        Just(StepSource::DeviceMotion),
        Just(StepSource::VerifiedHealth),
        Just(StepSource::Cached),
    ]
}

/// A well-formed same-day reading: in-ceiling steps, plausible stride.
fn arb_reading() -> impl Strategy<Value = RawStepReading> {
    (arb_source(), 0u32..=CEILING, 0.4f64..1.5).prop_map(|(source, steps, stride)| {
        RawStepReading::new(
            source,
            test_day(),
            i64::from(steps),
            f64::from(steps) * stride,
            Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap(),
        )
    })
}

fn apply_one_at_a_time(
    reconciler: &StepReconciler,
    readings: &[RawStepReading],
) -> (Option<u32>, Vec<u32>) {
    let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
    let mut record = None;
    let mut totals = Vec::new();
    for reading in readings {
        let outcome = reconciler.apply_batch(record, std::slice::from_ref(reading), now);
        record = outcome.record;
        totals.push(record.as_ref().map(|r| r.steps).unwrap_or(0));
    }
    (record.map(|r| r.steps), totals)
}

proptest! {
    #[test]
    fn prop_totals_never_decrease(readings in proptest::collection::vec(arb_reading(), 1..20)) {
        let reconciler = StepReconciler::new(&Config::default());
        let (_, totals) = apply_one_at_a_time(&reconciler, &readings);

        for window in totals.windows(2) {
            prop_assert!(window[1] >= window[0], "total regressed: {:?}", totals);
        }
    }

    #[test]
    fn prop_final_total_is_max_of_inputs(readings in proptest::collection::vec(arb_reading(), 1..20)) {
        let reconciler = StepReconciler::new(&Config::default());
        let (final_steps, _) = apply_one_at_a_time(&reconciler, &readings);

        let expected = readings.iter().map(|r| r.steps as u32).max().unwrap_or(0);
        prop_assert_eq!(final_steps.unwrap_or(0), expected);
    }

    #[test]
    fn prop_order_does_not_matter(
        readings in proptest::collection::vec(arb_reading(), 1..20).prop_shuffle()
    ) {
        let reconciler = StepReconciler::new(&Config::default());
        let mut sorted = readings.clone();
        sorted.sort_by_key(|r| (r.steps, r.source as u8));

        let (shuffled_final, _) = apply_one_at_a_time(&reconciler, &readings);
        let (sorted_final, _) = apply_one_at_a_time(&reconciler, &sorted);

        prop_assert_eq!(shuffled_final, sorted_final);
    }

    #[test]
    fn prop_reapplication_is_idempotent(readings in proptest::collection::vec(arb_reading(), 1..20)) {
        let reconciler = StepReconciler::new(&Config::default());
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();

        let first = reconciler.apply_batch(None, &readings, now);
        let second = reconciler.apply_batch(first.record.clone(), &readings, now);

        prop_assert!(!second.did_increase, "re-delivery must not signal an increase");
        prop_assert_eq!(second.record, first.record);
    }

    #[test]
    fn prop_over_ceiling_readings_never_apply(
        steps in (CEILING as i64 + 1)..i64::MAX / 2,
        source in arb_source(),
    ) {
        let reconciler = StepReconciler::new(&Config::default());
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let reading = RawStepReading::new(source, test_day(), steps, 1_000.0, now);

        let outcome = reconciler.apply_batch(None, &[reading], now);

        prop_assert!(outcome.record.is_none());
        prop_assert_eq!(outcome.warnings.len(), 1);
    }
}
