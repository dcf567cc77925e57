use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::BTreeMap;
use stridekeeper::config::Config;
use stridekeeper::models::{DailyLog, RawStepReading, ShieldInventory, StepSource, StreakState};
use stridekeeper::services::{LedgerBooks, StepReconciler, StreakLedger};

fn benchmark_apply_batch(c: &mut Criterion) {
    let reconciler = StepReconciler::new(&Config::default());
    let date = NaiveDate::from_ymd_opt(2026, 8, 25).expect("valid date");
    let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();

    // A day's worth of interleaved readings from both live sources
    let readings: Vec<RawStepReading> = (0..2_000i64)
        .map(|i| {
            let source = if i % 2 == 0 {
                StepSource::DeviceMotion
            } else {
                StepSource::VerifiedHealth
            };
            RawStepReading::new(source, date, i * 7, (i * 7) as f64 * 0.75, now)
        })
        .collect();

    let mut group = c.benchmark_group("reconcile");

    group.bench_function("apply_batch_2000_readings", |b| {
        b.iter(|| reconciler.apply_batch(None, black_box(&readings), now))
    });

    group.bench_function("apply_batch_single_reading", |b| {
        let single = &readings[..1];
        b.iter(|| reconciler.apply_batch(None, black_box(single), now))
    });

    group.finish();
}

fn benchmark_gap_sweep(c: &mut Criterion) {
    let ledger = StreakLedger::new(&Config::default());
    let last = NaiveDate::from_ymd_opt(2026, 5, 1).expect("valid date");
    let today = NaiveDate::from_ymd_opt(2026, 8, 25).expect("valid date");

    // A long-running streak, then a multi-month gap to sweep
    let mut logs = BTreeMap::new();
    let mut cursor = last;
    for _ in 0..365 {
        logs.insert(cursor, DailyLog::closed(cursor, 8_000, 7_000));
        cursor = cursor.pred_opt().expect("valid date");
    }
    let books = LedgerBooks {
        streak: StreakState {
            current_streak: 365,
            longest_streak: 365,
            last_goal_met_date: Some(last),
            streak_start_date: Some(cursor),
        },
        shields: ShieldInventory {
            available_shields: 5,
            ..Default::default()
        },
        logs,
    };

    c.bench_function("check_and_deploy_long_gap", |b| {
        b.iter_batched(
            || books.clone(),
            |mut books| ledger.check_and_deploy(&mut books, black_box(today)),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, benchmark_apply_batch, benchmark_gap_sweep);
criterion_main!(benches);
