//! Integration tests for history storage feeding the pattern analyzer.

use recharge_core::pattern::CorrelationStrength;
use recharge_core::{
    analyze_weekly, DailyHistoryRecord, LocalDay, MemoryStore, StateStore, Trend,
};

fn record(date: LocalDay, fatigue: u8, sleep: Option<f64>, steps: Option<u32>) -> DailyHistoryRecord {
    DailyHistoryRecord {
        date,
        fatigue_percentage: fatigue,
        sleep_hours: sleep,
        step_count: steps,
        screen_minutes: None,
    }
}

#[test]
fn test_two_weeks_of_history_through_the_store() {
    let state = StateStore::new(MemoryStore::new());

    // A fortnight that starts rough and recovers: fatigue falls, sleep
    // rises day by day.
    let mut day = LocalDay::parse("2026-07-20").unwrap();
    for i in 0..14u32 {
        let fatigue = 85u8.saturating_sub(i as u8 * 5);
        let sleep = 5.0 + i as f64 * 0.25;
        let steps = 3000 + i * 500;
        state.upsert_history_record(record(day, fatigue, Some(sleep), Some(steps)));
        day = day.next();
    }

    let history = state.load_history();
    assert_eq!(history.len(), 14);

    let analysis = analyze_weekly(&history);
    assert_eq!(analysis.trend, Trend::Improving);
    assert!(analysis.avg_fatigue > 0.0);
    assert!(analysis.worst_day.is_some());
    assert!(analysis.best_day.is_some());

    // Rising sleep with falling fatigue: strongly negative correlation.
    assert_eq!(
        analysis.sleep_correlation.strength,
        CorrelationStrength::Strong
    );
    assert!(analysis.sleep_correlation.coefficient.unwrap() < -0.9);
}

#[test]
fn test_same_day_overwrite_keeps_one_record_per_date() {
    let state = StateStore::new(MemoryStore::new());
    let day = LocalDay::parse("2026-07-20").unwrap();

    state.upsert_history_record(record(day, 40, None, None));
    state.upsert_history_record(record(day, 55, Some(7.0), None));

    let history = state.load_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].fatigue_percentage, 55);
    assert_eq!(history[0].sleep_hours, Some(7.0));
}

#[test]
fn test_analyzer_tolerates_sparse_optional_fields() {
    let state = StateStore::new(MemoryStore::new());
    let mut day = LocalDay::parse("2026-07-20").unwrap();

    // Only fatigue is always present; sleep and steps appear on and off.
    let sleeps = [None, Some(6.0), None, Some(7.5), None, None, Some(8.0)];
    for (i, sleep) in sleeps.into_iter().enumerate() {
        let steps = (i % 2 == 0).then_some(5000);
        state.upsert_history_record(record(day, 50, sleep, steps));
        day = day.next();
    }

    let analysis = analyze_weekly(&state.load_history());
    // Three sleep points is below the correlation minimum.
    assert_eq!(
        analysis.sleep_correlation.strength,
        CorrelationStrength::Insufficient
    );
    assert_eq!(analysis.trend, Trend::Stable);
}

#[test]
fn test_window_prune_and_analysis_after_long_gap() {
    let state = StateStore::new(MemoryStore::new());

    // Ancient records, then a recent week.
    state.upsert_history_record(record(LocalDay::parse("2026-01-01").unwrap(), 90, None, None));
    state.upsert_history_record(record(LocalDay::parse("2026-02-01").unwrap(), 85, None, None));

    let mut day = LocalDay::parse("2026-07-25").unwrap();
    for _ in 0..7 {
        state.upsert_history_record(record(day, 45, None, None));
        day = day.next();
    }

    let history = state.load_history();
    assert!(
        history.iter().all(|r| r.date >= LocalDay::parse("2026-05-03").unwrap()),
        "records outside the 90-day window must be pruned"
    );
    assert_eq!(history.len(), 7);

    let analysis = analyze_weekly(&history);
    assert_eq!(analysis.trend, Trend::Stable);
}
