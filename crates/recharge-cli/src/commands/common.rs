//! Shared orchestration between commands.
//!
//! The CLI is the orchestration layer: it wires the pure engines to the
//! store, performs the day rollover on every invocation, and persists the
//! values the engines return. The engines themselves never touch storage.

use recharge_core::storage::Config;
use recharge_core::{
    DailyHistoryRecord, FatigueSession, LocalDay, SqliteStore, StateStore,
};

pub type Error = Box<dyn std::error::Error>;

/// Open the on-disk state store.
pub fn open_state() -> Result<StateStore<SqliteStore>, Error> {
    Ok(StateStore::new(SqliteStore::open()?))
}

/// Load the configuration file.
pub fn load_config() -> Result<Config, Error> {
    Ok(Config::load()?)
}

/// Resume today's session, finalizing a previous day if the local date
/// rolled over since the last invocation.
///
/// Finalization writes the closed day into the pattern-analysis history
/// (augmented with health snapshot data where activities are silent) and
/// closes out its mission set into the mission ledger.
pub fn roll_to_today(state: &StateStore<SqliteStore>, config: &Config) -> FatigueSession {
    let today = LocalDay::today();
    let (session, finalized) = FatigueSession::resume(state.load_daily(), today, config.baseline);

    if let Some(closed_day) = finalized {
        let snapshot = config
            .health_provider
            .build()
            .snapshot(closed_day.date)
            .unwrap_or_default();

        let logged_sleep_minutes = closed_day.minutes_where(|t| t.is_sleep());
        let sleep_hours = if logged_sleep_minutes > 0 {
            Some(logged_sleep_minutes as f64 / 60.0)
        } else {
            snapshot
                .effective_sleep_minutes()
                .map(|minutes| minutes as f64 / 60.0)
        };
        let logged_screen_minutes = closed_day.minutes_where(|t| t.is_screen());

        state.upsert_history_record(DailyHistoryRecord {
            date: closed_day.date,
            fatigue_percentage: closed_day.current_fatigue_percentage,
            sleep_hours,
            step_count: snapshot.step_count,
            screen_minutes: (logged_screen_minutes > 0).then_some(logged_screen_minutes),
        });

        if let Some(missions) = state.load_missions() {
            if missions.date != today {
                state.append_mission_history(
                    missions.into_history(closed_day.current_fatigue_percentage),
                );
            }
        }
    }

    state.save_daily(session.data());
    session
}

/// Render a 0-100 value as a bar gauge.
pub fn gauge(value: u8) -> String {
    let filled = (value as usize * 20) / 100;
    format!("[{}{}] {value:>3}%", "█".repeat(filled), "░".repeat(20 - filled))
}
