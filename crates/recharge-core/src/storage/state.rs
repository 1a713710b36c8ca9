//! Typed state access over the key-value store.
//!
//! Loads are defensive: corrupt JSON, missing fields and out-of-range
//! values are discarded with a warning and replaced by defaults, never
//! surfaced to the caller. Saves are fire-and-forget -- the engine stays
//! usable when the store is unavailable, trading durability for it.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::store::KeyValueStore;
use crate::activity::DailyFatigueData;
use crate::character::{required_exp, PpoomCharacter, MAX_LEVEL};
use crate::mission::{DailyMissionSet, MissionHistoryRecord};
use crate::notify::NotificationScheduler;
use crate::pattern::DailyHistoryRecord;
use crate::streak::StreakData;

/// Prefix for every key this engine owns.
pub const KEY_PREFIX: &str = "recharge.";

const KEY_DAILY: &str = "recharge.daily_fatigue";
const KEY_MISSIONS: &str = "recharge.daily_missions";
const KEY_MISSION_HISTORY: &str = "recharge.mission_history";
const KEY_CHARACTER: &str = "recharge.character";
const KEY_STREAK: &str = "recharge.streak";
const KEY_DAILY_HISTORY: &str = "recharge.daily_history";
const KEY_NOTIFY: &str = "recharge.notify_cooldowns";

/// Rolling window for daily history records.
pub const HISTORY_WINDOW_DAYS: i64 = 90;

/// Mission ledger length kept on disk. The anti-repetition lookback only
/// needs the last few entries.
const MISSION_HISTORY_CAP: usize = 30;

/// Typed persistence facade for all engine state.
pub struct StateStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StateStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(key, error = %err, "discarding malformed state");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(key, error = %err, "state load failed, using defaults");
                None
            }
        }
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => {
                if let Err(err) = self.store.set(key, &raw) {
                    tracing::warn!(key, error = %err, "state save failed");
                }
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "state serialization failed");
            }
        }
    }

    // ── Daily fatigue ────────────────────────────────────────────────

    /// Today's (or a previous day's) unfinalized fatigue data, if valid.
    pub fn load_daily(&self) -> Option<DailyFatigueData> {
        let daily: DailyFatigueData = self.load_json(KEY_DAILY)?;
        if daily.current_fatigue_percentage > 100 {
            tracing::warn!(
                score = daily.current_fatigue_percentage,
                "discarding daily state with out-of-range score"
            );
            return None;
        }
        Some(daily)
    }

    pub fn save_daily(&self, daily: &DailyFatigueData) {
        self.save_json(KEY_DAILY, daily);
    }

    // ── Missions ─────────────────────────────────────────────────────

    pub fn load_missions(&self) -> Option<DailyMissionSet> {
        self.load_json(KEY_MISSIONS)
    }

    pub fn save_missions(&self, missions: &DailyMissionSet) {
        self.save_json(KEY_MISSIONS, missions);
    }

    pub fn load_mission_history(&self) -> Vec<MissionHistoryRecord> {
        self.load_json(KEY_MISSION_HISTORY).unwrap_or_default()
    }

    /// Append a closed day to the mission ledger. Same-day re-finalization
    /// overwrites the existing entry; the ledger is capped at
    /// [`MISSION_HISTORY_CAP`] entries, oldest dropped first.
    pub fn append_mission_history(&self, record: MissionHistoryRecord) {
        let mut history = self.load_mission_history();
        history.retain(|r| r.date != record.date);
        history.push(record);
        history.sort_by_key(|r| r.date);
        if history.len() > MISSION_HISTORY_CAP {
            let excess = history.len() - MISSION_HISTORY_CAP;
            history.drain(..excess);
        }
        self.save_json(KEY_MISSION_HISTORY, &history);
    }

    // ── Character ────────────────────────────────────────────────────

    /// Character state, or a fresh one when missing or invariant-breaking.
    pub fn load_character(&self) -> PpoomCharacter {
        let Some(character) = self.load_json::<PpoomCharacter>(KEY_CHARACTER) else {
            return PpoomCharacter::new();
        };

        let level_ok = (1..=MAX_LEVEL).contains(&character.level);
        let exp_ok = if character.level == MAX_LEVEL {
            character.exp <= required_exp(MAX_LEVEL)
        } else {
            character.exp < required_exp(character.level)
        };
        if !level_ok || !exp_ok {
            tracing::warn!(
                level = character.level,
                exp = character.exp,
                "discarding character state that breaks progression invariants"
            );
            return PpoomCharacter::new();
        }
        character
    }

    pub fn save_character(&self, character: &PpoomCharacter) {
        self.save_json(KEY_CHARACTER, character);
    }

    // ── Streak ───────────────────────────────────────────────────────

    /// Streak state, or a fresh one when missing or invariant-breaking.
    pub fn load_streak(&self) -> StreakData {
        let Some(streak) = self.load_json::<StreakData>(KEY_STREAK) else {
            return StreakData::default();
        };
        if streak.longest_streak < streak.current_streak {
            tracing::warn!(
                current = streak.current_streak,
                longest = streak.longest_streak,
                "discarding streak state with longest below current"
            );
            return StreakData::default();
        }
        streak
    }

    pub fn save_streak(&self, streak: &StreakData) {
        self.save_json(KEY_STREAK, streak);
    }

    // ── Daily history (pattern analysis) ─────────────────────────────

    pub fn load_history(&self) -> Vec<DailyHistoryRecord> {
        self.load_json(KEY_DAILY_HISTORY).unwrap_or_default()
    }

    /// Insert or replace the record for its date, then prune entries older
    /// than the rolling window measured from the newest record.
    pub fn upsert_history_record(&self, record: DailyHistoryRecord) {
        let mut history = self.load_history();
        history.retain(|r| r.date != record.date);
        history.push(record);
        history.sort_by_key(|r| r.date);

        if let Some(newest) = history.last().map(|r| r.date) {
            history.retain(|r| r.date.days_until(newest) < HISTORY_WINDOW_DAYS);
        }
        self.save_json(KEY_DAILY_HISTORY, &history);
    }

    // ── Notification cooldowns ───────────────────────────────────────

    pub fn load_scheduler(&self) -> NotificationScheduler {
        self.load_json(KEY_NOTIFY).unwrap_or_default()
    }

    pub fn save_scheduler(&self, scheduler: &NotificationScheduler) {
        self.save_json(KEY_NOTIFY, scheduler);
    }

    /// Remove every key this engine owns.
    pub fn wipe(&self) {
        if let Err(err) = self.store.remove_all(KEY_PREFIX) {
            tracing::warn!(error = %err, "state wipe failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::LocalDay;
    use crate::storage::MemoryStore;

    fn state() -> StateStore<MemoryStore> {
        StateStore::new(MemoryStore::new())
    }

    fn day(s: &str) -> LocalDay {
        LocalDay::parse(s).unwrap()
    }

    fn history_record(date: &str, fatigue: u8) -> DailyHistoryRecord {
        DailyHistoryRecord {
            date: day(date),
            fatigue_percentage: fatigue,
            sleep_hours: None,
            step_count: None,
            screen_minutes: None,
        }
    }

    #[test]
    fn test_missing_state_yields_defaults() {
        let state = state();
        assert!(state.load_daily().is_none());
        assert_eq!(state.load_character(), PpoomCharacter::new());
        assert_eq!(state.load_streak(), StreakData::default());
        assert!(state.load_history().is_empty());
    }

    #[test]
    fn test_corrupt_json_yields_defaults() {
        let state = state();
        state.store().set(KEY_CHARACTER, "{not json").unwrap();
        state.store().set(KEY_STREAK, "[1,2,3]").unwrap();
        state.store().set(KEY_DAILY_HISTORY, "42").unwrap();

        assert_eq!(state.load_character(), PpoomCharacter::new());
        assert_eq!(state.load_streak(), StreakData::default());
        assert!(state.load_history().is_empty());
    }

    #[test]
    fn test_invariant_breaking_character_is_discarded() {
        let state = state();
        // Level 0 and exp past the level requirement are both invalid.
        state
            .store()
            .set(
                KEY_CHARACTER,
                "{\"level\":0,\"exp\":0,\"equipped_costume_id\":\"default\",\"unlocked_costume_ids\":[\"default\"]}",
            )
            .unwrap();
        assert_eq!(state.load_character(), PpoomCharacter::new());

        state
            .store()
            .set(
                KEY_CHARACTER,
                "{\"level\":1,\"exp\":100,\"equipped_costume_id\":\"default\",\"unlocked_costume_ids\":[\"default\"]}",
            )
            .unwrap();
        assert_eq!(state.load_character(), PpoomCharacter::new());
    }

    #[test]
    fn test_invariant_breaking_streak_is_discarded() {
        let state = state();
        state
            .store()
            .set(
                KEY_STREAK,
                "{\"current_streak\":9,\"longest_streak\":2,\"last_completed_date\":null}",
            )
            .unwrap();
        assert_eq!(state.load_streak(), StreakData::default());
    }

    #[test]
    fn test_character_roundtrip() {
        let state = state();
        let character = PpoomCharacter::new().add_exp(220).character;
        state.save_character(&character);
        assert_eq!(state.load_character(), character);
    }

    #[test]
    fn test_history_upsert_replaces_same_date() {
        let state = state();
        state.upsert_history_record(history_record("2026-08-01", 40));
        state.upsert_history_record(history_record("2026-08-02", 50));
        state.upsert_history_record(history_record("2026-08-01", 45));

        let history = state.load_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].fatigue_percentage, 45);
        assert_eq!(history[1].fatigue_percentage, 50);
    }

    #[test]
    fn test_history_pruned_to_rolling_window() {
        let state = state();
        state.upsert_history_record(history_record("2026-01-01", 40));
        state.upsert_history_record(history_record("2026-05-01", 50));
        state.upsert_history_record(history_record("2026-08-01", 60));

        let history = state.load_history();
        // 2026-01-01 and 2026-05-01 are both more than 90 days before
        // 2026-08-01 and get pruned.
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].date, day("2026-08-01"));
    }

    #[test]
    fn test_mission_history_capped() {
        let state = state();
        let base = day("2026-01-01");
        let mut d = base;
        for i in 0..40u8 {
            state.append_mission_history(MissionHistoryRecord {
                date: d,
                missions: vec![],
                fatigue_percentage: i,
                all_completed: false,
            });
            d = d.next();
        }

        let history = state.load_mission_history();
        assert_eq!(history.len(), 30);
        // Oldest entries were dropped.
        assert_eq!(history[0].fatigue_percentage, 10);
    }

    #[test]
    fn test_wipe_clears_only_owned_keys() {
        let state = state();
        state.save_streak(&StreakData::default());
        state.store().set("unrelated.key", "kept").unwrap();

        state.wipe();
        assert_eq!(state.load_streak(), StreakData::default());
        assert!(state.store().get(KEY_STREAK).unwrap().is_none());
        assert_eq!(
            state.store().get("unrelated.key").unwrap().as_deref(),
            Some("kept")
        );
    }
}
