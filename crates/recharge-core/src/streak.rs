//! Consecutive-day completion streak.
//!
//! The streak counts calendar days with at least one completed mission.
//! Updates are idempotent within a day; any gap, forward or backward
//! (device clock moved), resets the current streak to 1. The longest
//! streak is a running maximum and never decreases.

use serde::{Deserialize, Serialize};

use crate::day::LocalDay;

/// Streak state, persisted across days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakData {
    /// Current consecutive-day streak
    pub current_streak: u32,
    /// Longest streak ever reached
    pub longest_streak: u32,
    /// Local day of the most recent completion
    pub last_completed_date: Option<LocalDay>,
}

impl StreakData {
    /// Register a completion on `day` and return the new state.
    ///
    /// At most one increment per calendar day; re-completing the same day
    /// is a no-op.
    pub fn complete_on(&self, day: LocalDay) -> StreakData {
        let current = match self.last_completed_date {
            None => 1,
            Some(last) => match last.days_until(day) {
                0 => return self.clone(),
                1 => self.current_streak + 1,
                // Gap of more than a day, or a backward-dated completion
                // from clock skew: start over.
                _ => 1,
            },
        };

        StreakData {
            current_streak: current,
            longest_streak: self.longest_streak.max(current),
            last_completed_date: Some(day),
        }
    }

    /// Exp bonus percentage for the current streak length.
    pub fn bonus_percent(&self) -> u32 {
        streak_bonus_percent(self.current_streak)
    }
}

/// Step-function exp bonus for a streak length, in percent.
pub fn streak_bonus_percent(streak: u32) -> u32 {
    match streak {
        s if s >= 30 => 100,
        s if s >= 14 => 50,
        s if s >= 7 => 25,
        s if s >= 3 => 10,
        _ => 0,
    }
}

/// Apply the streak bonus to a base exp reward, rounding to nearest.
pub fn apply_streak_bonus(base_exp: u32, streak: u32) -> u32 {
    let multiplier = 1.0 + streak_bonus_percent(streak) as f64 / 100.0;
    (base_exp as f64 * multiplier).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> LocalDay {
        LocalDay::parse(s).unwrap()
    }

    #[test]
    fn test_first_completion_starts_at_one() {
        let streak = StreakData::default().complete_on(day("2026-08-03"));
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 1);
        assert_eq!(streak.last_completed_date, Some(day("2026-08-03")));
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let d = day("2026-08-03");
        let once = StreakData::default().complete_on(d);
        let twice = once.complete_on(d);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_consecutive_days_increment() {
        let mut streak = StreakData::default();
        let mut d = day("2026-08-01");
        for expected in 1..=10u32 {
            streak = streak.complete_on(d);
            assert_eq!(streak.current_streak, expected);
            assert_eq!(streak.longest_streak, expected);
            d = d.next();
        }
    }

    #[test]
    fn test_gap_resets_to_one_but_keeps_longest() {
        let streak = StreakData::default()
            .complete_on(day("2026-08-01"))
            .complete_on(day("2026-08-02"))
            .complete_on(day("2026-08-03"));
        assert_eq!(streak.current_streak, 3);

        let after_gap = streak.complete_on(day("2026-08-06"));
        assert_eq!(after_gap.current_streak, 1);
        assert_eq!(after_gap.longest_streak, 3);
    }

    #[test]
    fn test_backward_date_resets_like_a_gap() {
        let streak = StreakData::default()
            .complete_on(day("2026-08-02"))
            .complete_on(day("2026-08-03"));

        let skewed = streak.complete_on(day("2026-07-30"));
        assert_eq!(skewed.current_streak, 1);
        assert_eq!(skewed.longest_streak, 2);
        assert_eq!(skewed.last_completed_date, Some(day("2026-07-30")));
    }

    #[test]
    fn test_bonus_steps() {
        assert_eq!(streak_bonus_percent(0), 0);
        assert_eq!(streak_bonus_percent(2), 0);
        assert_eq!(streak_bonus_percent(3), 10);
        assert_eq!(streak_bonus_percent(6), 10);
        assert_eq!(streak_bonus_percent(7), 25);
        assert_eq!(streak_bonus_percent(13), 25);
        assert_eq!(streak_bonus_percent(14), 50);
        assert_eq!(streak_bonus_percent(29), 50);
        assert_eq!(streak_bonus_percent(30), 100);
    }

    #[test]
    fn test_apply_bonus_rounds_to_nearest() {
        assert_eq!(apply_streak_bonus(20, 7), 25); // 20 * 1.25
        assert_eq!(apply_streak_bonus(10, 3), 11); // 10 * 1.1
        assert_eq!(apply_streak_bonus(25, 14), 38); // 25 * 1.5 = 37.5 -> 38
        assert_eq!(apply_streak_bonus(33, 30), 66); // doubled
        assert_eq!(apply_streak_bonus(33, 1), 33); // no bonus
    }
}
