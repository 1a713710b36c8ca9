//! Daily fatigue session and day rollover.
//!
//! The session owns today's [`DailyFatigueData`]: it validates and appends
//! activity records, keeps the score current, and finalizes the previous
//! day when the local date changes. Daily data is replaced at rollover,
//! never merged across days.

use chrono::{DateTime, Utc};

use crate::activity::{ActivityRecord, ActivityType, DailyFatigueData};
use crate::day::LocalDay;
use crate::error::ValidationError;
use crate::fatigue::{calculate_fatigue, FatigueReport};

/// In-memory session for one local calendar day.
#[derive(Debug, Clone)]
pub struct FatigueSession {
    baseline: u8,
    today: DailyFatigueData,
}

impl FatigueSession {
    /// Fresh session for `date` with no activities.
    pub fn start(date: LocalDay, baseline: u8) -> Self {
        Self {
            baseline,
            today: DailyFatigueData::new(date, baseline),
        }
    }

    /// Resume a saved day or start fresh.
    ///
    /// When the saved data belongs to an earlier day it is returned as a
    /// finalized snapshot for the caller to write into history, and a
    /// fresh session begins for `today`.
    pub fn resume(
        saved: Option<DailyFatigueData>,
        today: LocalDay,
        baseline: u8,
    ) -> (Self, Option<DailyFatigueData>) {
        match saved {
            Some(data) if data.date == today => (
                Self {
                    baseline,
                    today: data,
                },
                None,
            ),
            Some(data) => (Self::start(today, baseline), Some(data)),
            None => (Self::start(today, baseline), None),
        }
    }

    pub fn date(&self) -> LocalDay {
        self.today.date
    }

    pub fn data(&self) -> &DailyFatigueData {
        &self.today
    }

    /// Current score.
    pub fn score(&self) -> u8 {
        self.today.current_fatigue_percentage
    }

    /// Validate and log a new activity, returning the stored record.
    pub fn log_activity(
        &mut self,
        activity_type: ActivityType,
        duration_minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<&ActivityRecord, ValidationError> {
        let record = ActivityRecord::new(activity_type, duration_minutes, now)?;
        self.log_record(record);
        Ok(self.today.activities.last().expect("just pushed"))
    }

    /// Append an already-validated record (estimator output).
    pub fn log_record(&mut self, record: ActivityRecord) {
        self.today.activities.push(record);
        self.recompute();
    }

    /// Full report for the current day.
    pub fn report(&self) -> FatigueReport {
        FatigueReport::build(&self.today.activities, self.baseline)
    }

    /// Roll over to `today` if the date changed. Returns the finalized
    /// previous day, which the caller persists into history.
    pub fn roll_over(&mut self, today: LocalDay) -> Option<DailyFatigueData> {
        if self.today.date == today {
            return None;
        }
        let finalized = std::mem::replace(
            &mut self.today,
            DailyFatigueData::new(today, self.baseline),
        );
        Some(finalized)
    }

    fn recompute(&mut self) {
        self.today.current_fatigue_percentage =
            calculate_fatigue(&self.today.activities, self.baseline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> LocalDay {
        LocalDay::parse(s).unwrap()
    }

    #[test]
    fn test_fresh_session_sits_at_baseline() {
        let session = FatigueSession::start(day("2026-08-03"), 50);
        assert_eq!(session.score(), 50);
        assert!(session.data().activities.is_empty());
    }

    #[test]
    fn test_log_activity_recomputes_score() {
        let mut session = FatigueSession::start(day("2026-08-03"), 50);
        session
            .log_activity(ActivityType::Sleep, 420, Utc::now())
            .unwrap();
        assert_eq!(session.score(), 0);

        session
            .log_activity(ActivityType::Work, 480, Utc::now())
            .unwrap();
        // 50 - 245 + 64 - 10 (7h sleep) = -141 -> clamped to 0
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_log_activity_rejects_invalid_duration() {
        let mut session = FatigueSession::start(day("2026-08-03"), 50);
        assert!(session
            .log_activity(ActivityType::Work, 0, Utc::now())
            .is_err());
        assert!(session.data().activities.is_empty());
        assert_eq!(session.score(), 50);
    }

    #[test]
    fn test_roll_over_finalizes_previous_day() {
        let mut session = FatigueSession::start(day("2026-08-03"), 50);
        session
            .log_activity(ActivityType::Work, 240, Utc::now())
            .unwrap();
        let score_before = session.score();

        // Same day: no-op.
        assert!(session.roll_over(day("2026-08-03")).is_none());

        let finalized = session.roll_over(day("2026-08-04")).expect("day changed");
        assert_eq!(finalized.date, day("2026-08-03"));
        assert_eq!(finalized.current_fatigue_percentage, score_before);
        assert_eq!(finalized.activities.len(), 1);

        assert_eq!(session.date(), day("2026-08-04"));
        assert_eq!(session.score(), 50);
        assert!(session.data().activities.is_empty());
    }

    #[test]
    fn test_resume_same_day_keeps_activities() {
        let mut session = FatigueSession::start(day("2026-08-03"), 50);
        session
            .log_activity(ActivityType::Walk, 30, Utc::now())
            .unwrap();
        let saved = session.data().clone();

        let (resumed, finalized) = FatigueSession::resume(Some(saved), day("2026-08-03"), 50);
        assert!(finalized.is_none());
        assert_eq!(resumed.data().activities.len(), 1);
    }

    #[test]
    fn test_resume_across_days_finalizes() {
        let mut session = FatigueSession::start(day("2026-08-03"), 50);
        session
            .log_activity(ActivityType::Walk, 30, Utc::now())
            .unwrap();
        let saved = session.data().clone();

        let (fresh, finalized) = FatigueSession::resume(Some(saved), day("2026-08-04"), 50);
        assert_eq!(finalized.unwrap().date, day("2026-08-03"));
        assert_eq!(fresh.date(), day("2026-08-04"));
        assert!(fresh.data().activities.is_empty());
    }
}
