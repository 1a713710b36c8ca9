//! Activity records and the fatigue-weight mapping.
//!
//! Activities are the leaf data of the whole engine: typed records of what
//! the user did, each type carrying a static per-hour fatigue coefficient.
//! Negative weight means the activity is recovery and lowers the score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::day::LocalDay;
use crate::error::ValidationError;

/// Longest accepted single activity, in minutes (24 hours).
pub const MAX_ACTIVITY_MINUTES: u32 = 24 * 60;

/// Closed set of activity types.
///
/// The weight mapping is static configuration data, not derived. Weights are
/// fatigue-percent-points per hour divided by 100, so one hour of an
/// activity moves the score by `weight * 100` points before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Work,
    Study,
    Commute,
    Housework,
    Exercise,
    ScreenTime,
    Gaming,
    Social,
    Meal,
    Walk,
    Rest,
    Meditation,
    Nap,
    Sleep,
}

impl ActivityType {
    /// Fatigue impact per hour, as a fraction of the 0-100 scale.
    pub fn fatigue_weight(&self) -> f64 {
        match self {
            ActivityType::Work => 0.08,
            ActivityType::Study => 0.07,
            ActivityType::Commute => 0.06,
            ActivityType::Housework => 0.05,
            ActivityType::Exercise => 0.06,
            ActivityType::ScreenTime => 0.05,
            ActivityType::Gaming => 0.05,
            ActivityType::Social => 0.03,
            ActivityType::Meal => -0.05,
            ActivityType::Walk => -0.08,
            ActivityType::Rest => -0.15,
            ActivityType::Meditation => -0.20,
            ActivityType::Nap => -0.25,
            ActivityType::Sleep => -0.35,
        }
    }

    /// Whether this activity reduces fatigue.
    pub fn is_recovery(&self) -> bool {
        self.fatigue_weight() < 0.0
    }

    /// Sleep-type activities feed the sleep adjustment in the calculator.
    pub fn is_sleep(&self) -> bool {
        matches!(self, ActivityType::Sleep | ActivityType::Nap)
    }

    /// Counts toward work-hours in the balance penalty.
    pub fn counts_as_work(&self) -> bool {
        matches!(self, ActivityType::Work | ActivityType::Study)
    }

    /// Counts toward rest-hours in the balance penalty.
    pub fn counts_as_rest(&self) -> bool {
        matches!(
            self,
            ActivityType::Rest | ActivityType::Meditation | ActivityType::Nap
        )
    }

    /// Screen-hours secondary signal for recommendations.
    pub fn is_screen(&self) -> bool {
        matches!(self, ActivityType::ScreenTime | ActivityType::Gaming)
    }

    /// Human-readable display name.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Work => "Work",
            ActivityType::Study => "Study",
            ActivityType::Commute => "Commute",
            ActivityType::Housework => "Housework",
            ActivityType::Exercise => "Exercise",
            ActivityType::ScreenTime => "Screen time",
            ActivityType::Gaming => "Gaming",
            ActivityType::Social => "Social",
            ActivityType::Meal => "Meal",
            ActivityType::Walk => "Walk",
            ActivityType::Rest => "Rest",
            ActivityType::Meditation => "Meditation",
            ActivityType::Nap => "Nap",
            ActivityType::Sleep => "Sleep",
        }
    }

    /// Display emoji.
    pub fn emoji(&self) -> &'static str {
        match self {
            ActivityType::Work => "💼",
            ActivityType::Study => "📚",
            ActivityType::Commute => "🚇",
            ActivityType::Housework => "🧹",
            ActivityType::Exercise => "🏋️",
            ActivityType::ScreenTime => "📱",
            ActivityType::Gaming => "🎮",
            ActivityType::Social => "🗣️",
            ActivityType::Meal => "🍽️",
            ActivityType::Walk => "🚶",
            ActivityType::Rest => "🛋️",
            ActivityType::Meditation => "🧘",
            ActivityType::Nap => "😴",
            ActivityType::Sleep => "🌙",
        }
    }

    /// All variants, for listings and exhaustive tests.
    pub fn all() -> &'static [ActivityType] {
        &[
            ActivityType::Work,
            ActivityType::Study,
            ActivityType::Commute,
            ActivityType::Housework,
            ActivityType::Exercise,
            ActivityType::ScreenTime,
            ActivityType::Gaming,
            ActivityType::Social,
            ActivityType::Meal,
            ActivityType::Walk,
            ActivityType::Rest,
            ActivityType::Meditation,
            ActivityType::Nap,
            ActivityType::Sleep,
        ]
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActivityType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "work" => Ok(ActivityType::Work),
            "study" => Ok(ActivityType::Study),
            "commute" => Ok(ActivityType::Commute),
            "housework" => Ok(ActivityType::Housework),
            "exercise" => Ok(ActivityType::Exercise),
            "screen_time" | "screen" => Ok(ActivityType::ScreenTime),
            "gaming" => Ok(ActivityType::Gaming),
            "social" => Ok(ActivityType::Social),
            "meal" => Ok(ActivityType::Meal),
            "walk" => Ok(ActivityType::Walk),
            "rest" => Ok(ActivityType::Rest),
            "meditation" => Ok(ActivityType::Meditation),
            "nap" => Ok(ActivityType::Nap),
            "sleep" => Ok(ActivityType::Sleep),
            other => Err(ValidationError::UnknownActivityType(other.to_string())),
        }
    }
}

/// One logged activity. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Record ID
    pub id: Uuid,
    /// Activity type
    pub activity_type: ActivityType,
    /// Duration in minutes (1..=1440)
    pub duration_minutes: u32,
    /// When the activity was logged
    pub timestamp: DateTime<Utc>,
    /// Optional free-form note
    #[serde(default)]
    pub note: Option<String>,
}

impl ActivityRecord {
    /// Create a validated record. Rejects zero and multi-day durations
    /// before they reach the calculators.
    pub fn new(
        activity_type: ActivityType,
        duration_minutes: u32,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if duration_minutes == 0 || duration_minutes > MAX_ACTIVITY_MINUTES {
            return Err(ValidationError::InvalidDuration {
                minutes: duration_minutes,
                max: MAX_ACTIVITY_MINUTES,
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            activity_type,
            duration_minutes,
            timestamp,
            note: None,
        })
    }

    /// Attach a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Duration in fractional hours.
    pub fn hours(&self) -> f64 {
        self.duration_minutes as f64 / 60.0
    }
}

/// One calendar day's activity list and its current score.
///
/// Replaced wholesale, never merged, when the local date changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyFatigueData {
    /// The local calendar day the activities belong to
    pub date: LocalDay,
    /// Activities logged so far today
    pub activities: Vec<ActivityRecord>,
    /// Score as of the last recomputation
    pub current_fatigue_percentage: u8,
}

impl DailyFatigueData {
    /// Fresh, empty day at the given baseline score.
    pub fn new(date: LocalDay, baseline: u8) -> Self {
        Self {
            date,
            activities: Vec::new(),
            current_fatigue_percentage: baseline,
        }
    }

    /// Total minutes logged for types matching `pred`.
    pub fn minutes_where(&self, pred: impl Fn(ActivityType) -> bool) -> u32 {
        self.activities
            .iter()
            .filter(|a| pred(a.activity_type))
            .map(|a| a.duration_minutes)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_match_recovery_flag() {
        for ty in ActivityType::all() {
            assert_eq!(
                ty.is_recovery(),
                ty.fatigue_weight() < 0.0,
                "{ty:?} flag disagrees with weight sign"
            );
        }
    }

    #[test]
    fn test_sleep_weight() {
        assert_eq!(ActivityType::Sleep.fatigue_weight(), -0.35);
        assert!(ActivityType::Sleep.is_sleep());
        assert!(ActivityType::Nap.is_sleep());
        assert!(!ActivityType::Rest.is_sleep());
    }

    #[test]
    fn test_from_str_accepts_aliases() {
        assert_eq!("work".parse::<ActivityType>().unwrap(), ActivityType::Work);
        assert_eq!(
            "screen-time".parse::<ActivityType>().unwrap(),
            ActivityType::ScreenTime
        );
        assert_eq!(
            "SCREEN".parse::<ActivityType>().unwrap(),
            ActivityType::ScreenTime
        );
        assert!("jogging".parse::<ActivityType>().is_err());
    }

    #[test]
    fn test_record_validation() {
        let now = Utc::now();
        assert!(ActivityRecord::new(ActivityType::Work, 0, now).is_err());
        assert!(ActivityRecord::new(ActivityType::Work, MAX_ACTIVITY_MINUTES + 1, now).is_err());
        let rec = ActivityRecord::new(ActivityType::Work, 90, now).unwrap();
        assert_eq!(rec.hours(), 1.5);
        assert!(rec.note.is_none());
    }

    #[test]
    fn test_minutes_where() {
        let now = Utc::now();
        let day = LocalDay::parse("2026-08-03").unwrap();
        let mut data = DailyFatigueData::new(day, 50);
        data.activities
            .push(ActivityRecord::new(ActivityType::Work, 600, now).unwrap());
        data.activities
            .push(ActivityRecord::new(ActivityType::Sleep, 420, now).unwrap());
        data.activities
            .push(ActivityRecord::new(ActivityType::Nap, 30, now).unwrap());

        assert_eq!(data.minutes_where(|t| t.counts_as_work()), 600);
        assert_eq!(data.minutes_where(|t| t.is_sleep()), 450);
    }

    #[test]
    fn test_serde_snake_case_tags() {
        let json = serde_json::to_string(&ActivityType::ScreenTime).unwrap();
        assert_eq!(json, "\"screen_time\"");
    }
}
