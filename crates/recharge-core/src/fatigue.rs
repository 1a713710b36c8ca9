//! Fatigue score calculation.
//!
//! The calculator is a pure function over one day's activity records:
//! start at the baseline, add each activity's weighted impact, apply the
//! sleep adjustment and the work/rest balance penalty, then clamp to 0-100
//! and round. No randomness, no I/O; replaying the same inputs always
//! yields the same score.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::activity::{ActivityRecord, ActivityType};

/// Default starting score for a day with no information.
pub const DEFAULT_BASELINE: u8 = 50;

/// Fatigue score in [0, 100] for the given activities.
///
/// With an empty activity list the result is exactly `baseline`.
pub fn calculate_fatigue(activities: &[ActivityRecord], baseline: u8) -> u8 {
    let mut score = baseline as f64;

    for activity in activities {
        score += activity_impact(activity);
    }

    score += sleep_adjustment(sleep_hours(activities));
    score += balance_penalty(activities);

    score.clamp(0.0, 100.0).round() as u8
}

/// Impact of a single activity in fatigue-percent-points.
fn activity_impact(activity: &ActivityRecord) -> f64 {
    activity.activity_type.fatigue_weight() * activity.hours() * 100.0
}

/// Total sleep-type hours across the day.
fn sleep_hours(activities: &[ActivityRecord]) -> f64 {
    activities
        .iter()
        .filter(|a| a.activity_type.is_sleep())
        .map(|a| a.hours())
        .sum()
}

/// Screen-type hours, a secondary signal for recommendations.
fn screen_hours(activities: &[ActivityRecord]) -> f64 {
    activities
        .iter()
        .filter(|a| a.activity_type.is_screen())
        .map(|a| a.hours())
        .sum()
}

/// Sleep adjustment in points. Zero hours means no sleep was logged at all
/// and is treated as severe shortage.
fn sleep_adjustment(hours: f64) -> f64 {
    if hours < 5.0 {
        15.0
    } else if hours < 6.0 {
        10.0
    } else if (7.0..=9.0).contains(&hours) {
        -10.0
    } else if hours > 9.0 {
        5.0
    } else {
        0.0
    }
}

/// +10 when the day is heavy on work and has almost no rest.
fn balance_penalty(activities: &[ActivityRecord]) -> f64 {
    let work_hours: f64 = activities
        .iter()
        .filter(|a| a.activity_type.counts_as_work())
        .map(|a| a.hours())
        .sum();
    let rest_hours: f64 = activities
        .iter()
        .filter(|a| a.activity_type.counts_as_rest())
        .map(|a| a.hours())
        .sum();

    if work_hours > 10.0 && rest_hours < 1.0 {
        10.0
    } else {
        0.0
    }
}

/// Per-type share of the day's total absolute impact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeContribution {
    /// Activity type
    pub activity_type: ActivityType,
    /// Signed impact in fatigue-percent-points
    pub impact: f64,
    /// Share of total |impact|, in percent
    pub share_percent: f64,
}

/// Normalized `|impact|` shares per activity type, largest first.
///
/// Empty input yields an empty breakdown.
pub fn contribution_breakdown(activities: &[ActivityRecord]) -> Vec<TypeContribution> {
    let mut per_type: BTreeMap<&'static str, (ActivityType, f64)> = BTreeMap::new();
    for activity in activities {
        let entry = per_type
            .entry(activity.activity_type.label())
            .or_insert((activity.activity_type, 0.0));
        entry.1 += activity_impact(activity);
    }

    let total_abs: f64 = per_type.values().map(|(_, impact)| impact.abs()).sum();
    if total_abs == 0.0 {
        return Vec::new();
    }

    let mut contributions: Vec<TypeContribution> = per_type
        .into_values()
        .map(|(activity_type, impact)| TypeContribution {
            activity_type,
            impact,
            share_percent: impact.abs() / total_abs * 100.0,
        })
        .collect();
    contributions.sort_by(|a, b| {
        b.share_percent
            .partial_cmp(&a.share_percent)
            .expect("shares are finite")
    });
    contributions
}

/// Qualitative message for a score.
pub fn fatigue_message(score: u8) -> &'static str {
    match score {
        0..=20 => "Full of energy! Your batteries are charged.",
        21..=40 => "Feeling good. A solid, balanced day.",
        41..=60 => "Getting tired. Keep an eye on your pace.",
        61..=80 => "Quite fatigued. Time to slow down.",
        _ => "Exhausted. Your body is asking for rest.",
    }
}

/// Recovery recommendation selected from the score and secondary signals.
pub fn recommendation(score: u8, activities: &[ActivityRecord]) -> &'static str {
    let sleep = sleep_hours(activities);
    let screen = screen_hours(activities);

    if score > 80 {
        "Clear your evening and rest. Skip anything that can wait until tomorrow."
    } else if score > 60 {
        // Zero sleep hours means nothing was logged, not a zero-sleep night.
        if sleep > 0.0 && sleep < 6.0 {
            "Go to bed early tonight -- you are running a sleep deficit."
        } else if screen > 5.0 {
            "Put the screens away for a while and let your eyes and mind rest."
        } else {
            "Take a proper break. A short nap or quiet half hour will help."
        }
    } else if score > 30 {
        "You're holding up. A short walk or stretch will keep the balance."
    } else {
        "Low fatigue -- a great day to take on something challenging."
    }
}

/// Bundled result of a full calculation pass over one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueReport {
    /// Final score in [0, 100]
    pub score: u8,
    /// Qualitative message for the score band
    pub message: String,
    /// Recovery recommendation
    pub recommendation: String,
    /// Per-type contribution shares, largest first
    pub contributions: Vec<TypeContribution>,
}

impl FatigueReport {
    /// Run the calculator and derive all display fields.
    pub fn build(activities: &[ActivityRecord], baseline: u8) -> Self {
        let score = calculate_fatigue(activities, baseline);
        Self {
            score,
            message: fatigue_message(score).to_string(),
            recommendation: recommendation(score, activities).to_string(),
            contributions: contribution_breakdown(activities),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn rec(ty: ActivityType, minutes: u32) -> ActivityRecord {
        ActivityRecord::new(ty, minutes, Utc::now()).unwrap()
    }

    #[test]
    fn test_empty_activities_returns_baseline() {
        for baseline in [0, 25, 50, 77, 100] {
            assert_eq!(calculate_fatigue(&[], baseline), baseline);
        }
    }

    #[test]
    fn test_seven_hours_sleep_clamps_to_zero() {
        // impact = -0.35 * 7 * 100 = -245; sleep bonus -10; 50 - 255 -> 0
        let activities = vec![rec(ActivityType::Sleep, 420)];
        assert_eq!(calculate_fatigue(&activities, 50), 0);
    }

    #[test]
    fn test_work_raises_score() {
        // 0.08 * 8 * 100 = 64; no sleep logged -> +15; 50 + 64 + 15 = 129 -> 100
        let heavy = vec![rec(ActivityType::Work, 480)];
        assert_eq!(calculate_fatigue(&heavy, 50), 100);

        // 2h work: 50 + 16 + 15 = 81
        let light = vec![rec(ActivityType::Work, 120)];
        assert_eq!(calculate_fatigue(&light, 50), 81);
    }

    #[test]
    fn test_sleep_adjustment_bands() {
        assert_eq!(sleep_adjustment(4.5), 15.0);
        assert_eq!(sleep_adjustment(5.5), 10.0);
        assert_eq!(sleep_adjustment(6.5), 0.0);
        assert_eq!(sleep_adjustment(7.0), -10.0);
        assert_eq!(sleep_adjustment(9.0), -10.0);
        assert_eq!(sleep_adjustment(9.5), 5.0);
    }

    #[test]
    fn test_balance_penalty_requires_both_conditions() {
        // 11h work, no rest -> penalty
        let overworked = vec![rec(ActivityType::Work, 660)];
        assert_eq!(balance_penalty(&overworked), 10.0);

        // 11h work but a full hour of rest -> no penalty
        let balanced = vec![rec(ActivityType::Work, 660), rec(ActivityType::Rest, 60)];
        assert_eq!(balance_penalty(&balanced), 0.0);

        // 9h work, no rest -> no penalty
        let moderate = vec![rec(ActivityType::Work, 540)];
        assert_eq!(balance_penalty(&moderate), 0.0);
    }

    #[test]
    fn test_clamping_against_adversarial_input() {
        let extreme_rest: Vec<ActivityRecord> =
            (0..10).map(|_| rec(ActivityType::Sleep, 1440)).collect();
        assert_eq!(calculate_fatigue(&extreme_rest, 100), 0);

        let extreme_work: Vec<ActivityRecord> =
            (0..10).map(|_| rec(ActivityType::Work, 1440)).collect();
        assert_eq!(calculate_fatigue(&extreme_work, 0), 100);
    }

    #[test]
    fn test_contribution_shares_sum_to_hundred() {
        let activities = vec![
            rec(ActivityType::Work, 480),
            rec(ActivityType::Sleep, 420),
            rec(ActivityType::ScreenTime, 120),
        ];
        let contributions = contribution_breakdown(&activities);
        assert_eq!(contributions.len(), 3);

        let total: f64 = contributions.iter().map(|c| c.share_percent).sum();
        assert!((total - 100.0).abs() < 1e-9);

        // Sleep has the largest |impact| (245 vs 64 vs 10)
        assert_eq!(contributions[0].activity_type, ActivityType::Sleep);
        assert!(contributions[0].impact < 0.0);
    }

    #[test]
    fn test_contribution_breakdown_merges_same_type() {
        let activities = vec![rec(ActivityType::Work, 240), rec(ActivityType::Work, 240)];
        let contributions = contribution_breakdown(&activities);
        assert_eq!(contributions.len(), 1);
        assert!((contributions[0].share_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_contribution_breakdown_empty() {
        assert!(contribution_breakdown(&[]).is_empty());
    }

    #[test]
    fn test_message_bands() {
        assert!(fatigue_message(10).contains("energy"));
        assert!(fatigue_message(50).contains("tired"));
        assert!(fatigue_message(95).contains("Exhausted"));
    }

    #[test]
    fn test_recommendation_uses_secondary_signals() {
        // High fatigue + short logged sleep -> sleep recommendation
        let short_sleep = vec![rec(ActivityType::Work, 600), rec(ActivityType::Sleep, 60)];
        let score = calculate_fatigue(&short_sleep, 50);
        assert!(score > 60, "score was {score}");
        assert!(recommendation(score, &short_sleep).contains("bed early"));

        // High fatigue + heavy screens, no sleep logged -> screen recommendation
        let screens = vec![
            rec(ActivityType::Work, 420),
            rec(ActivityType::ScreenTime, 240),
            rec(ActivityType::Gaming, 120),
        ];
        let score = calculate_fatigue(&screens, 50);
        assert!(score > 60, "score was {score}");
        assert!(recommendation(score, &screens).contains("screens"));

        // Low fatigue -> challenge nudge
        assert!(recommendation(10, &[]).contains("challenging"));
    }

    #[test]
    fn test_report_bundles_all_fields() {
        let activities = vec![rec(ActivityType::Work, 480), rec(ActivityType::Sleep, 420)];
        let report = FatigueReport::build(&activities, 50);
        assert_eq!(report.score, calculate_fatigue(&activities, 50));
        assert_eq!(report.message, fatigue_message(report.score));
        assert_eq!(report.contributions.len(), 2);
    }
}
