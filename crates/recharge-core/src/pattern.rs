//! Weekly pattern analysis over daily history records.
//!
//! The analyzer is a rule-based heuristic, not a trained model: a trend
//! from comparing half-window means, per-weekday aggregation, a plain
//! Pearson correlation between sleep and fatigue, and a handful of
//! independent insight rules. Everything degrades to explicit
//! "insufficient data" results instead of erroring.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::day::LocalDay;

/// Minimum records for any analysis at all.
const MIN_RECORDS: usize = 3;

/// Minimum paired points for the sleep correlation.
const MIN_CORRELATION_POINTS: usize = 5;

/// Maximum insights reported per analysis.
const MAX_INSIGHTS: usize = 4;

/// One day's saved snapshot for trend analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyHistoryRecord {
    pub date: LocalDay,
    pub fatigue_percentage: u8,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub step_count: Option<u32>,
    #[serde(default)]
    pub screen_minutes: Option<u32>,
}

/// Week-over-week fatigue direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Worsening,
}

/// Strength bucket for the sleep/fatigue correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
    /// Fewer than [`MIN_CORRELATION_POINTS`] paired data points
    Insufficient,
}

/// Pearson correlation between sleep hours and fatigue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepCorrelation {
    /// Coefficient in [-1, 1]; absent when insufficient or degenerate
    pub coefficient: Option<f64>,
    pub strength: CorrelationStrength,
}

impl SleepCorrelation {
    fn insufficient() -> Self {
        Self {
            coefficient: None,
            strength: CorrelationStrength::Insufficient,
        }
    }
}

/// Mean fatigue for one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekdayFatigue {
    pub weekday: Weekday,
    pub mean_fatigue: f64,
}

/// Tag for how an insight should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Positive,
    Warning,
    Neutral,
}

/// One qualitative observation about the week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub emoji: String,
    pub title: String,
    pub description: String,
    pub kind: InsightKind,
}

impl Insight {
    fn new(emoji: &str, title: &str, description: String, kind: InsightKind) -> Self {
        Self {
            emoji: emoji.to_string(),
            title: title.to_string(),
            description,
            kind,
        }
    }
}

/// Full result of a weekly analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyAnalysis {
    pub trend: Trend,
    pub trend_description: String,
    /// At most [`MAX_INSIGHTS`] entries, in rule order
    pub insights: Vec<Insight>,
    /// Weekday with the highest mean fatigue
    pub worst_day: Option<WeekdayFatigue>,
    /// Weekday with the lowest mean fatigue
    pub best_day: Option<WeekdayFatigue>,
    pub avg_fatigue: f64,
    pub sleep_correlation: SleepCorrelation,
}

impl WeeklyAnalysis {
    /// Stable sentinel for too little data. Not an error.
    fn insufficient() -> Self {
        Self {
            trend: Trend::Stable,
            trend_description: "Not enough data yet. Log a few more days to see your pattern."
                .to_string(),
            insights: Vec::new(),
            worst_day: None,
            best_day: None,
            avg_fatigue: 0.0,
            sleep_correlation: SleepCorrelation::insufficient(),
        }
    }
}

/// Analyze the recent daily records (typically the last 7-14 days).
///
/// Records are sorted chronologically internally; callers may pass them in
/// any order. Fewer than [`MIN_RECORDS`] records yields the stable
/// insufficient-data result.
pub fn analyze_weekly(records: &[DailyHistoryRecord]) -> WeeklyAnalysis {
    if records.len() < MIN_RECORDS {
        return WeeklyAnalysis::insufficient();
    }

    let mut records: Vec<DailyHistoryRecord> = records.to_vec();
    records.sort_by_key(|r| r.date);

    let (trend, trend_description) = classify_trend(&records);
    let (worst_day, best_day) = weekday_extremes(&records);
    let avg_fatigue = mean(records.iter().map(|r| r.fatigue_percentage as f64));
    let sleep_correlation = sleep_correlation(&records);

    let mut insights = Vec::new();
    weekend_gap_insight(&records, &mut insights);
    sleep_average_insight(&records, &mut insights);
    step_average_insight(&records, &mut insights);
    consecutive_high_fatigue_insight(&records, &mut insights);
    correlation_insight(&sleep_correlation, &mut insights);
    insights.truncate(MAX_INSIGHTS);

    WeeklyAnalysis {
        trend,
        trend_description,
        insights,
        worst_day,
        best_day,
        avg_fatigue,
        sleep_correlation,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Compare first-half and second-half mean fatigue.
fn classify_trend(records: &[DailyHistoryRecord]) -> (Trend, String) {
    let half = records.len() / 2;
    let first = mean(records[..half].iter().map(|r| r.fatigue_percentage as f64));
    let second = mean(records[half..].iter().map(|r| r.fatigue_percentage as f64));
    let diff = second - first;

    if diff < -5.0 {
        (
            Trend::Improving,
            format!("Your fatigue dropped by about {:.0} points. Keep it up!", -diff),
        )
    } else if diff > 5.0 {
        (
            Trend::Worsening,
            format!("Your fatigue rose by about {diff:.0} points. Plan some recovery."),
        )
    } else {
        (
            Trend::Stable,
            "Your fatigue has been holding steady.".to_string(),
        )
    }
}

/// Highest and lowest mean-fatigue weekdays, in Monday-first order for
/// deterministic tie-breaking.
fn weekday_extremes(
    records: &[DailyHistoryRecord],
) -> (Option<WeekdayFatigue>, Option<WeekdayFatigue>) {
    const WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    let mut stats: Vec<WeekdayFatigue> = Vec::new();
    for weekday in WEEKDAYS {
        let days: Vec<f64> = records
            .iter()
            .filter(|r| r.date.weekday() == weekday)
            .map(|r| r.fatigue_percentage as f64)
            .collect();
        if !days.is_empty() {
            stats.push(WeekdayFatigue {
                weekday,
                mean_fatigue: mean(days.into_iter()),
            });
        }
    }

    let worst = stats
        .iter()
        .copied()
        .max_by(|a, b| a.mean_fatigue.partial_cmp(&b.mean_fatigue).expect("finite"));
    let best = stats
        .iter()
        .copied()
        .min_by(|a, b| a.mean_fatigue.partial_cmp(&b.mean_fatigue).expect("finite"));
    (worst, best)
}

/// Pearson correlation between sleep hours and fatigue percentage.
fn sleep_correlation(records: &[DailyHistoryRecord]) -> SleepCorrelation {
    let pairs: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|r| r.sleep_hours.map(|s| (s, r.fatigue_percentage as f64)))
        .collect();
    if pairs.len() < MIN_CORRELATION_POINTS {
        return SleepCorrelation::insufficient();
    }

    match pearson(&pairs) {
        Some(r) => {
            let strength = if r.abs() > 0.6 {
                CorrelationStrength::Strong
            } else if r.abs() > 0.3 {
                CorrelationStrength::Moderate
            } else {
                CorrelationStrength::Weak
            };
            SleepCorrelation {
                coefficient: Some(r),
                strength,
            }
        }
        // Zero variance on either axis: undefined, treated as weak.
        None => SleepCorrelation {
            coefficient: None,
            strength: CorrelationStrength::Weak,
        },
    }
}

/// Plain Pearson r. `None` when either variance is zero.
fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

// ── Insight rules, in report order ──────────────────────────────────

fn weekend_gap_insight(records: &[DailyHistoryRecord], out: &mut Vec<Insight>) {
    let weekday: Vec<f64> = records
        .iter()
        .filter(|r| !r.date.is_weekend())
        .map(|r| r.fatigue_percentage as f64)
        .collect();
    let weekend: Vec<f64> = records
        .iter()
        .filter(|r| r.date.is_weekend())
        .map(|r| r.fatigue_percentage as f64)
        .collect();
    if weekday.is_empty() || weekend.is_empty() {
        return;
    }

    let gap = mean(weekday.into_iter()) - mean(weekend.into_iter());
    if gap > 10.0 {
        out.push(Insight::new(
            "📅",
            "Weekdays wear you out",
            format!(
                "Your weekday fatigue runs about {gap:.0} points above your weekends. \
                 Work days are costing you more than they should."
            ),
            InsightKind::Warning,
        ));
    } else if gap < -10.0 {
        out.push(Insight::new(
            "🎢",
            "Exhausting weekends",
            format!(
                "Your weekend fatigue runs about {:.0} points above your weekdays. \
                 Weekends might not be giving you real rest.",
                -gap
            ),
            InsightKind::Warning,
        ));
    }
}

fn sleep_average_insight(records: &[DailyHistoryRecord], out: &mut Vec<Insight>) {
    let hours: Vec<f64> = records.iter().filter_map(|r| r.sleep_hours).collect();
    if hours.is_empty() {
        return;
    }
    let avg = mean(hours.into_iter());

    if avg < 6.0 {
        out.push(Insight::new(
            "🌙",
            "Sleep is running short",
            format!("You averaged {avg:.1}h of sleep. Under 6 hours builds up fatigue fast."),
            InsightKind::Warning,
        ));
    } else if avg >= 7.0 {
        out.push(Insight::new(
            "✨",
            "Solid sleep habit",
            format!("You averaged {avg:.1}h of sleep. That's right in the healthy range."),
            InsightKind::Positive,
        ));
    }
}

fn step_average_insight(records: &[DailyHistoryRecord], out: &mut Vec<Insight>) {
    let steps: Vec<f64> = records
        .iter()
        .filter_map(|r| r.step_count.map(|s| s as f64))
        .collect();
    if steps.is_empty() {
        return;
    }
    let avg = mean(steps.into_iter());

    if avg < 4000.0 {
        out.push(Insight::new(
            "🪑",
            "Very little movement",
            format!("You averaged {avg:.0} steps a day. Light activity actually lowers fatigue."),
            InsightKind::Warning,
        ));
    } else if avg >= 8000.0 {
        out.push(Insight::new(
            "👟",
            "Staying active",
            format!("You averaged {avg:.0} steps a day. Movement like that pays off."),
            InsightKind::Positive,
        ));
    }
}

fn consecutive_high_fatigue_insight(records: &[DailyHistoryRecord], out: &mut Vec<Insight>) {
    let mut run = 0usize;
    let mut longest = 0usize;
    for record in records {
        if record.fatigue_percentage >= 70 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    if longest >= 3 {
        out.push(Insight::new(
            "🔥",
            "Running on empty",
            format!(
                "You hit fatigue of 70 or more on {longest} days in a row. \
                 That's burnout territory -- schedule real recovery."
            ),
            InsightKind::Warning,
        ));
    }
}

fn correlation_insight(correlation: &SleepCorrelation, out: &mut Vec<Insight>) {
    if correlation.strength != CorrelationStrength::Strong {
        return;
    }
    let Some(r) = correlation.coefficient else {
        return;
    };

    let description = if r < 0.0 {
        format!(
            "Sleep and fatigue track closely for you (r = {r:.2}): \
             more sleep reliably means less fatigue the next day."
        )
    } else {
        format!(
            "Unusually, your fatigue rises with more sleep (r = {r:.2}). \
             Oversleeping or poor sleep quality might be involved."
        )
    };
    out.push(Insight::new(
        "🔗",
        "Sleep drives your fatigue",
        description,
        InsightKind::Neutral,
    ));
}
