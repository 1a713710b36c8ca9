//! Overnight sleep estimation from inactivity gaps.
//!
//! In the absence of real sleep data, the longest gap between phone
//! activity timestamps inside the overnight window is taken as last
//! night's sleep. Works on naive local wall-clock time -- the overnight
//! window is a local-time concept, so no timezone math belongs here.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::day::LocalDay;

/// Tuning for the sleep estimator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SleepEstimatorConfig {
    /// Hour the overnight window opens (evening, local)
    #[serde(default = "default_window_start_hour")]
    pub window_start_hour: u32,
    /// Hour the overnight window closes (next morning, local)
    #[serde(default = "default_window_end_hour")]
    pub window_end_hour: u32,
    /// Smallest gap accepted as sleep, in minutes
    #[serde(default = "default_min_gap_minutes")]
    pub min_gap_minutes: u32,
}

fn default_window_start_hour() -> u32 {
    21
}

fn default_window_end_hour() -> u32 {
    11
}

fn default_min_gap_minutes() -> u32 {
    180
}

impl Default for SleepEstimatorConfig {
    fn default() -> Self {
        Self {
            window_start_hour: default_window_start_hour(),
            window_end_hour: default_window_end_hour(),
            min_gap_minutes: default_min_gap_minutes(),
        }
    }
}

/// One night's estimated sleep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepEstimate {
    pub total_minutes: u32,
    pub gap_start: NaiveDateTime,
    pub gap_end: NaiveDateTime,
}

/// Gap-based sleep estimator. Produces at most one estimate per local day.
#[derive(Debug, Clone)]
pub struct SleepEstimator {
    config: SleepEstimatorConfig,
    /// Recent activity timestamps, oldest first
    activity_times: Vec<NaiveDateTime>,
    last_estimated_day: Option<LocalDay>,
}

impl SleepEstimator {
    pub fn new(config: SleepEstimatorConfig) -> Self {
        Self {
            config,
            activity_times: Vec::new(),
            last_estimated_day: None,
        }
    }

    /// Record a phone-activity timestamp (app open, unlock, interaction).
    pub fn record_activity(&mut self, at: NaiveDateTime) {
        self.activity_times.push(at);
        self.activity_times.sort();
        // Two days of history is plenty for one overnight window.
        let cutoff = at - Duration::hours(48);
        self.activity_times.retain(|t| *t >= cutoff);
    }

    /// Estimate last night's sleep, at most once per local day.
    ///
    /// Returns `None` before the overnight window has closed, when an
    /// estimate was already produced today, or when no gap reaches the
    /// configured minimum.
    pub fn estimate(&mut self, now: NaiveDateTime) -> Option<SleepEstimate> {
        let today = LocalDay::from_date(now.date());
        if self.last_estimated_day == Some(today) {
            return None;
        }
        // Wait for the window to close so a late wake-up isn't cut short.
        if now.hour() < self.config.window_end_hour {
            return None;
        }

        let window_start = today
            .prev()
            .as_date()
            .and_time(NaiveTime::from_hms_opt(self.config.window_start_hour, 0, 0)?);
        let window_end = today
            .as_date()
            .and_time(NaiveTime::from_hms_opt(self.config.window_end_hour, 0, 0)?);

        // Activity points inside the window, bracketed by its edges so
        // leading and trailing quiet spans count as gaps too.
        let mut points = vec![window_start];
        points.extend(
            self.activity_times
                .iter()
                .copied()
                .filter(|t| *t >= window_start && *t <= window_end),
        );
        points.push(window_end);

        let longest = points
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .max_by_key(|(start, end)| *end - *start)?;

        let gap_minutes = (longest.1 - longest.0).num_minutes();
        if gap_minutes < self.config.min_gap_minutes as i64 {
            return None;
        }

        self.last_estimated_day = Some(today);
        Some(SleepEstimate {
            total_minutes: gap_minutes as u32,
            gap_start: longest.0,
            gap_end: longest.1,
        })
    }
}

impl Default for SleepEstimator {
    fn default() -> Self {
        Self::new(SleepEstimatorConfig::default())
    }
}
