//! Sedentary-time detection from coarse motion signals.
//!
//! Tracks elapsed time since the last observed motion. Motion comes from
//! explicit user activity, a rising step count, or a long app-background
//! span. One event is emitted per sedentary episode once the threshold is
//! crossed; motion re-arms the detector.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tuning for the sedentary tracker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SedentaryConfig {
    /// Minutes without motion before an event fires
    #[serde(default = "default_threshold_minutes")]
    pub threshold_minutes: u32,
    /// Background spans up to this long decay the clock instead of
    /// resetting it (quick app switches are not evidence of movement)
    #[serde(default = "default_grace_minutes")]
    pub grace_minutes: u32,
}

fn default_threshold_minutes() -> u32 {
    60
}

fn default_grace_minutes() -> u32 {
    10
}

impl Default for SedentaryConfig {
    fn default() -> Self {
        Self {
            threshold_minutes: default_threshold_minutes(),
            grace_minutes: default_grace_minutes(),
        }
    }
}

/// Emitted once per sedentary episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SedentaryEvent {
    /// Minutes since the last motion when the event fired
    pub duration_minutes: u32,
    pub detected_at: DateTime<Utc>,
}

/// Poll-driven sedentary detector.
#[derive(Debug, Clone)]
pub struct SedentaryTracker {
    config: SedentaryConfig,
    last_motion: Option<DateTime<Utc>>,
    last_step_count: Option<u32>,
    background_since: Option<DateTime<Utc>>,
    /// Cleared after an event fires; motion sets it again.
    armed: bool,
}

impl SedentaryTracker {
    pub fn new(config: SedentaryConfig) -> Self {
        Self {
            config,
            last_motion: None,
            last_step_count: None,
            background_since: None,
            armed: true,
        }
    }

    /// Explicit motion signal (touch, unlock, manual log).
    pub fn on_user_activity(&mut self, now: DateTime<Utc>) {
        self.last_motion = Some(now);
        self.armed = true;
    }

    /// Periodic step-count sample. A rising count is motion.
    pub fn update_step_count(&mut self, steps: u32, now: DateTime<Utc>) {
        if let Some(previous) = self.last_step_count {
            if steps > previous {
                self.on_user_activity(now);
            }
        } else {
            // First sample only establishes the baseline.
            self.last_motion.get_or_insert(now);
        }
        self.last_step_count = Some(steps);
    }

    /// App moved to the background.
    pub fn on_app_background(&mut self, now: DateTime<Utc>) {
        self.background_since = Some(now);
    }

    /// App returned to the foreground. A long absence is treated as
    /// motion (the user was off doing something); a short one only decays
    /// part of the elapsed time.
    pub fn on_app_foreground(&mut self, now: DateTime<Utc>) {
        let Some(background_since) = self.background_since.take() else {
            return;
        };
        let away = now - background_since;
        if away > Duration::minutes(self.config.grace_minutes as i64) {
            self.on_user_activity(now);
        } else if let Some(last_motion) = self.last_motion {
            // Credit half the away-time back to the inactivity clock.
            self.last_motion = Some(last_motion + away / 2);
        }
    }

    /// Minutes without motion as of `now`.
    pub fn idle_minutes(&self, now: DateTime<Utc>) -> Option<u32> {
        let last = self.last_motion?;
        Some((now - last).num_minutes().max(0) as u32)
    }

    /// Periodic poll. Fires at most once per sedentary episode.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<SedentaryEvent> {
        if !self.armed {
            return None;
        }
        let idle = self.idle_minutes(now)?;
        if idle < self.config.threshold_minutes {
            return None;
        }
        self.armed = false;
        Some(SedentaryEvent {
            duration_minutes: idle,
            detected_at: now,
        })
    }
}

impl Default for SedentaryTracker {
    fn default() -> Self {
        Self::new(SedentaryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 3, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_no_event_before_threshold() {
        let mut tracker = SedentaryTracker::default();
        tracker.on_user_activity(at(9, 0));
        assert!(tracker.poll(at(9, 59)).is_none());
    }

    #[test]
    fn test_event_fires_once_per_episode() {
        let mut tracker = SedentaryTracker::default();
        tracker.on_user_activity(at(9, 0));

        let event = tracker.poll(at(10, 5)).expect("threshold crossed");
        assert_eq!(event.duration_minutes, 65);

        // Still idle: no second event until motion re-arms.
        assert!(tracker.poll(at(11, 0)).is_none());

        tracker.on_user_activity(at(11, 30));
        assert!(tracker.poll(at(12, 0)).is_none());
        assert!(tracker.poll(at(12, 30)).is_some());
    }

    #[test]
    fn test_rising_step_count_is_motion() {
        let mut tracker = SedentaryTracker::default();
        tracker.update_step_count(1000, at(9, 0));

        // Flat count is not motion.
        tracker.update_step_count(1000, at(9, 30));
        // Rising count resets the clock at 9:50.
        tracker.update_step_count(1200, at(9, 50));

        assert!(tracker.poll(at(10, 30)).is_none());
        let event = tracker.poll(at(10, 50)).expect("60 min after last rise");
        assert_eq!(event.duration_minutes, 60);
    }

    #[test]
    fn test_long_background_counts_as_motion() {
        let mut tracker = SedentaryTracker::default();
        tracker.on_user_activity(at(9, 0));
        tracker.on_app_background(at(9, 10));
        tracker.on_app_foreground(at(9, 40)); // 30 min away > grace

        assert!(tracker.poll(at(10, 30)).is_none());
        assert!(tracker.poll(at(10, 40)).is_some());
    }

    #[test]
    fn test_short_background_only_decays() {
        let mut tracker = SedentaryTracker::default();
        tracker.on_user_activity(at(9, 0));
        tracker.on_app_background(at(9, 30));
        tracker.on_app_foreground(at(9, 38)); // 8 min away, within grace

        // Clock moved from 9:00 to 9:04: threshold crosses at 10:04.
        assert!(tracker.poll(at(10, 3)).is_none());
        let event = tracker.poll(at(10, 4)).expect("decayed threshold");
        assert_eq!(event.duration_minutes, 60);
    }

    #[test]
    fn test_poll_without_any_signal_is_silent() {
        let mut tracker = SedentaryTracker::default();
        assert!(tracker.poll(at(12, 0)).is_none());
    }
}
