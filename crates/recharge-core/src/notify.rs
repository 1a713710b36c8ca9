//! Notification decisions and cooldowns.
//!
//! The core decides *whether* and *what* to notify, never *how*. Dispatch
//! goes through the [`NotificationSink`] trait; failures are logged and
//! swallowed so the app stays usable with notifications unavailable.
//! Cooldown state lives in an explicit injected scheduler value, keyed per
//! notification kind -- no module-level globals.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The kinds of alerts the engine can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    HighFatigue,
    SedentaryAlert,
    MissionReminder,
    BedtimeReminder,
}

impl NotificationKind {
    /// Minimum spacing between two alerts of this kind.
    pub fn cooldown(&self) -> Duration {
        match self {
            NotificationKind::HighFatigue => Duration::hours(4),
            NotificationKind::SedentaryAlert => Duration::hours(1),
            NotificationKind::MissionReminder => Duration::hours(8),
            NotificationKind::BedtimeReminder => Duration::hours(20),
        }
    }
}

/// A fully rendered notification decision, ready for a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    /// Fatigue percentage attached to the alert, when relevant
    pub percentage: Option<u8>,
    /// Label for the primary action button
    pub action_label: String,
}

/// Dispatch seam. Implementations render however the platform wants;
/// the trivial implementation just logs.
pub trait NotificationSink {
    fn dispatch(&self, request: &NotificationRequest) -> Result<(), Box<dyn std::error::Error>>;
}

/// Sink that only writes to the log. Useful headless and in tests.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn dispatch(&self, request: &NotificationRequest) -> Result<(), Box<dyn std::error::Error>> {
        tracing::info!(kind = ?request.kind, title = %request.title, "notification");
        Ok(())
    }
}

/// Pure cooldown check: has enough time passed since the last send?
pub fn cooldown_elapsed(
    now: DateTime<Utc>,
    last_sent: Option<DateTime<Utc>>,
    cooldown: Duration,
) -> bool {
    match last_sent {
        None => true,
        Some(last) => now - last >= cooldown,
    }
}

/// Fatigue score at or above which a high-fatigue alert is considered.
pub const HIGH_FATIGUE_THRESHOLD: u8 = 80;

/// Injected stateful scheduler holding per-kind send times.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationScheduler {
    last_sent_at: HashMap<NotificationKind, DateTime<Utc>>,
}

impl NotificationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a notification of `kind` may be sent at `now`.
    pub fn should_send(&self, kind: NotificationKind, now: DateTime<Utc>) -> bool {
        cooldown_elapsed(now, self.last_sent_at.get(&kind).copied(), kind.cooldown())
    }

    /// Record a successful send.
    pub fn mark_sent(&mut self, kind: NotificationKind, now: DateTime<Utc>) {
        self.last_sent_at.insert(kind, now);
    }

    /// High-fatigue alert decision. Returns a request when the score
    /// crosses the threshold and the cooldown has elapsed.
    pub fn decide_fatigue_alert(
        &self,
        score: u8,
        now: DateTime<Utc>,
    ) -> Option<NotificationRequest> {
        if score < HIGH_FATIGUE_THRESHOLD {
            return None;
        }
        if !self.should_send(NotificationKind::HighFatigue, now) {
            tracing::debug!(score, "high-fatigue alert suppressed by cooldown");
            return None;
        }
        Some(NotificationRequest {
            kind: NotificationKind::HighFatigue,
            title: "Time to recharge".to_string(),
            body: format!("Your fatigue hit {score}%. Put something down and rest."),
            percentage: Some(score),
            action_label: "See recovery tips".to_string(),
        })
    }

    /// Sedentary alert decision for an inactivity span in minutes.
    pub fn decide_sedentary_alert(
        &self,
        idle_minutes: u32,
        now: DateTime<Utc>,
    ) -> Option<NotificationRequest> {
        if !self.should_send(NotificationKind::SedentaryAlert, now) {
            tracing::debug!(idle_minutes, "sedentary alert suppressed by cooldown");
            return None;
        }
        Some(NotificationRequest {
            kind: NotificationKind::SedentaryAlert,
            title: "You've been still a while".to_string(),
            body: format!("About {idle_minutes} minutes without moving. A short stretch helps."),
            percentage: None,
            action_label: "Stand up".to_string(),
        })
    }

    /// Dispatch through a sink, swallowing failures. Marks the send only
    /// when the sink accepted it.
    pub fn send(
        &mut self,
        sink: &dyn NotificationSink,
        request: NotificationRequest,
        now: DateTime<Utc>,
    ) {
        match sink.dispatch(&request) {
            Ok(()) => self.mark_sent(request.kind, now),
            Err(err) => {
                tracing::warn!(kind = ?request.kind, error = %err, "notification dispatch failed");
            }
        }
    }
}
