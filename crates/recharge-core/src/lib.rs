//! # Recharge Core Library
//!
//! This library provides the core business logic for Recharge, a personal
//! fatigue tracker with a gamified companion character. It implements a
//! CLI-first philosophy where all operations are available via a standalone
//! CLI binary, with any GUI shell being a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Fatigue Calculator**: Pure scoring over the day's activity records --
//!   baseline plus weighted per-activity impact, sleep adjustment and
//!   work/rest balance penalty, clamped to 0-100
//! - **Mission Engine**: Draws 2-3 daily missions from a static template
//!   pool, gated by the fatigue score and anti-repetition rules
//! - **Progression**: Level/experience engine for the Ppoom companion
//!   character and a calendar-day completion streak with exp bonuses
//! - **Pattern Analyzer**: Rule-based weekly trend and insight generation
//!   over saved daily history records
//! - **Estimators**: Poll-driven sedentary and sleep detectors fed by
//!   coarse app-lifecycle signals
//! - **Storage**: SQLite-backed key-value persistence and TOML-based
//!   configuration
//!
//! All calculation modules are pure and synchronous; the caller owns
//! persistence and scheduling.
//!
//! ## Key Components
//!
//! - [`FatigueReport`]: Score, message, recommendation and contribution
//!   breakdown for one day
//! - [`MissionEngine`]: Daily mission assignment
//! - [`PpoomCharacter`]: Companion character progression state
//! - [`StreakData`]: Consecutive-day completion streak
//! - [`analyze_weekly`]: Weekly pattern analysis
//! - [`StateStore`]: Typed persistence over a [`KeyValueStore`]

pub mod activity;
pub mod character;
pub mod day;
pub mod error;
pub mod estimator;
pub mod fatigue;
pub mod health;
pub mod mission;
pub mod notify;
pub mod pattern;
pub mod session;
pub mod storage;
pub mod streak;

pub use activity::{ActivityRecord, ActivityType, DailyFatigueData};
pub use character::{CostumeInfo, LevelUpResult, PpoomCharacter, MAX_LEVEL};
pub use day::LocalDay;
pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use estimator::{SedentaryEvent, SedentaryTracker, SleepEstimate, SleepEstimator};
pub use fatigue::{calculate_fatigue, FatigueReport, TypeContribution};
pub use health::{HealthProvider, HealthService, HealthSnapshot, SleepSample};
pub use mission::{
    DailyMission, DailyMissionSet, MissionCategory, MissionDifficulty, MissionEngine,
    MissionHistoryRecord, MissionTemplate,
};
pub use notify::{NotificationKind, NotificationRequest, NotificationScheduler, NotificationSink};
pub use pattern::{analyze_weekly, DailyHistoryRecord, Insight, InsightKind, Trend, WeeklyAnalysis};
pub use session::FatigueSession;
pub use storage::{Config, KeyValueStore, MemoryStore, SqliteStore, StateStore};
pub use streak::{apply_streak_bonus, StreakData};
