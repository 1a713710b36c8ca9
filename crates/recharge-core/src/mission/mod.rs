//! Daily recovery missions.
//!
//! Missions are small recovery tasks drawn from a static template pool,
//! assigned each morning based on the fatigue score. Low fatigue earns
//! harder missions and more of them; high fatigue reduces the burden.

mod engine;
mod templates;

pub use engine::MissionEngine;
pub use templates::{builtin_templates, find_template, MissionTemplate};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::day::LocalDay;

/// Mission category. Six categories, balanced by the assignment rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionCategory {
    Rest,
    Movement,
    Mindfulness,
    Outdoor,
    Social,
    SleepHygiene,
}

impl MissionCategory {
    /// All categories, in display order.
    pub fn all() -> &'static [MissionCategory] {
        &[
            MissionCategory::Rest,
            MissionCategory::Movement,
            MissionCategory::Mindfulness,
            MissionCategory::Outdoor,
            MissionCategory::Social,
            MissionCategory::SleepHygiene,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MissionCategory::Rest => "Rest",
            MissionCategory::Movement => "Movement",
            MissionCategory::Mindfulness => "Mindfulness",
            MissionCategory::Outdoor => "Outdoor",
            MissionCategory::Social => "Social",
            MissionCategory::SleepHygiene => "Sleep hygiene",
        }
    }
}

impl fmt::Display for MissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mission difficulty tier, selected from the fatigue band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionDifficulty {
    Easy,
    Normal,
    Challenge,
}

impl MissionDifficulty {
    pub fn label(&self) -> &'static str {
        match self {
            MissionDifficulty::Easy => "Easy",
            MissionDifficulty::Normal => "Normal",
            MissionDifficulty::Challenge => "Challenge",
        }
    }
}

impl fmt::Display for MissionDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A template instantiated for one day. Mutated only by explicit
/// completion; replaced, never deleted, at day rollover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMission {
    /// Id of the source template
    pub template_id: String,
    pub category: MissionCategory,
    pub difficulty: MissionDifficulty,
    pub title: String,
    pub description: String,
    pub emoji: String,
    /// Experience awarded on completion, before streak bonus
    pub exp_reward: u32,
    pub completed: bool,
}

impl DailyMission {
    /// Instantiate a template for today.
    pub fn from_template(template: &MissionTemplate) -> Self {
        Self {
            template_id: template.id.to_string(),
            category: template.category,
            difficulty: template.difficulty,
            title: template.title.to_string(),
            description: template.description.to_string(),
            emoji: template.emoji.to_string(),
            exp_reward: template.exp_reward,
            completed: false,
        }
    }
}

/// Today's assigned missions, persisted and replaced at rollover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMissionSet {
    pub date: LocalDay,
    pub missions: Vec<DailyMission>,
}

impl DailyMissionSet {
    pub fn new(date: LocalDay, missions: Vec<DailyMission>) -> Self {
        Self { date, missions }
    }

    /// Mark a mission completed. Returns its exp reward, or `None` if the
    /// id is unknown or the mission was already completed.
    pub fn complete(&mut self, template_id: &str) -> Option<u32> {
        let mission = self
            .missions
            .iter_mut()
            .find(|m| m.template_id == template_id && !m.completed)?;
        mission.completed = true;
        Some(mission.exp_reward)
    }

    pub fn all_completed(&self) -> bool {
        !self.missions.is_empty() && self.missions.iter().all(|m| m.completed)
    }

    /// Snapshot this day into an immutable history record.
    pub fn into_history(self, fatigue_percentage: u8) -> MissionHistoryRecord {
        let all_completed = self.all_completed();
        MissionHistoryRecord {
            date: self.date,
            missions: self.missions,
            fatigue_percentage,
            all_completed,
        }
    }
}

/// One closed day in the mission ledger. Never mutated after the day ends;
/// used as the lookback window for anti-repetition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionHistoryRecord {
    pub date: LocalDay,
    pub missions: Vec<DailyMission>,
    pub fatigue_percentage: u8,
    pub all_completed: bool,
}
