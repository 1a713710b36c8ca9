//! Daily mission assignment.
//!
//! Assignment is a constraint-satisfaction draw with graceful degradation:
//! difficulty and count come from the fatigue band, recently used templates
//! are excluded, recently over-drawn categories are deprioritized, and the
//! final pick maximizes category diversity. As long as the pool holds at
//! least `count` templates the draw never comes up short.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

use super::templates::{builtin_templates, MissionTemplate};
use super::{DailyMission, MissionCategory, MissionDifficulty, MissionHistoryRecord};

/// History entries consulted for template recency exclusion.
const RECENCY_WINDOW: usize = 3;

/// History entries consulted for category balancing.
const CATEGORY_WINDOW: usize = 2;

/// Category occurrences within [`CATEGORY_WINDOW`] that trigger
/// deprioritization.
const CATEGORY_REPEAT_THRESHOLD: usize = 2;

/// Draws daily missions from a template pool.
#[derive(Debug, Clone)]
pub struct MissionEngine {
    templates: Vec<MissionTemplate>,
}

impl Default for MissionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionEngine {
    /// Engine over the built-in 60-template pool.
    pub fn new() -> Self {
        Self {
            templates: builtin_templates().to_vec(),
        }
    }

    /// Engine over a custom pool (tests, seasonal packs).
    pub fn with_pool(templates: Vec<MissionTemplate>) -> Self {
        Self { templates }
    }

    /// Difficulty band for a fatigue score. Low fatigue means the user has
    /// energy for harder tasks.
    pub fn difficulty_for(fatigue: u8) -> MissionDifficulty {
        match fatigue {
            0..=30 => MissionDifficulty::Challenge,
            31..=60 => MissionDifficulty::Normal,
            _ => MissionDifficulty::Easy,
        }
    }

    /// Number of missions for a fatigue score. Fewer when already fatigued.
    pub fn mission_count(fatigue: u8) -> usize {
        if fatigue > 60 {
            2
        } else {
            3
        }
    }

    /// Assign today's missions.
    ///
    /// `history` is the append-only mission ledger, oldest first. The
    /// returned missions all start with `completed = false`.
    pub fn assign(
        &self,
        fatigue: u8,
        history: &[MissionHistoryRecord],
        rng: &mut impl Rng,
    ) -> Vec<DailyMission> {
        let difficulty = Self::difficulty_for(fatigue);
        let count = Self::mission_count(fatigue);

        let recent_ids = recent_template_ids(history);
        let overused = overused_categories(history);

        let mut primary: Vec<&MissionTemplate> = self
            .templates
            .iter()
            .filter(|t| t.difficulty == difficulty && !recent_ids.contains(t.id))
            .collect();

        // Widen with other difficulties when recency exclusion starved the
        // primary pool.
        let mut widened: Vec<&MissionTemplate> = if primary.len() < count {
            self.templates
                .iter()
                .filter(|t| t.difficulty != difficulty && !recent_ids.contains(t.id))
                .collect()
        } else {
            Vec::new()
        };

        primary.shuffle(rng);
        widened.shuffle(rng);

        // Primary-difficulty candidates keep precedence over widened ones;
        // overused categories drop to a fallback pool either way.
        let mut pool: Vec<&MissionTemplate> = Vec::new();
        let mut fallback: Vec<&MissionTemplate> = Vec::new();
        for template in primary.into_iter().chain(widened) {
            if overused.contains(&template.category) {
                fallback.push(template);
            } else {
                pool.push(template);
            }
        }

        let mut selected: Vec<&MissionTemplate> = Vec::with_capacity(count);
        let mut selected_ids: HashSet<&str> = HashSet::new();

        // Pass 1: one template per distinct category.
        let mut used_categories: HashSet<MissionCategory> = HashSet::new();
        for &template in &pool {
            if selected.len() == count {
                break;
            }
            if used_categories.contains(&template.category) {
                continue;
            }
            used_categories.insert(template.category);
            selected_ids.insert(template.id);
            selected.push(template);
        }

        // Pass 2: fill with same-category picks from the remaining pool.
        // Pass 3: dip into the deprioritized fallback pool.
        for &template in pool.iter().chain(fallback.iter()) {
            if selected.len() == count {
                break;
            }
            if selected_ids.insert(template.id) {
                selected.push(template);
            }
        }

        // Last resort: the recency exclusion itself left too few templates,
        // so recently used ones become eligible again.
        if selected.len() < count {
            let mut rest: Vec<&MissionTemplate> = self
                .templates
                .iter()
                .filter(|t| !selected_ids.contains(t.id))
                .collect();
            rest.shuffle(rng);
            for template in rest {
                if selected.len() == count {
                    break;
                }
                selected_ids.insert(template.id);
                selected.push(template);
            }
        }

        selected.into_iter().map(DailyMission::from_template).collect()
    }
}

/// Template ids used within the recency window, newest entries first.
fn recent_template_ids(history: &[MissionHistoryRecord]) -> HashSet<&str> {
    history
        .iter()
        .rev()
        .take(RECENCY_WINDOW)
        .flat_map(|record| record.missions.iter().map(|m| m.template_id.as_str()))
        .collect()
}

/// Categories drawn at least [`CATEGORY_REPEAT_THRESHOLD`] times within the
/// category window.
fn overused_categories(history: &[MissionHistoryRecord]) -> HashSet<MissionCategory> {
    let mut counts: HashMap<MissionCategory, usize> = HashMap::new();
    for record in history.iter().rev().take(CATEGORY_WINDOW) {
        for mission in &record.missions {
            *counts.entry(mission.category).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n >= CATEGORY_REPEAT_THRESHOLD)
        .map(|(category, _)| category)
        .collect()
}
