//! Ppoom companion character progression.
//!
//! The character levels up from mission experience. The experience table is
//! static, curved, and read-only; `add_exp` is the only operation that
//! mutates progression state, and it returns a new value rather than
//! mutating in place.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::ValidationError;

/// Highest reachable level.
pub const MAX_LEVEL: u32 = 20;

/// Experience required to clear each level, indexed by `level - 1`.
/// Monotonically increasing, roughly 1.2x per level.
const REQUIRED_EXP: [u32; MAX_LEVEL as usize] = [
    100, 120, 145, 175, 210, 250, 300, 360, 430, 515, 620, 745, 895, 1075, 1290, 1550, 1860,
    2230, 2675, 3210,
];

/// Experience needed to clear the given level.
///
/// Levels past [`MAX_LEVEL`] report the max-level requirement, which is also
/// the cap applied to accumulated exp at the top.
pub fn required_exp(level: u32) -> u32 {
    let index = level.clamp(1, MAX_LEVEL) as usize - 1;
    REQUIRED_EXP[index]
}

/// A costume in the static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostumeInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    /// Level at which the costume unlocks
    pub unlock_level: u32,
}

/// Built-in costume catalog, ordered by unlock level.
pub fn costume_catalog() -> &'static [CostumeInfo] {
    &[
        CostumeInfo { id: "default", name: "Classic Ppoom", emoji: "🐻", unlock_level: 1 },
        CostumeInfo { id: "scarf", name: "Cozy Scarf", emoji: "🧣", unlock_level: 3 },
        CostumeInfo { id: "cap", name: "Baseball Cap", emoji: "🧢", unlock_level: 5 },
        CostumeInfo { id: "hoodie", name: "Weekend Hoodie", emoji: "🥷", unlock_level: 8 },
        CostumeInfo { id: "raincoat", name: "Yellow Raincoat", emoji: "🐥", unlock_level: 12 },
        CostumeInfo { id: "wizard", name: "Wizard Robe", emoji: "🧙", unlock_level: 16 },
        CostumeInfo { id: "crown", name: "Golden Crown", emoji: "👑", unlock_level: 20 },
    ]
}

/// Companion character progression state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpoomCharacter {
    /// Current level (1..=MAX_LEVEL)
    pub level: u32,
    /// Experience within the current level. Always below the current
    /// level's requirement, except at max level where it is capped at it.
    pub exp: u32,
    /// Currently equipped costume id
    pub equipped_costume_id: String,
    /// Ids of unlocked costumes
    pub unlocked_costume_ids: BTreeSet<String>,
}

impl Default for PpoomCharacter {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of an experience grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelUpResult {
    /// Updated character state
    pub character: PpoomCharacter,
    /// Whether at least one level was gained
    pub leveled_up: bool,
    /// Level after the grant
    pub new_level: u32,
    /// Experience granted
    pub exp_gained: u32,
    /// Costumes unlocked by this grant, in catalog order
    pub unlocked_costumes: Vec<String>,
}

impl PpoomCharacter {
    /// Fresh level-1 character with the default costume.
    pub fn new() -> Self {
        let mut unlocked = BTreeSet::new();
        unlocked.insert("default".to_string());
        Self {
            level: 1,
            exp: 0,
            equipped_costume_id: "default".to_string(),
            unlocked_costume_ids: unlocked,
        }
    }

    /// Grant experience, carrying levels as thresholds are crossed.
    ///
    /// Supports multi-level jumps in one call. At max level, exp is capped
    /// at the max-level requirement and never accumulates past it.
    pub fn add_exp(&self, amount: u32) -> LevelUpResult {
        let mut level = self.level;
        let mut exp = self.exp.saturating_add(amount);

        while level < MAX_LEVEL && exp >= required_exp(level) {
            exp -= required_exp(level);
            level += 1;
        }
        if level == MAX_LEVEL {
            exp = exp.min(required_exp(MAX_LEVEL));
        }

        let leveled_up = level > self.level;
        let mut character = self.clone();
        character.level = level;
        character.exp = exp;

        let unlocked_costumes: Vec<String> = costume_catalog()
            .iter()
            .filter(|c| c.unlock_level > self.level && c.unlock_level <= level)
            .map(|c| c.id.to_string())
            .collect();
        for id in &unlocked_costumes {
            character.unlocked_costume_ids.insert(id.clone());
        }

        LevelUpResult {
            character,
            leveled_up,
            new_level: level,
            exp_gained: amount,
            unlocked_costumes,
        }
    }

    /// Progress through the current level, in [0, 1]. Always 1.0 at max
    /// level, for UI gauges.
    pub fn exp_progress(&self) -> f64 {
        if self.level >= MAX_LEVEL {
            return 1.0;
        }
        (self.exp as f64 / required_exp(self.level) as f64).clamp(0.0, 1.0)
    }

    /// Equip an unlocked costume.
    pub fn equip_costume(&self, costume_id: &str) -> Result<Self, ValidationError> {
        if !self.unlocked_costume_ids.contains(costume_id) {
            return Err(ValidationError::InvalidValue {
                field: "costume_id".to_string(),
                message: format!("'{costume_id}' is not unlocked"),
            });
        }
        let mut character = self.clone();
        character.equipped_costume_id = costume_id.to_string();
        Ok(character)
    }
}
