//! Player skills: training, experience growth, seeded skill checks.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;

/// The fixed skill catalog: name and player-facing description.
pub const SKILL_CATALOG: &[(&str, &str)] = &[
    ("magic", "Ability to understand and use magical items"),
    ("negotiation", "Effectiveness in bartering and conversations"),
    ("exploration", "Skill at finding hidden paths and secrets"),
    ("crafting", "Ability to create and enhance magical items"),
    ("lore", "Knowledge of local history and mysteries"),
];

/// Experience granted by one training session.
pub const TRAINING_EXPERIENCE: u32 = 10;

/// Threshold growth factor applied on level-up.
const LEVEL_GROWTH: f32 = 1.5;

/// Experience needed for the first level-up.
const BASE_THRESHOLD: u32 = 100;

/// Progress state of a single skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillLevel {
    /// Current level, starting at 1.
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub experience: u32,
    /// Experience required for the next level.
    pub next_level: u32,
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            next_level: BASE_THRESHOLD,
        }
    }
}

impl SkillLevel {
    /// Add experience; returns true when this pushed the skill over a level
    /// threshold. Surplus experience carries into the new level.
    pub fn add_experience(&mut self, amount: u32) -> bool {
        self.experience += amount;
        if self.experience >= self.next_level {
            self.level += 1;
            self.experience -= self.next_level;
            self.next_level = (self.next_level as f32 * LEVEL_GROWTH) as u32;
            true
        } else {
            false
        }
    }
}

/// Outcome of one training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainResult {
    /// Whether the session caused a level-up.
    pub leveled: bool,
    /// The skill's level after training.
    pub level: u32,
}

/// The player's skills, keyed by catalog name.
#[derive(Debug, Clone, Default)]
pub struct SkillSet {
    levels: HashMap<String, SkillLevel>,
}

impl SkillSet {
    /// Empty skill set; every catalog skill starts at level 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is in the skill catalog.
    pub fn is_known(name: &str) -> bool {
        SKILL_CATALOG.iter().any(|(n, _)| *n == name)
    }

    /// Catalog description for a skill.
    pub fn description(name: &str) -> Option<&'static str> {
        SKILL_CATALOG
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, d)| *d)
    }

    /// Current level of a skill; 0 for names outside the catalog.
    pub fn level(&self, name: &str) -> u32 {
        if !Self::is_known(name) {
            return 0;
        }
        self.levels.get(name).map_or(1, |s| s.level)
    }

    /// Full progress state of a catalog skill.
    pub fn progress(&self, name: &str) -> Option<SkillLevel> {
        if !Self::is_known(name) {
            return None;
        }
        Some(self.levels.get(name).copied().unwrap_or_default())
    }

    /// Train a skill, granting [`TRAINING_EXPERIENCE`]. None for unknown
    /// skills.
    pub fn train(&mut self, name: &str) -> Option<TrainResult> {
        if !Self::is_known(name) {
            return None;
        }
        let skill = self.levels.entry(name.to_string()).or_default();
        let leveled = skill.add_experience(TRAINING_EXPERIENCE);
        Some(TrainResult {
            leveled,
            level: skill.level,
        })
    }

    /// Roll a skill check against `difficulty`. Success chance is
    /// `level / difficulty * 0.8`, clamped to [0.05, 0.95]; success grants
    /// experience proportional to how hard the check was. None for unknown
    /// skills.
    pub fn check(&mut self, name: &str, difficulty: u32, rng: &mut StdRng) -> Option<bool> {
        if !Self::is_known(name) {
            return None;
        }
        let level = self.level(name);
        let chance = (level as f32 / difficulty.max(1) as f32 * 0.8).clamp(0.05, 0.95);
        let success = rng.random::<f32>() < chance;
        if success {
            let reward = difficulty.saturating_sub(level).max(1);
            self.levels
                .entry(name.to_string())
                .or_default()
                .add_experience(reward);
        }
        Some(success)
    }

    /// Every catalog skill with its progress, in catalog order.
    pub fn all(&self) -> Vec<(&'static str, &'static str, SkillLevel)> {
        SKILL_CATALOG
            .iter()
            .map(|(name, description)| {
                let progress = self.levels.get(*name).copied().unwrap_or_default();
                (*name, *description, progress)
            })
            .collect()
    }
}
