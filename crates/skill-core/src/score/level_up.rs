//! Level-up decision
//!
//! The negative class (`False` in binary mode, the null class otherwise) is
//! left out; every remaining class must have been seen as a true label at
//! least `count_threshold` times, and skill must clear `skill_threshold`
//! either on average (`mean`) or for each class (`all`).

use serde::{Deserialize, Serialize};

use super::confusion::ClassVocabulary;
use super::matcher::BINARY_FALSE;
use super::skill::{ClassSkills, SKILL_EPSILON};
use crate::config::{LevelUpStrategy, Mode, SkillConfig};

/// Outcome of the level-up rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelUpDecision {
    /// Mean weighted skill over the non-negative classes
    pub mean_skill: f64,
    pub level_up: bool,
    /// Non-negative classes never observed as a true label
    pub degenerate_classes: Vec<String>,
}

/// Thresholds and strategy applied to per-class skill
#[derive(Debug, Clone)]
pub struct LevelUpPolicy {
    strategy: LevelUpStrategy,
    skill_threshold: f64,
    count_threshold: u64,
    negative_class: String,
}

impl LevelUpPolicy {
    pub fn new(
        strategy: LevelUpStrategy,
        skill_threshold: f64,
        count_threshold: u64,
        negative_class: impl Into<String>,
    ) -> Self {
        Self {
            strategy,
            skill_threshold,
            count_threshold,
            negative_class: negative_class.into(),
        }
    }

    pub fn from_config(config: &SkillConfig) -> Self {
        let negative = match config.mode {
            Mode::Binary => BINARY_FALSE.to_string(),
            Mode::OneToOne | Mode::ManyToMany => config.null_class.clone(),
        };
        Self::new(
            config.strategy,
            config.skill_threshold,
            config.count_threshold,
            negative,
        )
    }

    pub fn decide(&self, classes: &ClassVocabulary, skills: &ClassSkills) -> LevelUpDecision {
        let considered: Vec<&str> = classes
            .iter()
            .filter(|c| *c != self.negative_class)
            .collect();

        let mean_skill = considered
            .iter()
            .map(|c| skills.weighted_skill_of(c))
            .sum::<f64>()
            / (considered.len() as f64 + SKILL_EPSILON);

        let enough_volume = considered
            .iter()
            .all(|c| skills.count_of(c) >= self.count_threshold);

        // with no class to check, `all` falls back to the mean (0) so it
        // never passes where `mean` fails
        let skilled = match self.strategy {
            LevelUpStrategy::All if !considered.is_empty() => considered
                .iter()
                .all(|c| skills.weighted_skill_of(c) >= self.skill_threshold),
            LevelUpStrategy::Mean | LevelUpStrategy::All => mean_skill >= self.skill_threshold,
        };

        let degenerate_classes = considered
            .iter()
            .filter(|c| skills.count_of(c) == 0)
            .map(|c| c.to_string())
            .collect();

        LevelUpDecision {
            mean_skill,
            level_up: skilled && enough_volume,
            degenerate_classes,
        }
    }
}
