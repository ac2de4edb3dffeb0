//! Skill Scoring
//!
//! Turns a contributor's gold-standard judgments into per-class skill and a
//! level-up flag:
//!
//! ```text
//! judgments + difficulty -> LabelMatcher -> ConfusionMatrixBuilder
//!                        -> ClassSkills -> LevelUpPolicy -> SkillResult
//! ```
//!
//! - **Difficulty weighting**: inverted, floor-clamped subject difficulty
//! - **Matching**: binary, one-to-one or many-to-many comparison per judgment
//! - **Confusion**: simple and difficulty-weighted matrices over the class vocabulary
//! - **Skill**: diagonal over row sum per class
//! - **Level-up**: `mean` or `all` strategy over the non-negative classes
//!
//! # Example
//!
//! ```rust
//! use skill_core::config::SkillConfig;
//! use skill_core::judgment::{DifficultyRecord, JudgmentBuilder};
//! use skill_core::score::user_skill_reducer;
//!
//! let judgments = vec![JudgmentBuilder::new().success([true]).build()];
//! let difficulties = vec![DifficultyRecord::new([0.2])];
//!
//! let result = user_skill_reducer(&judgments, &difficulties, &SkillConfig::default()).unwrap();
//! assert_eq!(result.confusion_simple, vec![vec![1, 0], vec![0, 0]]);
//! assert_eq!(result.count["True"], 1);
//! assert!(!result.level_up);
//! ```

pub mod confusion;
pub mod difficulty;
pub mod level_up;
pub mod matcher;
pub mod reducer;
mod skill;

pub use confusion::{ClassVocabulary, ConfusionMatrices, ConfusionMatrixBuilder};
pub use difficulty::{DifficultyWeights, DIFFICULTY_FLOOR};
pub use level_up::{LevelUpDecision, LevelUpPolicy};
pub use matcher::{LabelMatcher, LabeledOutcome, BINARY_FALSE, BINARY_TRUE};
pub use reducer::{reduce_user_skill_json, user_skill_reducer, ReduceInput, SkillResult};
pub use skill::{ClassSkills, SKILL_EPSILON};
