//! Contributor Skill Scoring
//!
//! This crate estimates how reliably a contributor classifies subjects, by
//! comparing their judgments against gold-standard answers. Agreement is
//! weighted by how hard each subject has historically been, and the
//! per-class skill feeds a level-up decision.
//!
//! Scoring is a pure function of its inputs. It keeps no state between
//! calls and is safe to run from many threads at once.
//!
//! # Example
//!
//! ```rust
//! use skill_core::{user_skill_reducer, DifficultyRecord, JudgmentBuilder, Mode, SkillConfig};
//!
//! let judgment = JudgmentBuilder::new()
//!     .truth("surveySimple", ["CAT", "DOG"])
//!     .choose("cat")
//!     .build();
//! let config = SkillConfig::default().with_mode(Mode::ManyToMany);
//!
//! let result = user_skill_reducer(&[judgment], &[DifficultyRecord::new([0.5])], &config).unwrap();
//! assert_eq!(result.classes, vec!["cat", "dog", "NONE"]);
//! assert_eq!(result.count["dog"], 1);
//! ```

pub mod config;
pub mod error;
pub mod judgment;
pub mod score;

// Re-export main types at crate root
pub use config::{LevelUpStrategy, Mode, ReducerConfig, SkillConfig, USER_SKILL_REDUCER};
pub use error::{ConfigError, DataShapeError, ScoreResult, SkillError};
pub use judgment::{DifficultyRecord, Feedback, Judgment, JudgmentBuilder};
pub use score::{
    reduce_user_skill_json, user_skill_reducer, ClassSkills, ClassVocabulary, ConfusionMatrices,
    DifficultyWeights, LabelMatcher, LabeledOutcome, LevelUpDecision, LevelUpPolicy,
    SkillResult, DIFFICULTY_FLOOR,
};
