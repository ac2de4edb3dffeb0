//! Reducer configuration
//!
//! Keyword arguments arrive as loosely typed JSON (`"mode": "one-to-one"`).
//! They are parsed into [`SkillConfig`] and validated up front, so an unknown
//! mode or strategy never reaches the scoring code.
//!
//! ```rust
//! use skill_core::config::{Mode, ReducerConfig};
//!
//! let config = ReducerConfig::from_json(
//!     r#"{"reducer_config": {"user_skill_reducer": {"mode": "many-to-many"}}}"#,
//! )
//! .unwrap();
//! assert_eq!(config.skill.mode, Mode::ManyToMany);
//! assert_eq!(config.skill.null_class, "NONE");
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name under which this reducer is registered in reducer config files
pub const USER_SKILL_REDUCER: &str = "user_skill_reducer";

/// Reducers this crate can run
const KNOWN_REDUCERS: &[&str] = &[USER_SKILL_REDUCER];

pub const DEFAULT_NULL_CLASS: &str = "NONE";
pub const DEFAULT_SKILL_THRESHOLD: f64 = 0.7;
pub const DEFAULT_COUNT_THRESHOLD: u64 = 10;

/// How judgments are compared against the gold standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Success/failure per task, fixed `True`/`False` classes
    #[default]
    Binary,
    /// One true label, at most one chosen label
    OneToOne,
    /// Any number of true and chosen labels, compared per class
    ManyToMany,
}

impl Mode {
    /// Whether labels are case-folded and the null class applies
    pub fn is_k_class(&self) -> bool {
        !matches!(self, Self::Binary)
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(Self::Binary),
            "one-to-one" => Ok(Self::OneToOne),
            "many-to-many" => Ok(Self::ManyToMany),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binary => write!(f, "binary"),
            Self::OneToOne => write!(f, "one-to-one"),
            Self::ManyToMany => write!(f, "many-to-many"),
        }
    }
}

/// Rule combining per-class skill into the level-up flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LevelUpStrategy {
    /// Mean weighted skill over the non-null classes
    #[default]
    Mean,
    /// Every non-null class individually
    All,
}

impl FromStr for LevelUpStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(Self::Mean),
            "all" => Ok(Self::All),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

impl std::fmt::Display for LevelUpStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mean => write!(f, "mean"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Validated scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_null_class")]
    pub null_class: String,
    #[serde(default = "default_skill_threshold")]
    pub skill_threshold: f64,
    #[serde(default = "default_count_threshold")]
    pub count_threshold: u64,
    #[serde(default)]
    pub strategy: LevelUpStrategy,
}

fn default_null_class() -> String {
    DEFAULT_NULL_CLASS.to_string()
}
fn default_skill_threshold() -> f64 {
    DEFAULT_SKILL_THRESHOLD
}
fn default_count_threshold() -> u64 {
    DEFAULT_COUNT_THRESHOLD
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            null_class: default_null_class(),
            skill_threshold: default_skill_threshold(),
            count_threshold: default_count_threshold(),
            strategy: LevelUpStrategy::default(),
        }
    }
}

impl SkillConfig {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_strategy(mut self, strategy: LevelUpStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_thresholds(mut self, skill_threshold: f64, count_threshold: u64) -> Self {
        self.skill_threshold = skill_threshold;
        self.count_threshold = count_threshold;
        self
    }

    pub fn with_null_class(mut self, null_class: impl Into<String>) -> Self {
        self.null_class = null_class.into();
        self
    }

    /// Check value ranges. Enum fields are valid by construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.skill_threshold.is_finite() || !(0.0..=1.0).contains(&self.skill_threshold) {
            return Err(ConfigError::SkillThresholdOutOfRange(self.skill_threshold));
        }
        if self.null_class.is_empty() {
            return Err(ConfigError::EmptyNullClass);
        }
        Ok(())
    }

    /// Parse reducer keywords (`{"mode": "binary", "strategy": "all", ...}`)
    /// into a validated config.
    pub fn from_keywords(keywords: serde_json::Value) -> Result<Self, ConfigError> {
        let raw: SkillKeywords = if keywords.is_null() {
            SkillKeywords::default()
        } else {
            serde_json::from_value(keywords).map_err(|e| ConfigError::Parse(e.to_string()))?
        };

        let config = Self {
            mode: raw
                .mode
                .as_deref()
                .map(str::parse::<Mode>)
                .transpose()?
                .unwrap_or_default(),
            null_class: raw.null_class.unwrap_or_else(default_null_class),
            skill_threshold: raw.skill_threshold.unwrap_or(DEFAULT_SKILL_THRESHOLD),
            count_threshold: raw.count_threshold.unwrap_or(DEFAULT_COUNT_THRESHOLD),
            strategy: raw
                .strategy
                .as_deref()
                .map(str::parse::<LevelUpStrategy>)
                .transpose()?
                .unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Reducer keywords before mode and strategy strings are checked
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SkillKeywords {
    mode: Option<String>,
    null_class: Option<String>,
    skill_threshold: Option<f64>,
    count_threshold: Option<u64>,
    strategy: Option<String>,
}

/// A reducer config file: exactly one registered reducer plus its keywords
#[derive(Debug, Clone, PartialEq)]
pub struct ReducerConfig {
    pub reducer: String,
    pub skill: SkillConfig,
}

#[derive(Debug, Deserialize)]
struct ReducerConfigFile {
    reducer_config: BTreeMap<String, serde_json::Value>,
}

impl ReducerConfig {
    /// Load `{"reducer_config": {"<name>": {...keywords...}}}`.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let file: ReducerConfigFile =
            serde_json::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if file.reducer_config.len() != 1 {
            return Err(ConfigError::ReducerCount(file.reducer_config.len()));
        }
        let Some((reducer, keywords)) = file.reducer_config.into_iter().next() else {
            return Err(ConfigError::ReducerCount(0));
        };
        if !KNOWN_REDUCERS.contains(&reducer.as_str()) {
            return Err(ConfigError::UnknownReducer(reducer));
        }

        let skill = SkillConfig::from_keywords(keywords)?;
        Ok(Self { reducer, skill })
    }
}
