//! Skill scoring error types

use thiserror::Error;

/// Rejected configuration. Raised before any judgment is looked at.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Mode string is not one of `binary`, `one-to-one`, `many-to-many`
    #[error("unknown mode '{0}', expected one of: binary, one-to-one, many-to-many")]
    UnknownMode(String),

    /// Strategy string is not one of `mean`, `all`
    #[error("unknown level-up strategy '{0}', expected one of: mean, all")]
    UnknownStrategy(String),

    /// Skill threshold must be a finite value in [0, 1]
    #[error("skill threshold {0} is outside [0, 1]")]
    SkillThresholdOutOfRange(f64),

    /// The null class token cannot be empty
    #[error("null class token is empty")]
    EmptyNullClass,

    /// A reducer config file must name exactly one reducer
    #[error("there must be exactly one reducer in the config, found {0}")]
    ReducerCount(usize),

    /// The reducer named in the config does not exist
    #[error("reducer '{0}' does not exist")]
    UnknownReducer(String),

    /// Malformed configuration document
    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// Judgment or difficulty batch that cannot be scored without biasing the result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataShapeError {
    /// Judgment and difficulty batches must be positionally aligned
    #[error("batch length mismatch: {judgments} judgments but {difficulties} difficulty records")]
    LengthMismatch {
        judgments: usize,
        difficulties: usize,
    },

    /// Judgment has no feedback block
    #[error("judgment {index} has no feedback block")]
    MissingFeedback { index: usize },

    /// Feedback block lacks the field required by the selected mode
    #[error("judgment {index} feedback is missing '{field}'")]
    MissingField { index: usize, field: String },

    /// Feedback strategy has no known answer key
    #[error("judgment {index} uses unknown feedback strategy '{strategy}'")]
    UnknownFeedbackStrategy { index: usize, strategy: String },

    /// Binary success values must be 0 or 1
    #[error("judgment {index} has success value {value}, expected 0 or 1")]
    InvalidSuccess { index: usize, value: String },

    /// Gold-standard labels must be strings or numbers
    #[error("judgment {index} feedback '{field}' holds a non-label value {value}")]
    InvalidLabel {
        index: usize,
        field: String,
        value: String,
    },

    /// Subject has no difficulty measurements to average
    #[error("difficulty record {index} is empty")]
    EmptyDifficulty { index: usize },

    /// Raw difficulty must be a finite value in [0, 1]
    #[error("difficulty record {index} has value {value} outside [0, 1]")]
    DifficultyOutOfRange { index: usize, value: f64 },

    /// One-to-one judgments carry exactly one true label and at most one choice
    #[error(
        "judgment {index} has {true_labels} true labels and {chosen_labels} chosen labels, \
         one-to-one mode expects exactly 1 and at most 1"
    )]
    OneToOneArity {
        index: usize,
        true_labels: usize,
        chosen_labels: usize,
    },
}

/// Any fatal condition raised while scoring a batch
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkillError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("data shape error: {0}")]
    DataShape(#[from] DataShapeError),
}

/// Result type for skill scoring operations
pub type ScoreResult<T> = Result<T, SkillError>;
