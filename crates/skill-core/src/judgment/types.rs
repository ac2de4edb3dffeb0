//! Judgment and difficulty record definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::feedback;
use crate::error::DataShapeError;

/// One contributor's classification of one subject.
///
/// Class indicators sit at the top level next to the feedback block:
/// `{"cat": 1, "dog": 0, "feedback": {...}}`. Keys whose value is not an
/// integer or boolean (version tags and the like) are carried but ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    /// Gold-standard comparison data attached by the extractor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,

    /// Class indicators and any other extract fields
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl Judgment {
    /// Labels the contributor selected (indicator `1` or `true`), as written
    pub fn chosen_labels(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, value)| is_selected(value))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Feedback block, or a data error naming the judgment
    pub fn feedback_at(&self, index: usize) -> Result<&Feedback, DataShapeError> {
        self.feedback
            .as_ref()
            .ok_or(DataShapeError::MissingFeedback { index })
    }
}

fn is_selected(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Number(n) => n.as_i64() == Some(1),
        serde_json::Value::Bool(b) => *b,
        _ => false,
    }
}

/// A single success entry; extractors emit either `1`/`0` or `true`/`false`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuccessFlag {
    Flag(bool),
    Int(i64),
}

impl SuccessFlag {
    /// `None` for integers other than 0 and 1
    pub fn as_success(&self) -> Option<bool> {
        match *self {
            Self::Flag(b) => Some(b),
            Self::Int(1) => Some(true),
            Self::Int(0) => Some(false),
            Self::Int(_) => None,
        }
    }
}

impl std::fmt::Display for SuccessFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
        }
    }
}

/// Comparison of a judgment against the gold standard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Feedback strategy identifier, e.g. `surveySimple`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    /// Per-task outcome (binary mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<Vec<SuccessFlag>>,

    /// `true_<key>` gold-standard label lists and anything else the strategy attaches
    #[serde(flatten)]
    pub answers: BTreeMap<String, serde_json::Value>,
}

impl Feedback {
    /// Binary outcomes, validated to 0/1
    pub fn successes(&self, index: usize) -> Result<Vec<bool>, DataShapeError> {
        let success = self
            .success
            .as_ref()
            .ok_or_else(|| DataShapeError::MissingField {
                index,
                field: "success".to_string(),
            })?;

        success
            .iter()
            .map(|flag| {
                flag.as_success().ok_or_else(|| DataShapeError::InvalidSuccess {
                    index,
                    value: flag.to_string(),
                })
            })
            .collect()
    }

    /// Gold-standard labels under `true_<key>` for this feedback's strategy, as written
    pub fn true_labels(&self, index: usize) -> Result<Vec<String>, DataShapeError> {
        let strategy = self
            .strategy
            .as_deref()
            .ok_or_else(|| DataShapeError::MissingField {
                index,
                field: "strategy".to_string(),
            })?;
        let key = feedback::true_key(strategy).ok_or_else(|| {
            DataShapeError::UnknownFeedbackStrategy {
                index,
                strategy: strategy.to_string(),
            }
        })?;

        let values = match self.answers.get(&key) {
            Some(serde_json::Value::Array(values)) => values.as_slice(),
            Some(single) => std::slice::from_ref(single),
            None => return Err(DataShapeError::MissingField { index, field: key }),
        };

        values
            .iter()
            .map(|value| match value {
                serde_json::Value::String(s) => Ok(s.clone()),
                serde_json::Value::Number(n) => Ok(n.to_string()),
                other => Err(DataShapeError::InvalidLabel {
                    index,
                    field: key.clone(),
                    value: other.to_string(),
                }),
            })
            .collect()
    }
}

/// Historical success rates for one subject, aligned with the judgment batch.
///
/// Accepts both `{"difficulty": [...]}` and the upstream reducer shape
/// `{"data": {"difficulty": [...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDifficultyRecord")]
pub struct DifficultyRecord {
    pub difficulty: Vec<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDifficultyRecord {
    Flat { difficulty: Vec<f64> },
    Wrapped { data: DifficultyData },
}

#[derive(Deserialize)]
struct DifficultyData {
    difficulty: Vec<f64>,
}

impl From<RawDifficultyRecord> for DifficultyRecord {
    fn from(raw: RawDifficultyRecord) -> Self {
        match raw {
            RawDifficultyRecord::Flat { difficulty } => Self { difficulty },
            RawDifficultyRecord::Wrapped { data } => Self {
                difficulty: data.difficulty,
            },
        }
    }
}

impl DifficultyRecord {
    pub fn new(difficulty: impl IntoIterator<Item = f64>) -> Self {
        Self {
            difficulty: difficulty.into_iter().collect(),
        }
    }

    /// Mean raw difficulty of the subject. Every value must lie in [0, 1].
    pub fn mean(&self, index: usize) -> Result<f64, DataShapeError> {
        if self.difficulty.is_empty() {
            return Err(DataShapeError::EmptyDifficulty { index });
        }
        if let Some(&value) = self
            .difficulty
            .iter()
            .find(|v| !v.is_finite() || !(0.0..=1.0).contains(*v))
        {
            return Err(DataShapeError::DifficultyOutOfRange { index, value });
        }
        Ok(self.difficulty.iter().sum::<f64>() / self.difficulty.len() as f64)
    }
}

/// Builder for judgments, mostly for tests and callers assembling records by hand
#[derive(Debug, Default)]
pub struct JudgmentBuilder {
    judgment: Judgment,
}

impl JudgmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a class as selected
    pub fn choose(mut self, label: impl Into<String>) -> Self {
        self.judgment.fields.insert(label.into(), 1.into());
        self
    }

    /// Record a class as offered but not selected
    pub fn decline(mut self, label: impl Into<String>) -> Self {
        self.judgment.fields.insert(label.into(), 0.into());
        self
    }

    pub fn strategy(mut self, strategy: impl Into<String>) -> Self {
        self.feedback_mut().strategy = Some(strategy.into());
        self
    }

    pub fn success(mut self, outcomes: impl IntoIterator<Item = bool>) -> Self {
        self.feedback_mut().success = Some(
            outcomes
                .into_iter()
                .map(|ok| SuccessFlag::Int(i64::from(ok)))
                .collect(),
        );
        self
    }

    /// Gold-standard labels under `true_<key>` for the given strategy
    pub fn truth(
        mut self,
        strategy: &str,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let key = feedback::true_key(strategy).unwrap_or_else(|| format!("true_{}", strategy));
        let labels: Vec<serde_json::Value> = labels
            .into_iter()
            .map(|l| serde_json::Value::String(l.into()))
            .collect();
        let fb = self.feedback_mut();
        fb.strategy = Some(strategy.to_string());
        fb.answers.insert(key, serde_json::Value::Array(labels));
        self
    }

    pub fn build(self) -> Judgment {
        self.judgment
    }

    fn feedback_mut(&mut self) -> &mut Feedback {
        self.judgment.feedback.get_or_insert_with(Feedback::default)
    }
}
