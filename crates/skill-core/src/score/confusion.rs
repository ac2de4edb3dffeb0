//! Simple and subject-weighted confusion matrices
//!
//! Rows are true classes, columns chosen classes. Both matrices are indexed
//! by the same [`ClassVocabulary`]; the simple one counts outcomes, the
//! weighted one sums their difficulty weights.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::matcher::{LabeledOutcome, BINARY_FALSE, BINARY_TRUE};
use crate::config::Mode;

/// Ordered class labels indexing the confusion matrices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassVocabulary {
    classes: Vec<String>,
}

impl ClassVocabulary {
    /// Fixed `["True", "False"]` vocabulary of binary mode
    pub fn binary() -> Self {
        Self {
            classes: vec![BINARY_TRUE.to_string(), BINARY_FALSE.to_string()],
        }
    }

    /// Discover the vocabulary of a k-class batch: every true and chosen
    /// label, sorted and deduplicated, followed by the null class.
    ///
    /// Many-to-many always carries the null class. One-to-one only needs it
    /// when some judgment made no choice.
    pub fn discover(mode: Mode, outcomes: &[LabeledOutcome], null_class: &str) -> Self {
        if !mode.is_k_class() {
            return Self::binary();
        }

        let mut uses_null = mode == Mode::ManyToMany;
        let mut classes: Vec<String> = Vec::new();
        for label in outcomes
            .iter()
            .flat_map(|o| [o.true_label.as_str(), o.chosen_label.as_str()])
        {
            if label == null_class {
                uses_null = true;
            } else {
                classes.push(label.to_string());
            }
        }
        classes.sort();
        classes.dedup();

        if uses_null {
            classes.push(null_class.to_string());
        }
        Self { classes }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.classes
    }

    pub fn into_vec(self) -> Vec<String> {
        self.classes
    }
}

/// Simple and weighted confusion matrices over one vocabulary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrices {
    pub classes: ClassVocabulary,
    /// Outcome counts
    pub simple: Vec<Vec<u64>>,
    /// Sums of difficulty weights
    pub weighted: Vec<Vec<f64>>,
}

impl ConfusionMatrices {
    pub fn simple_row_sum(&self, row: usize) -> u64 {
        self.simple[row].iter().sum()
    }

    pub fn weighted_row_sum(&self, row: usize) -> f64 {
        self.weighted[row].iter().sum()
    }

    pub fn simple_diagonal(&self, row: usize) -> u64 {
        self.simple[row][row]
    }

    pub fn weighted_diagonal(&self, row: usize) -> f64 {
        self.weighted[row][row]
    }

    /// Total number of recorded outcomes
    pub fn total(&self) -> u64 {
        self.simple.iter().flatten().sum()
    }
}

/// Accumulates outcomes into a pair of confusion matrices
#[derive(Debug)]
pub struct ConfusionMatrixBuilder {
    classes: ClassVocabulary,
    index: AHashMap<String, usize>,
    simple: Vec<Vec<u64>>,
    weighted: Vec<Vec<f64>>,
}

impl ConfusionMatrixBuilder {
    pub fn new(classes: ClassVocabulary) -> Self {
        let n = classes.len();
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.to_string(), i))
            .collect();
        Self {
            classes,
            index,
            simple: vec![vec![0; n]; n],
            weighted: vec![vec![0.0; n]; n],
        }
    }

    /// Add one outcome. Returns `false` (and records nothing) when either
    /// label is outside the vocabulary.
    pub fn record(&mut self, outcome: &LabeledOutcome) -> bool {
        let (Some(&row), Some(&col)) = (
            self.index.get(outcome.true_label.as_str()),
            self.index.get(outcome.chosen_label.as_str()),
        ) else {
            return false;
        };
        self.simple[row][col] += 1;
        self.weighted[row][col] += outcome.weight;
        true
    }

    /// Add every outcome, returning how many landed in the matrices
    pub fn extend<'a>(
        &mut self,
        outcomes: impl IntoIterator<Item = &'a LabeledOutcome>,
    ) -> usize {
        outcomes
            .into_iter()
            .filter(|outcome| self.record(outcome))
            .count()
    }

    pub fn build(self) -> ConfusionMatrices {
        ConfusionMatrices {
            classes: self.classes,
            simple: self.simple,
            weighted: self.weighted,
        }
    }

    /// Discover the vocabulary for `mode` and accumulate every outcome
    pub fn from_outcomes(
        mode: Mode,
        outcomes: &[LabeledOutcome],
        null_class: &str,
    ) -> ConfusionMatrices {
        let mut builder = Self::new(ClassVocabulary::discover(mode, outcomes, null_class));
        let recorded = builder.extend(outcomes);
        // the vocabulary is discovered from these same outcomes
        debug_assert_eq!(recorded, outcomes.len(), "outcome outside the discovered vocabulary");
        builder.build()
    }
}
