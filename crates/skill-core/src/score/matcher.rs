//! Judgment -> (true label, chosen label, weight) comparisons
//!
//! Each mode reduces a judgment to one or more [`LabeledOutcome`]s:
//!
//! - **binary**: one outcome per `success` entry, always on the `True` row,
//!   chosen `True` on success and `False` on failure
//! - **one-to-one**: a single outcome pairing the true label with the chosen one
//! - **many-to-many**: one outcome per class in the union of true and chosen
//!   labels; a side that lacks the class contributes the null class instead
//!
//! Correct outcomes carry the subject's success weight, wrong ones its
//! failure weight (see [`DifficultyWeights`]).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::difficulty::DifficultyWeights;
use crate::config::{Mode, SkillConfig};
use crate::error::DataShapeError;
use crate::judgment::{DifficultyRecord, Judgment};

/// Positive class token in binary mode
pub const BINARY_TRUE: &str = "True";
/// Negative class token in binary mode
pub const BINARY_FALSE: &str = "False";

/// One cell contribution to the confusion matrices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledOutcome {
    pub true_label: String,
    pub chosen_label: String,
    pub weight: f64,
}

impl LabeledOutcome {
    pub fn new(true_label: impl Into<String>, chosen_label: impl Into<String>, weight: f64) -> Self {
        Self {
            true_label: true_label.into(),
            chosen_label: chosen_label.into(),
            weight,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.true_label == self.chosen_label
    }
}

/// Per-mode comparison of judgments against the gold standard
#[derive(Debug, Clone)]
pub struct LabelMatcher {
    mode: Mode,
    null_class: String,
}

impl LabelMatcher {
    pub fn new(mode: Mode, null_class: impl Into<String>) -> Self {
        Self {
            mode,
            null_class: null_class.into(),
        }
    }

    pub fn from_config(config: &SkillConfig) -> Self {
        Self::new(config.mode, config.null_class.clone())
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn null_class(&self) -> &str {
        &self.null_class
    }

    /// Compare a whole batch. Judgments and difficulty records must be the
    /// same length; index `i` of both describes the same subject.
    pub fn match_batch(
        &self,
        judgments: &[Judgment],
        difficulties: &[DifficultyRecord],
    ) -> Result<Vec<LabeledOutcome>, DataShapeError> {
        if judgments.len() != difficulties.len() {
            return Err(DataShapeError::LengthMismatch {
                judgments: judgments.len(),
                difficulties: difficulties.len(),
            });
        }

        let raw = difficulties
            .iter()
            .enumerate()
            .map(|(i, record)| record.mean(i))
            .collect::<Result<Vec<f64>, _>>()?;
        let weights = DifficultyWeights::from_raw(&raw);

        let mut outcomes = Vec::with_capacity(judgments.len());
        for (index, judgment) in judgments.iter().enumerate() {
            outcomes.extend(self.match_judgment(index, judgment, &weights)?);
        }

        debug!(
            mode = %self.mode,
            judgments = judgments.len(),
            outcomes = outcomes.len(),
            floor = weights.floor(),
            "matched judgment batch"
        );
        Ok(outcomes)
    }

    /// Compare one judgment, weighting with the batch's difficulty weights
    pub fn match_judgment(
        &self,
        index: usize,
        judgment: &Judgment,
        weights: &DifficultyWeights,
    ) -> Result<Vec<LabeledOutcome>, DataShapeError> {
        match self.mode {
            Mode::Binary => self.match_binary(index, judgment, weights),
            Mode::OneToOne => self
                .match_one_to_one(index, judgment, weights)
                .map(|outcome| vec![outcome]),
            Mode::ManyToMany => self.match_many_to_many(index, judgment, weights),
        }
    }

    fn match_binary(
        &self,
        index: usize,
        judgment: &Judgment,
        weights: &DifficultyWeights,
    ) -> Result<Vec<LabeledOutcome>, DataShapeError> {
        let successes = judgment.feedback_at(index)?.successes(index)?;

        Ok(successes
            .into_iter()
            .map(|ok| {
                let chosen = if ok { BINARY_TRUE } else { BINARY_FALSE };
                self.weighted(index, BINARY_TRUE, chosen, weights)
            })
            .collect())
    }

    fn match_one_to_one(
        &self,
        index: usize,
        judgment: &Judgment,
        weights: &DifficultyWeights,
    ) -> Result<LabeledOutcome, DataShapeError> {
        let (truth, chosen) = folded_labels(index, judgment)?;

        if truth.len() != 1 || chosen.len() > 1 {
            return Err(DataShapeError::OneToOneArity {
                index,
                true_labels: truth.len(),
                chosen_labels: chosen.len(),
            });
        }

        let true_label = truth.into_iter().next().unwrap_or_default();
        let chosen_label = chosen
            .into_iter()
            .next()
            .unwrap_or_else(|| self.null_class.clone());

        Ok(self.weighted(index, true_label, chosen_label, weights))
    }

    fn match_many_to_many(
        &self,
        index: usize,
        judgment: &Judgment,
        weights: &DifficultyWeights,
    ) -> Result<Vec<LabeledOutcome>, DataShapeError> {
        let (truth, chosen) = folded_labels(index, judgment)?;
        let local: BTreeSet<&String> = truth.iter().chain(chosen.iter()).collect();

        Ok(local
            .into_iter()
            .map(|class| {
                let true_slot = self.slot(&truth, class);
                let chosen_slot = self.slot(&chosen, class);
                self.weighted(index, true_slot, chosen_slot, weights)
            })
            .collect())
    }

    /// Outcome carrying this mode's success or failure weight for subject `index`
    fn weighted(
        &self,
        index: usize,
        true_label: impl Into<String>,
        chosen_label: impl Into<String>,
        weights: &DifficultyWeights,
    ) -> LabeledOutcome {
        let mut outcome = LabeledOutcome::new(true_label, chosen_label, 0.0);
        outcome.weight = weights.for_outcome(self.mode, index, outcome.is_correct());
        outcome
    }

    /// The class itself if this side has it, otherwise the null class
    fn slot<'a>(&'a self, side: &BTreeSet<String>, class: &'a str) -> &'a str {
        if side.contains(class) {
            class
        } else {
            &self.null_class
        }
    }
}

/// Case-folded, deduplicated true and chosen labels of a k-class judgment
fn folded_labels(
    index: usize,
    judgment: &Judgment,
) -> Result<(BTreeSet<String>, BTreeSet<String>), DataShapeError> {
    let truth = judgment
        .feedback_at(index)?
        .true_labels(index)?
        .iter()
        .map(|l| l.to_lowercase())
        .collect();
    let chosen = judgment
        .chosen_labels()
        .into_iter()
        .map(str::to_lowercase)
        .collect();
    Ok((truth, chosen))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judgment::JudgmentBuilder;
    use crate::score::difficulty::DIFFICULTY_FLOOR;
    use pretty_assertions::assert_eq;

    fn survey(truth: &[&str], chosen: &[&str]) -> Judgment {
        let mut builder = JudgmentBuilder::new().truth("surveySimple", truth.iter().copied());
        for c in chosen {
            builder = builder.choose(*c);
        }
        builder.build()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn binary_success_and_failure() {
        let matcher = LabelMatcher::new(Mode::Binary, "NONE");
        let judgments = vec![JudgmentBuilder::new().success([true, false]).build()];
        let difficulties = vec![DifficultyRecord::new([0.2])];

        let outcomes = matcher.match_batch(&judgments, &difficulties).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].true_label, "True");
        assert_eq!(outcomes[0].chosen_label, "True");
        assert!(approx(outcomes[0].weight, 0.8));
        assert_eq!(outcomes[1].true_label, "True");
        assert_eq!(outcomes[1].chosen_label, "False");
        assert!(approx(outcomes[1].weight, 0.2));
    }

    #[test]
    fn binary_requires_success() {
        let matcher = LabelMatcher::new(Mode::Binary, "NONE");
        let judgments = vec![survey(&["cat"], &["cat"])];
        let err = matcher
            .match_batch(&judgments, &[DifficultyRecord::new([0.5])])
            .unwrap_err();
        assert_eq!(
            err,
            DataShapeError::MissingField {
                index: 0,
                field: "success".to_string()
            }
        );
    }

    #[test]
    fn length_mismatch_rejected() {
        let matcher = LabelMatcher::new(Mode::OneToOne, "NONE");
        let err = matcher
            .match_batch(&[survey(&["cat"], &["cat"])], &[])
            .unwrap_err();
        assert_eq!(
            err,
            DataShapeError::LengthMismatch {
                judgments: 1,
                difficulties: 0
            }
        );
    }

    #[test]
    fn missing_feedback_rejected() {
        let matcher = LabelMatcher::new(Mode::ManyToMany, "NONE");
        let judgments = vec![JudgmentBuilder::new().choose("cat").build()];
        let err = matcher
            .match_batch(&judgments, &[DifficultyRecord::new([0.5])])
            .unwrap_err();
        assert_eq!(err, DataShapeError::MissingFeedback { index: 0 });
    }

    #[test]
    fn one_to_one_case_folds_and_weights() {
        let matcher = LabelMatcher::new(Mode::OneToOne, "NONE");
        let judgments = vec![survey(&["CAT"], &["Cat"]), survey(&["DOG"], &["cat"])];
        let difficulties = vec![DifficultyRecord::new([0.4]), DifficultyRecord::new([0.3])];

        let outcomes = matcher.match_batch(&judgments, &difficulties).unwrap();
        assert_eq!(
            outcomes
                .iter()
                .map(|o| (o.true_label.as_str(), o.chosen_label.as_str()))
                .collect::<Vec<_>>(),
            vec![("cat", "cat"), ("dog", "cat")]
        );
        assert!(approx(outcomes[0].weight, 0.6));
        assert!(approx(outcomes[1].weight, 0.3));
    }

    #[test]
    fn one_to_one_without_choice_pairs_with_null() {
        let matcher = LabelMatcher::new(Mode::OneToOne, "NONE");
        let outcomes = matcher
            .match_batch(&[survey(&["cat"], &[])], &[DifficultyRecord::new([0.5])])
            .unwrap();
        assert_eq!(outcomes, vec![LabeledOutcome::new("cat", "NONE", 0.5)]);
    }

    #[test]
    fn one_to_one_arity_enforced() {
        let matcher = LabelMatcher::new(Mode::OneToOne, "NONE");
        let err = matcher
            .match_batch(
                &[survey(&["cat", "dog"], &["cat"])],
                &[DifficultyRecord::new([0.5])],
            )
            .unwrap_err();
        assert_eq!(
            err,
            DataShapeError::OneToOneArity {
                index: 0,
                true_labels: 2,
                chosen_labels: 1
            }
        );

        let err = matcher
            .match_batch(
                &[survey(&["cat"], &["cat", "dog"])],
                &[DifficultyRecord::new([0.5])],
            )
            .unwrap_err();
        assert!(matches!(err, DataShapeError::OneToOneArity { .. }));
    }

    #[test]
    fn many_to_many_emits_per_class_slots() {
        let matcher = LabelMatcher::new(Mode::ManyToMany, "NONE");
        let outcomes = matcher
            .match_batch(
                &[survey(&["cat", "dog"], &["cat", "owl"])],
                &[DifficultyRecord::new([0.25])],
            )
            .unwrap();

        assert_eq!(
            outcomes,
            vec![
                LabeledOutcome::new("cat", "cat", 0.75),
                LabeledOutcome::new("dog", "NONE", 0.25),
                LabeledOutcome::new("NONE", "owl", 0.25),
            ]
        );
    }

    #[test]
    fn many_to_many_declined_classes_ignored() {
        let matcher = LabelMatcher::new(Mode::ManyToMany, "NONE");
        let judgment = JudgmentBuilder::new()
            .truth("surveySimple", ["cat"])
            .choose("cat")
            .decline("dog")
            .build();
        let outcomes = matcher
            .match_batch(&[judgment], &[DifficultyRecord::new([0.5])])
            .unwrap();
        assert_eq!(outcomes, vec![LabeledOutcome::new("cat", "cat", 0.5)]);
    }

    #[test]
    fn one_to_one_failure_on_hardest_subject_weighs_floor() {
        let matcher = LabelMatcher::new(Mode::OneToOne, "NONE");
        let judgments = vec![survey(&["cat"], &["dog"]), survey(&["cat"], &["cat"])];
        let difficulties = vec![DifficultyRecord::new([0.0]), DifficultyRecord::new([0.5])];

        let outcomes = matcher.match_batch(&judgments, &difficulties).unwrap();
        assert_eq!(outcomes[0], LabeledOutcome::new("cat", "dog", DIFFICULTY_FLOOR));
        assert_eq!(outcomes[1], LabeledOutcome::new("cat", "cat", 0.5));
    }

    #[test]
    fn one_to_one_success_on_easy_subject_lifted_to_floor() {
        let matcher = LabelMatcher::new(Mode::OneToOne, "NONE");
        let outcomes = matcher
            .match_batch(&[survey(&["cat"], &["cat"])], &[DifficultyRecord::new([0.98])])
            .unwrap();
        assert_eq!(outcomes[0].weight, DIFFICULTY_FLOOR);
    }

    #[test]
    fn many_to_many_clamps_failures_only() {
        let matcher = LabelMatcher::new(Mode::ManyToMany, "NONE");
        let outcomes = matcher
            .match_batch(
                &[survey(&["cat"], &["dog"]), survey(&["cat"], &["cat"])],
                &[DifficultyRecord::new([0.0]), DifficultyRecord::new([0.98])],
            )
            .unwrap();

        assert_eq!(outcomes[0], LabeledOutcome::new("cat", "NONE", DIFFICULTY_FLOOR));
        assert_eq!(outcomes[1], LabeledOutcome::new("NONE", "dog", DIFFICULTY_FLOOR));
        // correct slot keeps the unclamped inverted weight
        assert!(approx(outcomes[2].weight, 0.02));
    }

    #[test]
    fn binary_failure_on_hardest_subject_takes_batch_floor() {
        let matcher = LabelMatcher::new(Mode::Binary, "NONE");
        let judgments = vec![
            JudgmentBuilder::new().success([false]).build(),
            JudgmentBuilder::new().success([true]).build(),
        ];
        let difficulties = vec![DifficultyRecord::new([0.0]), DifficultyRecord::new([0.5])];

        let outcomes = matcher.match_batch(&judgments, &difficulties).unwrap();
        assert!(approx(outcomes[0].weight, 0.5));
    }

    #[test]
    fn difficulty_errors_surface() {
        let matcher = LabelMatcher::new(Mode::ManyToMany, "NONE");
        let err = matcher
            .match_batch(&[survey(&["cat"], &["cat"])], &[DifficultyRecord::new([])])
            .unwrap_err();
        assert_eq!(err, DataShapeError::EmptyDifficulty { index: 0 });
    }
}
