//! Per-class skill from confusion matrices
//!
//! Skill of a class is the fraction of its true-row mass on the diagonal.
//! A class never seen as a true label has an empty row and scores zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::confusion::ConfusionMatrices;

/// Guards the row-sum division for unobserved classes
pub const SKILL_EPSILON: f64 = 1e-16;

/// Per-class skill and observation counts, keyed by class label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassSkills {
    /// Difficulty-weighted skill
    pub weighted_skill: BTreeMap<String, f64>,
    /// Unweighted skill
    pub skill: BTreeMap<String, f64>,
    /// Outcomes whose true label was the class
    pub count: BTreeMap<String, u64>,
}

impl ClassSkills {
    pub fn from_matrices(matrices: &ConfusionMatrices) -> Self {
        let mut skills = Self::default();

        for (i, class) in matrices.classes.iter().enumerate() {
            let count = matrices.simple_row_sum(i);
            let skill = matrices.simple_diagonal(i) as f64 / (count as f64 + SKILL_EPSILON);
            let weighted = matrices.weighted_diagonal(i)
                / (matrices.weighted_row_sum(i) + SKILL_EPSILON);

            skills.skill.insert(class.to_string(), skill);
            skills.weighted_skill.insert(class.to_string(), weighted);
            skills.count.insert(class.to_string(), count);
        }

        skills
    }

    pub fn weighted_skill_of(&self, class: &str) -> f64 {
        self.weighted_skill.get(class).copied().unwrap_or(0.0)
    }

    pub fn count_of(&self, class: &str) -> u64 {
        self.count.get(class).copied().unwrap_or(0)
    }
}
