//! Subject difficulty weighting
//!
//! Raw difficulty is the historical success rate of a subject, so it is
//! inverted before use: a hard subject (few past successes) earns a large
//! weight for a correct answer. A subject everyone got right inverts to zero
//! and would drop out of scoring, so zeros are lifted to a floor.

use crate::config::Mode;

/// Smallest weight a subject can carry
pub const DIFFICULTY_FLOOR: f64 = 0.05;

/// Floor-clamped per-subject weights for one batch
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyWeights {
    weights: Vec<f64>,
    floor: f64,
}

impl DifficultyWeights {
    /// Invert mean raw difficulties (each in [0, 1]) and clamp zeros.
    ///
    /// The floor is the smallest positive inverted weight in the batch, but
    /// never below [`DIFFICULTY_FLOOR`].
    pub fn from_raw(raw: &[f64]) -> Self {
        let mut weights: Vec<f64> = raw.iter().map(|r| 1.0 - r).collect();

        let min_positive = weights
            .iter()
            .copied()
            .filter(|w| *w > 0.0)
            .fold(f64::INFINITY, f64::min);
        let floor = if min_positive.is_finite() {
            min_positive.max(DIFFICULTY_FLOOR)
        } else {
            DIFFICULTY_FLOOR
        };

        for w in weights.iter_mut().filter(|w| **w == 0.0) {
            *w = floor;
        }

        Self { weights, floor }
    }

    /// Weight for a correct answer on subject `index`
    pub fn success(&self, index: usize) -> f64 {
        self.weights[index]
    }

    /// Weight for a wrong answer on subject `index` in binary mode.
    ///
    /// Complement of the success weight, so failing an easy subject costs
    /// more than failing a hard one. A zero complement takes the batch floor.
    pub fn failure(&self, index: usize) -> f64 {
        let w = 1.0 - self.weights[index];
        if w == 0.0 {
            self.floor
        } else {
            w
        }
    }

    /// Success weight never below [`DIFFICULTY_FLOOR`] (one-to-one)
    pub fn clamped_success(&self, index: usize) -> f64 {
        self.weights[index].max(DIFFICULTY_FLOOR)
    }

    /// Complement never below [`DIFFICULTY_FLOOR`] (k-class modes)
    pub fn clamped_failure(&self, index: usize) -> f64 {
        (1.0 - self.weights[index]).max(DIFFICULTY_FLOOR)
    }

    /// Weight of one comparison on subject `index` under `mode`.
    ///
    /// Binary lifts a zero complement to the batch floor. The k-class modes
    /// clamp the complement to [`DIFFICULTY_FLOOR`]; one-to-one clamps the
    /// success weight too, many-to-many uses it as is.
    pub fn for_outcome(&self, mode: Mode, index: usize, correct: bool) -> f64 {
        match (mode, correct) {
            (Mode::Binary, true) | (Mode::ManyToMany, true) => self.success(index),
            (Mode::OneToOne, true) => self.clamped_success(index),
            (Mode::Binary, false) => self.failure(index),
            (Mode::OneToOne, false) | (Mode::ManyToMany, false) => self.clamped_failure(index),
        }
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
