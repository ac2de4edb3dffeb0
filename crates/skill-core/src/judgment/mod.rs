//! Judgment records handed over by the gold-standard extractor
//!
//! A batch is a list of [`Judgment`]s plus a positionally aligned list of
//! [`DifficultyRecord`]s: index `i` of both refers to the same subject.
//!
//! # Example
//!
//! ```rust
//! use skill_core::judgment::{DifficultyRecord, JudgmentBuilder};
//!
//! let judgment = JudgmentBuilder::new()
//!     .choose("cat")
//!     .truth("surveySimple", ["CAT", "DOG"])
//!     .build();
//! assert_eq!(judgment.chosen_labels(), vec!["cat"]);
//!
//! let record = DifficultyRecord::new([0.5, 0.7]);
//! assert!((record.mean(0).unwrap() - 0.6).abs() < 1e-12);
//! ```

pub mod feedback;
mod types;

pub use types::{DifficultyRecord, Feedback, Judgment, JudgmentBuilder, SuccessFlag};
