//! Batch driver for contributor skill scoring.
//!
//! Loads a reducer config and a file of per-contributor batches, scores each
//! batch with [`skill_core::user_skill_reducer`], and writes one reduction
//! record per contributor.

pub mod batch;
pub mod error;

pub use batch::{load_batches, load_config, score_batches, write_records, UserBatch, UserSkill};
pub use error::{Error, Result};
