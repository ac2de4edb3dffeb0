//! User skill reducer
//!
//! Runs a contributor's judgment batch through matching, confusion
//! accumulation, per-class skill and the level-up rule. Each call is
//! independent: nothing is cached between batches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::confusion::ConfusionMatrixBuilder;
use super::level_up::LevelUpPolicy;
use super::matcher::LabelMatcher;
use super::skill::ClassSkills;
use crate::config::SkillConfig;
use crate::error::ScoreResult;
use crate::judgment::{DifficultyRecord, Judgment};

/// Skill summary for one contributor batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillResult {
    /// Class labels indexing the matrices (`["True", "False"]` in binary mode)
    pub classes: Vec<String>,
    /// Outcome counts, rows are true classes
    pub confusion_simple: Vec<Vec<u64>>,
    /// Difficulty-weighted outcome sums, rows are true classes
    pub confusion_subject: Vec<Vec<f64>>,
    pub weighted_skill: BTreeMap<String, f64>,
    pub skill: BTreeMap<String, f64>,
    pub count: BTreeMap<String, u64>,
    /// Mean weighted skill over the non-negative classes
    pub mean_skill: f64,
    pub level_up: bool,
    /// Non-negative classes never seen as a true label; their zero skill
    /// says nothing about the contributor
    #[serde(default)]
    pub degenerate_classes: Vec<String>,
}

/// Score one contributor batch.
///
/// `difficulties[i]` must describe the subject of `judgments[i]`. The config
/// is validated first; any configuration or data shape problem aborts the
/// whole batch.
pub fn user_skill_reducer(
    judgments: &[Judgment],
    difficulties: &[DifficultyRecord],
    config: &SkillConfig,
) -> ScoreResult<SkillResult> {
    config.validate()?;

    let matcher = LabelMatcher::from_config(config);
    let outcomes = matcher.match_batch(judgments, difficulties)?;

    let matrices =
        ConfusionMatrixBuilder::from_outcomes(config.mode, &outcomes, &config.null_class);
    debug!(classes = ?matrices.classes.as_slice(), "built confusion matrices");

    let skills = ClassSkills::from_matrices(&matrices);
    let decision = LevelUpPolicy::from_config(config).decide(&matrices.classes, &skills);

    if !decision.degenerate_classes.is_empty() {
        warn!(
            classes = ?decision.degenerate_classes,
            "classes never observed as a true label, level_up is not meaningful for them"
        );
    }

    Ok(SkillResult {
        classes: matrices.classes.into_vec(),
        confusion_simple: matrices.simple,
        confusion_subject: matrices.weighted,
        weighted_skill: skills.weighted_skill,
        skill: skills.skill,
        count: skills.count,
        mean_skill: decision.mean_skill,
        level_up: decision.level_up,
        degenerate_classes: decision.degenerate_classes,
    })
}

/// Input for [`reduce_user_skill_json`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ReduceInput {
    pub extracts: Vec<Judgment>,
    #[serde(default)]
    pub relevant_reduction: Vec<DifficultyRecord>,
    /// Reducer keywords; defaults apply when omitted
    #[serde(default)]
    pub config: serde_json::Value,
}

/// Top-level function: score a batch from JSON input, return JSON output.
///
/// Errors come back as `{"error": "..."}` rather than a partial result.
pub fn reduce_user_skill_json(input: &str) -> String {
    let parsed: ReduceInput = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => return error_json(format!("invalid reduce input: {}", e)),
    };

    let config = match SkillConfig::from_keywords(parsed.config) {
        Ok(c) => c,
        Err(e) => return error_json(format!("configuration error: {}", e)),
    };

    let result = match user_skill_reducer(&parsed.extracts, &parsed.relevant_reduction, &config)
    {
        Ok(r) => r,
        Err(e) => return error_json(e.to_string()),
    };

    match serde_json::to_string(&result) {
        Ok(json) => json,
        Err(e) => error_json(format!("serialization failed: {}", e)),
    }
}

fn error_json(message: String) -> String {
    serde_json::json!({ "error": message }).to_string()
}
