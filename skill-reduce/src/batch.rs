//! Contributor batch files and the per-user scoring loop.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_core::{
    user_skill_reducer, DifficultyRecord, Judgment, ReducerConfig, SkillResult,
};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// One contributor's gold-standard extracts and the matching subject difficulties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBatch {
    /// Opaque identifier, passed through to the output untouched
    pub user_id: serde_json::Value,
    pub extracts: Vec<Judgment>,
    #[serde(default)]
    pub relevant_reduction: Vec<DifficultyRecord>,
}

/// Reduction record written for one contributor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSkill {
    pub user_id: serde_json::Value,
    pub reducer: String,
    pub data: SkillResult,
}

pub fn load_config(path: &Path) -> Result<ReducerConfig> {
    let raw = fs::read_to_string(path)?;
    let config = ReducerConfig::from_json(&raw)?;
    info!(
        reducer = %config.reducer,
        mode = %config.skill.mode,
        strategy = %config.skill.strategy,
        "loaded reducer config from {}",
        path.display()
    );
    Ok(config)
}

pub fn load_batches(path: &Path) -> Result<Vec<UserBatch>> {
    let raw = fs::read_to_string(path)?;
    let batches: Vec<UserBatch> = serde_json::from_str(&raw)?;
    info!("loaded {} contributor batches from {}", batches.len(), path.display());
    Ok(batches)
}

/// Score every batch in order. The first failing batch aborts the run.
pub fn score_batches(config: &ReducerConfig, batches: &[UserBatch]) -> Result<Vec<UserSkill>> {
    let mut records = Vec::with_capacity(batches.len());

    for batch in batches {
        let data = user_skill_reducer(&batch.extracts, &batch.relevant_reduction, &config.skill)
            .map_err(|source| Error::Batch {
                user_id: batch.user_id.to_string(),
                source,
            })?;

        debug!(
            user_id = %batch.user_id,
            mean_skill = data.mean_skill,
            level_up = data.level_up,
            "scored batch"
        );
        records.push(UserSkill {
            user_id: batch.user_id.clone(),
            reducer: config.reducer.clone(),
            data,
        });
    }

    let promoted = records.iter().filter(|r| r.data.level_up).count();
    info!("scored {} contributors, {} level up", records.len(), promoted);
    Ok(records)
}

/// Write records as pretty JSON to `path`, or to stdout when no path is given
pub fn write_records(records: &[UserSkill], path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    match path {
        Some(path) => {
            fs::write(path, json)?;
            info!("wrote {} records to {}", records.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}
