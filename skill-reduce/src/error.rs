//! Error types for the batch driver.

use skill_core::{ConfigError, SkillError};
use thiserror::Error;

/// Anything that stops a scoring run
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reducer config file rejected
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A contributor batch could not be scored
    #[error("user {user_id}: {source}")]
    Batch {
        user_id: String,
        #[source]
        source: SkillError,
    },
}

/// Result type alias using the driver's Error.
pub type Result<T> = std::result::Result<T, Error>;
