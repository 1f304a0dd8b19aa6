//! # Engine Error Types
//!
//! Everything that stops a pipeline run before it produces a level.

use levelsmith_shared::ConfigError;
use levelsmith_validation::SettingsError;
use thiserror::Error;

/// Errors that abort a pipeline run.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The generation config was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The engine settings were rejected.
    #[error("invalid engine settings: {0}")]
    Settings(String),

    /// The validation settings were rejected.
    #[error("invalid validation settings: {0}")]
    Validation(#[from] SettingsError),

    /// A settings or level file could not be read.
    #[error("could not read {path}: {source}")]
    Io {
        /// File that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Engine settings were not valid TOML.
    #[error("could not parse engine settings: {0}")]
    Toml(#[from] toml::de::Error),

    /// A level or config document was not valid JSON.
    #[error("could not parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
