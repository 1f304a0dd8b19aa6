//! # Configuration Error Types
//!
//! Every fatal condition the engine can hit. All of them are detected
//! before any generation work starts.

use thiserror::Error;

use crate::config::AlgorithmKind;

/// Errors raised while reading or checking a generation configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height outside the configured bounds.
    #[error("invalid dimensions {width}x{height}: width must be in [{min_width}, {max_width}], height in [{min_height}, {max_height}]")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Smallest accepted width.
        min_width: u32,
        /// Largest accepted width.
        max_width: u32,
        /// Smallest accepted height.
        min_height: u32,
        /// Largest accepted height.
        max_height: u32,
    },

    /// The terrain-type allowlist is present but empty.
    #[error("terrain type list is empty")]
    EmptyTerrainTypes,

    /// Algorithm name not present in the registry.
    #[error("unknown generation algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// Placement strategy name not recognized.
    #[error("unknown placement strategy '{0}'")]
    UnknownPlacementStrategy(String),

    /// Tile type name not recognized.
    #[error("unknown tile type '{0}'")]
    UnknownTileType(String),

    /// Entity type name not recognized.
    #[error("unknown entity type '{0}'")]
    UnknownEntityType(String),

    /// The parameter bag carries a key the algorithm does not understand.
    #[error("algorithm '{algorithm}' does not support parameter '{parameter}'")]
    UnsupportedParameter {
        /// Algorithm that rejected the parameter.
        algorithm: AlgorithmKind,
        /// Offending key.
        parameter: String,
    },

    /// A known parameter has a value of the wrong type or out of range.
    #[error("algorithm '{algorithm}': invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        /// Algorithm that rejected the value.
        algorithm: AlgorithmKind,
        /// Parameter key.
        parameter: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An entry of the entity list is unusable.
    #[error("entity config #{index}: {reason}")]
    InvalidEntityConfig {
        /// Position in the configured entity list.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A tile grid whose rows do not form a rectangle.
    #[error("malformed tile grid: {0}")]
    MalformedGrid(String),

    /// The document could not be parsed at all.
    #[error("could not parse configuration: {0}")]
    Parse(String),
}

/// Result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;
