//! # Levelsmith Shared
//!
//! Data model shared by every stage of the generation pipeline.
//!
//! ```text
//! GenerationConfig ──► TileGrid ──► Vec<Entity> ──► Level ──► ValidationResult
//!   (config)          (terrain)    (placement)    (assembly)   (validation)
//! ```
//!
//! ## CRITICAL RULE
//!
//! Stages hand values to each other by move. Nothing in this crate is
//! shared-mutable, and nothing here owns a random number generator.

#![deny(unsafe_code)]

pub mod config;
pub mod entity;
pub mod error;
pub mod level;
pub mod outcome;
pub mod tile;

pub use config::{AlgorithmKind, ConfigLimits, GenerationConfig, ParameterMap};
pub use entity::{Entity, EntityConfig, EntityType, PlacementStrategy, PropertyMap};
pub use error::{ConfigError, ConfigResult};
pub use level::{Level, Metadata, ValidationResult};
pub use outcome::{GenerationWarning, Outcome};
pub use tile::{GridPos, TileGrid, TileType, Walkability};

/// Lowercases a name and strips `_`, `-` and spaces so that `near_walls`,
/// `nearWalls` and `Near-Walls` compare equal.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
