//! # Level Assembly
//!
//! Wraps a grid and its entities into a [`Level`] with a name and
//! provenance metadata. Never inspects content.

use chrono::{DateTime, SecondsFormat, Utc};
use levelsmith_shared::{Entity, GenerationConfig, Level, Metadata, TileGrid};
use serde_json::json;

/// Builds levels from generated parts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelAssembler;

impl LevelAssembler {
    /// Creates an assembler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Assembles a level stamped with the current time.
    #[must_use]
    pub fn assemble(&self, grid: TileGrid, entities: Vec<Entity>, config: &GenerationConfig) -> Level {
        self.assemble_at(grid, entities, config, Utc::now())
    }

    /// Assembles a level stamped with `created_at`.
    #[must_use]
    pub fn assemble_at(
        &self,
        grid: TileGrid,
        entities: Vec<Entity>,
        config: &GenerationConfig,
        created_at: DateTime<Utc>,
    ) -> Level {
        let name = Self::level_name(config);
        tracing::debug!(
            "assembling level '{}' with {} entities",
            name,
            entities.len()
        );

        let mut metadata = Metadata::new();
        metadata.insert("seed".into(), json!(config.seed));
        metadata.insert("algorithm".into(), json!(config.generation_algorithm.name()));
        metadata.insert(
            "createdAt".into(),
            json!(created_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        metadata.insert("width".into(), json!(grid.width()));
        metadata.insert("height".into(), json!(grid.height()));
        if !config.visual_theme.is_null() {
            metadata.insert("visualTheme".into(), config.visual_theme.clone());
        }

        Level::new(name, grid, entities, metadata)
    }

    /// The configured name, or `<algorithm>-<width>x<height>-<seed>`.
    #[must_use]
    pub fn level_name(config: &GenerationConfig) -> String {
        match config.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!(
                "{}-{}x{}-{}",
                config.generation_algorithm.name(),
                config.width,
                config.height,
                config.seed
            ),
        }
    }
}
