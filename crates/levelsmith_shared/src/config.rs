//! # Generation Configuration
//!
//! The declarative input of the pipeline. Parsed from the JSON shape the web
//! layer produces (camelCase, snake_case accepted as aliases) and checked
//! against [`ConfigLimits`] before any generation work starts.
//!
//! The algorithm-specific parameter bag stays untyped here; each terrain
//! algorithm parses it into its own parameter struct.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::EntityConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::normalize_name;
use crate::tile::TileType;

/// Untyped algorithm parameters.
pub type ParameterMap = BTreeMap<String, serde_json::Value>;

/// Terrain generation algorithms known to the engine.
///
/// [`AlgorithmKind::ALL`] together with [`FromStr`] is the name-keyed
/// registry: every lookup by name goes through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum AlgorithmKind {
    /// Thresholded fractal Perlin noise.
    Perlin,
    /// Cellular-automata caves.
    Cellular,
    /// Spanning-tree maze.
    Maze,
    /// Rooms joined by corridors.
    Rooms,
}

impl AlgorithmKind {
    /// Registry of every algorithm.
    pub const ALL: [Self; 4] = [Self::Perlin, Self::Cellular, Self::Maze, Self::Rooms];

    /// Canonical registry name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Perlin => "perlin",
            Self::Cellular => "cellular",
            Self::Maze => "maze",
            Self::Rooms => "rooms",
        }
    }

    /// Alternative names accepted on input.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Perlin => &["perlin_noise", "noise"],
            Self::Cellular => &["cellular_automata", "cave", "caves"],
            Self::Maze => &["labyrinth"],
            Self::Rooms => &["room", "room_based", "dungeon"],
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|kind| {
                normalize_name(kind.name()) == wanted
                    || kind.aliases().iter().any(|alias| normalize_name(alias) == wanted)
            })
            .ok_or_else(|| ConfigError::UnknownAlgorithm(s.to_string()))
    }
}

impl TryFrom<String> for AlgorithmKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Accepted level dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigLimits {
    /// Smallest accepted width.
    pub min_width: u32,
    /// Largest accepted width.
    pub max_width: u32,
    /// Smallest accepted height.
    pub min_height: u32,
    /// Largest accepted height.
    pub max_height: u32,
}

impl ConfigLimits {
    /// Default lower bound on either dimension.
    pub const DEFAULT_MIN: u32 = 10;
    /// Default upper bound on either dimension.
    pub const DEFAULT_MAX: u32 = 1000;

    /// Returns true if `width × height` is accepted.
    #[must_use]
    pub const fn accepts(&self, width: u32, height: u32) -> bool {
        width >= self.min_width
            && width <= self.max_width
            && height >= self.min_height
            && height <= self.max_height
    }
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            min_width: Self::DEFAULT_MIN,
            max_width: Self::DEFAULT_MAX,
            min_height: Self::DEFAULT_MIN,
            max_height: Self::DEFAULT_MAX,
        }
    }
}

fn default_terrain_types() -> Vec<TileType> {
    TileType::ALL.to_vec()
}

/// Declarative description of one level to generate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Optional level name. A default is derived when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Seed. Any 64-bit integer; reinterpreted bitwise as unsigned.
    #[serde(default)]
    pub seed: i64,
    /// Terrain algorithm.
    #[serde(alias = "algorithm", alias = "generation_algorithm")]
    pub generation_algorithm: AlgorithmKind,
    /// Algorithm-specific parameters.
    #[serde(default, alias = "algorithm_parameters")]
    pub algorithm_parameters: ParameterMap,
    /// Tile types the generated grid may contain. Defaults to all types.
    #[serde(default = "default_terrain_types", alias = "terrain_types")]
    pub terrain_types: Vec<TileType>,
    /// Entity placement requests, processed in order.
    #[serde(default)]
    pub entities: Vec<EntityConfig>,
    /// Visual theme reference. Opaque to the engine.
    #[serde(default, alias = "visual_theme", skip_serializing_if = "serde_json::Value::is_null")]
    pub visual_theme: serde_json::Value,
    /// Gameplay rules. Opaque apart from `maxEntities`.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub gameplay: serde_json::Value,
}

impl GenerationConfig {
    /// Creates a config with seed 0, default parameters, all tile types and no entities.
    #[must_use]
    pub fn new(width: u32, height: u32, algorithm: AlgorithmKind) -> Self {
        Self {
            name: None,
            width,
            height,
            seed: 0,
            generation_algorithm: algorithm,
            algorithm_parameters: ParameterMap::new(),
            terrain_types: default_terrain_types(),
            entities: Vec::new(),
            visual_theme: serde_json::Value::Null,
            gameplay: serde_json::Value::Null,
        }
    }

    /// Parses the JSON shape produced by the web layer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown enum names.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the level name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets one algorithm parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.algorithm_parameters.insert(key.into(), value);
        self
    }

    /// Replaces the terrain-type allowlist.
    #[must_use]
    pub fn with_terrain_types(mut self, types: impl IntoIterator<Item = TileType>) -> Self {
        self.terrain_types = types.into_iter().collect();
        self
    }

    /// Appends an entity placement request.
    #[must_use]
    pub fn with_entity(mut self, entity: EntityConfig) -> Self {
        self.entities.push(entity);
        self
    }

    /// Sets the gameplay block.
    #[must_use]
    pub fn with_gameplay(mut self, gameplay: serde_json::Value) -> Self {
        self.gameplay = gameplay;
        self
    }

    /// The seed as the unsigned value every stage derives from.
    #[inline]
    #[must_use]
    pub const fn seed_bits(&self) -> u64 {
        self.seed as u64
    }

    /// Cap on the total number of placed entities, from `gameplay.maxEntities`.
    #[must_use]
    pub fn entity_cap(&self) -> Option<u32> {
        let gameplay = self.gameplay.as_object()?;
        gameplay
            .get("maxEntities")
            .or_else(|| gameplay.get("max_entities"))
            .and_then(serde_json::Value::as_u64)
            .map(|cap| u32::try_from(cap).unwrap_or(u32::MAX))
    }

    /// Checks everything that does not depend on the chosen algorithm.
    ///
    /// Algorithm parameters are checked by the terrain crate when the
    /// algorithm is built from this config.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self, limits: &ConfigLimits) -> ConfigResult<()> {
        if !limits.accepts(self.width, self.height) {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
                min_width: limits.min_width,
                max_width: limits.max_width,
                min_height: limits.min_height,
                max_height: limits.max_height,
            });
        }
        if self.terrain_types.is_empty() {
            return Err(ConfigError::EmptyTerrainTypes);
        }
        for (index, entity) in self.entities.iter().enumerate() {
            if !entity.min_distance.is_finite() || entity.min_distance < 0.0 {
                return Err(ConfigError::InvalidEntityConfig {
                    index,
                    reason: format!(
                        "minDistance must be a non-negative number, got {}",
                        entity.min_distance
                    ),
                });
            }
            if entity.max_distance_from_player.is_some_and(f64::is_nan) {
                return Err(ConfigError::InvalidEntityConfig {
                    index,
                    reason: "maxDistanceFromPlayer is NaN".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityType, PlacementStrategy};

    #[test]
    fn test_registry_lookup() {
        for kind in AlgorithmKind::ALL {
            assert_eq!(kind.name().parse::<AlgorithmKind>(), Ok(kind));
        }
        assert_eq!("Room_Based".parse::<AlgorithmKind>(), Ok(AlgorithmKind::Rooms));
        assert_eq!(
            "voronoi".parse::<AlgorithmKind>(),
            Err(ConfigError::UnknownAlgorithm("voronoi".to_string()))
        );
    }

    #[test]
    fn test_parse_web_shape() {
        let json = r#"{
            "width": 40,
            "height": 30,
            "seed": -7,
            "generationAlgorithm": "cellular",
            "algorithmParameters": {"iterations": 3},
            "terrainTypes": ["Ground", "Wall"],
            "entities": [
                {"type": "Player", "count": 1, "placementStrategy": "center"}
            ],
            "visualTheme": {"palette": "dusk"},
            "gameplay": {"maxEntities": 12, "difficulty": "hard"}
        }"#;
        let config = GenerationConfig::from_json(json).expect("parse");
        assert_eq!(config.generation_algorithm, AlgorithmKind::Cellular);
        assert_eq!(config.terrain_types, vec![TileType::Ground, TileType::Wall]);
        assert_eq!(config.entities[0].entity_type, EntityType::Player);
        assert_eq!(config.entities[0].placement_strategy, PlacementStrategy::Center);
        assert_eq!(config.seed_bits(), (-7_i64) as u64);
        assert_eq!(config.entity_cap(), Some(12));
        assert!(config.validate(&ConfigLimits::default()).is_ok());
    }

    #[test]
    fn test_unknown_algorithm_rejected_at_parse() {
        let json = r#"{"width": 20, "height": 20, "generationAlgorithm": "wfc"}"#;
        let err = GenerationConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ref msg) if msg.contains("unknown generation algorithm 'wfc'")));
    }

    #[test]
    fn test_missing_terrain_types_means_all() {
        let json = r#"{"width": 20, "height": 20, "algorithm": "maze"}"#;
        let config = GenerationConfig::from_json(json).expect("parse");
        assert_eq!(config.terrain_types.len(), TileType::COUNT);
    }

    #[test]
    fn test_empty_terrain_types_invalid() {
        let config = GenerationConfig::new(20, 20, AlgorithmKind::Perlin).with_terrain_types([]);
        assert_eq!(
            config.validate(&ConfigLimits::default()),
            Err(ConfigError::EmptyTerrainTypes)
        );
    }

    #[test]
    fn test_dimension_bounds() {
        let limits = ConfigLimits::default();
        assert!(GenerationConfig::new(9, 20, AlgorithmKind::Perlin).validate(&limits).is_err());
        assert!(GenerationConfig::new(20, 1001, AlgorithmKind::Perlin).validate(&limits).is_err());
        assert!(GenerationConfig::new(10, 1000, AlgorithmKind::Perlin).validate(&limits).is_ok());
    }

    #[test]
    fn test_negative_min_distance_invalid() {
        let config = GenerationConfig::new(20, 20, AlgorithmKind::Perlin)
            .with_entity(EntityConfig::new(EntityType::Item, 2).with_min_distance(-1.0));
        assert!(matches!(
            config.validate(&ConfigLimits::default()),
            Err(ConfigError::InvalidEntityConfig { index: 0, .. })
        ));
    }

    #[test]
    fn test_nan_max_distance_from_player_invalid() {
        let config = GenerationConfig::new(20, 20, AlgorithmKind::Perlin)
            .with_entity(EntityConfig::new(EntityType::Player, 1))
            .with_entity(EntityConfig::new(EntityType::Item, 3).with_max_distance_from_player(f64::NAN));
        match config.validate(&ConfigLimits::default()) {
            Err(ConfigError::InvalidEntityConfig { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("maxDistanceFromPlayer"), "reason was {reason}");
            }
            other => panic!("expected InvalidEntityConfig, got {other:?}"),
        }

        let unbounded = GenerationConfig::new(20, 20, AlgorithmKind::Perlin)
            .with_entity(EntityConfig::new(EntityType::Item, 3).with_max_distance_from_player(f64::INFINITY));
        assert!(unbounded.validate(&ConfigLimits::default()).is_ok());
    }
}
