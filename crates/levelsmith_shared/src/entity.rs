//! # Entities
//!
//! Placement requests ([`EntityConfig`]) and placed instances ([`Entity`]).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::normalize_name;
use crate::tile::GridPos;

/// Free-form key/value bag carried on entities and entity configs.
pub type PropertyMap = BTreeMap<String, serde_json::Value>;

/// Kinds of entity a level can contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum EntityType {
    /// The player's spawn point.
    Player,
    /// Hostile creature.
    Enemy,
    /// Collectible item.
    Item,
    /// Power-up pickup.
    PowerUp,
    /// Non-player character.
    #[serde(rename = "NPC")]
    Npc,
    /// Level exit.
    Exit,
    /// Respawn checkpoint.
    Checkpoint,
    /// Static obstacle.
    Obstacle,
    /// Scripted trigger volume.
    Trigger,
}

impl EntityType {
    /// Every entity type.
    pub const ALL: [Self; 9] = [
        Self::Player,
        Self::Enemy,
        Self::Item,
        Self::PowerUp,
        Self::Npc,
        Self::Exit,
        Self::Checkpoint,
        Self::Obstacle,
        Self::Trigger,
    ];

    /// Canonical name, as serialized.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Enemy => "Enemy",
            Self::Item => "Item",
            Self::PowerUp => "PowerUp",
            Self::Npc => "NPC",
            Self::Exit => "Exit",
            Self::Checkpoint => "Checkpoint",
            Self::Obstacle => "Obstacle",
            Self::Trigger => "Trigger",
        }
    }

    /// Single-character glyph for text previews.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Player => '@',
            Self::Enemy => 'E',
            Self::Item => 'i',
            Self::PowerUp => '+',
            Self::Npc => 'N',
            Self::Exit => '>',
            Self::Checkpoint => 'C',
            Self::Obstacle => 'O',
            Self::Trigger => 'T',
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|kind| normalize_name(kind.name()) == wanted)
            .ok_or_else(|| ConfigError::UnknownEntityType(s.to_string()))
    }
}

impl TryFrom<String> for EntityType {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Where in the grid an entity type is preferentially sampled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Uniform over all walkable cells.
    #[default]
    Random,
    /// Near entities already placed from the same request.
    Clustered,
    /// Greedy farthest-point selection.
    Spread,
    /// Next to blocking tiles or the grid border.
    NearWalls,
    /// Near the grid centroid.
    Center,
    /// Away from any placed Player.
    FarFromPlayer,
    /// Near the four grid corners.
    Corners,
}

impl PlacementStrategy {
    /// Every strategy.
    pub const ALL: [Self; 7] = [
        Self::Random,
        Self::Clustered,
        Self::Spread,
        Self::NearWalls,
        Self::Center,
        Self::FarFromPlayer,
        Self::Corners,
    ];

    /// Canonical snake_case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Clustered => "clustered",
            Self::Spread => "spread",
            Self::NearWalls => "near_walls",
            Self::Center => "center",
            Self::FarFromPlayer => "far_from_player",
            Self::Corners => "corners",
        }
    }
}

impl fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlacementStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|strategy| normalize_name(strategy.name()) == wanted)
            .ok_or_else(|| ConfigError::UnknownPlacementStrategy(s.to_string()))
    }
}

impl TryFrom<String> for PlacementStrategy {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A request to place `count` entities of one type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityConfig {
    /// Type of entity to place.
    #[serde(rename = "type", alias = "entityType", alias = "entity_type")]
    pub entity_type: EntityType,
    /// Requested number of instances.
    pub count: u32,
    /// Minimum Euclidean distance to constrained entities. `0` disables the check.
    #[serde(default, alias = "min_distance")]
    pub min_distance: f64,
    /// Entity types the minimum distance applies to. Empty means all.
    #[serde(default, alias = "min_distance_from", skip_serializing_if = "Vec::is_empty")]
    pub min_distance_from: Vec<EntityType>,
    /// Maximum distance to the nearest Player. Absent, non-finite or
    /// non-positive means unbounded.
    #[serde(default, alias = "max_distance_from_player")]
    pub max_distance_from_player: Option<f64>,
    /// Properties copied onto every placed instance.
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty")]
    pub properties: PropertyMap,
    /// Sampling bias.
    #[serde(default, alias = "placement_strategy")]
    pub placement_strategy: PlacementStrategy,
}

impl EntityConfig {
    /// Creates a request with no distance constraints and random placement.
    #[must_use]
    pub fn new(entity_type: EntityType, count: u32) -> Self {
        Self {
            entity_type,
            count,
            min_distance: 0.0,
            min_distance_from: Vec::new(),
            max_distance_from_player: None,
            properties: PropertyMap::new(),
            placement_strategy: PlacementStrategy::Random,
        }
    }

    /// Sets the placement strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: PlacementStrategy) -> Self {
        self.placement_strategy = strategy;
        self
    }

    /// Sets the minimum distance, applied to all entity types.
    #[must_use]
    pub fn with_min_distance(mut self, distance: f64) -> Self {
        self.min_distance = distance;
        self
    }

    /// Restricts the minimum distance to the given entity types.
    #[must_use]
    pub fn with_min_distance_from(mut self, types: impl IntoIterator<Item = EntityType>) -> Self {
        self.min_distance_from = types.into_iter().collect();
        self
    }

    /// Sets the maximum distance from the nearest Player.
    #[must_use]
    pub fn with_max_distance_from_player(mut self, distance: f64) -> Self {
        self.max_distance_from_player = Some(distance);
        self
    }

    /// Adds a property copied onto every placed instance.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// The effective Player-distance bound, `None` when unbounded.
    #[must_use]
    pub fn player_distance_bound(&self) -> Option<f64> {
        self.max_distance_from_player
            .filter(|distance| distance.is_finite() && *distance > 0.0)
    }

    /// Returns true if the minimum distance applies to entities of `other`.
    #[must_use]
    pub fn constrains(&self, other: EntityType) -> bool {
        self.min_distance > 0.0
            && (self.min_distance_from.is_empty() || self.min_distance_from.contains(&other))
    }
}

/// A placed entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Entity type.
    #[serde(rename = "type", alias = "entityType", alias = "entity_type")]
    pub entity_type: EntityType,
    /// Grid position.
    pub position: GridPos,
    /// Free-form properties.
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty")]
    pub properties: PropertyMap,
}

impl Entity {
    /// Creates an entity with no properties.
    #[must_use]
    pub fn new(entity_type: EntityType, position: GridPos) -> Self {
        Self {
            entity_type,
            position,
            properties: PropertyMap::new(),
        }
    }

    /// Attaches properties.
    #[must_use]
    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }
}
