//! # Levels and Validation Verdicts

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::tile::TileGrid;

/// Level metadata (seed, algorithm, creation time, ...).
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// An assembled level.
///
/// Immutable once built: fields are only reachable through accessors.
/// Levels read from external JSON may lack an entity list entirely, which
/// is distinct from an empty list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    #[serde(default)]
    name: String,
    terrain: TileGrid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    entities: Option<Vec<Entity>>,
    #[serde(default)]
    metadata: Metadata,
}

impl Level {
    /// Creates a level.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        terrain: TileGrid,
        entities: Vec<Entity>,
        metadata: Metadata,
    ) -> Self {
        Self {
            name: name.into(),
            terrain,
            entities: Some(entities),
            metadata,
        }
    }

    /// Creates a level that carries no entity list at all.
    #[must_use]
    pub fn without_entity_list(
        name: impl Into<String>,
        terrain: TileGrid,
        metadata: Metadata,
    ) -> Self {
        Self {
            name: name.into(),
            terrain,
            entities: None,
            metadata,
        }
    }

    /// Level name. May be empty for externally supplied levels.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Terrain grid.
    #[inline]
    #[must_use]
    pub fn terrain(&self) -> &TileGrid {
        &self.terrain
    }

    /// Placed entities; empty when the level has no entity list.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        self.entities.as_deref().unwrap_or_default()
    }

    /// The entity list, or `None` when the level has none.
    #[inline]
    #[must_use]
    pub fn entity_list(&self) -> Option<&[Entity]> {
        self.entities.as_deref()
    }

    /// Metadata map.
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Splits the level back into its grid and entities.
    #[must_use]
    pub fn into_parts(self) -> (TileGrid, Vec<Entity>) {
        (self.terrain, self.entities.unwrap_or_default())
    }
}

/// Structural verdict on a level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when no issue was found.
    pub is_valid: bool,
    /// Human-readable issues, in check order.
    pub issues: Vec<String>,
}

impl ValidationResult {
    /// Builds a verdict from collected issues.
    #[must_use]
    pub fn from_issues(issues: Vec<String>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }

    /// Returns true if any issue contains `needle`.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.issues.iter().any(|issue| issue.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityType;
    use crate::tile::{GridPos, TileType};

    #[test]
    fn test_missing_entity_list_is_not_empty_list() {
        let json = r#"{"name": "x", "terrain": [["Ground"]]}"#;
        let level: Level = serde_json::from_str(json).expect("parse");
        assert!(level.entity_list().is_none());
        assert!(level.entities().is_empty());

        let json = r#"{"name": "x", "terrain": [["Ground"]], "entities": []}"#;
        let level: Level = serde_json::from_str(json).expect("parse");
        assert_eq!(level.entity_list(), Some(&[][..]));
    }

    #[test]
    fn test_into_parts_returns_inputs() {
        let grid = TileGrid::new(3, 3, TileType::Ground);
        let entities = vec![Entity::new(EntityType::Exit, GridPos::new(2, 2))];
        let level = Level::new("l", grid.clone(), entities.clone(), Metadata::new());
        assert_eq!(level.into_parts(), (grid, entities));
    }

    #[test]
    fn test_validation_result_from_issues() {
        assert!(ValidationResult::from_issues(Vec::new()).is_valid);
        let result = ValidationResult::from_issues(vec!["level has no name".to_string()]);
        assert!(!result.is_valid);
        assert!(result.mentions("no name"));
    }
}
