//! # Level Validator
//!
//! Structural checks run in a fixed order and all of them always run, so
//! one pass surfaces every issue:
//!
//! 1. grid present and at least the minimum size
//! 2. entities in bounds and on walkable tiles
//! 3. no shared positions
//! 4. non-blank name
//! 5. at least one Player and one Exit
//! 6. walkable ratio inside the band
//! 7. largest connected walkable region at least the minimum area

use std::collections::BTreeMap;

use levelsmith_shared::{EntityType, GridPos, Level, ValidationResult};
use serde::{Deserialize, Serialize};

use crate::connectivity::ConnectivityMap;
use crate::quality::{self, QualityBreakdown};
use crate::settings::ValidationSettings;

/// The three independent judgements on a level.
pub trait Validate {
    /// Every structural and navigability issue.
    fn validate(&self, level: &Level) -> ValidationResult;

    /// Cheap accept/reject check.
    fn is_playable(&self, level: &Level) -> bool;

    /// The five quality sub-scores.
    fn quality_breakdown(&self, level: &Level) -> QualityBreakdown;

    /// Overall quality in `[0, 1]`.
    fn evaluate_quality(&self, level: &Level) -> f64;

    /// All three judgements at once.
    fn report(&self, level: &Level) -> LevelReport {
        LevelReport {
            validation: self.validate(level),
            is_playable: self.is_playable(level),
            quality_score: self.evaluate_quality(level),
            sub_scores: self.quality_breakdown(level),
        }
    }
}

/// Validation verdict, playability and quality for one level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelReport {
    /// Structural verdict.
    pub validation: ValidationResult,
    /// Playability verdict.
    pub is_playable: bool,
    /// Weighted quality score.
    pub quality_score: f64,
    /// The sub-scores behind `quality_score`.
    pub sub_scores: QualityBreakdown,
}

/// Stateless validator configured by [`ValidationSettings`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelValidator {
    settings: ValidationSettings,
}

impl LevelValidator {
    /// Creates a validator.
    #[must_use]
    pub const fn new(settings: ValidationSettings) -> Self {
        Self { settings }
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &ValidationSettings {
        &self.settings
    }

    /// Labels the walkable components of a level's grid.
    #[must_use]
    pub fn connectivity(&self, level: &Level) -> ConnectivityMap {
        ConnectivityMap::new(level.terrain(), &self.settings.walkability)
    }

    fn check_dimensions(&self, level: &Level, issues: &mut Vec<String>) {
        let grid = level.terrain();
        let s = &self.settings;
        if grid.is_empty() {
            issues.push("level has no terrain grid".to_string());
        } else if grid.width() < s.min_width || grid.height() < s.min_height {
            issues.push(format!(
                "grid {}x{} is below the minimum {}x{}",
                grid.width(),
                grid.height(),
                s.min_width,
                s.min_height
            ));
        }
    }

    fn check_entities(&self, level: &Level, issues: &mut Vec<String>) {
        let grid = level.terrain();
        let mut seen: BTreeMap<GridPos, usize> = BTreeMap::new();

        for entity in level.entities() {
            let pos = entity.position;
            match grid.at(pos) {
                None => issues.push(format!(
                    "{} at {pos} is outside the {}x{} grid",
                    entity.entity_type,
                    grid.width(),
                    grid.height()
                )),
                Some(tile) if !self.settings.walkability.is_walkable(tile) => issues.push(format!(
                    "{} at {pos} stands on non-walkable {tile}",
                    entity.entity_type
                )),
                Some(_) => {}
            }
            *seen.entry(pos).or_default() += 1;
        }

        for (pos, count) in seen.into_iter().filter(|(_, count)| *count > 1) {
            issues.push(format!("{count} entities share position {pos}"));
        }
    }

    fn check_essentials(level: &Level, issues: &mut Vec<String>) {
        if level.name().trim().is_empty() {
            issues.push("level has no name".to_string());
        }
        for essential in [EntityType::Player, EntityType::Exit] {
            if !level.entities().iter().any(|e| e.entity_type == essential) {
                issues.push(format!("level has no {essential} entity"));
            }
        }
    }

    fn check_navigability(&self, level: &Level, issues: &mut Vec<String>) {
        let grid = level.terrain();
        if grid.is_empty() {
            return;
        }
        let s = &self.settings;
        let connectivity = self.connectivity(level);
        if connectivity.walkable_tiles() == 0 {
            issues.push("level has no navigable tiles".to_string());
        } else {
            let ratio = connectivity.walkable_tiles() as f64 / grid.len() as f64;
            if ratio < s.navigability_min || ratio > s.navigability_max {
                issues.push(format!(
                    "navigability ratio {ratio:.3} outside [{}, {}]",
                    s.navigability_min, s.navigability_max
                ));
            }
        }
        let largest = connectivity.largest_component_size();
        if largest < s.min_connected_area {
            issues.push(format!(
                "largest connected walkable area is {largest} tiles, below the minimum {}",
                s.min_connected_area
            ));
        }
    }
}

impl Validate for LevelValidator {
    fn validate(&self, level: &Level) -> ValidationResult {
        let mut issues = Vec::new();
        self.check_dimensions(level, &mut issues);
        self.check_entities(level, &mut issues);
        Self::check_essentials(level, &mut issues);
        self.check_navigability(level, &mut issues);
        ValidationResult::from_issues(issues)
    }

    /// Ratio at least the lower bound, largest region at least the minimum
    /// area, and every entity on a walkable tile.
    ///
    /// Does not check that entities can reach each other.
    fn is_playable(&self, level: &Level) -> bool {
        let grid = level.terrain();
        if grid.is_empty() {
            return false;
        }
        let s = &self.settings;
        let connectivity = self.connectivity(level);
        let ratio = connectivity.walkable_tiles() as f64 / grid.len() as f64;
        ratio >= s.navigability_min
            && connectivity.largest_component_size() >= s.min_connected_area
            && level
                .entities()
                .iter()
                .all(|e| grid.is_walkable_with(&s.walkability, e.position))
    }

    fn quality_breakdown(&self, level: &Level) -> QualityBreakdown {
        let s = &self.settings;
        let ratio = quality::navigability_ratio(level.terrain(), &s.walkability);
        QualityBreakdown {
            navigability: if level.terrain().is_empty() {
                0.0
            } else {
                quality::navigability_score(ratio, s.navigability_peak, s.navigability_outer)
            },
            entity_placement: quality::entity_placement_score(level, &s.walkability),
            terrain_variety: quality::terrain_variety_score(level.terrain()),
            completeness: quality::completeness_score(level),
            balance: quality::balance_score(level),
        }
    }

    fn evaluate_quality(&self, level: &Level) -> f64 {
        self.quality_breakdown(level).score(&self.settings.quality_weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelsmith_shared::{Entity, Metadata, TileGrid, TileType};

    fn open_level(size: u32, entities: Vec<Entity>) -> Level {
        let mut grid = TileGrid::new(size, size, TileType::Wall);
        grid.fill_rect(1, 1, size - 2, size - 2, TileType::Ground);
        let mut metadata = Metadata::new();
        metadata.insert("seed".into(), serde_json::json!(1));
        Level::new("arena", grid, entities, metadata)
    }

    fn essentials() -> Vec<Entity> {
        vec![
            Entity::new(EntityType::Player, GridPos::new(2, 2)),
            Entity::new(EntityType::Exit, GridPos::new(10, 10)),
        ]
    }

    #[test]
    fn test_clean_level_passes() {
        let level = open_level(14, essentials());
        let validator = LevelValidator::default();
        let result = validator.validate(&level);
        assert!(result.is_valid, "unexpected issues: {:?}", result.issues);
        assert!(validator.is_playable(&level));
    }

    #[test]
    fn test_all_issues_reported_in_one_pass() {
        let mut entities = essentials();
        entities.retain(|e| e.entity_type == EntityType::Player);
        entities.push(Entity::new(EntityType::Enemy, GridPos::new(0, 0)));
        entities.push(Entity::new(EntityType::Item, GridPos::new(2, 2)));
        entities.push(Entity::new(EntityType::Item, GridPos::new(99, 2)));
        let level = Level::new("", open_level(8, Vec::new()).terrain().clone(), entities, Metadata::new());

        let result = LevelValidator::default().validate(&level);
        assert!(!result.is_valid);
        assert!(result.mentions("below the minimum 10x10"));
        assert!(result.mentions("outside the 8x8 grid"));
        assert!(result.mentions("non-walkable Wall"));
        assert!(result.mentions("share position (2, 2)"));
        assert!(result.mentions("no name"));
        assert!(result.mentions("no Exit"));
        assert!(!result.mentions("no Player"));
        assert!(result.mentions("largest connected walkable area is 36"));
    }

    #[test]
    fn test_all_walls_reports_no_navigable_tiles() {
        let level = Level::new(
            "solid",
            TileGrid::new(10, 10, TileType::Wall),
            essentials(),
            Metadata::new(),
        );
        let validator = LevelValidator::default();
        let result = validator.validate(&level);
        assert!(!result.is_valid);
        assert!(result.mentions("no navigable tiles"));
        assert!(!validator.is_playable(&level));
    }

    #[test]
    fn test_empty_grid_reported() {
        let level = Level::new("void", TileGrid::new(0, 0, TileType::Ground), Vec::new(), Metadata::new());
        let validator = LevelValidator::default();
        assert!(validator.validate(&level).mentions("no terrain grid"));
        assert!(!validator.is_playable(&level));
        assert!((0.0..=1.0).contains(&validator.evaluate_quality(&level)));
    }

    #[test]
    fn test_ratio_band_enforced() {
        let level = Level::new(
            "open field",
            TileGrid::new(12, 12, TileType::Grass),
            essentials(),
            Metadata::new(),
        );
        let result = LevelValidator::default().validate(&level);
        assert!(result.mentions("navigability ratio 1.000 outside [0.3, 0.9]"));
    }

    #[test]
    fn test_two_small_regions_fail_area() {
        let mut grid = TileGrid::new(20, 20, TileType::Wall);
        grid.fill_rect(1, 1, 5, 5, TileType::Ground);
        grid.fill_rect(12, 12, 5, 5, TileType::Ground);
        let level = Level::new(
            "split",
            grid,
            vec![
                Entity::new(EntityType::Player, GridPos::new(1, 1)),
                Entity::new(EntityType::Exit, GridPos::new(12, 12)),
            ],
            Metadata::new(),
        );
        let validator = LevelValidator::default();
        assert_eq!(validator.connectivity(&level).largest_component_size(), 25);
        assert!(validator.validate(&level).mentions("area is 25 tiles"));
        assert!(!validator.is_playable(&level));
    }

    #[test]
    fn test_playability_ignores_reachability() {
        let mut grid = TileGrid::new(30, 12, TileType::Wall);
        grid.fill_rect(1, 1, 20, 10, TileType::Ground);
        grid.fill_rect(23, 1, 6, 10, TileType::Ground);
        let level = Level::new(
            "islands",
            grid,
            vec![
                Entity::new(EntityType::Player, GridPos::new(2, 2)),
                Entity::new(EntityType::Exit, GridPos::new(25, 5)),
            ],
            Metadata::new(),
        );
        let validator = LevelValidator::default();
        let connectivity = validator.connectivity(&level);
        assert!(!connectivity.same_component(GridPos::new(2, 2), GridPos::new(25, 5)));
        assert!(validator.is_playable(&level), "Exit on another island is still playable");
    }

    #[test]
    fn test_quality_in_unit_range() {
        let validator = LevelValidator::default();
        let level = open_level(20, essentials());
        let report = validator.report(&level);
        assert!((0.0..=1.0).contains(&report.quality_score));
        assert_eq!(report.sub_scores.balance, 1.0);
        assert_eq!(report.sub_scores.completeness, 1.0);
        assert_eq!(report.sub_scores.entity_placement, 1.0);
    }
}
