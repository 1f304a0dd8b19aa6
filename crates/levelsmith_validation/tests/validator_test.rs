//! # Validator Tests
//!
//! Hand-built levels run through the public validation API.

use levelsmith_shared::{Entity, EntityType, GridPos, Level, Metadata, TileGrid, TileType};
use levelsmith_validation::{
    ConnectivityMap, LevelValidator, TracingValidator, Validate, ValidationSettings,
};

fn metadata() -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("algorithm".into(), serde_json::json!("rooms"));
    metadata
}

/// Test: a solid wall level fails with a navigability issue.
#[test]
fn test_all_wall_grid_has_no_navigable_tiles() {
    let level = Level::new("walls", TileGrid::new(10, 10, TileType::Wall), Vec::new(), metadata());
    let result = LevelValidator::default().validate(&level);

    assert!(!result.is_valid);
    assert!(
        result.mentions("no navigable tiles"),
        "issues were: {:?}",
        result.issues
    );
}

/// Test: two disjoint 5x5 rooms give a largest component of 25, not 50.
#[test]
fn test_flood_fill_separates_regions() {
    let mut grid = TileGrid::new(15, 15, TileType::Wall);
    grid.fill_rect(1, 1, 5, 5, TileType::Ground);
    grid.fill_rect(8, 8, 5, 5, TileType::Ground);

    let map = ConnectivityMap::new(&grid, &Default::default());

    assert_eq!(map.largest_component_size(), 25);
    assert_eq!(map.walkable_tiles(), 50);
}

/// Test: eight tile types beat a uniform grid on variety.
#[test]
fn test_variety_rewards_more_tile_types() {
    let validator = LevelValidator::default();
    let mut mixed = TileGrid::new(10, 10, TileType::Ground);
    for (i, tile) in TileType::ALL.into_iter().enumerate() {
        mixed.set(i as u32, 0, tile);
    }
    let uniform = TileGrid::new(10, 10, TileType::Ground);

    let mixed = validator.quality_breakdown(&Level::new("m", mixed, Vec::new(), metadata()));
    let uniform = validator.quality_breakdown(&Level::new("u", uniform, Vec::new(), metadata()));

    assert_eq!(uniform.terrain_variety, 0.0);
    assert!(mixed.terrain_variety > uniform.terrain_variety);
}

/// Test: custom settings loosen the thresholds.
#[test]
fn test_settings_change_verdicts() {
    let mut grid = TileGrid::new(12, 12, TileType::Wall);
    grid.fill_rect(1, 1, 6, 6, TileType::Ground);
    let level = Level::new(
        "small",
        grid,
        vec![
            Entity::new(EntityType::Player, GridPos::new(1, 1)),
            Entity::new(EntityType::Exit, GridPos::new(6, 6)),
        ],
        metadata(),
    );

    let strict = LevelValidator::default();
    let lenient = LevelValidator::new(
        ValidationSettings::default()
            .with_navigability_band(0.1, 0.9)
            .with_min_connected_area(30),
    );

    assert!(!strict.is_playable(&level));
    assert!(lenient.is_playable(&level));
    assert!(lenient.validate(&level).is_valid);
}

/// Test: a missing entity list scores neutral, not perfect.
#[test]
fn test_absent_entities_score_neutral() {
    let grid = TileGrid::new(12, 12, TileType::Ground);
    let absent = Level::without_entity_list("a", grid.clone(), metadata());
    let empty = Level::new("a", grid, Vec::new(), metadata());
    let validator = TracingValidator::new(LevelValidator::default());

    assert_eq!(validator.quality_breakdown(&absent).entity_placement, 0.5);
    assert_eq!(validator.quality_breakdown(&empty).entity_placement, 1.0);
    assert!(validator.evaluate_quality(&absent) < validator.evaluate_quality(&empty));
}

/// Test: levels parsed from JSON validate the same as built ones.
#[test]
fn test_level_from_json() {
    let json = r#"{
        "name": "tiny",
        "terrain": [["Wall", "Wall"], ["Ground", "Lava"]],
        "entities": [{"type": "Player", "position": {"x": 1, "y": 1}}]
    }"#;
    let level: Level = serde_json::from_str(json).expect("valid level json");
    let result = LevelValidator::default().validate(&level);

    assert!(result.mentions("below the minimum"));
    assert!(result.mentions("Player at (1, 1) stands on non-walkable Lava"));
    assert!(result.mentions("no Exit"));
}
