//! # Quality Scoring
//!
//! Five independent sub-scores, each in `[0, 1]`:
//!
//! | Sub-score          | Measures                                        |
//! |--------------------|-------------------------------------------------|
//! | `navigability`     | walkable ratio against a trapezoid band         |
//! | `entity_placement` | fraction of entities on walkable tiles          |
//! | `terrain_variety`  | Shannon entropy of tile types / `log2(8)`       |
//! | `completeness`     | non-empty name, non-empty metadata              |
//! | `balance`          | Player, Exit, and items when enemies exist      |
//!
//! The overall score is their weighted mean. Default weights are equal.

use levelsmith_shared::{EntityType, Level, TileGrid, TileType, Walkability};
use serde::{Deserialize, Serialize};

/// Score used for a level that carries no entity list at all.
pub const NO_ENTITY_LIST_SCORE: f64 = 0.5;

/// Relative weight of each sub-score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityWeights {
    /// Weight of the navigability score.
    pub navigability: f64,
    /// Weight of the entity placement score.
    pub entity_placement: f64,
    /// Weight of the terrain variety score.
    pub terrain_variety: f64,
    /// Weight of the completeness score.
    pub completeness: f64,
    /// Weight of the balance score.
    pub balance: f64,
}

impl QualityWeights {
    /// All weights equal: a plain mean.
    pub const EQUAL: Self = Self {
        navigability: 1.0,
        entity_placement: 1.0,
        terrain_variety: 1.0,
        completeness: 1.0,
        balance: 1.0,
    };

    /// The weights in sub-score order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 5] {
        [
            self.navigability,
            self.entity_placement,
            self.terrain_variety,
            self.completeness,
            self.balance,
        ]
    }
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self::EQUAL
    }
}

/// The five sub-scores of a level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityBreakdown {
    /// Walkable ratio against the preferred band.
    pub navigability: f64,
    /// Fraction of entities on walkable tiles.
    pub entity_placement: f64,
    /// Normalized tile-type entropy.
    pub terrain_variety: f64,
    /// Name and metadata presence.
    pub completeness: f64,
    /// Essential entity mix.
    pub balance: f64,
}

impl QualityBreakdown {
    /// The sub-scores in weight order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 5] {
        [
            self.navigability,
            self.entity_placement,
            self.terrain_variety,
            self.completeness,
            self.balance,
        ]
    }

    /// Weighted mean of the sub-scores, clamped to `[0, 1]`.
    ///
    /// Returns the plain mean if the weights sum to zero.
    #[must_use]
    pub fn score(&self, weights: &QualityWeights) -> f64 {
        let scores = self.as_array();
        let weights = weights.as_array();
        let total: f64 = weights.iter().sum();
        let mean = if total > 0.0 {
            scores.iter().zip(weights).map(|(s, w)| s * w).sum::<f64>() / total
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };
        mean.clamp(0.0, 1.0)
    }
}

/// Trapezoid: 1 inside `peak`, 0 outside `outer`, linear in between.
#[must_use]
pub fn navigability_score(ratio: f64, peak: [f64; 2], outer: [f64; 2]) -> f64 {
    let [peak_low, peak_high] = peak;
    let [outer_low, outer_high] = outer;
    let score = if (peak_low..=peak_high).contains(&ratio) {
        1.0
    } else if ratio <= outer_low || ratio >= outer_high {
        0.0
    } else if ratio < peak_low {
        (ratio - outer_low) / (peak_low - outer_low)
    } else {
        (outer_high - ratio) / (outer_high - peak_high)
    };
    score.clamp(0.0, 1.0)
}

/// Walkable tiles over all tiles; 0 for an empty grid.
#[must_use]
pub fn navigability_ratio(grid: &TileGrid, walkability: &Walkability) -> f64 {
    if grid.is_empty() {
        return 0.0;
    }
    grid.walkable_count(walkability) as f64 / grid.len() as f64
}

/// Fraction of entities on walkable in-bounds tiles.
///
/// 1.0 for an empty list, [`NO_ENTITY_LIST_SCORE`] when there is no list.
#[must_use]
pub fn entity_placement_score(level: &Level, walkability: &Walkability) -> f64 {
    let Some(entities) = level.entity_list() else {
        return NO_ENTITY_LIST_SCORE;
    };
    if entities.is_empty() {
        return 1.0;
    }
    let grid = level.terrain();
    let on_walkable = entities
        .iter()
        .filter(|entity| grid.is_walkable_with(walkability, entity.position))
        .count();
    on_walkable as f64 / entities.len() as f64
}

/// Shannon entropy of the tile-type distribution over `log2(8)`, capped at 1.
#[must_use]
pub fn terrain_variety_score(grid: &TileGrid) -> f64 {
    if grid.is_empty() {
        return 0.0;
    }
    let total = grid.len() as f64;
    let entropy: f64 = grid
        .histogram()
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum();
    (entropy / (TileType::COUNT as f64).log2()).min(1.0)
}

/// Mean of two indicators: non-blank name, non-empty metadata.
#[must_use]
pub fn completeness_score(level: &Level) -> f64 {
    let named = !level.name().trim().is_empty();
    let described = !level.metadata().is_empty();
    (f64::from(u8::from(named)) + f64::from(u8::from(described))) / 2.0
}

/// 1.0 minus penalties: no Player 0.5, no Exit 0.3, enemies without any
/// Item or PowerUp 0.3. Floored at 0.
#[must_use]
pub fn balance_score(level: &Level) -> f64 {
    let has = |kind: EntityType| level.entities().iter().any(|e| e.entity_type == kind);
    let mut score: f64 = 1.0;
    if !has(EntityType::Player) {
        score -= 0.5;
    }
    if !has(EntityType::Exit) {
        score -= 0.3;
    }
    if has(EntityType::Enemy) && !has(EntityType::Item) && !has(EntityType::PowerUp) {
        score -= 0.3;
    }
    score.max(0.0)
}
