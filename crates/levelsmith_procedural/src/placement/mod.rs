//! # Entity Placement
//!
//! Places the entity requests of a config, in order, onto a generated grid.
//!
//! Each instance is drawn from the walkable, unoccupied cells by the
//! request's [`PlacementStrategy`](levelsmith_shared::PlacementStrategy) and
//! then checked against its distance constraints. The candidates are
//! gathered once per request into a [`CandidatePool`](pool::CandidatePool);
//! taken and rejected cells leave it, so a rejected cell is not offered
//! again for the same request. Every draw costs one attempt from a
//! per-request budget of `attempts_per_entity × count`; when the budget or
//! the candidates run out the request is cut short and an
//! [`EntityShortfall`](GenerationWarning::EntityShortfall) is reported.

mod pool;
mod strategy;

use levelsmith_shared::{
    Entity, EntityConfig, EntityType, GenerationConfig, GenerationWarning, GridPos, Outcome,
    TileGrid, Walkability,
};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::seed::Seed;
use pool::CandidatePool;

/// Search knobs for the placer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementTuning {
    /// Draws allowed per requested instance.
    pub attempts_per_entity: u32,
    /// Candidates compared by the biased strategies per draw.
    pub sample_size: u32,
    /// Radius (Chebyshev) around batch members that `clustered` prefers.
    pub cluster_radius: u32,
}

impl PlacementTuning {
    /// Default draws per instance.
    pub const DEFAULT_ATTEMPTS: u32 = 30;
    /// Default tournament size.
    pub const DEFAULT_SAMPLE_SIZE: u32 = 12;
    /// Default cluster radius.
    pub const DEFAULT_CLUSTER_RADIUS: u32 = 4;
}

impl Default for PlacementTuning {
    fn default() -> Self {
        Self {
            attempts_per_entity: Self::DEFAULT_ATTEMPTS,
            sample_size: Self::DEFAULT_SAMPLE_SIZE,
            cluster_radius: Self::DEFAULT_CLUSTER_RADIUS,
        }
    }
}

/// Places entities onto a grid.
///
/// Holds no state between calls; the same grid, config and seed always give
/// the same entities.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityPlacer {
    tuning: PlacementTuning,
    walkability: Walkability,
}

/// Mutable search state for one `place` call.
struct Board<'a> {
    grid: &'a TileGrid,
    /// Cells already holding an entity.
    occupied: Vec<bool>,
    /// Every walkable cell, row-major.
    walkable: Vec<GridPos>,
    placed: Vec<Entity>,
}

impl<'a> Board<'a> {
    fn new(grid: &'a TileGrid, walkability: &Walkability) -> Self {
        Self {
            grid,
            occupied: vec![false; grid.len()],
            walkable: grid.walkable_positions(walkability),
            placed: Vec::new(),
        }
    }

    fn index(&self, pos: GridPos) -> usize {
        self.grid.index_of(pos.x as u32, pos.y as u32)
    }

    /// Walkable cells not yet holding an entity.
    fn candidates(&self) -> CandidatePool {
        let free = self
            .walkable
            .iter()
            .copied()
            .filter(|&pos| !self.occupied[self.index(pos)]);
        CandidatePool::new(self.grid, free)
    }

    fn nearest_player(&self, pos: GridPos) -> Option<f64> {
        self.placed
            .iter()
            .filter(|entity| entity.entity_type == EntityType::Player)
            .map(|entity| entity.position.distance(pos))
            .min_by(f64::total_cmp)
    }

    /// Distance constraints of `request` at `pos`.
    fn admits(&self, request: &EntityConfig, pos: GridPos) -> bool {
        let crowded = self.placed.iter().any(|entity| {
            request.constrains(entity.entity_type)
                && entity.position.distance(pos) < request.min_distance
        });
        if crowded {
            return false;
        }
        match (request.player_distance_bound(), self.nearest_player(pos)) {
            (Some(bound), Some(nearest)) => nearest <= bound,
            _ => true,
        }
    }

    fn occupy(&mut self, entity: Entity) {
        let i = self.index(entity.position);
        self.occupied[i] = true;
        self.placed.push(entity);
    }
}

impl EntityPlacer {
    /// Creates a placer with explicit tuning and walkability.
    #[must_use]
    pub const fn new(tuning: PlacementTuning, walkability: Walkability) -> Self {
        Self {
            tuning,
            walkability,
        }
    }

    /// Search knobs.
    #[must_use]
    pub const fn tuning(&self) -> &PlacementTuning {
        &self.tuning
    }

    /// Places every entity request of `config`, in order.
    ///
    /// Never fails: requests that cannot be met in full are cut short and
    /// reported through the outcome's warnings.
    #[must_use]
    pub fn place(&self, grid: &TileGrid, config: &GenerationConfig, seed: Seed) -> Outcome<Vec<Entity>> {
        let mut rng = seed.derive(Seed::PLACEMENT).rng();
        let mut board = Board::new(grid, &self.walkability);
        let mut warnings = Vec::new();
        let cap = config.entity_cap();
        let mut dropped = 0_u32;

        for request in &config.entities {
            let room = cap.map_or(request.count, |cap| {
                cap.saturating_sub(board.placed.len() as u32).min(request.count)
            });
            dropped = dropped.saturating_add(request.count - room);

            let placed = self.place_request(&mut board, request, room, &mut rng);
            tracing::debug!(
                "placed {placed}/{room} {} with {} strategy",
                request.entity_type,
                request.placement_strategy
            );
            if placed < room {
                let warning = GenerationWarning::EntityShortfall {
                    entity_type: request.entity_type,
                    requested: room,
                    placed,
                };
                tracing::warn!("{warning}");
                warnings.push(warning);
            }
        }

        if let (Some(cap), true) = (cap, dropped > 0) {
            let warning = GenerationWarning::EntityCapReached { cap, dropped };
            tracing::warn!("{warning}");
            warnings.push(warning);
        }

        Outcome::with_warnings(board.placed, warnings)
    }

    /// Places up to `count` instances of one request. Returns how many landed.
    fn place_request(
        &self,
        board: &mut Board<'_>,
        request: &EntityConfig,
        count: u32,
        rng: &mut ChaCha8Rng,
    ) -> u32 {
        let mut budget = self.tuning.attempts_per_entity.saturating_mul(count);
        let mut pool = board.candidates();
        let mut placed = 0_u32;

        while placed < count && budget > 0 {
            let Some(pos) = strategy::pick(
                request.placement_strategy,
                &pool,
                &strategy::Context {
                    grid: board.grid,
                    walkability: &self.walkability,
                    tuning: &self.tuning,
                    placed: &board.placed,
                },
                rng,
            ) else {
                break;
            };
            budget -= 1;
            pool.remove(pos);

            if board.admits(request, pos) {
                board.occupy(Entity::new(request.entity_type, pos).with_properties(request.properties.clone()));
                pool.record_batch(pos);
                placed += 1;
            }
        }

        placed
    }
}
