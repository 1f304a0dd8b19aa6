//! Candidate selection per placement strategy.
//!
//! `random` draws uniformly. `spread` and `clustered` read the per-cell
//! batch distances the [`CandidatePool`] keeps. The region biases
//! (`center`, `corners`, `near_walls`, `far_from_player`) run a tournament
//! over a random sample of candidates, so they lean toward their region
//! without always returning the same cell.

use std::cmp::Ordering;

use levelsmith_shared::{Entity, EntityType, GridPos, PlacementStrategy, TileGrid, Walkability};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use super::pool::CandidatePool;
use super::PlacementTuning;

/// What a strategy may look at when choosing.
pub(super) struct Context<'a> {
    pub(super) grid: &'a TileGrid,
    pub(super) walkability: &'a Walkability,
    pub(super) tuning: &'a PlacementTuning,
    /// Every entity placed so far, all requests.
    pub(super) placed: &'a [Entity],
}

/// Picks the next candidate, or `None` if there are none.
pub(super) fn pick(
    strategy: PlacementStrategy,
    pool: &CandidatePool,
    ctx: &Context<'_>,
    rng: &mut ChaCha8Rng,
) -> Option<GridPos> {
    let candidates = pool.cells();
    match strategy {
        PlacementStrategy::Random => candidates.choose(rng).copied(),
        PlacementStrategy::Spread => {
            if pool.has_batch() {
                pool.farthest()
            } else {
                candidates.choose(rng).copied()
            }
        }
        PlacementStrategy::Clustered => {
            let near = pool.within(ctx.tuning.cluster_radius);
            if near.is_empty() {
                candidates.choose(rng).copied()
            } else {
                near.choose(rng).copied()
            }
        }
        PlacementStrategy::Center => {
            let (cx, cy) = centre(ctx.grid);
            tournament(candidates, ctx, rng, Ordering::Less, |pos| {
                (f64::from(pos.x) - cx).hypot(f64::from(pos.y) - cy)
            })
        }
        PlacementStrategy::Corners => {
            let far_x = f64::from(ctx.grid.width().saturating_sub(1));
            let far_y = f64::from(ctx.grid.height().saturating_sub(1));
            let corners = [(0.0, 0.0), (far_x, 0.0), (0.0, far_y), (far_x, far_y)];
            tournament(candidates, ctx, rng, Ordering::Less, |pos| {
                corners
                    .iter()
                    .map(|&(x, y)| (f64::from(pos.x) - x).hypot(f64::from(pos.y) - y))
                    .fold(f64::INFINITY, f64::min)
            })
        }
        PlacementStrategy::NearWalls => tournament(candidates, ctx, rng, Ordering::Greater, |pos| {
            f64::from(blocking_neighbours(ctx.grid, ctx.walkability, pos))
        }),
        PlacementStrategy::FarFromPlayer => {
            let players: Vec<GridPos> = ctx
                .placed
                .iter()
                .filter(|entity| entity.entity_type == EntityType::Player)
                .map(|entity| entity.position)
                .collect();
            if players.is_empty() {
                return candidates.choose(rng).copied();
            }
            tournament(candidates, ctx, rng, Ordering::Greater, |pos| {
                nearest(&players, pos)
            })
        }
    }
}

/// Best-scoring member of a random sample. `prefer` is `Less` to minimize.
fn tournament(
    candidates: &[GridPos],
    ctx: &Context<'_>,
    rng: &mut ChaCha8Rng,
    prefer: Ordering,
    score: impl Fn(GridPos) -> f64,
) -> Option<GridPos> {
    let size = (ctx.tuning.sample_size.max(1) as usize).min(candidates.len());
    candidates
        .choose_multiple(rng, size)
        .copied()
        .map(|pos| (score(pos), pos))
        .reduce(|best, next| {
            if next.0.total_cmp(&best.0) == prefer {
                next
            } else {
                best
            }
        })
        .map(|(_, pos)| pos)
}

fn centre(grid: &TileGrid) -> (f64, f64) {
    (
        f64::from(grid.width().saturating_sub(1)) / 2.0,
        f64::from(grid.height().saturating_sub(1)) / 2.0,
    )
}

fn nearest(points: &[GridPos], pos: GridPos) -> f64 {
    points
        .iter()
        .map(|point| point.distance(pos))
        .fold(f64::INFINITY, f64::min)
}

/// Blocking cells among the 8 neighbours; outside the grid counts as blocking.
fn blocking_neighbours(grid: &TileGrid, walkability: &Walkability, pos: GridPos) -> u32 {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if (dx, dy) != (0, 0) && !grid.is_walkable_with(walkability, GridPos::new(pos.x + dx, pos.y + dy)) {
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;
    use levelsmith_shared::TileType;

    fn open(size: u32) -> TileGrid {
        TileGrid::new(size, size, TileType::Ground)
    }

    fn full_pool(grid: &TileGrid, batch: &[GridPos]) -> CandidatePool {
        let mut pool = CandidatePool::new(grid, grid.walkable_positions(&Walkability::conventional()));
        for &member in batch {
            pool.record_batch(member);
        }
        pool
    }

    fn ctx<'a>(
        grid: &'a TileGrid,
        tuning: &'a PlacementTuning,
        walkability: &'a Walkability,
        placed: &'a [Entity],
    ) -> Context<'a> {
        Context {
            grid,
            walkability,
            tuning,
            placed,
        }
    }

    #[test]
    fn test_spread_picks_farthest_point() {
        let grid = open(11);
        let tuning = PlacementTuning::default();
        let walkability = Walkability::conventional();
        let pool = full_pool(&grid, &[GridPos::new(0, 0)]);
        let context = ctx(&grid, &tuning, &walkability, &[]);
        let chosen = pick(PlacementStrategy::Spread, &pool, &context, &mut Seed::new(1).rng());
        assert_eq!(chosen, Some(GridPos::new(10, 10)));
    }

    #[test]
    fn test_full_tournament_is_exact() {
        let grid = open(9);
        let tuning = PlacementTuning {
            sample_size: 1000,
            ..PlacementTuning::default()
        };
        let walkability = Walkability::conventional();
        let pool = full_pool(&grid, &[]);
        let context = ctx(&grid, &tuning, &walkability, &[]);
        let mut rng = Seed::new(2).rng();
        assert_eq!(
            pick(PlacementStrategy::Center, &pool, &context, &mut rng),
            Some(GridPos::new(4, 4))
        );
        let corner = pick(PlacementStrategy::Corners, &pool, &context, &mut rng)
            .expect("candidates");
        assert!([0, 8].contains(&corner.x) && [0, 8].contains(&corner.y));
    }

    #[test]
    fn test_near_walls_prefers_border() {
        let grid = open(9);
        let tuning = PlacementTuning {
            sample_size: 1000,
            ..PlacementTuning::default()
        };
        let walkability = Walkability::conventional();
        let pool = full_pool(&grid, &[]);
        let context = ctx(&grid, &tuning, &walkability, &[]);
        let pos = pick(PlacementStrategy::NearWalls, &pool, &context, &mut Seed::new(3).rng())
            .expect("candidates");
        assert_eq!(blocking_neighbours(&grid, &walkability, pos), 5);
    }

    #[test]
    fn test_far_from_player() {
        let grid = open(9);
        let tuning = PlacementTuning {
            sample_size: 1000,
            ..PlacementTuning::default()
        };
        let walkability = Walkability::conventional();
        let pool = full_pool(&grid, &[]);
        let player = [Entity::new(EntityType::Player, GridPos::new(0, 0))];
        let context = ctx(&grid, &tuning, &walkability, &player);
        let pos = pick(PlacementStrategy::FarFromPlayer, &pool, &context, &mut Seed::new(4).rng());
        assert_eq!(pos, Some(GridPos::new(8, 8)));
    }

    #[test]
    fn test_clustered_stays_near_batch() {
        let grid = open(30);
        let tuning = PlacementTuning::default();
        let walkability = Walkability::conventional();
        let pool = full_pool(&grid, &[GridPos::new(15, 15)]);
        let context = ctx(&grid, &tuning, &walkability, &[]);
        let mut rng = Seed::new(5).rng();
        for _ in 0..20 {
            let pos = pick(PlacementStrategy::Clustered, &pool, &context, &mut rng)
                .expect("candidates");
            assert!((pos.x - 15).abs() <= 4 && (pos.y - 15).abs() <= 4);
        }
    }

    #[test]
    fn test_empty_candidates() {
        let grid = open(5);
        let tuning = PlacementTuning::default();
        let walkability = Walkability::conventional();
        let pool = CandidatePool::new(&grid, Vec::new());
        let context = ctx(&grid, &tuning, &walkability, &[]);
        for strategy in PlacementStrategy::ALL {
            assert_eq!(pick(strategy, &pool, &context, &mut Seed::new(6).rng()), None);
        }
    }
}
