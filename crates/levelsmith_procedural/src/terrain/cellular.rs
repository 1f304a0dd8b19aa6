//! Cellular-automata caves.
//!
//! Random wall fill followed by neighbour-count smoothing. Out-of-bounds
//! neighbours count as walls, so caves close up against the border.

use levelsmith_shared::{AlgorithmKind, ConfigResult, Outcome, ParameterMap, TileGrid, TileType};
use rand::Rng;
use serde::Serialize;

use crate::params::ParamReader;
use crate::seed::Seed;

/// Parameters for cave generation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellularParams {
    /// Probability that a tile starts as wall.
    pub initial_density: f64,
    /// Smoothing passes.
    pub iterations: u32,
    /// A tile with at least this many wall neighbours becomes wall.
    pub birth_limit: u32,
    /// A tile with fewer than this many wall neighbours becomes floor.
    pub death_limit: u32,
}

impl CellularParams {
    /// Accepted parameter names.
    pub const KEYS: &'static [&'static str] =
        &["initialDensity", "iterations", "birthLimit", "deathLimit"];

    /// Parses and range-checks a parameter bag.
    ///
    /// # Errors
    ///
    /// Unknown keys or out-of-range values.
    pub fn from_params(params: &ParameterMap) -> ConfigResult<Self> {
        let defaults = Self::default();
        let reader = ParamReader::new(AlgorithmKind::Cellular, params, Self::KEYS)?;
        Ok(Self {
            initial_density: reader.f64_in("initialDensity", defaults.initial_density, 0.0..=1.0)?,
            iterations: reader.u32_in("iterations", defaults.iterations, 0..=100)?,
            birth_limit: reader.u32_in("birthLimit", defaults.birth_limit, 0..=8)?,
            death_limit: reader.u32_in("deathLimit", defaults.death_limit, 0..=8)?,
        })
    }

    pub(super) fn carve(&self, width: u32, height: u32, seed: Seed) -> Outcome<TileGrid> {
        let mut rng = seed.derive(Seed::TERRAIN).rng();
        let (w, h) = (width as usize, height as usize);

        let mut walls: Vec<bool> = (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                is_border(x, y, w, h) || rng.gen_bool(self.initial_density)
            })
            .collect();
        let mut next = walls.clone();

        for _ in 0..self.iterations {
            for y in 0..h {
                for x in 0..w {
                    let i = y * w + x;
                    next[i] = if is_border(x, y, w, h) {
                        true
                    } else {
                        let n = wall_neighbours(&walls, x, y, w, h);
                        if n >= self.birth_limit {
                            true
                        } else if n < self.death_limit {
                            false
                        } else {
                            walls[i]
                        }
                    };
                }
            }
            std::mem::swap(&mut walls, &mut next);
        }

        let mut grid = TileGrid::new(width, height, TileType::Ground);
        for (i, _) in walls.iter().enumerate().filter(|(_, &wall)| wall) {
            grid.set((i % w) as u32, (i / w) as u32, TileType::Wall);
        }
        Outcome::clean(grid)
    }
}

impl Default for CellularParams {
    fn default() -> Self {
        Self {
            initial_density: 0.45,
            iterations: 5,
            birth_limit: 5,
            death_limit: 4,
        }
    }
}

const fn is_border(x: usize, y: usize, w: usize, h: usize) -> bool {
    x == 0 || y == 0 || x + 1 == w || y + 1 == h
}

/// Counts walls among the 8 neighbours of `(x, y)`.
fn wall_neighbours(walls: &[bool], x: usize, y: usize, w: usize, h: usize) -> u32 {
    let mut count = 0;
    for dy in -1_i64..=1 {
        for dx in -1_i64..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            let outside = nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64;
            if outside || walls[ny as usize * w + nx as usize] {
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_is_solid() {
        let grid = CellularParams::default().carve(30, 20, Seed::new(3)).value;
        for x in 0..30 {
            assert_eq!(grid.get(x, 0), Some(TileType::Wall));
            assert_eq!(grid.get(x, 19), Some(TileType::Wall));
        }
        for y in 0..20 {
            assert_eq!(grid.get(0, y), Some(TileType::Wall));
            assert_eq!(grid.get(29, y), Some(TileType::Wall));
        }
    }

    #[test]
    fn test_zero_density_opens_interior() {
        let params = CellularParams {
            initial_density: 0.0,
            iterations: 0,
            ..CellularParams::default()
        };
        let grid = params.carve(12, 12, Seed::new(1)).value;
        assert_eq!(grid.get(5, 5), Some(TileType::Ground));
        assert_eq!(grid.histogram()[TileType::Wall.index()], 12 * 4 - 4);
    }

    #[test]
    fn test_full_density_is_solid() {
        let params = CellularParams {
            initial_density: 1.0,
            ..CellularParams::default()
        };
        let grid = params.carve(15, 15, Seed::new(1)).value;
        assert_eq!(grid.histogram()[TileType::Wall.index()], 15 * 15);
    }

    #[test]
    fn test_only_wall_and_ground_emitted() {
        let grid = CellularParams::default().carve(40, 40, Seed::new(8)).value;
        let histogram = grid.histogram();
        assert_eq!(
            histogram[TileType::Wall.index()] + histogram[TileType::Ground.index()],
            40 * 40
        );
    }

    #[test]
    fn test_neighbour_count_treats_outside_as_wall() {
        let walls = vec![false; 9];
        assert_eq!(wall_neighbours(&walls, 0, 0, 3, 3), 5);
        assert_eq!(wall_neighbours(&walls, 1, 1, 3, 3), 0);
    }
}
