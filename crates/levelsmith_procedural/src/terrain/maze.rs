//! Spanning-tree mazes.
//!
//! The grid is split into a lattice of `pathWidth`-sized cells separated by
//! `wallThickness`-wide walls. An iterative backtracker visits every cell
//! once, knocking out the wall to each newly visited cell, so the open tiles
//! form a single tree-shaped component. Leftover strips at the right and
//! bottom edges stay solid.

use levelsmith_shared::{
    AlgorithmKind, ConfigResult, GenerationWarning, Outcome, ParameterMap, TileGrid, TileType,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::params::ParamReader;
use crate::seed::Seed;

/// Parameters for maze generation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeParams {
    /// Wall width in tiles.
    pub wall_thickness: u32,
    /// Corridor width in tiles.
    pub path_width: u32,
    /// Probability of turning rather than continuing straight.
    pub complexity: f64,
}

/// Lattice step directions: east, west, south, north.
const DIRECTIONS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl MazeParams {
    /// Accepted parameter names.
    pub const KEYS: &'static [&'static str] = &["wallThickness", "pathWidth", "complexity"];

    /// Parses and range-checks a parameter bag.
    ///
    /// # Errors
    ///
    /// Unknown keys or out-of-range values.
    pub fn from_params(params: &ParameterMap) -> ConfigResult<Self> {
        let defaults = Self::default();
        let reader = ParamReader::new(AlgorithmKind::Maze, params, Self::KEYS)?;
        Ok(Self {
            wall_thickness: reader.u32_in("wallThickness", defaults.wall_thickness, 1..=10)?,
            path_width: reader.u32_in("pathWidth", defaults.path_width, 1..=10)?,
            complexity: reader.f64_in("complexity", defaults.complexity, 0.0..=1.0)?,
        })
    }

    /// Number of lattice cells that fit along an axis of `extent` tiles.
    const fn cells_along(&self, extent: u32) -> u32 {
        extent.saturating_sub(self.wall_thickness) / (self.wall_thickness + self.path_width)
    }

    /// Top-left tile of lattice coordinate `c`.
    const fn origin(&self, c: u32) -> u32 {
        self.wall_thickness + c * (self.wall_thickness + self.path_width)
    }

    pub(super) fn carve(&self, width: u32, height: u32, seed: Seed) -> Outcome<TileGrid> {
        let mut grid = TileGrid::new(width, height, TileType::Wall);
        let cells_x = self.cells_along(width);
        let cells_y = self.cells_along(height);

        if cells_x == 0 || cells_y == 0 {
            let warning = GenerationWarning::LayoutInfeasible {
                algorithm: AlgorithmKind::Maze,
                requested: 1,
                achieved: 0,
                reason: format!(
                    "{width}x{height} cannot hold a {}-wide path between {}-wide walls",
                    self.path_width, self.wall_thickness
                ),
            };
            return Outcome::with_warnings(grid, vec![warning]);
        }

        let mut rng = seed.derive(Seed::TERRAIN).rng();
        let (cw, ch) = (i64::from(cells_x), i64::from(cells_y));
        let mut visited = vec![false; (cells_x * cells_y) as usize];
        let index = |cx: i64, cy: i64| (cy * cw + cx) as usize;

        let start = (rng.gen_range(0..cw), rng.gen_range(0..ch));
        visited[index(start.0, start.1)] = true;
        self.open_cell(&mut grid, start.0, start.1);

        // (cell, direction it was entered from)
        let mut stack: Vec<((i64, i64), Option<usize>)> = vec![(start, None)];
        while let Some(&((cx, cy), heading)) = stack.last() {
            let open: Vec<usize> = (0..DIRECTIONS.len())
                .filter(|&d| {
                    let (nx, ny) = (cx + DIRECTIONS[d].0, cy + DIRECTIONS[d].1);
                    (0..cw).contains(&nx) && (0..ch).contains(&ny) && !visited[index(nx, ny)]
                })
                .collect();

            let straight = heading.filter(|d| open.contains(d));
            let next = match straight {
                Some(d) if rng.gen_bool(1.0 - self.complexity) => Some(d),
                _ => open.choose(&mut rng).copied(),
            };
            let Some(d) = next else {
                stack.pop();
                continue;
            };

            let (nx, ny) = (cx + DIRECTIONS[d].0, cy + DIRECTIONS[d].1);
            visited[index(nx, ny)] = true;
            self.open_cell(&mut grid, nx, ny);
            self.open_passage(&mut grid, (cx, cy), (nx, ny));
            stack.push(((nx, ny), Some(d)));
        }

        Outcome::clean(grid)
    }

    fn open_cell(&self, grid: &mut TileGrid, cx: i64, cy: i64) {
        let (x, y) = (self.origin(cx as u32), self.origin(cy as u32));
        grid.fill_rect(x, y, self.path_width, self.path_width, TileType::Ground);
    }

    /// Opens the wall strip between two orthogonally adjacent cells.
    fn open_passage(&self, grid: &mut TileGrid, a: (i64, i64), b: (i64, i64)) {
        let (lx, ly) = (a.0.min(b.0) as u32, a.1.min(b.1) as u32);
        let (x, y) = (self.origin(lx), self.origin(ly));
        if a.0 == b.0 {
            grid.fill_rect(x, y + self.path_width, self.path_width, self.wall_thickness, TileType::Ground);
        } else {
            grid.fill_rect(x + self.path_width, y, self.wall_thickness, self.path_width, TileType::Ground);
        }
    }
}

impl Default for MazeParams {
    fn default() -> Self {
        Self {
            wall_thickness: 1,
            path_width: 1,
            complexity: 0.5,
        }
    }
}
