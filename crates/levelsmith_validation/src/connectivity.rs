//! # Connectivity
//!
//! Labels every 4-connected component of walkable tiles with an explicit
//! stack flood fill. One pass, `O(width × height)`, no recursion.

use levelsmith_shared::{GridPos, TileGrid, Walkability};

/// Component labels for one grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectivityMap {
    width: u32,
    height: u32,
    /// Component id per tile, row-major. `None` for blocked tiles.
    labels: Vec<Option<u32>>,
    /// Tile count per component id.
    sizes: Vec<usize>,
}

impl ConnectivityMap {
    /// Labels the walkable components of `grid`.
    #[must_use]
    pub fn new(grid: &TileGrid, walkability: &Walkability) -> Self {
        let mut labels: Vec<Option<u32>> = vec![None; grid.len()];
        let mut sizes = Vec::new();
        let mut stack: Vec<GridPos> = Vec::new();

        for (start, &tile) in grid.tiles().iter().enumerate() {
            if labels[start].is_some() || !walkability.is_walkable(tile) {
                continue;
            }
            let id = sizes.len() as u32;
            let mut size = 0;
            labels[start] = Some(id);
            stack.push(grid.pos_of(start));

            while let Some(pos) = stack.pop() {
                size += 1;
                for next in pos.neighbors4() {
                    if !grid.is_walkable_with(walkability, next) {
                        continue;
                    }
                    let index = grid.index_of(next.x as u32, next.y as u32);
                    if labels[index].is_none() {
                        labels[index] = Some(id);
                        stack.push(next);
                    }
                }
            }
            sizes.push(size);
        }

        Self {
            width: grid.width(),
            height: grid.height(),
            labels,
            sizes,
        }
    }

    /// Number of components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.sizes.len()
    }

    /// Tile count of the largest component, 0 if there are none.
    #[must_use]
    pub fn largest_component_size(&self) -> usize {
        self.sizes.iter().copied().max().unwrap_or(0)
    }

    /// Tile count per component, in discovery (row-major) order.
    #[must_use]
    pub fn component_sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Total walkable tiles.
    #[must_use]
    pub fn walkable_tiles(&self) -> usize {
        self.sizes.iter().sum()
    }

    /// Component id at `pos`, or `None` for blocked or out-of-bounds tiles.
    #[must_use]
    pub fn component_at(&self, pos: GridPos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x as u32 >= self.width || pos.y as u32 >= self.height {
            return None;
        }
        let index = pos.y as usize * self.width as usize + pos.x as usize;
        self.labels[index].map(|id| id as usize)
    }

    /// Returns true if both positions are walkable and mutually reachable.
    #[must_use]
    pub fn same_component(&self, a: GridPos, b: GridPos) -> bool {
        match (self.component_at(a), self.component_at(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}
