//! Candidate cells for one placement request.
//!
//! Built once per request from the walkable, unoccupied cells. A cell
//! leaves the pool in O(1) (swap-remove plus a per-tile slot map) when it is
//! taken or rejected. Each cell also carries its distance to the nearest
//! member of the current batch, Euclidean for `spread` and Chebyshev for
//! `clustered`, updated in one pass per accepted placement.

use levelsmith_shared::{GridPos, TileGrid};

pub(super) struct CandidatePool {
    width: u32,
    height: u32,
    cells: Vec<GridPos>,
    /// Euclidean distance to the nearest batch member, parallel to `cells`.
    nearest: Vec<f64>,
    /// Chebyshev distance to the nearest batch member, parallel to `cells`.
    reach: Vec<u32>,
    /// Position in `cells` per tile index, row-major.
    slot: Vec<Option<usize>>,
    batch_len: usize,
}

impl CandidatePool {
    pub(super) fn new(grid: &TileGrid, cells: impl IntoIterator<Item = GridPos>) -> Self {
        let cells: Vec<GridPos> = cells.into_iter().collect();
        let mut slot = vec![None; grid.len()];
        for (i, pos) in cells.iter().enumerate() {
            slot[grid.index_of(pos.x as u32, pos.y as u32)] = Some(i);
        }
        Self {
            width: grid.width(),
            height: grid.height(),
            nearest: vec![f64::INFINITY; cells.len()],
            reach: vec![u32::MAX; cells.len()],
            cells,
            slot,
            batch_len: 0,
        }
    }

    pub(super) fn cells(&self) -> &[GridPos] {
        &self.cells
    }

    #[cfg(test)]
    pub(super) fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true once a batch member has been recorded.
    pub(super) const fn has_batch(&self) -> bool {
        self.batch_len > 0
    }

    fn tile(&self, pos: GridPos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x as u32 >= self.width || pos.y as u32 >= self.height {
            return None;
        }
        Some(pos.y as usize * self.width as usize + pos.x as usize)
    }

    #[cfg(test)]
    pub(super) fn contains(&self, pos: GridPos) -> bool {
        self.tile(pos).is_some_and(|tile| self.slot[tile].is_some())
    }

    /// Drops `pos` from the pool. Returns false if it was not there.
    pub(super) fn remove(&mut self, pos: GridPos) -> bool {
        let Some(i) = self.tile(pos).and_then(|tile| self.slot[tile].take()) else {
            return false;
        };
        self.cells.swap_remove(i);
        self.nearest.swap_remove(i);
        self.reach.swap_remove(i);
        if let Some(&moved) = self.cells.get(i) {
            if let Some(tile) = self.tile(moved) {
                self.slot[tile] = Some(i);
            }
        }
        true
    }

    /// Folds a new batch member into the per-cell distances.
    pub(super) fn record_batch(&mut self, member: GridPos) {
        for (i, &pos) in self.cells.iter().enumerate() {
            self.nearest[i] = self.nearest[i].min(pos.distance(member));
            let chebyshev = pos.x.abs_diff(member.x).max(pos.y.abs_diff(member.y));
            self.reach[i] = self.reach[i].min(chebyshev);
        }
        self.batch_len += 1;
    }

    /// The cell farthest from its nearest batch member; earliest wins ties.
    pub(super) fn farthest(&self) -> Option<GridPos> {
        self.nearest
            .iter()
            .enumerate()
            .reduce(|best, next| if next.1 > best.1 { next } else { best })
            .map(|(i, _)| self.cells[i])
    }

    /// Cells within `radius` (Chebyshev) of some batch member.
    pub(super) fn within(&self, radius: u32) -> Vec<GridPos> {
        self.cells
            .iter()
            .zip(&self.reach)
            .filter(|&(_, &reach)| reach <= radius)
            .map(|(&pos, _)| pos)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelsmith_shared::{TileType, Walkability};

    fn pool(size: u32) -> CandidatePool {
        let grid = TileGrid::new(size, size, TileType::Ground);
        let cells = grid.walkable_positions(&Walkability::conventional());
        CandidatePool::new(&grid, cells)
    }

    #[test]
    fn test_remove_keeps_slots_consistent() {
        let mut pool = pool(4);
        assert!(pool.remove(GridPos::new(0, 0)));
        assert!(!pool.remove(GridPos::new(0, 0)), "already gone");
        assert!(!pool.remove(GridPos::new(-1, 2)));
        assert!(pool.remove(GridPos::new(3, 3)));
        assert_eq!(pool.cells().len(), 14);
        for &pos in pool.cells() {
            assert!(pool.contains(pos), "{pos} lost its slot");
        }
        assert!(!pool.contains(GridPos::new(3, 3)));
    }

    #[test]
    fn test_distances_follow_batch() {
        let mut pool = pool(11);
        assert!(!pool.has_batch());
        pool.record_batch(GridPos::new(0, 0));
        assert_eq!(pool.farthest(), Some(GridPos::new(10, 10)));
        pool.record_batch(GridPos::new(10, 10));
        let best = pool.farthest().expect("cells");
        assert!(best == GridPos::new(10, 0) || best == GridPos::new(0, 10));
        assert_eq!(pool.within(0).len(), 2);
        assert_eq!(pool.within(1).len(), 8);
    }

    #[test]
    fn test_drain_to_empty() {
        let mut pool = pool(3);
        while let Some(&pos) = pool.cells().first() {
            assert!(pool.remove(pos));
        }
        assert!(pool.is_empty());
        assert_eq!(pool.farthest(), None);
    }
}
