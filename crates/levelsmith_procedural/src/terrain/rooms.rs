//! Rooms chained by corridors.
//!
//! Rooms are rejection-sampled inside the one-tile border with a one-tile
//! gap between them. After sorting by centre, each room is joined to the
//! next by an L-shaped corridor, which makes the open area one component.

use levelsmith_shared::{
    AlgorithmKind, ConfigResult, GenerationWarning, Outcome, ParameterMap, TileGrid, TileType,
};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use super::Rect;
use crate::params::ParamReader;
use crate::seed::Seed;

/// Parameters for room layouts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomParams {
    /// Smallest room side.
    pub min_room_size: u32,
    /// Largest room side.
    pub max_room_size: u32,
    /// Rooms to place.
    pub room_count: u32,
    /// Corridor width in tiles.
    pub corridor_width: u32,
}

impl RoomParams {
    /// Accepted parameter names.
    pub const KEYS: &'static [&'static str] =
        &["minRoomSize", "maxRoomSize", "roomCount", "corridorWidth"];

    /// Placement attempts per requested room.
    const ATTEMPTS_PER_ROOM: u32 = 50;

    /// Parses and range-checks a parameter bag.
    ///
    /// # Errors
    ///
    /// Unknown keys, out-of-range values, or `maxRoomSize < minRoomSize`.
    pub fn from_params(params: &ParameterMap) -> ConfigResult<Self> {
        let defaults = Self::default();
        let reader = ParamReader::new(AlgorithmKind::Rooms, params, Self::KEYS)?;
        let min_room_size = reader.u32_in("minRoomSize", defaults.min_room_size, 1..=500)?;
        let max_room_size = reader.u32_in("maxRoomSize", defaults.max_room_size.max(min_room_size), 1..=500)?;
        if max_room_size < min_room_size {
            return Err(reader.reject(
                "maxRoomSize",
                format!("{max_room_size} is smaller than minRoomSize {min_room_size}"),
            ));
        }
        Ok(Self {
            min_room_size,
            max_room_size,
            room_count: reader.u32_in("roomCount", defaults.room_count, 1..=1000)?,
            corridor_width: reader.u32_in("corridorWidth", defaults.corridor_width, 1..=10)?,
        })
    }

    pub(super) fn carve(&self, width: u32, height: u32, seed: Seed) -> Outcome<TileGrid> {
        let mut grid = TileGrid::new(width, height, TileType::Wall);
        let inner_w = width.saturating_sub(2);
        let inner_h = height.saturating_sub(2);

        if inner_w == 0 || inner_h == 0 {
            return Outcome::with_warnings(
                grid,
                vec![self.shortfall(0, format!("{width}x{height} has no interior"))],
            );
        }

        if self.min_room_size > inner_w || self.min_room_size > inner_h {
            let room = Rect {
                x: 1,
                y: 1,
                w: self.min_room_size.min(inner_w),
                h: self.min_room_size.min(inner_h),
            };
            grid.fill_rect(room.x, room.y, room.w, room.h, TileType::Ground);
            let reason = format!(
                "minRoomSize {} exceeds the {inner_w}x{inner_h} interior",
                self.min_room_size
            );
            return Outcome::with_warnings(grid, vec![self.shortfall(1, reason)]);
        }

        let mut rng = seed.derive(Seed::TERRAIN).rng();
        let mut rooms = self.place_rooms(&mut rng, inner_w, inner_h);
        for room in &rooms {
            grid.fill_rect(room.x, room.y, room.w, room.h, TileType::Ground);
        }

        rooms.sort_by_key(|room| room.center());
        for pair in rooms.windows(2) {
            let horizontal_first = rng.gen_bool(0.5);
            self.connect(&mut grid, pair[0].center(), pair[1].center(), horizontal_first);
        }

        let achieved = rooms.len() as u32;
        if achieved < self.room_count {
            let reason = format!("no free space after {} attempts", self.attempt_budget());
            return Outcome::with_warnings(grid, vec![self.shortfall(achieved, reason)]);
        }
        Outcome::clean(grid)
    }

    const fn attempt_budget(&self) -> u32 {
        self.room_count.saturating_mul(Self::ATTEMPTS_PER_ROOM)
    }

    fn shortfall(&self, achieved: u32, reason: String) -> GenerationWarning {
        GenerationWarning::LayoutInfeasible {
            algorithm: AlgorithmKind::Rooms,
            requested: self.room_count,
            achieved,
            reason,
        }
    }

    /// Rejection-samples up to `room_count` separated rooms.
    fn place_rooms(&self, rng: &mut ChaCha8Rng, inner_w: u32, inner_h: u32) -> Vec<Rect> {
        let max_w = self.max_room_size.min(inner_w);
        let max_h = self.max_room_size.min(inner_h);
        let mut rooms: Vec<Rect> = Vec::with_capacity(self.room_count as usize);

        for _ in 0..self.attempt_budget() {
            if rooms.len() as u32 >= self.room_count {
                break;
            }
            let w = rng.gen_range(self.min_room_size..=max_w);
            let h = rng.gen_range(self.min_room_size..=max_h);
            let candidate = Rect {
                x: rng.gen_range(1..=1 + inner_w - w),
                y: rng.gen_range(1..=1 + inner_h - h),
                w,
                h,
            };
            if rooms.iter().all(|room| !room.overlaps(candidate, 1)) {
                rooms.push(candidate);
            }
        }
        rooms
    }

    /// Carves an L-shaped corridor between two room centres.
    fn connect(&self, grid: &mut TileGrid, from: (u32, u32), to: (u32, u32), horizontal_first: bool) {
        let corner = if horizontal_first {
            (to.0, from.1)
        } else {
            (from.0, to.1)
        };
        self.segment(grid, from, corner);
        self.segment(grid, corner, to);
    }

    /// Sweeps a square brush along an axis-aligned segment, inside the border.
    fn segment(&self, grid: &mut TileGrid, a: (u32, u32), b: (u32, u32)) {
        let (x0, x1) = (a.0.min(b.0), a.0.max(b.0));
        let (y0, y1) = (a.1.min(b.1), a.1.max(b.1));
        let limit_x = grid.width() - 1;
        let limit_y = grid.height() - 1;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let w = self.corridor_width.min(limit_x - x);
                let h = self.corridor_width.min(limit_y - y);
                grid.fill_rect(x, y, w, h, TileType::Ground);
            }
        }
    }
}

impl Default for RoomParams {
    fn default() -> Self {
        Self {
            min_room_size: 4,
            max_room_size: 10,
            room_count: 8,
            corridor_width: 1,
        }
    }
}
