//! # Tiles and Tile Grids
//!
//! A level's terrain is a dense `width × height` matrix of [`TileType`],
//! stored row-major. Grids serialize as `TileType[height][width]`.
//!
//! Walkability is not a property of the grid itself. The conventional
//! mapping (Wall, Water, Lava block movement) is available through
//! [`TileGrid::is_walkable`], and any other mapping can be supplied as a
//! [`Walkability`] policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::normalize_name;

/// Terrain cell types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[repr(u8)]
pub enum TileType {
    /// Open floor.
    Ground = 0,
    /// Solid wall.
    Wall = 1,
    /// Deep water.
    Water = 2,
    /// Grass.
    Grass = 3,
    /// Bare rock.
    Stone = 4,
    /// Sand.
    Sand = 5,
    /// Lava.
    Lava = 6,
    /// Ice.
    Ice = 7,
}

impl TileType {
    /// Number of known tile types.
    pub const COUNT: usize = 8;

    /// Every tile type, in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Ground,
        Self::Wall,
        Self::Water,
        Self::Grass,
        Self::Stone,
        Self::Sand,
        Self::Lava,
        Self::Ice,
    ];

    /// Dense index in `0..COUNT`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical name, as serialized.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ground => "Ground",
            Self::Wall => "Wall",
            Self::Water => "Water",
            Self::Grass => "Grass",
            Self::Stone => "Stone",
            Self::Sand => "Sand",
            Self::Lava => "Lava",
            Self::Ice => "Ice",
        }
    }

    /// Conventional walkability: Wall, Water and Lava block movement.
    #[inline]
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall | Self::Water | Self::Lava)
    }

    /// Single-character glyph for text previews.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Ground => '.',
            Self::Wall => '#',
            Self::Water => '~',
            Self::Grass => '"',
            Self::Stone => ':',
            Self::Sand => ',',
            Self::Lava => '^',
            Self::Ice => '*',
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TileType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|tile| normalize_name(tile.name()) == wanted)
            .ok_or_else(|| ConfigError::UnknownTileType(s.to_string()))
    }
}

impl TryFrom<String> for TileType {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Walkability policy: which tile types block movement.
///
/// Serializes as the list of blocking tile types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<TileType>", into = "Vec<TileType>")]
pub struct Walkability {
    blocked: [bool; TileType::COUNT],
}

impl Walkability {
    /// The conventional mapping: Wall, Water and Lava block.
    #[must_use]
    pub const fn conventional() -> Self {
        let mut blocked = [false; TileType::COUNT];
        blocked[TileType::Wall.index()] = true;
        blocked[TileType::Water.index()] = true;
        blocked[TileType::Lava.index()] = true;
        Self { blocked }
    }

    /// Returns a copy with `tile` marked as blocking or not.
    #[must_use]
    pub const fn with_blocked(mut self, tile: TileType, blocked: bool) -> Self {
        self.blocked[tile.index()] = blocked;
        self
    }

    /// Returns true if entities may stand on `tile`.
    #[inline]
    #[must_use]
    pub const fn is_walkable(&self, tile: TileType) -> bool {
        !self.blocked[tile.index()]
    }

    /// Tile types that block movement, in discriminant order.
    #[must_use]
    pub fn blocking(&self) -> Vec<TileType> {
        TileType::ALL
            .into_iter()
            .filter(|tile| self.blocked[tile.index()])
            .collect()
    }
}

impl Default for Walkability {
    fn default() -> Self {
        Self::conventional()
    }
}

impl From<Vec<TileType>> for Walkability {
    fn from(blocking: Vec<TileType>) -> Self {
        let mut blocked = [false; TileType::COUNT];
        for tile in blocking {
            blocked[tile.index()] = true;
        }
        Self { blocked }
    }
}

impl From<Walkability> for Vec<TileType> {
    fn from(policy: Walkability) -> Self {
        policy.blocking()
    }
}

/// Integer grid coordinate.
///
/// Signed so that out-of-range positions coming from external callers can
/// be represented and reported instead of rejected at parse time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridPos {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in tiles.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// Manhattan distance in tiles.
    #[inline]
    #[must_use]
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbours (N, E, S, W). May be out of bounds.
    #[must_use]
    pub const fn neighbors4(self) -> [Self; 4] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y),
        ]
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dense 2D terrain grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<TileType>>", into = "Vec<Vec<TileType>>")]
pub struct TileGrid {
    width: u32,
    height: u32,
    /// Row-major tile storage (`y * width + x`).
    tiles: Vec<TileType>,
}

impl TileGrid {
    /// Creates a grid filled with one tile type.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: TileType) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width as usize * height as usize],
        }
    }

    /// Builds a grid from rows (`rows[y][x]`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedGrid`] if rows differ in length.
    pub fn from_rows(rows: Vec<Vec<TileType>>) -> Result<Self, ConfigError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(ConfigError::MalformedGrid(format!(
                "row {y} has {} tiles, expected {width}",
                row.len()
            )));
        }
        let width = u32::try_from(width)
            .map_err(|_| ConfigError::MalformedGrid(format!("width {width} too large")))?;
        let height = u32::try_from(height)
            .map_err(|_| ConfigError::MalformedGrid(format!("height {height} too large")))?;
        // A grid with rows but no columns has no tiles at all.
        let height = if width == 0 { 0 } else { height };
        Ok(Self {
            width,
            height,
            tiles: rows.into_iter().flatten().collect(),
        })
    }

    /// Parses a text preview back into a grid, one line per row.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedGrid`] on unknown glyphs or ragged rows.
    pub fn from_ascii(text: &str) -> Result<Self, ConfigError> {
        let rows = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(y, line)| {
                line.chars()
                    .map(|glyph| {
                        TileType::ALL
                            .into_iter()
                            .find(|tile| tile.glyph() == glyph)
                            .ok_or_else(|| {
                                ConfigError::MalformedGrid(format!(
                                    "unknown glyph '{glyph}' on line {y}"
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }

    /// Width in tiles.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of tiles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true if the grid has no tiles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Raw row-major tiles.
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    /// Returns true if `(x, y)` lies inside the grid.
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Row-major index of an in-bounds coordinate.
    #[inline]
    #[must_use]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Coordinate of a row-major index.
    #[inline]
    #[must_use]
    pub fn pos_of(&self, index: usize) -> GridPos {
        let width = self.width.max(1) as usize;
        GridPos::new((index % width) as i32, (index / width) as i32)
    }

    /// Tile at `(x, y)`, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<TileType> {
        if self.in_bounds(x, y) {
            Some(self.tiles[self.index_of(x as u32, y as u32)])
        } else {
            None
        }
    }

    /// Tile at a position, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn at(&self, pos: GridPos) -> Option<TileType> {
        self.get(pos.x, pos.y)
    }

    /// Sets the tile at `(x, y)`. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, tile: TileType) {
        if x < self.width && y < self.height {
            let index = self.index_of(x, y);
            self.tiles[index] = tile;
        }
    }

    /// Fills the rectangle `[x, x + w) × [y, y + h)`, clipped to the grid.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, tile: TileType) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for yy in y..y_end {
            for xx in x..x_end {
                let index = self.index_of(xx, yy);
                self.tiles[index] = tile;
            }
        }
    }

    /// Conventional walkability at `(x, y)`; false outside the grid.
    #[inline]
    #[must_use]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(TileType::is_walkable)
    }

    /// Walkability at a position under an explicit policy; false outside the grid.
    #[inline]
    #[must_use]
    pub fn is_walkable_with(&self, policy: &Walkability, pos: GridPos) -> bool {
        self.at(pos).is_some_and(|tile| policy.is_walkable(tile))
    }

    /// Number of walkable tiles under a policy.
    #[must_use]
    pub fn walkable_count(&self, policy: &Walkability) -> usize {
        self.tiles.iter().filter(|&&tile| policy.is_walkable(tile)).count()
    }

    /// Per-type tile counts, indexed by [`TileType::index`].
    #[must_use]
    pub fn histogram(&self) -> [usize; TileType::COUNT] {
        let mut counts = [0; TileType::COUNT];
        for tile in &self.tiles {
            counts[tile.index()] += 1;
        }
        counts
    }

    /// Iterates rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileType]> {
        self.tiles.chunks(self.width.max(1) as usize)
    }

    /// Every walkable position under a policy, in row-major order.
    #[must_use]
    pub fn walkable_positions(&self, policy: &Walkability) -> Vec<GridPos> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, &tile)| policy.is_walkable(tile))
            .map(|(index, _)| self.pos_of(index))
            .collect()
    }

    /// Applies `f` to every tile in place.
    pub fn map_in_place(&mut self, mut f: impl FnMut(TileType) -> TileType) {
        for tile in &mut self.tiles {
            *tile = f(*tile);
        }
    }

    /// Text preview, one line per row, using [`TileType::glyph`].
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.tiles.len() + self.height as usize);
        for row in self.rows() {
            out.extend(row.iter().map(|tile| tile.glyph()));
            out.push('\n');
        }
        out
    }
}

impl TryFrom<Vec<Vec<TileType>>> for TileGrid {
    type Error = ConfigError;

    fn try_from(rows: Vec<Vec<TileType>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<TileGrid> for Vec<Vec<TileType>> {
    fn from(grid: TileGrid) -> Self {
        if grid.is_empty() {
            return Vec::new();
        }
        grid.rows().map(<[TileType]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_names_parse_case_insensitively() {
        assert_eq!("ground".parse::<TileType>(), Ok(TileType::Ground));
        assert_eq!("LAVA".parse::<TileType>(), Ok(TileType::Lava));
        assert_eq!(
            "mud".parse::<TileType>(),
            Err(ConfigError::UnknownTileType("mud".to_string()))
        );
    }

    #[test]
    fn test_conventional_walkability() {
        let walkable: Vec<_> = TileType::ALL
            .into_iter()
            .filter(|tile| tile.is_walkable())
            .collect();
        assert_eq!(
            walkable,
            vec![
                TileType::Ground,
                TileType::Grass,
                TileType::Stone,
                TileType::Sand,
                TileType::Ice
            ]
        );
        assert_eq!(Walkability::conventional().blocking().len(), 3);
    }

    #[test]
    fn test_custom_policy_overrides_convention() {
        let policy = Walkability::conventional()
            .with_blocked(TileType::Ice, true)
            .with_blocked(TileType::Water, false);
        assert!(!policy.is_walkable(TileType::Ice));
        assert!(policy.is_walkable(TileType::Water));
    }

    #[test]
    fn test_grid_bounds_and_access() {
        let mut grid = TileGrid::new(4, 3, TileType::Wall);
        grid.set(1, 2, TileType::Ground);
        grid.set(10, 10, TileType::Ground);

        assert_eq!(grid.get(1, 2), Some(TileType::Ground));
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(4, 0), None);
        assert!(grid.is_walkable(1, 2));
        assert!(!grid.is_walkable(0, 0));
        assert_eq!(grid.walkable_count(&Walkability::default()), 1);
    }

    #[test]
    fn test_grid_serializes_as_rows() {
        let mut grid = TileGrid::new(2, 2, TileType::Ground);
        grid.set(1, 0, TileType::Wall);

        let json = serde_json::to_string(&grid).expect("serialize");
        assert_eq!(json, r#"[["Ground","Wall"],["Ground","Ground"]]"#);

        let back: TileGrid = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, grid);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![TileType::Ground; 3], vec![TileType::Ground; 2]];
        assert!(matches!(
            TileGrid::from_rows(rows),
            Err(ConfigError::MalformedGrid(_))
        ));
    }

    #[test]
    fn test_ascii_preview_round_trips() {
        let text = "###\n#.#\n#~#\n";
        let grid = TileGrid::from_ascii(text).expect("parse");
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(1, 2), Some(TileType::Water));
        assert_eq!(grid.to_ascii(), text);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut grid = TileGrid::new(5, 5, TileType::Wall);
        grid.fill_rect(3, 3, 10, 10, TileType::Sand);
        assert_eq!(grid.histogram()[TileType::Sand.index()], 4);
    }
}
