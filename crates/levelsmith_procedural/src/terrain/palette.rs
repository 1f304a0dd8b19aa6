//! Tile-type allowlist enforcement.

use levelsmith_shared::{ConfigError, ConfigResult, TileType};

/// Substitution order for disallowed blocking tiles.
const BLOCKING_ORDER: [TileType; 3] = [TileType::Wall, TileType::Water, TileType::Lava];

/// Substitution order for disallowed walkable tiles.
const WALKABLE_ORDER: [TileType; 5] = [
    TileType::Ground,
    TileType::Grass,
    TileType::Stone,
    TileType::Sand,
    TileType::Ice,
];

/// Remaps generated tiles onto the configured allowlist.
///
/// A disallowed tile becomes the first allowed tile of the same
/// walkability class, or the first allowed tile at all when its class has
/// no allowed member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainPalette {
    /// Precomputed substitution, indexed by [`TileType::index`].
    lookup: [TileType; TileType::COUNT],
}

impl TerrainPalette {
    /// Builds the palette for an allowlist.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyTerrainTypes`] for an empty allowlist.
    pub fn new(allowed: &[TileType]) -> ConfigResult<Self> {
        let Some(&first) = allowed.first() else {
            return Err(ConfigError::EmptyTerrainTypes);
        };
        let pick = |order: &[TileType]| order.iter().copied().find(|tile| allowed.contains(tile));

        let mut lookup = TileType::ALL;
        for tile in TileType::ALL {
            lookup[tile.index()] = if allowed.contains(&tile) {
                tile
            } else if tile.is_walkable() {
                pick(&WALKABLE_ORDER).unwrap_or(first)
            } else {
                pick(&BLOCKING_ORDER).unwrap_or(first)
            };
        }
        Ok(Self { lookup })
    }

    /// A palette that allows every tile type.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            lookup: TileType::ALL,
        }
    }

    /// The tile a generated `tile` becomes.
    #[inline]
    #[must_use]
    pub const fn resolve(&self, tile: TileType) -> TileType {
        self.lookup[tile.index()]
    }

    /// Returns true if `tile` survives unchanged.
    #[must_use]
    pub fn allows(&self, tile: TileType) -> bool {
        self.resolve(tile) == tile
    }

    /// Remaps every tile of `grid` in place.
    pub fn apply(&self, grid: &mut levelsmith_shared::TileGrid) {
        grid.map_in_place(|tile| self.resolve(tile));
    }
}

impl Default for TerrainPalette {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_palette_is_identity() {
        let palette = TerrainPalette::new(&TileType::ALL).expect("non-empty");
        assert_eq!(palette, TerrainPalette::all());
        for tile in TileType::ALL {
            assert!(palette.allows(tile));
        }
    }

    #[test]
    fn test_substitution_keeps_walkability_class() {
        let palette = TerrainPalette::new(&[TileType::Sand, TileType::Water]).expect("non-empty");
        assert_eq!(palette.resolve(TileType::Ground), TileType::Sand);
        assert_eq!(palette.resolve(TileType::Grass), TileType::Sand);
        assert_eq!(palette.resolve(TileType::Wall), TileType::Water);
        assert_eq!(palette.resolve(TileType::Lava), TileType::Water);
    }

    #[test]
    fn test_missing_class_falls_back_to_first_allowed() {
        let palette = TerrainPalette::new(&[TileType::Ice, TileType::Grass]).expect("non-empty");
        assert_eq!(palette.resolve(TileType::Wall), TileType::Ice, "list order, not tile order");
        assert_eq!(palette.resolve(TileType::Lava), TileType::Ice);
        assert_eq!(palette.resolve(TileType::Ground), TileType::Grass);
        assert_eq!(palette.resolve(TileType::Ice), TileType::Ice);

        let reversed = TerrainPalette::new(&[TileType::Grass, TileType::Ice]).expect("non-empty");
        assert_eq!(reversed.resolve(TileType::Wall), TileType::Grass);
    }

    #[test]
    fn test_empty_allowlist_rejected() {
        assert_eq!(TerrainPalette::new(&[]), Err(ConfigError::EmptyTerrainTypes));
    }
}
