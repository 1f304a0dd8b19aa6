//! # Validation Settings
//!
//! Thresholds for structural checks, playability and quality scoring.
//! Deserializes from the engine's `[validation]` TOML section; every field
//! is optional.

use levelsmith_shared::Walkability;
use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};
use crate::quality::QualityWeights;

/// Validator thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Minimum grid width.
    pub min_width: u32,
    /// Minimum grid height.
    pub min_height: u32,
    /// Lowest acceptable walkable ratio.
    pub navigability_min: f64,
    /// Highest acceptable walkable ratio.
    pub navigability_max: f64,
    /// Minimum size of the largest connected walkable region.
    pub min_connected_area: usize,
    /// Sub-score weights.
    pub quality_weights: QualityWeights,
    /// Ratio band that scores full navigability.
    pub navigability_peak: [f64; 2],
    /// Ratio band outside which navigability scores zero.
    pub navigability_outer: [f64; 2],
    /// Tile types that block movement.
    #[serde(rename = "blocking_tiles")]
    pub walkability: Walkability,
}

impl ValidationSettings {
    /// Default minimum side length.
    pub const DEFAULT_MIN_SIDE: u32 = 10;
    /// Default minimum connected area.
    pub const DEFAULT_MIN_CONNECTED_AREA: usize = 100;

    /// Sets the minimum dimensions.
    #[must_use]
    pub const fn with_min_dimensions(mut self, width: u32, height: u32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    /// Sets the acceptable walkable ratio band.
    #[must_use]
    pub const fn with_navigability_band(mut self, min: f64, max: f64) -> Self {
        self.navigability_min = min;
        self.navigability_max = max;
        self
    }

    /// Sets the minimum connected area.
    #[must_use]
    pub const fn with_min_connected_area(mut self, area: usize) -> Self {
        self.min_connected_area = area;
        self
    }

    /// Sets the quality weights.
    #[must_use]
    pub const fn with_quality_weights(mut self, weights: QualityWeights) -> Self {
        self.quality_weights = weights;
        self
    }

    /// Sets the walkability policy.
    #[must_use]
    pub const fn with_walkability(mut self, walkability: Walkability) -> Self {
        self.walkability = walkability;
        self
    }

    /// Checks bands and weights for consistency.
    ///
    /// # Errors
    ///
    /// The first inconsistent setting found.
    pub fn validate(&self) -> SettingsResult<()> {
        check_band("navigability", [self.navigability_min, self.navigability_max])?;
        check_band("navigability_peak", self.navigability_peak)?;
        check_band("navigability_outer", self.navigability_outer)?;

        let [peak_low, peak_high] = self.navigability_peak;
        let [outer_low, outer_high] = self.navigability_outer;
        if peak_low < outer_low || peak_high > outer_high {
            return Err(SettingsError::PeakOutsideOuter {
                peak_low,
                peak_high,
                outer_low,
                outer_high,
            });
        }

        let weights = self.quality_weights.as_array();
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(SettingsError::InvalidWeights(format!(
                "{bad} is negative or not finite"
            )));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(SettingsError::InvalidWeights("weights sum to zero".to_string()));
        }
        Ok(())
    }
}

fn check_band(name: &'static str, [low, high]: [f64; 2]) -> SettingsResult<()> {
    if (0.0..=1.0).contains(&low) && (0.0..=1.0).contains(&high) && low <= high {
        Ok(())
    } else {
        Err(SettingsError::InvalidBand { name, low, high })
    }
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            min_width: Self::DEFAULT_MIN_SIDE,
            min_height: Self::DEFAULT_MIN_SIDE,
            navigability_min: 0.3,
            navigability_max: 0.9,
            min_connected_area: Self::DEFAULT_MIN_CONNECTED_AREA,
            quality_weights: QualityWeights::EQUAL,
            navigability_peak: [0.4, 0.7],
            navigability_outer: [0.2, 0.9],
            walkability: Walkability::conventional(),
        }
    }
}
