//! # Validation Settings Errors

use thiserror::Error;

/// Errors in validation settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// A `[low, high]` band is reversed or leaves `[0, 1]`.
    #[error("invalid {name} band [{low}, {high}]: need 0 <= low <= high <= 1")]
    InvalidBand {
        /// Setting name.
        name: &'static str,
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },

    /// The navigability peak does not sit inside the outer band.
    #[error("navigability peak [{peak_low}, {peak_high}] must lie inside the outer band [{outer_low}, {outer_high}]")]
    PeakOutsideOuter {
        /// Peak lower bound.
        peak_low: f64,
        /// Peak upper bound.
        peak_high: f64,
        /// Outer lower bound.
        outer_low: f64,
        /// Outer upper bound.
        outer_high: f64,
    },

    /// Quality weights are negative, non-finite or all zero.
    #[error("invalid quality weights: {0}")]
    InvalidWeights(String),
}

/// Result type for settings checks.
pub type SettingsResult<T> = Result<T, SettingsError>;
