//! # Engine Settings
//!
//! One TOML document configures the whole engine:
//!
//! ```toml
//! [limits]
//! min_width = 10
//! max_width = 1000
//!
//! [placement]
//! attempts_per_entity = 30
//!
//! [validation]
//! navigability_min = 0.3
//! min_connected_area = 100
//!
//! [validation.quality_weights]
//! balance = 2.0
//! ```
//!
//! Every section and field is optional.

use std::path::Path;

use levelsmith_procedural::PlacementTuning;
use levelsmith_shared::ConfigLimits;
use levelsmith_validation::ValidationSettings;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Engine-wide settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Accepted level dimensions.
    pub limits: ConfigLimits,
    /// Entity placement search knobs.
    pub placement: PlacementTuning,
    /// Validator thresholds.
    pub validation: ValidationSettings,
}

impl EngineConfig {
    /// Parses and checks a TOML document.
    ///
    /// # Errors
    ///
    /// [`EngineError::Toml`] for malformed TOML, otherwise any error from
    /// [`EngineConfig::validate`].
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and checks a TOML file.
    ///
    /// # Errors
    ///
    /// [`EngineError::Io`] if the file cannot be read, otherwise as
    /// [`EngineConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Sets the dimension limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: ConfigLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the placement tuning.
    #[must_use]
    pub const fn with_placement(mut self, placement: PlacementTuning) -> Self {
        self.placement = placement;
        self
    }

    /// Sets the validation settings.
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationSettings) -> Self {
        self.validation = validation;
        self
    }

    /// Checks cross-field consistency.
    ///
    /// # Errors
    ///
    /// [`EngineError::Settings`] for reversed limits or a zero placement
    /// budget, [`EngineError::Validation`] for bad validator thresholds.
    pub fn validate(&self) -> EngineResult<()> {
        let limits = &self.limits;
        if limits.min_width > limits.max_width || limits.min_height > limits.max_height {
            return Err(EngineError::Settings(format!(
                "limits are reversed: width [{}, {}], height [{}, {}]",
                limits.min_width, limits.max_width, limits.min_height, limits.max_height
            )));
        }
        if self.placement.attempts_per_entity == 0 || self.placement.sample_size == 0 {
            return Err(EngineError::Settings(
                "placement.attempts_per_entity and placement.sample_size must be at least 1"
                    .to_string(),
            ));
        }
        self.validation.validate()?;
        Ok(())
    }
}
