//! # Partial Success
//!
//! Stages that can fall short of a request (too many rooms for the bounds,
//! entities that do not fit) still return a value. What was lost is
//! reported through [`GenerationWarning`]s riding along in an [`Outcome`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::AlgorithmKind;
use crate::entity::EntityType;

/// A non-fatal degradation of a generation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationWarning {
    /// Fewer entities placed than requested.
    EntityShortfall {
        /// Requested type.
        entity_type: EntityType,
        /// Requested count.
        requested: u32,
        /// Actually placed.
        placed: u32,
    },
    /// The layout could not be realized in full within the bounds.
    LayoutInfeasible {
        /// Algorithm that fell short.
        algorithm: AlgorithmKind,
        /// Units requested (rooms, maze cells).
        requested: u32,
        /// Units realized.
        achieved: u32,
        /// Explanation.
        reason: String,
    },
    /// The gameplay entity cap cut placement short.
    EntityCapReached {
        /// Configured cap.
        cap: u32,
        /// Entities not placed because of the cap.
        dropped: u32,
    },
}

impl GenerationWarning {
    /// Shortfall size for [`GenerationWarning::EntityShortfall`], else 0.
    #[must_use]
    pub const fn shortfall(&self) -> u32 {
        match self {
            Self::EntityShortfall { requested, placed, .. } => requested.saturating_sub(*placed),
            _ => 0,
        }
    }
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntityShortfall {
                entity_type,
                requested,
                placed,
            } => write!(
                f,
                "placed {placed} of {requested} {entity_type} entities (shortfall {})",
                requested.saturating_sub(*placed)
            ),
            Self::LayoutInfeasible {
                algorithm,
                requested,
                achieved,
                reason,
            } => write!(
                f,
                "{algorithm}: realized {achieved} of {requested} requested: {reason}"
            ),
            Self::EntityCapReached { cap, dropped } => {
                write!(f, "entity cap {cap} reached, {dropped} entities dropped")
            }
        }
    }
}

/// A value plus the warnings produced while computing it.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome<T> {
    /// The (possibly degraded) result.
    pub value: T,
    /// Everything that fell short.
    pub warnings: Vec<GenerationWarning>,
}

impl<T> Outcome<T> {
    /// An outcome with no warnings.
    #[must_use]
    pub const fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// An outcome with warnings.
    #[must_use]
    pub const fn with_warnings(value: T, warnings: Vec<GenerationWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if nothing fell short.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transforms the value, keeping the warnings.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Splits into value and warnings.
    #[must_use]
    pub fn into_parts(self) -> (T, Vec<GenerationWarning>) {
        (self.value, self.warnings)
    }

    /// Total entity shortfall across all warnings.
    #[must_use]
    pub fn total_shortfall(&self) -> u32 {
        self.warnings.iter().map(GenerationWarning::shortfall).sum()
    }
}
