//! # Tracing Decorator
//!
//! Wraps any [`Validate`] implementation with a span per call and a log
//! line carrying the verdict and elapsed time. Results pass through
//! untouched.

use std::time::Instant;

use levelsmith_shared::{Level, ValidationResult};

use crate::quality::QualityBreakdown;
use crate::validator::Validate;

/// Logging wrapper around a validator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TracingValidator<V> {
    inner: V,
}

impl<V: Validate> TracingValidator<V> {
    /// Wraps `inner`.
    #[must_use]
    pub const fn new(inner: V) -> Self {
        Self { inner }
    }

    /// The wrapped validator.
    #[must_use]
    pub const fn inner(&self) -> &V {
        &self.inner
    }

    /// Unwraps the decorator.
    #[must_use]
    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: Validate> Validate for TracingValidator<V> {
    fn validate(&self, level: &Level) -> ValidationResult {
        let span = tracing::info_span!("validate", level = level.name());
        let _enter = span.enter();
        let start = Instant::now();
        let result = self.inner.validate(level);
        tracing::info!(
            "validation finished: valid={}, issues={}, elapsed={:?}",
            result.is_valid,
            result.issues.len(),
            start.elapsed()
        );
        for issue in &result.issues {
            tracing::debug!("issue: {issue}");
        }
        result
    }

    fn is_playable(&self, level: &Level) -> bool {
        let span = tracing::info_span!("is_playable", level = level.name());
        let _enter = span.enter();
        let start = Instant::now();
        let playable = self.inner.is_playable(level);
        tracing::info!("playability check: playable={playable}, elapsed={:?}", start.elapsed());
        playable
    }

    fn quality_breakdown(&self, level: &Level) -> QualityBreakdown {
        let breakdown = self.inner.quality_breakdown(level);
        tracing::debug!("quality sub-scores: {breakdown:?}");
        breakdown
    }

    fn evaluate_quality(&self, level: &Level) -> f64 {
        let span = tracing::info_span!("evaluate_quality", level = level.name());
        let _enter = span.enter();
        let start = Instant::now();
        let score = self.inner.evaluate_quality(level);
        tracing::info!("quality score {score:.3}, elapsed={:?}", start.elapsed());
        score
    }
}
