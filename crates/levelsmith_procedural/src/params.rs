//! Typed reads from an untyped parameter bag.

use std::ops::RangeInclusive;

use levelsmith_shared::{normalize_name, AlgorithmKind, ConfigError, ConfigResult, ParameterMap};

/// Reads algorithm parameters, rejecting keys the algorithm does not know.
///
/// Keys match case- and separator-insensitively, so `initialDensity` and
/// `initial_density` name the same parameter.
pub(crate) struct ParamReader<'a> {
    algorithm: AlgorithmKind,
    params: &'a ParameterMap,
}

impl<'a> ParamReader<'a> {
    /// Checks every key in `params` against `supported`.
    pub(crate) fn new(
        algorithm: AlgorithmKind,
        params: &'a ParameterMap,
        supported: &[&str],
    ) -> ConfigResult<Self> {
        let supported: Vec<String> = supported.iter().map(|key| normalize_name(key)).collect();
        if let Some(unknown) = params
            .keys()
            .find(|key| !supported.contains(&normalize_name(key)))
        {
            return Err(ConfigError::UnsupportedParameter {
                algorithm,
                parameter: unknown.clone(),
            });
        }
        Ok(Self { algorithm, params })
    }

    fn lookup(&self, key: &str) -> Option<&'a serde_json::Value> {
        let wanted = normalize_name(key);
        self.params
            .iter()
            .find(|(k, _)| normalize_name(k) == wanted)
            .map(|(_, v)| v)
    }

    fn invalid(&self, key: &str, reason: String) -> ConfigError {
        ConfigError::InvalidParameter {
            algorithm: self.algorithm,
            parameter: key.to_string(),
            reason,
        }
    }

    /// Reads a float, falling back to `default` when absent.
    pub(crate) fn f64_in(
        &self,
        key: &str,
        default: f64,
        range: RangeInclusive<f64>,
    ) -> ConfigResult<f64> {
        let Some(raw) = self.lookup(key) else {
            return Ok(default);
        };
        let value = raw
            .as_f64()
            .ok_or_else(|| self.invalid(key, format!("expected a number, got {raw}")))?;
        if !range.contains(&value) {
            return Err(self.invalid(
                key,
                format!("{value} outside [{}, {}]", range.start(), range.end()),
            ));
        }
        Ok(value)
    }

    /// Reads a non-negative integer, falling back to `default` when absent.
    ///
    /// Whole floats such as `4.0` are accepted.
    pub(crate) fn u32_in(
        &self,
        key: &str,
        default: u32,
        range: RangeInclusive<u32>,
    ) -> ConfigResult<u32> {
        let Some(raw) = self.lookup(key) else {
            return Ok(default);
        };
        let value = raw
            .as_u64()
            .or_else(|| {
                raw.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                    .map(|f| f as u64)
            })
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| self.invalid(key, format!("expected a non-negative integer, got {raw}")))?;
        if !range.contains(&value) {
            return Err(self.invalid(
                key,
                format!("{value} outside [{}, {}]", range.start(), range.end()),
            ));
        }
        Ok(value)
    }

    /// Builds an out-of-range error for cross-parameter checks.
    pub(crate) fn reject(&self, key: &str, reason: impl Into<String>) -> ConfigError {
        self.invalid(key, reason.into())
    }
}
