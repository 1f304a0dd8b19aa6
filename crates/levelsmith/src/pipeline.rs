//! # Generation Pipeline
//!
//! Runs the four stages strictly in order:
//!
//! ```text
//! validate config ──▶ terrain ──▶ placement ──▶ assembly ──▶ validation
//! ```
//!
//! Configuration errors abort before any generation work. Every later
//! shortfall is collected into [`PipelineOutput::warnings`].

use levelsmith_procedural::{EntityPlacer, Seed, TerrainGenerator};
use levelsmith_shared::{GenerationConfig, GenerationWarning, Level};
use levelsmith_validation::{LevelReport, LevelValidator, TracingValidator, Validate};
use serde::Serialize;

use crate::assembly::LevelAssembler;
use crate::error::EngineResult;
use crate::settings::EngineConfig;

/// Everything one pipeline run produces.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    /// The assembled level.
    pub level: Level,
    /// Generation shortfalls, terrain first, then placement.
    pub warnings: Vec<GenerationWarning>,
    /// Validation verdict, playability and quality.
    pub report: LevelReport,
}

/// Configured generation pipeline. Holds no state between runs.
#[derive(Clone, Debug, Default)]
pub struct LevelPipeline {
    config: EngineConfig,
    placer: EntityPlacer,
    validator: TracingValidator<LevelValidator>,
    assembler: LevelAssembler,
}

impl LevelPipeline {
    /// Creates a pipeline from engine settings.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let walkability = config.validation.walkability;
        Self {
            placer: EntityPlacer::new(config.placement, walkability),
            validator: TracingValidator::new(LevelValidator::new(config.validation.clone())),
            assembler: LevelAssembler::new(),
            config,
        }
    }

    /// Active engine settings.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the pipeline with the config's own seed.
    ///
    /// # Errors
    ///
    /// [`EngineError::Config`](crate::EngineError::Config) if the config is
    /// rejected. Nothing is generated in that case.
    pub fn run(&self, config: &GenerationConfig) -> EngineResult<PipelineOutput> {
        self.run_with_seed(config, config.seed)
    }

    /// Runs the pipeline with `seed` in place of the config's seed.
    ///
    /// # Errors
    ///
    /// As [`LevelPipeline::run`].
    pub fn run_with_seed(&self, config: &GenerationConfig, seed: i64) -> EngineResult<PipelineOutput> {
        let config = GenerationConfig {
            seed,
            ..config.clone()
        };
        let terrain = TerrainGenerator::from_config_with_limits(&config, &self.config.limits)?;

        let seed = Seed::from(config.seed);
        let (grid, mut warnings) = terrain.generate(seed).into_parts();
        let (entities, placement_warnings) = self.placer.place(&grid, &config, seed).into_parts();
        warnings.extend(placement_warnings);

        let level = self.assembler.assemble(grid, entities, &config);
        let report = self.validator.report(&level);

        tracing::info!(
            "generated '{}' ({} warnings, valid: {}, quality {:.3})",
            level.name(),
            warnings.len(),
            report.validation.is_valid,
            report.quality_score
        );

        Ok(PipelineOutput {
            level,
            warnings,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use levelsmith_shared::{AlgorithmKind, ConfigError, EntityConfig, EntityType};

    #[test]
    fn test_config_error_before_work() {
        let config = GenerationConfig::new(5, 5, AlgorithmKind::Perlin);
        let err = LevelPipeline::default().run(&config).expect_err("too small");
        assert!(matches!(err, EngineError::Config(ConfigError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_seed_override() {
        let config = GenerationConfig::new(30, 30, AlgorithmKind::Cellular).with_seed(1);
        let pipeline = LevelPipeline::default();
        let a = pipeline.run_with_seed(&config, 2).expect("valid config");
        let b = pipeline.run(&config.clone().with_seed(2)).expect("valid config");
        assert_eq!(a.level.terrain(), b.level.terrain());
        assert_eq!(a.level.metadata()["seed"], serde_json::json!(2));
    }

    #[test]
    fn test_warnings_merged() {
        let config = GenerationConfig::new(10, 10, AlgorithmKind::Maze)
            .with_parameter("pathWidth", serde_json::json!(10))
            .with_entity(EntityConfig::new(EntityType::Player, 1));
        let output = LevelPipeline::default().run(&config).expect("valid config");
        assert!(
            output
                .warnings
                .iter()
                .any(|w| matches!(w, GenerationWarning::LayoutInfeasible { .. })),
            "warnings were {:?}",
            output.warnings
        );
        assert!(
            output
                .warnings
                .iter()
                .any(|w| matches!(w, GenerationWarning::EntityShortfall { placed: 0, .. })),
            "warnings were {:?}",
            output.warnings
        );
        assert!(output.report.validation.mentions("no navigable tiles"));
    }
}
