//! # levelsmith CLI
//!
//! ```text
//! levelsmith generate --config level.json [--settings engine.toml] [--seed N] [--output out.json] [--pretty]
//! levelsmith validate --level out.json [--settings engine.toml]
//! levelsmith render   --config level.json | --level out.json
//! ```
//!
//! Logging goes to stderr, filtered by `RUST_LOG` (default `info`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use levelsmith::shared::{GenerationConfig, Level};
use levelsmith::validation::{LevelValidator, TracingValidator, Validate};
use levelsmith::{EngineConfig, LevelPipeline};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "levelsmith", version)]
#[command(about = "Procedural 2D level generation and validation")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a level from a JSON generation config
    Generate {
        /// Generation config (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Engine settings (TOML)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Override the config's seed
        #[arg(long, allow_hyphen_values = true)]
        seed: Option<i64>,

        /// Write the result here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Validate an existing level JSON
    Validate {
        /// Level (JSON)
        #[arg(long)]
        level: PathBuf,

        /// Engine settings (TOML)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Print an ASCII preview of a generated or saved level
    Render {
        /// Generation config (JSON)
        #[arg(long, required_unless_present = "level", conflicts_with = "level")]
        config: Option<PathBuf>,

        /// Level (JSON)
        #[arg(long)]
        level: Option<PathBuf>,

        /// Engine settings (TOML)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Override the config's seed
        #[arg(long, allow_hyphen_values = true)]
        seed: Option<i64>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Generate {
            config,
            settings,
            seed,
            output,
            pretty,
        } => generate(&config, settings.as_deref(), seed, output.as_deref(), pretty),
        Command::Validate { level, settings } => validate(&level, settings.as_deref()),
        Command::Render {
            config,
            level,
            settings,
            seed,
        } => {
            let level = match (config, level) {
                (Some(config), _) => run(&config, settings.as_deref(), seed)?.level,
                (None, Some(level)) => read_level(&level)?,
                (None, None) => anyhow::bail!("render needs --config or --level"),
            };
            print!("{}", render(&level));
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading engine settings from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn run(
    config: &Path,
    settings: Option<&Path>,
    seed: Option<i64>,
) -> Result<levelsmith::PipelineOutput> {
    let text = fs::read_to_string(config)
        .with_context(|| format!("reading generation config {}", config.display()))?;
    let generation = GenerationConfig::from_json(&text)
        .with_context(|| format!("parsing generation config {}", config.display()))?;
    let pipeline = LevelPipeline::new(load_settings(settings)?);
    let seed = seed.unwrap_or(generation.seed);
    pipeline
        .run_with_seed(&generation, seed)
        .with_context(|| format!("generating from {}", config.display()))
}

fn generate(
    config: &Path,
    settings: Option<&Path>,
    seed: Option<i64>,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let result = run(config, settings, seed)?;
    for warning in &result.warnings {
        tracing::warn!("{}", warning);
    }

    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn read_level(path: &Path) -> Result<Level> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading level {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing level {}", path.display()))?;
    // `generate` output nests the level next to its warnings and report.
    let level = value.get("level").cloned().unwrap_or(value);
    serde_json::from_value(level).with_context(|| format!("parsing level {}", path.display()))
}

fn validate(level: &Path, settings: Option<&Path>) -> Result<()> {
    let settings = load_settings(settings)?;
    let level = read_level(level)?;
    let validator = TracingValidator::new(LevelValidator::new(settings.validation));
    let report = validator.report(&level);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn render(level: &Level) -> String {
    let grid = level.terrain();
    let mut rows: Vec<Vec<char>> = grid
        .rows()
        .map(|row| row.iter().map(|tile| tile.glyph()).collect())
        .collect();
    for entity in level.entities() {
        let (x, y) = (entity.position.x, entity.position.y);
        if grid.in_bounds(x, y) {
            rows[y as usize][x as usize] = entity.entity_type.glyph();
        }
    }
    let mut out = format!("{} ({}x{})\n", level.name(), grid.width(), grid.height());
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}
