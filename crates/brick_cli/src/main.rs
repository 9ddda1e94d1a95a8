//! Brick command line
//!
//! Usage:
//!   brick resolve level.json --defaults things.json --patterns patterns.json
//!   brick list

use anyhow::{Context, Result};
use brick_core::{
    validate_collections, DefaultsTable, Engine, PatternRegistry, Resolution, Resolver,
};
use brick_services::{load_defaults, load_patterns, LevelFile, Settings};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "brick")]
#[command(about = "Expand level placement macros into terminal records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a level file and print its terminal records as JSON
    Resolve {
        /// Level file: { "map", "area", "directives" }
        level: PathBuf,
        /// Entity defaults table
        #[arg(long)]
        defaults: Option<PathBuf>,
        /// Pattern registry
        #[arg(long)]
        patterns: Option<PathBuf>,
        /// Engine settings (screen metrics, resolver limits)
        #[arg(long)]
        settings: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// List the registered macro names
    List,
}

fn main() -> Result<()> {
    // stdout carries the records, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Brick v{}", brick_core::VERSION);

    let cli = Cli::parse();
    match cli.command {
        Commands::Resolve {
            level,
            defaults,
            patterns,
            settings,
            pretty,
        } => resolve(level, defaults, patterns, settings, pretty),
        Commands::List => list(),
    }
}

fn resolve(
    level: PathBuf,
    defaults: Option<PathBuf>,
    patterns: Option<PathBuf>,
    settings: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let settings = Settings::load_or_default(settings.as_deref())?;
    let defaults = match defaults {
        Some(path) => load_defaults(&path)?,
        None => DefaultsTable::new(),
    };
    let patterns = match patterns {
        Some(path) => load_patterns(&path)?,
        None => PatternRegistry::new(),
    };
    let level = LevelFile::load(&level)?;

    let resolution = resolve_level(&level, &settings, &defaults, &patterns)?;

    let output = if pretty {
        serde_json::to_string_pretty(&resolution.records)?
    } else {
        serde_json::to_string(&resolution.records)?
    };
    println!("{output}");
    Ok(())
}

fn resolve_level(
    level: &LevelFile,
    settings: &Settings,
    defaults: &DefaultsTable,
    patterns: &PatternRegistry,
) -> Result<Resolution> {
    let registry = brick_macros::builtin_registry()?;
    let engine = Engine::new(defaults, patterns).with_screen(settings.screen_metrics());
    let scope = level.scope();

    let resolution = Resolver::new(&registry)
        .with_max_depth(settings.resolver.max_depth)
        .resolve(level.directives.clone(), &scope, &engine)
        .with_context(|| format!("failed to resolve map {} area {}", level.map, level.area))?;
    validate_collections(&resolution.records).context("resolved records clash")?;

    tracing::info!(
        map = %level.map,
        area = level.area,
        records = resolution.records.len(),
        depth = resolution.depth,
        "level resolved"
    );
    for (name, count) in &resolution.expansions {
        tracing::debug!(macro_name = %name, count, "expansions");
    }
    Ok(resolution)
}

fn list() -> Result<()> {
    let registry = brick_macros::builtin_registry()?;
    for name in registry.names() {
        println!("{name}");
    }
    Ok(())
}
