mod catalog;
mod classify;
mod config;
mod elements;
mod feed;
mod geojson;
mod position;
mod propagation;
mod time;
mod web;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::catalog::CatalogLoader;
use crate::classify::GroupAssigner;
use crate::config::Config;
use crate::position::Evaluator;
use crate::time::{parse_time, resolve_or_now, TimeExpr};

#[derive(Parser)]
#[command(name = "sat-o-map")]
#[command(about = "Satellite positions from public element feeds, as GeoJSON")]
struct Cli {
    /// YAML configuration file; built-in defaults are used without one
    #[arg(short, long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the feed groups and the output groups
    Groups,
    /// Fetch the feed, build the catalog and report per-group counts
    Build,
    /// Print one object's position as JSON
    Position {
        catalog_id: u32,
        /// Instant: now, RFC 3339, `<RFC 3339> + 10m` or `T+30m`
        #[arg(long, value_parser = parse_time)]
        at: Option<TimeExpr>,
    },
    /// Write one GeoJSON feature collection per output group
    Emit {
        #[arg(long, value_parser = parse_time)]
        at: Option<TimeExpr>,
        /// Output directory (overrides output.directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Build the catalog and serve the HTTP API
    Serve,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Groups => groups(&config),
        Commands::Build => build(&config),
        Commands::Position { catalog_id, at } => position(&config, catalog_id, at.as_ref()),
        Commands::Emit { at, out } => emit(&config, at.as_ref(), out),
        Commands::Serve => serve(&config),
    }
}

fn loader(config: &Config) -> Option<CatalogLoader> {
    match CatalogLoader::from_config(&config.feed) {
        Ok(loader) => Some(loader),
        Err(e) => {
            eprintln!("Cannot create feed client: {}", e);
            None
        }
    }
}

fn instant(at: Option<&TimeExpr>) -> Option<chrono::DateTime<chrono::Utc>> {
    match resolve_or_now(at) {
        Ok(at) => Some(at),
        Err(e) => {
            eprintln!("Invalid instant: {}", e);
            None
        }
    }
}

fn groups(config: &Config) -> ExitCode {
    println!("Feed groups ({}):", config.feed.groups.len());
    for group in &config.feed.groups {
        println!("  {}", group);
    }

    let assigner = GroupAssigner::from_config(&config.grouping, &config.feed.groups);
    let labels = assigner.labels();
    println!("Output groups ({}):", labels.len());
    for label in labels {
        println!("  {}", label);
    }
    ExitCode::SUCCESS
}

fn build(config: &Config) -> ExitCode {
    let Some(loader) = loader(config) else {
        return ExitCode::FAILURE;
    };
    let catalog = loader.load();

    for group in catalog.groups() {
        println!("  {}: {}", group, catalog.group_size(group));
    }
    println!("Catalog holds {} objects", catalog.len());
    ExitCode::SUCCESS
}

fn position(config: &Config, catalog_id: u32, at: Option<&TimeExpr>) -> ExitCode {
    let Some(at) = instant(at) else {
        return ExitCode::FAILURE;
    };
    let Some(loader) = loader(config) else {
        return ExitCode::FAILURE;
    };
    let catalog = loader.load();

    let entry = match catalog.get(catalog_id) {
        Ok(entry) => entry,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let evaluator = Evaluator::new(config.evaluation.frame, 1);
    let sample = evaluator.evaluate(entry, at);
    match serde_json::to_string_pretty(&sample) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize sample: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn emit(config: &Config, at: Option<&TimeExpr>, out: Option<PathBuf>) -> ExitCode {
    let Some(at) = instant(at) else {
        return ExitCode::FAILURE;
    };
    let Some(loader) = loader(config) else {
        return ExitCode::FAILURE;
    };
    let catalog = loader.load();

    let evaluator = Evaluator::new(config.evaluation.frame, config.evaluation.workers);
    let assigner = GroupAssigner::from_config(&config.grouping, &config.feed.groups);
    let collections = geojson::build_collections(
        &catalog,
        &evaluator,
        &assigner,
        at,
        config.output.metadata_fields.as_deref(),
    );

    let dir = out.unwrap_or_else(|| config.output.directory.clone());
    match geojson::write_collections(&dir, &collections) {
        Ok(paths) => {
            println!("Wrote {} collections for {} to {}", paths.len(), at, dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn serve(config: &Config) -> ExitCode {
    // The blocking feed client must not be dropped inside the async runtime,
    // so the last handle to the loader stays here.
    let Some(loader) = loader(config).map(Arc::new) else {
        return ExitCode::FAILURE;
    };
    let catalog = loader.load();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Cannot start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config, loader.clone(), catalog)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
