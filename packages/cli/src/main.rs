#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line front end for the NSW RFS feed cleaners.
//!
//! * `fire_feed clean` cleans the major incidents `GeoJSON` feed.
//! * `fire_feed hazard-reduction` converts the hazard reduction feed to
//!   `GeoJSON`.
//!
//! Inputs may be local paths or `http(s)://` URLs. Output goes to stdout
//! unless `--output` is given. Set `RUST_LOG` to see progress and
//! per-feature warnings on stderr.

mod input;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fire_feed_incidents::{CleanOptions, FeedError, FeedWarning};

#[derive(Parser)]
#[command(name = "fire_feed", about = "NSW RFS feed cleaning tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the major incidents `GeoJSON` feed
    Clean(CleanArgs),
    /// Convert the hazard reduction feed to `GeoJSON`
    HazardReduction(OutputArgs),
}

#[derive(Args)]
struct OutputArgs {
    /// Feed file path or `http(s)://` URL
    input: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct CleanArgs {
    #[command(flatten)]
    io: OutputArgs,

    /// TOML file with cleaner options; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grow and shrink polygons around the union to close slivers
    #[arg(long)]
    avoid_slivers: bool,

    /// Grow/shrink distance in meters used with `--avoid-slivers`
    #[arg(long, value_name = "METERS")]
    sliver_margin: Option<f64>,

    /// Skip the polygon union above this many total vertices
    #[arg(long, value_name = "VERTICES")]
    union_vertex_budget: Option<usize>,

    /// Emit one feature per `GeometryCollection` member
    #[arg(long)]
    avoid_geometry_collections: bool,

    /// Round coordinates to this many decimal places
    #[arg(long, value_name = "DIGITS")]
    precision: Option<u32>,
}

impl CleanArgs {
    /// Loads `--config` (if any) and applies the command line overrides.
    fn options(&self) -> Result<CleanOptions, FeedError> {
        let mut options = match &self.config {
            Some(path) => fire_feed_incidents::load_options(path)?,
            None => CleanOptions::default(),
        };

        if self.avoid_slivers {
            options.geometry.avoid_slivers = true;
        }
        if let Some(margin) = self.sliver_margin {
            options.geometry.sliver_margin_meters = margin;
        }
        if let Some(budget) = self.union_vertex_budget {
            options.geometry.union_vertex_budget = Some(budget);
        }
        if self.avoid_geometry_collections {
            options.avoid_geometry_collections = true;
        }
        if let Some(precision) = self.precision {
            options.precision = Some(precision);
        }

        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Clean(args) => clean(&args).await?,
        Commands::HazardReduction(args) => hazard_reduction(&args).await?,
    }

    Ok(())
}

async fn clean(args: &CleanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.options()?;
    log::debug!("Cleaner options: {options:?}");

    let text = input::read_input(&args.io.input).await?;
    let cleaned = fire_feed_incidents::clean_str(&text, &options)?;

    for (family, count) in &cleaned.summary.families {
        log::info!("  {family}: {count} features");
    }
    if !cleaned.warnings.is_empty() {
        log::warn!(
            "{} warnings across {} features",
            cleaned.warnings.len(),
            count_features(&cleaned.warnings)
        );
    }

    input::write_output(&cleaned.collection, args.io.output.as_deref(), args.io.pretty).await?;
    Ok(())
}

async fn hazard_reduction(args: &OutputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = input::read_input(&args.input).await?;
    let collection = fire_feed_hazard_reduction::to_geojson_str(&text)?;
    log::info!("Converted {} hazard reduction features", collection.features.len());

    input::write_output(&collection, args.output.as_deref(), args.pretty).await?;
    Ok(())
}

fn count_features(warnings: &[FeedWarning]) -> usize {
    let mut features: Vec<usize> = warnings.iter().map(FeedWarning::feature).collect();
    features.dedup();
    features.len()
}
