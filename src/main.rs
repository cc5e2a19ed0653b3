//! OSM Actors - Entry Point
//!
//! Loads map features, populates the map with actors and runs a few update
//! ticks, printing what was created.

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use osm_actors::core::config::{NeedsPolicy, PopulationConfig};
use osm_actors::core::error::Result;
use osm_actors::entity::{JobState, NeedsState, PlaceState};
use osm_actors::simulation::{ActorInitializer, ModuleHost};
use osm_actors::world::features::{generate_synthetic_nodes, FeatureFile};
use osm_actors::world::MapObjects;

/// Populate an OpenStreetMap-derived map with actors
#[derive(Parser, Debug)]
#[command(name = "osm-actors")]
#[command(about = "Create actors with needs, jobs and favorite places from map features")]
struct Args {
    /// Population config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Feature file (JSON) with tagged map nodes
    #[arg(long)]
    features: Option<PathBuf>,

    /// Generate this many random tagged nodes when no feature file is given
    #[arg(long, default_value_t = 200)]
    synthetic: usize,

    /// Side length of the synthetic map in map units
    #[arg(long, default_value_t = 10_000.0)]
    extent: f64,

    /// Override the number of actors to create
    #[arg(long)]
    actors: Option<usize>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Seed every actor with the canonical needs instead of random ones
    #[arg(long)]
    fixed_needs: bool,

    /// Number of update ticks to run after initialization
    #[arg(long, default_value_t = 1)]
    ticks: u64,

    /// Milliseconds reported to modules per tick
    #[arg(long, default_value_t = 1000)]
    tick_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("osm_actors=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PopulationConfig::load(path)?,
        None => PopulationConfig::default(),
    };
    if let Some(count) = args.actors {
        config.actor_count = count;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.fixed_needs {
        config.needs = NeedsPolicy::canonical();
    }

    let nodes = match &args.features {
        Some(path) => {
            let file = FeatureFile::load(path)?;
            tracing::info!("Loaded {} nodes from {}", file.nodes.len(), path.display());
            file.into_nodes()
        }
        None => {
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or(0));
            tracing::warn!(
                "No feature file given - generating {} synthetic nodes",
                args.synthetic
            );
            generate_synthetic_nodes(args.synthetic, args.extent, &config.categories, &mut rng)?
        }
    };

    let initializer = ActorInitializer::new(config)?;
    let mut host = ModuleHost::new(MapObjects::with_nodes(nodes));
    host.add_module(Box::new(initializer));

    host.initialize()?;
    for _ in 0..args.ticks {
        host.tick(args.tick_ms)?;
    }

    print_summary(host.objects())?;
    Ok(())
}

fn print_summary(objects: &MapObjects) -> Result<()> {
    println!("\n=== ACTORS ===");
    for (i, (id, actor)) in objects.actors().enumerate() {
        let needs = actor.get_state::<NeedsState>()?;
        let job = actor.get_state::<JobState>()?;
        let places = actor.get_state::<PlaceState>()?;

        println!(
            "{:>3}. {} at ({:.1}, {:.1})",
            i + 1,
            id,
            actor.position.x(),
            actor.position.y()
        );
        println!(
            "     needs: health {:.0}, satiety {:.0}, mood {:.0}, stamina {:.0}, money {:.0}, speed {:.2}",
            needs.health, needs.satiety, needs.mood, needs.stamina, needs.money, needs.speed
        );
        let shifts: Vec<String> = job.job_times().iter().map(ToString::to_string).collect();
        println!(
            "     job at ({:.1}, {:.1}), shifts {}",
            job.job.x(),
            job.job.y(),
            shifts.join(", ")
        );
        println!("     home at ({:.1}, {:.1})", places.home.x(), places.home.y());
        for place in places.favorite_places() {
            println!(
                "     favorite {} at ({:.1}, {:.1})",
                place.tag_key(),
                place.position().x(),
                place.position().y()
            );
        }
    }
    Ok(())
}
