use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use glam::DVec3;
use spawnpoint_common::Location;
use spawnpoint_persist::{ConfigStore, StoreConfig};
use spawnpoint_registry::{ReadyTrigger, SpawnRegistry, StaticWorlds, Trigger};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spawnpoint-cli", about = "Inspect and edit world spawn points")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Plugin data directory holding spawns.yml
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// YAML manifest of host worlds and their default spawns
    #[arg(short, long)]
    worlds: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, file path and counts
    Info,
    /// Show the spawn point of a world
    Get { world: String },
    /// Set the spawn point of a world
    Set {
        world: String,
        #[command(flatten)]
        at: LocationArgs,
    },
    /// Show the global spawn
    Global,
    /// Set the global spawn
    SetGlobal {
        #[command(flatten)]
        at: LocationArgs,
    },
    /// List every explicit override
    List,
}

#[derive(Args)]
struct LocationArgs {
    /// World the location lies in
    #[arg(long)]
    target: Option<String>,
    #[arg(allow_negative_numbers = true)]
    x: f64,
    #[arg(allow_negative_numbers = true)]
    y: f64,
    #[arg(allow_negative_numbers = true)]
    z: f64,
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    yaw: f32,
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pitch: f32,
}

impl LocationArgs {
    fn into_location(self, default_world: &str) -> Location {
        let world = self.target.unwrap_or_else(|| default_world.to_owned());
        Location::new(world, DVec3::new(self.x, self.y, self.z)).with_rotation(self.yaw, self.pitch)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let worlds = match &cli.worlds {
        Some(path) => load_worlds(path)?,
        None => StaticWorlds::new(),
    };
    tracing::debug!(worlds = worlds.len(), "host worlds registered");

    let store = ConfigStore::open(StoreConfig::new(&cli.data_dir));
    let mut registry = SpawnRegistry::new(store, worlds);

    // The CLI is ready as soon as its worlds are known.
    let mut trigger = ReadyTrigger::new();
    if let Trigger::Fired(outcome) = trigger.on_ready(&mut registry)? {
        tracing::debug!(?outcome, "registry initialized");
    }

    match cli.command {
        Commands::Info => {
            println!("spawnpoint-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("file: {}", registry.store().path().display());
            println!("host worlds: {}", registry.provider().len());
            println!("overrides: {}", registry.overrides().len());
            println!(
                "global spawn: {}",
                if registry.global_spawn().is_some() { "set" } else { "unset" }
            );
        }
        Commands::Get { world } => match registry.spawn_point(&world) {
            Some(location) => {
                let source = if registry.has_override(&world) { "override" } else { "default" };
                println!("{world} ({source}): {}", describe(&location));
            }
            None => anyhow::bail!("no such world: {world}"),
        },
        Commands::Set { world, at } => {
            let location = at.into_location(&world);
            registry
                .set_spawn_point(&world, location)
                .with_context(|| format!("failed to save spawn point for {world}"))?;
            println!("spawn point of {world} updated");
        }
        Commands::Global => match registry.global_spawn() {
            Some(location) => println!("global: {}", describe(location)),
            None => println!("global spawn is not set"),
        },
        Commands::SetGlobal { at } => {
            let Some(world) = at.target.clone() else {
                anyhow::bail!("--target is required for the global spawn");
            };
            registry
                .set_global_spawn(at.into_location(&world))
                .context("failed to save global spawn")?;
            println!("global spawn updated");
        }
        Commands::List => {
            for (world, location) in registry.overrides() {
                println!("{world}: {}", describe(location));
            }
        }
    }

    Ok(())
}

fn load_worlds(path: &Path) -> anyhow::Result<StaticWorlds> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read worlds manifest {}", path.display()))?;
    let worlds = serde_yaml::from_str(&text)
        .with_context(|| format!("invalid worlds manifest {}", path.display()))?;
    Ok(worlds)
}

fn describe(location: &Location) -> String {
    let p = location.position;
    format!(
        "{} ({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1}",
        location.world, p.x, p.y, p.z, location.yaw, location.pitch
    )
}
