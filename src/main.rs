use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use biome_generator::export::export_json;
use biome_generator::{Config, generate_world};

/// Generate a biome map from a seed.
#[derive(Parser, Debug)]
#[command(name = "biome-generator", version)]
struct Cli {
    /// JSON config with generation parameters and biome rules.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Map width in cells.
    #[arg(long)]
    width: Option<usize>,

    /// Map height in cells.
    #[arg(long)]
    height: Option<usize>,

    /// Seed for the noise field.
    #[arg(short, long, conflicts_with = "random_seed")]
    seed: Option<u32>,

    /// Pick a fresh random seed.
    #[arg(long)]
    random_seed: bool,

    /// Centre latitude bands on the middle row instead of the land band.
    #[arg(long)]
    true_equator: bool,

    /// Output directory; the world lands in `<output>/<seed>/world.json`.
    #[arg(short, long, default_value = "worlds")]
    output: PathBuf,

    /// Write the effective config to this path and exit.
    #[arg(long)]
    write_config: Option<PathBuf>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        let params = &mut config.parameters;
        if let Some(w) = self.width {
            params.width = w;
        }
        if let Some(h) = self.height {
            params.height = h;
        }
        if let Some(seed) = self.seed {
            params.seed = seed;
        }
        if self.random_seed {
            params.seed = rand::random();
        }
        if self.true_equator {
            params.use_true_equator = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    if let Some(path) = &cli.write_config {
        config.save(path)?;
        return Ok(());
    }

    let world = generate_world(&config.parameters, &config.biomes)?;

    let dir = cli.output.join(world.seed.to_string());
    std::fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    export_json(&world, &config.biomes, &dir.join("world.json"))?;

    for (name, count) in world.biome_counts(&config.biomes) {
        log::info!("{name}: {count}");
    }
    println!("World generated → {}/", dir.display());
    Ok(())
}
