use crate::biome::{BiomeRule, biome_color};
use crate::error::ExportError;
use crate::world::World;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk shape: the world itself plus the table needed to read its biome ids.
#[derive(Serialize)]
struct WorldDocument<'a> {
    #[serde(flatten)]
    world: &'a World,
    biomes: Vec<BiomeEntry<'a>>,
    biome_counts: BTreeMap<String, usize>,
    land_fraction: f32,
}

#[derive(Serialize)]
struct BiomeEntry<'a> {
    name: &'a str,
    color: [u8; 3],
}

/// Serialize `world` together with its rule table.
pub fn world_json(world: &World, rules: &[BiomeRule]) -> Result<String, ExportError> {
    let doc = WorldDocument {
        world,
        biomes: rules
            .iter()
            .map(|r| BiomeEntry { name: &r.name, color: r.color })
            .collect(),
        biome_counts: world.biome_counts(rules),
        land_fraction: world.land_fraction(),
    };
    serde_json::to_string(&doc).map_err(ExportError::Serialize)
}

pub fn export_json(world: &World, rules: &[BiomeRule], path: &Path) -> Result<(), ExportError> {
    let json = world_json(world, rules)?;
    std::fs::write(path, json).map_err(|source| ExportError::Io { path: path.display().to_string(), source })?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Biome colours laid out like every other grid, for consumers that just want pixels.
pub fn biome_colors(world: &World, rules: &[BiomeRule]) -> Vec<[u8; 3]> {
    world.biome.as_slice().iter().map(|&b| biome_color(b, rules)).collect()
}
