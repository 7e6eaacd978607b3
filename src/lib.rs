//! Seed-driven biome map generator.
//!
//! A single integer seed and a [`GenerationParameters`] bundle produce six
//! grids: raw noise, a falloff mask, the combined height map, temperature,
//! precipitation and the final biome classification.

pub mod biome;
pub mod config;
pub mod elevation;
pub mod equator;
pub mod error;
pub mod export;
pub mod falloff;
pub mod generation;
pub mod grid;
pub mod noise;
pub mod precipitation;
pub mod temperature;
pub mod world;

pub use biome::{Biome, BiomeRule, default_rules};
pub use config::Config;
pub use equator::EquatorBand;
pub use error::{ConfigError, ExportError, ParameterError};
pub use generation::{generate_world, generate_world_with};
pub use grid::Grid;
pub use crate::noise::{NoiseSettings, NoiseSource, NormalizeMode, PerlinNoise};
pub use world::{GenerationParameters, World};
