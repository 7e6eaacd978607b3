use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::biome::{Biome, BiomeRule, biome_name};
use crate::equator::EquatorBand;
use crate::error::ParameterError;
use crate::falloff::FalloffSettings;
use crate::grid::Grid;
use crate::noise::NoiseSettings;
use crate::precipitation::HumiditySettings;
use crate::temperature::TemperatureSettings;

/// Everything one pipeline run needs apart from the biome table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    /// Heights at or below this are water. Range [0, 1].
    pub sea_level: f32,
    /// Centre latitude bands on the geometric middle row instead of the land band.
    pub use_true_equator: bool,
    pub noise: NoiseSettings,
    pub falloff: FalloffSettings,
    pub temperature: TemperatureSettings,
    pub humidity: HumiditySettings,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            seed: 0,
            sea_level: 0.2,
            use_true_equator: false,
            noise: NoiseSettings::default(),
            falloff: FalloffSettings::default(),
            temperature: TemperatureSettings::default(),
            humidity: HumiditySettings::default(),
        }
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ParameterError> {
    if value.is_finite() { Ok(()) } else { Err(ParameterError::invalid(name, "must be finite")) }
}

fn unit(name: &'static str, value: f32) -> Result<(), ParameterError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParameterError::invalid(name, format!("{value} is outside [0, 1]")))
    }
}

impl GenerationParameters {
    /// Reject inputs the pipeline cannot run on. Called before any grid is allocated.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.width == 0 {
            return Err(ParameterError::invalid("width", "must be positive"));
        }
        if self.height == 0 {
            return Err(ParameterError::invalid("height", "must be positive"));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ParameterError::invalid(
                "width",
                format!("{}x{} cells overflows the grid size", self.width, self.height),
            ));
        }

        let floats = [
            ("sea_level", self.sea_level),
            ("noise.scale", self.noise.scale),
            ("noise.persistence", self.noise.persistence),
            ("noise.lacunarity", self.noise.lacunarity),
            ("noise.offset", self.noise.offset[0]),
            ("noise.offset", self.noise.offset[1]),
            ("falloff.a", self.falloff.a),
            ("falloff.b", self.falloff.b),
            ("temperature.bias", self.temperature.bias),
            ("temperature.height_divisor", self.temperature.height_divisor),
            ("temperature.loss", self.temperature.loss),
            ("temperature.base", self.temperature.base),
            ("humidity.dew_point", self.humidity.dew_point),
            ("humidity.intensity", self.humidity.intensity),
            ("humidity.flattening_threshold", self.humidity.flattening_threshold),
            ("humidity.spread", self.humidity.spread),
            ("humidity.spread_threshold", self.humidity.spread_threshold),
        ];
        for (name, value) in floats {
            finite(name, value)?;
        }

        if !(1..=20).contains(&self.noise.octaves) {
            return Err(ParameterError::invalid("noise.octaves", "must be between 1 and 20"));
        }
        unit("sea_level", self.sea_level)?;
        unit("humidity.flattening_threshold", self.humidity.flattening_threshold)?;
        if self.falloff.a < 0.0 {
            return Err(ParameterError::invalid("falloff.a", "must not be negative"));
        }
        if self.falloff.b < 0.0 {
            return Err(ParameterError::invalid("falloff.b", "must not be negative"));
        }
        if self.temperature.loss < 0.0 {
            return Err(ParameterError::invalid("temperature.loss", "must not be negative"));
        }
        if self.temperature.height_divisor == 0.0 {
            return Err(ParameterError::invalid("temperature.height_divisor", "must not be zero"));
        }
        if self.humidity.intensity <= 0.0 {
            return Err(ParameterError::invalid("humidity.intensity", "must be positive"));
        }
        Ok(())
    }
}

/// The six grids from one run, plus the rows used as the equator reference.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct World {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    pub sea_level: f32,
    pub equator: EquatorBand,
    /// Raw noise before the falloff mask.
    pub original_height: Grid<f32>,
    pub falloff: Grid<f32>,
    /// Combined height, floored at sea level.
    pub height_map: Grid<f32>,
    pub temperature: Grid<f32>,
    /// Precipitation on a 0-100 scale.
    pub precipitation: Grid<f32>,
    pub biome: Grid<Biome>,
}

impl World {
    /// Cell count per biome, keyed by display name.
    pub fn biome_counts(&self, rules: &[BiomeRule]) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for &b in self.biome.as_slice() {
            *counts.entry(biome_name(b, rules).to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Fraction of cells that are land.
    pub fn land_fraction(&self) -> f32 {
        let cells = self.biome.as_slice();
        if cells.is_empty() {
            return 0.0;
        }
        let land = cells.iter().filter(|&&b| b != Biome::Water).count();
        land as f32 / cells.len() as f32
    }
}
