/// Biome rules and per-cell classification.
///
/// This module owns the [`Biome`] type and all biome-related logic:
///  - [`BiomeRule`]       : a temperature × precipitation rectangle with a colour.
///  - [`default_rules`]   : the stock rule table.
///  - [`classify_cell`]   : elevation/temperature/precipitation → biome.
///  - [`classify`]        : the same over whole grids.
///  - [`biome_color`] / [`biome_name`]: display metadata.
///
/// Rule order matters: every matching rule overwrites the previous match, so
/// when two rules overlap the one listed **later** wins.
use crate::elevation::is_water;
use crate::error::ParameterError;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};

// ── Biome type ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    /// Cell at or below sea level.
    Water,
    /// Ice cap / tundra override, independent of the rule table.
    Polar,
    /// Land cell that no rule matched.
    Unclassified,
    /// Index into the rule table.
    Rule(usize),
}

/// Half-open rectangle `(min, max]` over temperature and normalised precipitation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeRule {
    pub name: String,
    pub min_temperature: f32,
    pub max_temperature: f32,
    pub min_prec: f32,
    pub max_prec: f32,
    pub color: [u8; 3],
}

impl BiomeRule {
    pub fn new(name: &str, temperature: (f32, f32), prec: (f32, f32), color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            min_temperature: temperature.0,
            max_temperature: temperature.1,
            min_prec: prec.0,
            max_prec: prec.1,
            color,
        }
    }

    #[inline]
    pub fn matches(&self, temperature: f32, prec: f32) -> bool {
        temperature > self.min_temperature
            && temperature <= self.max_temperature
            && prec > self.min_prec
            && prec <= self.max_prec
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        let bounds = [self.min_temperature, self.max_temperature, self.min_prec, self.max_prec];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(ParameterError::invalid("biomes", format!("rule `{}` has a non-finite bound", self.name)));
        }
        if self.min_temperature > self.max_temperature || self.min_prec > self.max_prec {
            return Err(ParameterError::invalid("biomes", format!("rule `{}` has min above max", self.name)));
        }
        Ok(())
    }
}

// ── Stock rule table ──────────────────────────────────────────────────────────

/// Whittaker-style table tuned for the default temperature and humidity settings.
pub fn default_rules() -> Vec<BiomeRule> {
    vec![
        // Cold
        BiomeRule::new("Tundra", (-10.0, 0.15), (-10.0, 10.0), [160, 185, 155]),
        BiomeRule::new("Taiga", (0.15, 0.30), (0.30, 10.0), [30, 90, 60]),
        // Temperate
        BiomeRule::new("Grassland", (0.15, 0.45), (-10.0, 0.30), [100, 200, 80]),
        BiomeRule::new("Temperate Forest", (0.30, 0.45), (0.30, 0.60), [20, 110, 20]),
        BiomeRule::new("Temperate Rainforest", (0.30, 0.45), (0.60, 10.0), [40, 130, 90]),
        // Tropical
        BiomeRule::new("Desert", (0.45, 10.0), (-10.0, 0.20), [240, 200, 100]),
        BiomeRule::new("Savanna", (0.45, 10.0), (0.20, 0.60), [210, 190, 60]),
        BiomeRule::new("Tropical Rainforest", (0.45, 10.0), (0.60, 10.0), [0, 90, 20]),
    ]
}

// ── Classification ────────────────────────────────────────────────────────────

/// Thresholds shared by every cell of one classification pass.
#[derive(Clone, Copy, Debug)]
pub struct Thresholds {
    pub sea_level: f32,
    pub spread: f32,
    pub spread_threshold: f32,
}

/// Classify one cell. `prec` is already normalised (`precipitation / 100`).
///
/// Decision ladder:
///   Water       : elevation ≤ sea level
///   Polar       : prec + temperature × spread < spread_threshold
///   Rule(i)     : last rule whose rectangle contains the cell
///   Unclassified: nothing matched
pub fn classify_cell(elevation: f32, temperature: f32, prec: f32, rules: &[BiomeRule], t: Thresholds) -> Biome {
    if is_water(elevation, t.sea_level) {
        return Biome::Water;
    }
    if prec + temperature * t.spread < t.spread_threshold {
        return Biome::Polar;
    }
    rules
        .iter()
        .rposition(|rule| rule.matches(temperature, prec))
        .map_or(Biome::Unclassified, Biome::Rule)
}

pub fn classify(
    height: &Grid<f32>,
    temperature: &Grid<f32>,
    precipitation: &Grid<f32>,
    rules: &[BiomeRule],
    thresholds: Thresholds,
) -> Grid<Biome> {
    debug_assert!(height.same_shape(temperature) && height.same_shape(precipitation));
    Grid::par_from_fn(height.width(), height.height(), |x, y| {
        let prec = precipitation.at(x, y) / 100.0;
        classify_cell(height.at(x, y), temperature.at(x, y), prec, rules, thresholds)
    })
}

// ── Display metadata ──────────────────────────────────────────────────────────

/// Biome → RGB colour. Rule biomes use their configured colour.
pub fn biome_color(b: Biome, rules: &[BiomeRule]) -> [u8; 3] {
    match b {
        Biome::Water => [0, 0, 255],
        Biome::Polar => [255, 255, 255],
        Biome::Unclassified => [0, 0, 0],
        Biome::Rule(i) => rules.get(i).map_or([0, 0, 0], |r| r.color),
    }
}

/// Human-readable name for a biome.
pub fn biome_name(b: Biome, rules: &[BiomeRule]) -> &str {
    match b {
        Biome::Water => "Water",
        Biome::Polar => "Polar",
        Biome::Unclassified => "Unclassified",
        Biome::Rule(i) => rules.get(i).map_or("Unclassified", |r| r.name.as_str()),
    }
}
