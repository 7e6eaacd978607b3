/// Temperature field.
///
/// Temperature falls linearly with distance from the equator row and with
/// elevation. The result is unbounded; downstream stages only compare it.
use crate::equator::EquatorBand;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureSettings {
    /// Degrees lost between the equator and the far edge of the map.
    pub bias: f32,
    /// Elevation is divided by this before the loss is applied.
    pub height_divisor: f32,
    /// Degrees lost per unit of scaled elevation.
    pub loss: f32,
    /// Sea-level temperature on the equator.
    pub base: f32,
}

impl Default for TemperatureSettings {
    fn default() -> Self {
        Self { bias: 1.2, height_divisor: 1.0, loss: 0.3, base: 0.7 }
    }
}

/// Temperature of a single cell.
#[inline]
pub fn temperature_at(height: f32, dist_from_equator: f32, map_height: f32, settings: &TemperatureSettings) -> f32 {
    -(dist_from_equator / map_height) * settings.bias - (height / settings.height_divisor) * settings.loss
        + settings.base
}

pub fn generate_temperature_map(
    height_map: &Grid<f32>,
    band: EquatorBand,
    use_true_equator: bool,
    settings: &TemperatureSettings,
) -> Grid<f32> {
    let rows = height_map.height();
    let equator = band.equator_row(rows, use_true_equator) as f32;
    Grid::par_from_fn(height_map.width(), rows, |x, y| {
        let dist = (y as f32 - equator).abs();
        temperature_at(height_map.at(x, y), dist, rows as f32, settings)
    })
}
