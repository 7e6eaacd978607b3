/// Precipitation field.
///
/// Relative humidity comes from a saturation-vapor-pressure approximation.
/// On its own that model yields humidity of roughly 20-30, which leaves
/// every hot cell a desert, so cells whose base elevation reaches the
/// flattening threshold have their humidity inverted. Low hot ground can
/// still dry out while uplands get moderate to high humidity.
///
/// Precipitation combines that humidity with a latitudinal baseline and is
/// expressed on a 0-100 scale (not clamped).
use crate::equator::EquatorBand;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Upper bound on relative humidity before the ×2 rescale.
pub const MAX_RELATIVE_HUMIDITY: f32 = 50.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumiditySettings {
    /// Dew point on the celsius-like scale; constant across the map.
    pub dew_point: f32,
    /// Multiplier on the final precipitation value.
    pub intensity: f32,
    /// Base elevation at or above which humidity is inverted.
    pub flattening_threshold: f32,
    /// Temperature weight in the polar override test.
    pub spread: f32,
    /// Polar override fires when `prec + temp * spread` falls below this.
    pub spread_threshold: f32,
}

impl Default for HumiditySettings {
    fn default() -> Self {
        Self {
            dew_point: 10.0,
            intensity: 1.0,
            flattening_threshold: 0.45,
            spread: 0.6,
            spread_threshold: 0.3,
        }
    }
}

/// `458.25·t / (237.3 + t)`. A zero denominator yields `0`.
#[inline]
pub fn vapor_pressure(celsius: f32) -> f32 {
    let denom = 237.3 + celsius;
    if denom == 0.0 { 0.0 } else { 458.25 * celsius / denom }
}

/// Relative humidity for a cell at `temperature`, capped at [`MAX_RELATIVE_HUMIDITY`].
pub fn relative_humidity(temperature: f32, dew_point: f32) -> f32 {
    relative_humidity_celsius(temperature * 100.0, dew_point)
}

/// Relative humidity with the cell temperature already on the celsius-like scale.
///
/// When the saturated pressure is exactly zero the division is skipped and
/// `actual * 10` is used instead.
pub fn relative_humidity_celsius(celsius: f32, dew_point: f32) -> f32 {
    let saturated = vapor_pressure(celsius);
    let actual = vapor_pressure(dew_point);
    let humidity = if saturated == 0.0 { actual * 10.0 } else { actual / saturated * 10.0 };
    humidity.min(MAX_RELATIVE_HUMIDITY)
}

/// Rescale humidity to 0-100, flipping it for inverted cells.
#[inline]
pub fn apply_inversion(humidity: f32, inverted: bool) -> f32 {
    if inverted { 100.0 - humidity * 2.0 } else { humidity * 2.0 }
}

/// Latitudinal rainfall baseline in `[0, 1]`: three full cosine cycles across
/// the half-span from the equator row.
pub fn base_precipitation(row: usize, equator: usize) -> f32 {
    let equator = equator.max(1) as f32;
    let vertical = ((row as f32 - equator).abs() / equator) * 0.5 + 0.5;
    -(vertical * 3.0 * TAU).cos() * 0.5 + 0.5
}

/// `intensity · (baseline + 2 · temperature · humidity)`.
#[inline]
pub fn precipitation_at(humidity: f32, temperature: f32, baseline: f32, intensity: f32) -> f32 {
    intensity * (baseline + 2.0 * temperature * humidity)
}

/// Cells whose original (pre-falloff) height reaches `threshold`.
pub fn inversion_mask(original_height: &Grid<f32>, threshold: f32) -> Grid<bool> {
    Grid::par_from_fn(original_height.width(), original_height.height(), |x, y| {
        original_height.at(x, y) >= threshold
    })
}

pub fn generate_precipitation_map(
    original_height: &Grid<f32>,
    temperature: &Grid<f32>,
    band: EquatorBand,
    use_true_equator: bool,
    settings: &HumiditySettings,
) -> Grid<f32> {
    debug_assert!(original_height.same_shape(temperature));
    let mask = inversion_mask(original_height, settings.flattening_threshold);
    let equator = band.equator_row(temperature.height(), use_true_equator);

    Grid::par_from_fn(temperature.width(), temperature.height(), |x, y| {
        let temp = temperature.at(x, y);
        let humidity = apply_inversion(relative_humidity(temp, settings.dew_point), mask.at(x, y));
        precipitation_at(humidity, temp, base_precipitation(y, equator), settings.intensity)
    })
}
