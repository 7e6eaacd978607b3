/// Square falloff mask that pushes land toward the map centre.
use crate::grid::Grid;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FalloffSettings {
    /// Steepness of the land/sea transition.
    pub a: f32,
    /// Shifts the transition midpoint.
    pub b: f32,
    /// Sample at cell centres instead of cell corners.
    pub centered: bool,
}

impl Default for FalloffSettings {
    fn default() -> Self {
        Self { a: 1.86, b: 2.81, centered: false }
    }
}

/// Shaping curve `v^a / (v^a + (b - b·v)^a)`.
///
/// A zero denominator (only reachable with `v = 0` and `b = 0`) yields `0`.
pub fn evaluate(value: f32, a: f32, b: f32) -> f32 {
    let num = value.powf(a);
    let denom = num + (b - b * value).powf(a);
    if denom == 0.0 { 0.0 } else { num / denom }
}

/// Normalised coordinate of cell `i` along an axis of length `len`.
///
/// Corner sampling gives `2i/len - 1`, in `[-1, 1)`; centred sampling gives
/// `(2i + 1)/len - 1`. Both are computed from an exact integer numerator so
/// mirrored cells produce values of identical magnitude.
#[inline]
fn axis(i: usize, len: usize, centered: bool) -> f32 {
    let twice = 2 * i + usize::from(centered);
    (twice as f32 - len as f32) / len as f32
}

/// Build the `width × height` falloff mask.
pub fn generate_falloff_map(width: usize, height: usize, settings: &FalloffSettings) -> Grid<f32> {
    let FalloffSettings { a, b, centered } = *settings;
    Grid::par_from_fn(width, height, |i, j| {
        let x = axis(i, width, centered);
        let y = axis(j, height, centered);
        // Chebyshev distance from the centre gives a square falloff.
        let v = x.abs().max(y.abs());
        evaluate(v, a, b)
    })
}
