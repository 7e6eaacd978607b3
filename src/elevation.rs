use crate::grid::Grid;

/// Subtract the falloff mask from raw noise and floor the result at sea level.
///
/// Every ocean cell reads exactly `sea_level`; every land cell is strictly above it.
/// Later stages rely on that exact value as the water sentinel.
pub fn combine(noise: &Grid<f32>, falloff: &Grid<f32>, sea_level: f32) -> Grid<f32> {
    debug_assert!(noise.same_shape(falloff));
    Grid::par_from_fn(noise.width(), noise.height(), |x, y| {
        let value = (noise.at(x, y) - falloff.at(x, y)).clamp(0.0, 1.0);
        if value > sea_level { value } else { sea_level }
    })
}

/// True when `height` is the sea-level sentinel written by [`combine`].
#[inline]
pub fn is_water(height: f32, sea_level: f32) -> bool {
    height <= sea_level
}
