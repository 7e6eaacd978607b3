/// False-equator detection.
///
/// Land rarely sits on the geometric centre of the map, so when the true
/// equator is not requested the temperature and rainfall bands are centred
/// on the rows that actually carry land.
use crate::grid::Grid;
use serde::Serialize;

/// First and last land-bearing rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EquatorBand {
    pub top_row: usize,
    pub bottom_row: usize,
}

impl EquatorBand {
    /// The whole map, used when no land row is found.
    pub fn full(height: usize) -> Self {
        Self { top_row: 0, bottom_row: height.saturating_sub(1) }
    }

    /// Reference row for latitude. Integer midpoint, rounding toward the top.
    pub fn equator_row(&self, height: usize, use_true_equator: bool) -> usize {
        if use_true_equator { height / 2 } else { (self.top_row + self.bottom_row) / 2 }
    }
}

fn row_has_land(map: &Grid<f32>, y: usize, sea_level: f32) -> bool {
    map.row(y).any(|&h| h != sea_level)
}

/// Scan for the first and last rows holding any cell that differs from `sea_level`.
///
/// Each direction keeps its default (`0` / `height - 1`) when nothing is found.
pub fn detect(map: &Grid<f32>, sea_level: f32) -> EquatorBand {
    let height = map.height();
    let mut band = EquatorBand::full(height);

    if let Some(top) = (0..height).find(|&y| row_has_land(map, y, sea_level)) {
        band.top_row = top;
    } else {
        log::debug!("no land rows found; equator band falls back to full map");
    }
    if let Some(bottom) = (0..height).rev().find(|&y| row_has_land(map, y, sea_level)) {
        band.bottom_row = bottom;
    }
    band
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_land_spans_whole_grid() {
        let map = Grid::filled(4, 4, 0.6f32);
        assert_eq!(detect(&map, 0.3), EquatorBand { top_row: 0, bottom_row: 3 });
    }

    #[test]
    fn all_sea_uses_default_rows() {
        let map = Grid::filled(4, 4, 0.3f32);
        assert_eq!(detect(&map, 0.3), EquatorBand { top_row: 0, bottom_row: 3 });
    }

    #[test]
    fn band_tracks_land_rows() {
        let map = Grid::from_fn(5, 10, |x, y| if (3..=6).contains(&y) && x == 2 { 0.7 } else { 0.2 });
        let band = detect(&map, 0.2);
        assert_eq!(band, EquatorBand { top_row: 3, bottom_row: 6 });
        assert_eq!(band.equator_row(10, false), 4);
        assert_eq!(band.equator_row(10, true), 5);
    }

    #[test]
    fn single_land_row() {
        let map = Grid::from_fn(3, 7, |_, y| if y == 5 { 0.9 } else { 0.1 });
        assert_eq!(detect(&map, 0.1), EquatorBand { top_row: 5, bottom_row: 5 });
    }
}
