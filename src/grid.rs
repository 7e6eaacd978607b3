/// Dense 2-D field shared by every pipeline stage.
///
/// Storage is column-major, `index = x * height + y`, the same layout the
/// exporters have always used for per-tile buffers.
use rayon::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                data.push(f(x, y));
            }
        }
        Self { width, height, data }
    }

    /// Parallel variant of [`Grid::from_fn`]. `f` must be a pure function of
    /// the cell coordinates; the resulting layout does not depend on scheduling.
    pub fn par_from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> T + Sync) -> Self
    where
        T: Send,
    {
        let data = (0..width * height)
            .into_par_iter()
            .map(|idx| f(idx / height, idx % height))
            .collect();
        Self { width, height, data }
    }

    /// Wrap an existing column-major buffer. Returns `None` on a size mismatch.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == width * height).then_some(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        x * self.height + y
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// True when `other` has the same dimensions.
    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Iterate over one row (fixed `y`) from left to right.
    pub fn row(&self, y: usize) -> impl Iterator<Item = &T> + '_ {
        (0..self.width).map(move |x| self.get(x, y))
    }
}

impl<T: Copy> Grid<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self { width, height, data: vec![value; width * height] }
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> T {
        *self.get(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_major_layout() {
        let grid = Grid::from_fn(3, 2, |x, y| (x * 10 + y) as u32);
        assert_eq!(grid.as_slice(), &[0, 1, 10, 11, 20, 21]);
        assert_eq!(grid.at(2, 1), 21);
    }

    #[test]
    fn parallel_matches_sequential() {
        let seq = Grid::from_fn(17, 9, |x, y| x as f32 * 0.5 - y as f32);
        let par = Grid::par_from_fn(17, 9, |x, y| x as f32 * 0.5 - y as f32);
        assert_eq!(seq, par);
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        assert!(Grid::from_vec(2, 2, vec![0u8; 3]).is_none());
        assert!(Grid::from_vec(2, 2, vec![0u8; 4]).is_some());
    }

    #[test]
    fn row_walks_left_to_right() {
        let grid = Grid::from_fn(3, 2, |x, y| x + y * 100);
        let row: Vec<usize> = grid.row(1).copied().collect();
        assert_eq!(row, vec![100, 101, 102]);
    }
}
