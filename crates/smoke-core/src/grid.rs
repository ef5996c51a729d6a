//! Dense 2D scalar storage.
//!
//! [`Grid2`] is the unit of storage for every field the kernel touches:
//! both MAC velocity components, the concentration field, stage
//! derivatives, and scratch projections. Cells are addressed by `(i, j)`
//! with `i` along x (width) and `j` along y (height), stored flat as
//! `j * width + i`.

use std::ops::{Index, IndexMut};

use rayon::prelude::*;

/// A fixed-size 2D array of `f64`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid2 {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Grid2 {
    /// Allocate a zeroed `width x height` grid.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Allocate a grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build a grid by evaluating `f(i, j)` at every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for j in 0..height {
            for i in 0..width {
                data.push(f(i, j));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Number of cells along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat storage index of cell `(i, j)`.
    #[inline]
    pub fn index_of(&self, i: usize, j: usize) -> usize {
        j * self.width + i
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn coords_of(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    /// Value at `(i, j)`. Panics if out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.index_of(i, j)]
    }

    /// Overwrite the value at `(i, j)`. Panics if out of range.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.index_of(i, j);
        self.data[idx] = value;
    }

    /// Flat read-only view of the storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Flat mutable view of the storage.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Overwrite every cell with `f(i, j)`, evaluated in parallel.
    ///
    /// `f` must only read state other than `self`; cells are written in
    /// no particular order and the call returns once all are done.
    pub fn par_fill_with<F>(&mut self, f: F)
    where
        F: Fn(usize, usize) -> f64 + Sync,
    {
        let width = self.width;
        self.data
            .par_iter_mut()
            .enumerate()
            .for_each(|(idx, out)| *out = f(idx % width, idx / width));
    }

    /// Copy `src` into `self`. Both grids must have the same shape.
    pub fn copy_from(&mut self, src: &Grid2) {
        debug_assert_eq!(self.dims(), src.dims(), "copy_from shape mismatch");
        self.data.copy_from_slice(&src.data);
    }

    /// `self = a * src0 + b * src1`, elementwise.
    pub fn blend(&mut self, a: f64, src0: &Grid2, b: f64, src1: &Grid2) {
        debug_assert_eq!(self.dims(), src0.dims(), "blend shape mismatch");
        debug_assert_eq!(self.dims(), src1.dims(), "blend shape mismatch");
        self.data
            .par_iter_mut()
            .zip(src0.data.par_iter())
            .zip(src1.data.par_iter())
            .for_each(|((out, &x), &y)| *out = a * x + b * y);
    }

    /// `self += b * src`, elementwise.
    pub fn add_scaled(&mut self, b: f64, src: &Grid2) {
        debug_assert_eq!(self.dims(), src.dims(), "add_scaled shape mismatch");
        self.data
            .par_iter_mut()
            .zip(src.data.par_iter())
            .for_each(|(out, &y)| *out += b * y);
    }

    /// Smallest and largest value, or `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let first = *self.data.first()?;
        Some(
            self.data
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Largest absolute value (0 for an empty grid).
    pub fn max_abs(&self) -> f64 {
        self.data.par_iter().map(|v| v.abs()).reduce(|| 0.0, f64::max)
    }

    /// Flat index of the first NaN or infinite cell.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.data.iter().position(|v| !v.is_finite())
    }
}

impl Index<(usize, usize)> for Grid2 {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[j * self.width + i]
    }
}

impl IndexMut<(usize, usize)> for Grid2 {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[j * self.width + i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_has_requested_shape() {
        let g = Grid2::zeros(5, 4);
        assert_eq!(g.dims(), (5, 4));
        assert_eq!(g.len(), 20);
        assert!(g.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn index_and_coords_are_inverse() {
        let g = Grid2::zeros(5, 4);
        for j in 0..4 {
            for i in 0..5 {
                assert_eq!(g.coords_of(g.index_of(i, j)), (i, j));
            }
        }
    }

    #[test]
    fn from_fn_lays_out_x_fastest() {
        let g = Grid2::from_fn(3, 2, |i, j| (10 * j + i) as f64);
        assert_eq!(g.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(g[(2, 1)], 12.0);
        assert_eq!(g.get(1, 0), 1.0);
    }

    #[test]
    fn blend_and_add_scaled() {
        let a = Grid2::filled(2, 2, 1.0);
        let b = Grid2::filled(2, 2, 3.0);
        let mut out = Grid2::zeros(2, 2);
        out.blend(0.5, &a, 2.0, &b);
        assert!(out.as_slice().iter().all(|&v| v == 6.5));

        out.add_scaled(-1.0, &b);
        assert!(out.as_slice().iter().all(|&v| v == 3.5));
    }

    #[test]
    fn par_fill_with_visits_every_cell() {
        let mut g = Grid2::zeros(7, 5);
        g.par_fill_with(|i, j| (i + 100 * j) as f64);
        assert_eq!(g, Grid2::from_fn(7, 5, |i, j| (i + 100 * j) as f64));
    }

    #[test]
    fn copy_from_overwrites() {
        let src = Grid2::from_fn(3, 3, |i, j| (i * j) as f64);
        let mut dst = Grid2::filled(3, 3, -1.0);
        dst.copy_from(&src);
        assert_eq!(dst, src);
    }

    #[test]
    fn min_max_and_max_abs() {
        let g = Grid2::from_fn(3, 1, |i, _| i as f64 - 2.0);
        assert_eq!(g.min_max(), Some((-2.0, 0.0)));
        assert_eq!(g.max_abs(), 2.0);
        assert_eq!(Grid2::zeros(0, 0).min_max(), None);
    }

    #[test]
    fn first_non_finite_finds_nan() {
        let mut g = Grid2::zeros(3, 3);
        assert_eq!(g.first_non_finite(), None);
        g[(1, 2)] = f64::NAN;
        assert_eq!(g.first_non_finite(), Some(7));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn coords_of_inverts_index_of(w in 1usize..40, h in 1usize..40, seed in 0usize..1600) {
                let g = Grid2::zeros(w, h);
                let idx = seed % g.len();
                let (i, j) = g.coords_of(idx);
                prop_assert!(i < w && j < h);
                prop_assert_eq!(g.index_of(i, j), idx);
            }

            #[test]
            fn blend_matches_scalar_formula(
                a in -10.0f64..10.0,
                b in -10.0f64..10.0,
                x in -100.0f64..100.0,
                y in -100.0f64..100.0,
            ) {
                let mut out = Grid2::zeros(3, 2);
                out.blend(a, &Grid2::filled(3, 2, x), b, &Grid2::filled(3, 2, y));
                for &v in out.as_slice() {
                    prop_assert_eq!(v, a * x + b * y);
                }
            }
        }
    }
}
