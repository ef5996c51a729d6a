//! Scalar sampling at fractional grid coordinates.
//!
//! All kernels clamp the query coordinate into `[0, dim-1]` per axis and use
//! the fractional offset `coord - floor(coord)`. The cubic kernels work
//! separably: four 1D evaluations along x (one per stencil row), then one
//! along y over those results.

use smoke_core::{Grid2, Interpolation};

/// A sampling strategy over a [`Grid2`].
///
/// Kernels are shared across the worker threads of a parallel fill.
pub trait InterpolationKernel: Sync {
    /// Value of `grid` at the fractional coordinate `(x, y)`.
    fn sample(&self, grid: &Grid2, x: f64, y: f64) -> f64;
}

impl InterpolationKernel for Interpolation {
    #[inline]
    fn sample(&self, grid: &Grid2, x: f64, y: f64) -> f64 {
        match self {
            Interpolation::Linear => bilinear(grid, x, y),
            Interpolation::Spline => separable(grid, x, y, spline_segment),
            Interpolation::MonotonicCubic => separable(grid, x, y, monotonic_segment),
        }
    }
}

/// Clamp a coordinate into `[0, dim-1]`.
#[inline]
fn clamp_coord(coord: f64, dim: usize) -> f64 {
    coord.max(0.0).min(dim.saturating_sub(1) as f64)
}

/// Lower cell index, upper cell index, and fraction for a linear bracket.
#[inline]
fn bracket(coord: f64, dim: usize) -> (usize, usize, f64) {
    if dim < 2 {
        return (0, 0, 0.0);
    }
    let c = clamp_coord(coord, dim);
    let lo = (c.floor() as usize).min(dim - 2);
    (lo, lo + 1, c - lo as f64)
}

/// Bilinear interpolation of the 2x2 cell enclosing the clamped coordinate.
pub fn bilinear(grid: &Grid2, x: f64, y: f64) -> f64 {
    let (i0, i1, fx) = bracket(x, grid.width());
    let (j0, j1, fy) = bracket(y, grid.height());
    let bottom = (1.0 - fx) * grid.get(i0, j0) + fx * grid.get(i1, j0);
    let top = (1.0 - fx) * grid.get(i0, j1) + fx * grid.get(i1, j1);
    (1.0 - fy) * bottom + fy * top
}

/// Gather the 4x4 neighbourhood around `(x, y)` and apply `segment` separably.
fn separable(grid: &Grid2, x: f64, y: f64, segment: fn(&[f64; 4], f64) -> f64) -> f64 {
    let (w, h) = grid.dims();
    let cx = clamp_coord(x, w);
    let cy = clamp_coord(y, h);
    let (bx, by) = (cx.floor(), cy.floor());
    let (fx, fy) = (cx - bx, cy - by);
    let (bi, bj) = (bx as isize, by as isize);
    let max_i = w as isize - 1;
    let max_j = h as isize - 1;

    let rows: [f64; 4] = std::array::from_fn(|r| {
        let j = (bj - 1 + r as isize).clamp(0, max_j) as usize;
        let row: [f64; 4] = std::array::from_fn(|c| {
            let i = (bi - 1 + c as isize).clamp(0, max_i) as usize;
            grid.get(i, j)
        });
        segment(&row, fx)
    });
    segment(&rows, fy)
}

/// Natural cubic spline through `a`, evaluated on the `[a[1], a[2]]` segment at
/// `t` in `[0, 1]` and clamped to that segment's endpoint range.
pub fn spline_segment(a: &[f64; 4], t: f64) -> f64 {
    // Thomas elimination for the two interior second-derivative unknowns;
    // natural end conditions pin c[0] = c[3] = 0.
    let alpha1 = 3.0 * (a[2] - a[1]) - 3.0 * (a[1] - a[0]);
    let alpha2 = 3.0 * (a[3] - a[2]) - 3.0 * (a[2] - a[1]);
    let l1 = 4.0;
    let mu1 = 1.0 / l1;
    let z1 = alpha1 / l1;
    let l2 = 4.0 - mu1;
    let z2 = (alpha2 - z1) / l2;

    // Back substitution; only the middle segment's coefficients are needed.
    let c2 = z2;
    let c1 = z1 - mu1 * c2;
    let b1 = a[2] - a[1] - (c2 + 2.0 * c1) / 3.0;
    let d1 = (c2 - c1) / 3.0;

    let value = a[1] + b1 * t + c1 * t * t + d1 * t * t * t;
    let lo = a[1].min(a[2]);
    let hi = a[1].max(a[2]);
    value.max(lo).min(hi)
}

/// Slope-limited Hermite cubic on the `[a[1], a[2]]` segment at `t` in `[0, 1]`.
///
/// End slopes come from the outer one-sided differences. A slope whose sign
/// disagrees with the central difference, or any slope over a flat centre, is
/// zeroed; the rest are capped at three times the central difference, which
/// keeps the segment monotone between `a[1]` and `a[2]`.
pub fn monotonic_segment(a: &[f64; 4], t: f64) -> f64 {
    let delta = a[2] - a[1];
    let (m0, m1) = if delta == 0.0 {
        (0.0, 0.0)
    } else {
        (limit_slope(a[1] - a[0], delta), limit_slope(a[3] - a[2], delta))
    };

    let t2 = t * t;
    let t3 = t2 * t;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;
    h00 * a[1] + h10 * m0 + h01 * a[2] + h11 * m1
}

#[inline]
fn limit_slope(slope: f64, delta: f64) -> f64 {
    if slope == 0.0 || slope.signum() != delta.signum() {
        0.0
    } else {
        slope.signum() * slope.abs().min(3.0 * delta.abs())
    }
}
