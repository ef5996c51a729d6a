//! Test utilities for smoke development.
//!
//! Deterministic velocity and concentration fixtures shared by the unit
//! tests, integration tests and benches. Random fields are seeded so a
//! failing case reproduces exactly.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    gaussian_blob, random_concentration, random_velocity, spike_concentration, swirl_velocity,
};

use smoke_core::Grid2;

/// Sum of every cell.
pub fn total_mass(grid: &Grid2) -> f64 {
    grid.as_slice().iter().sum()
}

/// Largest elementwise difference between two equally shaped grids.
///
/// Panics on a shape mismatch; intended for test assertions.
pub fn max_abs_diff(a: &Grid2, b: &Grid2) -> f64 {
    assert_eq!(a.dims(), b.dims(), "grids differ in shape");
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Every cell is finite.
pub fn all_finite(grid: &Grid2) -> bool {
    grid.first_non_finite().is_none()
}
