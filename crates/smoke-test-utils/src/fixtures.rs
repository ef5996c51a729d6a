//! Reusable field fixtures.
//!
//! - [`spike_concentration`]: one seeded cell, the rest zero.
//! - [`gaussian_blob`]: smooth bump for accuracy comparisons.
//! - [`swirl_velocity`]: solid-body rotation about the domain centre.
//! - [`random_concentration`] / [`random_velocity`]: seeded noise.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smoke_core::{Grid2, MacVelocity};

/// `cn x cn` zeros with `value` at `(i, j)`.
pub fn spike_concentration(cn: usize, i: usize, j: usize, value: f64) -> Grid2 {
    let mut c = Grid2::zeros(cn, cn);
    c.set(i, j, value);
    c
}

/// `cn x cn` Gaussian of unit peak centred at `(cx, cy)` in unit-square
/// coordinates, with standard deviation `sigma` in the same units.
pub fn gaussian_blob(cn: usize, cx: f64, cy: f64, sigma: f64) -> Grid2 {
    let h = 1.0 / cn as f64;
    let denom = 2.0 * sigma * sigma;
    Grid2::from_fn(cn, cn, |i, j| {
        let x = (i as f64 + 0.5) * h - cx;
        let y = (j as f64 + 0.5) * h - cy;
        (-(x * x + y * y) / denom).exp()
    })
}

/// Counter-clockwise rotation about `(0.5, 0.5)` with angular speed `omega`,
/// sampled at each face's own position.
pub fn swirl_velocity(n: usize, omega: f64) -> MacVelocity {
    let h = 1.0 / n as f64;
    let mut v = MacVelocity::zeros(n);
    v.u_mut()
        .par_fill_with(|_, j| -omega * ((j as f64 + 0.5) * h - 0.5));
    v.v_mut()
        .par_fill_with(|i, _| omega * ((i as f64 + 0.5) * h - 0.5));
    v
}

/// `cn x cn` values uniform in `[0, 1)`, deterministic in `seed`.
pub fn random_concentration(cn: usize, seed: u64) -> Grid2 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Grid2::from_fn(cn, cn, |_, _| rng.random::<f64>())
}

/// Face velocities uniform in `[-amplitude, amplitude)`, deterministic in `seed`.
pub fn random_velocity(n: usize, amplitude: f64, seed: u64) -> MacVelocity {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut v = MacVelocity::zeros(n);
    for cell in v.u_mut().as_mut_slice() {
        *cell = amplitude * rng.random_range(-1.0..1.0);
    }
    for cell in v.v_mut().as_mut_slice() {
        *cell = amplitude * rng.random_range(-1.0..1.0);
    }
    v
}
