//! Full-step advection by backward tracing (Semi-Lagrangian, MacCormack).
//!
//! Both methods write the advanced field, not a derivative: one evaluation
//! covers the whole timestep and time integrators are bypassed.
//!
//! Traces run in the target field's own index space. A sample at `(i, j)`
//! moving with velocity `(ux, uy)` departs from
//! `(i - dt * res * ux, j - dt * res * uy)`, where `res` is `n` for the
//! velocity components and `cn` for the concentration.

use smoke_core::{AdvectionMethod, Grid2, Interpolation};

use crate::interp::InterpolationKernel;
use crate::projection::Projections;
use crate::sampler::FieldSampler;
use crate::scratch::StageFields;

/// Advance all three fields by `dt`, writing the result into `out`.
///
/// `method` must be a full-step method; anything else falls back to the
/// first-order trace.
pub fn advance(
    method: AdvectionMethod,
    kernel: Interpolation,
    sampler: &FieldSampler<'_>,
    projections: &mut Projections,
    dt: f64,
    out: &mut StageFields,
) {
    let vel = sampler.velocity();
    projections.fill_faces(sampler);
    projections.fill_cells(vel);
    projections.fill_concentration(&kernel);

    let n = sampler.n();
    let cn = sampler.cn();
    let trace = match method {
        AdvectionMethod::MacCormack => maccormack,
        _ => semi_lagrangian,
    };

    trace(out.velocity.u_mut(), vel.u(), projections.u_face(), n, dt, &kernel);
    trace(out.velocity.v_mut(), vel.v(), projections.v_face(), n, dt, &kernel);
    trace(
        &mut out.concentration,
        sampler.concentration(),
        projections.concentration(),
        cn,
        dt,
        &kernel,
    );
}

/// First-order backward trace: `out(i, j) = prev(departure point)`.
pub fn semi_lagrangian(
    out: &mut Grid2,
    prev: &Grid2,
    velocity: &[Grid2; 2],
    resolution: usize,
    dt: f64,
    kernel: &Interpolation,
) {
    let scale = dt * resolution as f64;
    let [vx, vy] = velocity;
    out.par_fill_with(|i, j| {
        let x = i as f64 - scale * vx.get(i, j);
        let y = j as f64 - scale * vy.get(i, j);
        kernel.sample(prev, x, y)
    });
}

/// Second-order MacCormack trace with the neighbourhood clamp.
///
/// Backward to the departure point for `phi_n_1_hat`, forward again with the
/// velocity found there for `phi_n_hat`, then correct by half the
/// round-trip error. The corrected value is clamped to the range of the four
/// cells surrounding the departure point.
pub fn maccormack(
    out: &mut Grid2,
    prev: &Grid2,
    velocity: &[Grid2; 2],
    resolution: usize,
    dt: f64,
    kernel: &Interpolation,
) {
    let scale = dt * resolution as f64;
    let [vx, vy] = velocity;
    let max_x = prev.width().saturating_sub(1) as f64;
    let max_y = prev.height().saturating_sub(1) as f64;

    out.par_fill_with(|i, j| {
        let x = (i as f64 - scale * vx.get(i, j)).max(0.0).min(max_x);
        let y = (j as f64 - scale * vy.get(i, j)).max(0.0).min(max_y);

        let phi_n_1_hat = kernel.sample(prev, x, y);
        let u_hat = kernel.sample(vx, x, y);
        let v_hat = kernel.sample(vy, x, y);
        let phi_n_hat = kernel.sample(prev, x + scale * u_hat, y + scale * v_hat);

        let r = phi_n_1_hat + 0.5 * (prev.get(i, j) - phi_n_hat);
        let (lo, hi) = donor_bounds(prev, x, y);
        r.min(hi).max(lo)
    });
}

/// Min and max of the (up to) four cells surrounding `(x, y)`.
pub fn donor_bounds(grid: &Grid2, x: f64, y: f64) -> (f64, f64) {
    let (w, h) = grid.dims();
    let i0 = (x.max(0.0) as usize).min(w.saturating_sub(2));
    let j0 = (y.max(0.0) as usize).min(h.saturating_sub(2));
    let i1 = (i0 + 1).min(w - 1);
    let j1 = (j0 + 1).min(h - 1);

    let corners = [
        grid.get(i0, j0),
        grid.get(i1, j0),
        grid.get(i0, j1),
        grid.get(i1, j1),
    ];
    corners
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use smoke_core::{MacVelocity, Resolution};
    use smoke_test_utils::max_abs_diff;

    fn run(
        method: AdvectionMethod,
        kernel: Interpolation,
        vel: &MacVelocity,
        c: &Grid2,
        dt: f64,
    ) -> StageFields {
        let res = Resolution::new(vel.resolution(), c.width());
        let mut proj = Projections::zeros(res);
        let mut out = StageFields::zeros(res);
        advance(method, kernel, &FieldSampler::new(vel, c), &mut proj, dt, &mut out);
        out
    }

    #[test]
    fn still_fluid_is_identity() {
        let vel = MacVelocity::zeros(5);
        let c = Grid2::from_fn(7, 7, |i, j| ((i * 3 + j) % 4) as f64);
        for method in [AdvectionMethod::SemiLagrangian, AdvectionMethod::MacCormack] {
            for kernel in Interpolation::ALL {
                let out = run(method, kernel, &vel, &c, 0.5);
                assert_eq!(out.concentration, c, "{method}/{kernel}");
                assert_eq!(out.velocity, vel, "{method}/{kernel}");
            }
        }
    }

    #[test]
    fn whole_cell_shift_is_exact() {
        // dt * cn * u = 1 cell: each cell takes its left neighbour's value.
        let vel = MacVelocity::uniform(4, 0.25, 0.0);
        let c = Grid2::from_fn(4, 4, |i, j| (i + 4 * j) as f64);
        let out = run(AdvectionMethod::SemiLagrangian, Interpolation::Linear, &vel, &c, 1.0);
        for j in 0..4 {
            assert_eq!(out.concentration.get(0, j), c.get(0, j));
            for i in 1..4 {
                assert!((out.concentration.get(i, j) - c.get(i - 1, j)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn u_shears_one_cell_under_uniform_v() {
        // u(i, j) = 0.001 * j; dt * n * v = 1 cell, so each row takes the
        // row below it and row 0 holds at the clamped edge.
        let n = 4;
        let u = Grid2::from_fn(n + 1, n, |_, j| 0.001 * j as f64);
        let v = Grid2::filled(n, n + 1, 0.25);
        let vel = MacVelocity::from_components(u, v.clone()).unwrap();
        let c = Grid2::zeros(n, n);
        let want = [0.0, 0.0, 0.001, 0.002];
        for method in [AdvectionMethod::SemiLagrangian, AdvectionMethod::MacCormack] {
            let out = run(method, Interpolation::Linear, &vel, &c, 1.0);
            for i in 0..=n {
                for (j, w) in want.iter().enumerate() {
                    let got = out.velocity.u().get(i, j);
                    assert!((got - w).abs() < 1e-12, "{method} u({i},{j}) = {got}");
                }
            }
            assert!(max_abs_diff(out.velocity.v(), &v) < 1e-12, "{method}");
        }
    }

    #[test]
    fn donor_bounds_cover_four_cells() {
        let g = Grid2::from_fn(3, 3, |i, j| (i * 10 + j) as f64);
        assert_eq!(donor_bounds(&g, 0.5, 1.5), (1.0, 12.0));
        // Far edge clamps to the last 2x2 block.
        assert_eq!(donor_bounds(&g, 2.0, 2.0), (11.0, 22.0));
        // Degenerate 1-wide grid.
        let thin = Grid2::from_fn(1, 3, |_, j| j as f64);
        assert_eq!(donor_bounds(&thin, 0.0, 0.2), (0.0, 1.0));
    }

    #[test]
    fn maccormack_stays_inside_donor_neighbourhood() {
        let mut c = Grid2::zeros(8, 8);
        c.set(4, 4, 1.0);
        let vel = MacVelocity::uniform(8, 0.7, 0.3);
        let dt = 0.1;
        for kernel in Interpolation::ALL {
            let out = run(AdvectionMethod::MacCormack, kernel, &vel, &c, dt);
            let scale = dt * 8.0;
            for j in 0..8 {
                for i in 0..8 {
                    let x = (i as f64 - scale * 0.7).clamp(0.0, 7.0);
                    let y = (j as f64 - scale * 0.3).clamp(0.0, 7.0);
                    let (lo, hi) = donor_bounds(&c, x, y);
                    let v = out.concentration.get(i, j);
                    assert!(v >= lo && v <= hi, "{kernel} ({i},{j}): {v} not in [{lo}, {hi}]");
                }
            }
        }
    }
}
