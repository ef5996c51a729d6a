//! One-dimensional advective operators.
//!
//! Every operator takes a transport velocity `u` and a 7-point stencil
//! centred on the target sample (`s[3]`), and returns the signed advective
//! term `-u * dphi/dx` in grid units. Callers scale by resolution to get
//! physical units.

use smoke_core::AdvectionMethod;

/// Samples on each side of the centre.
pub const STENCIL_RADIUS: usize = 3;

/// Seven consecutive samples along one axis; `s[STENCIL_RADIUS]` is the centre.
pub type Stencil = [f64; 2 * STENCIL_RADIUS + 1];

const WENO_EPSILON: f64 = 1.0e-6;
const WENO_LINEAR_WEIGHTS: [f64; 3] = [0.1, 0.6, 0.3];

/// First-order upwind difference.
///
/// No stability check: `dt * |u| * resolution` must stay below 1.
#[inline]
pub fn upwind(u: f64, s: &Stencil) -> f64 {
    if u > 0.0 {
        -u * (s[3] - s[2])
    } else if u < 0.0 {
        -u * (s[4] - s[3])
    } else {
        0.0
    }
}

/// Nonlinear WENO5 blending weights for five consecutive one-sided differences.
///
/// Non-negative and summing to 1 for any finite input.
pub fn weno5_weights(v: &[f64; 5]) -> [f64; 3] {
    let [v1, v2, v3, v4, v5] = *v;
    let beta = [
        13.0 * sq(v1 - 2.0 * v2 + v3) / 12.0 + sq(v1 - 4.0 * v2 + 3.0 * v3) / 4.0,
        13.0 * sq(v2 - 2.0 * v3 + v4) / 12.0 + sq(v2 - v4) / 4.0,
        13.0 * sq(v3 - 2.0 * v4 + v5) / 12.0 + sq(3.0 * v3 - 4.0 * v4 + v5) / 4.0,
    ];
    let w: [f64; 3] = std::array::from_fn(|k| WENO_LINEAR_WEIGHTS[k] / sq(WENO_EPSILON + beta[k]));
    let total: f64 = w.iter().sum();
    if total.is_finite() && total > 0.0 {
        w.map(|wk| wk / total)
    } else {
        // Every beta overflowed to infinity.
        WENO_LINEAR_WEIGHTS
    }
}

/// WENO5 derivative reconstruction from five one-sided differences,
/// ordered from far upstream to far downstream.
pub fn weno5_reconstruct(v: &[f64; 5]) -> f64 {
    let [v1, v2, v3, v4, v5] = *v;
    let [w1, w2, w3] = weno5_weights(v);
    (w1 * (2.0 * v1 - 7.0 * v2 + 11.0 * v3)
        + w2 * (-v2 + 5.0 * v3 + 2.0 * v4)
        + w3 * (2.0 * v3 + 5.0 * v4 - v5))
        / 6.0
}

/// Fifth-order WENO advective term; the upstream side is picked by the sign of `u`.
#[inline]
pub fn weno5(u: f64, s: &Stencil) -> f64 {
    if u > 0.0 {
        let backward = [s[1] - s[0], s[2] - s[1], s[3] - s[2], s[4] - s[3], s[5] - s[4]];
        -u * weno5_reconstruct(&backward)
    } else if u < 0.0 {
        let forward = [s[6] - s[5], s[5] - s[4], s[4] - s[3], s[3] - s[2], s[2] - s[1]];
        -u * weno5_reconstruct(&forward)
    } else {
        0.0
    }
}

/// Third-order QUICK: central difference plus an upwind-biased cubic correction.
#[inline]
pub fn quick(u: f64, s: &Stencil) -> f64 {
    let center = 0.5 * (s[4] - s[2]);
    if u > 0.0 {
        -u * (center + (s[1] - 3.0 * s[2] + 3.0 * s[3] - s[4]) / 8.0)
    } else if u < 0.0 {
        -u * (center + (s[2] - 3.0 * s[3] + 3.0 * s[4] - s[5]) / 8.0)
    } else {
        0.0
    }
}

/// Signed advective term for `method`.
///
/// Full-step methods have no derivative form and contribute zero.
#[inline]
pub fn advdiff(method: AdvectionMethod, u: f64, s: &Stencil) -> f64 {
    match method {
        AdvectionMethod::Upwind => upwind(u, s),
        AdvectionMethod::Weno5 => weno5(u, s),
        AdvectionMethod::Quick => quick(u, s),
        AdvectionMethod::SemiLagrangian | AdvectionMethod::MacCormack => 0.0,
    }
}

#[inline]
fn sq(x: f64) -> f64 {
    x * x
}
