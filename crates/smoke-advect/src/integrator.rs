//! Explicit time integration of the derivative-producing methods.
//!
//! Each integrator is a small tableau: the offsets used to build the
//! temporary state for stages `1..s`, and the weights that combine the
//! stage derivatives into the final update. Stages live in the scratch set
//! so no allocation happens after the first step at a resolution.

use smoke_core::{AdvectionMethod, Grid2, Integrator, MacVelocity};

use crate::eulerian::derivative;
use crate::sampler::FieldSampler;
use crate::scratch::{ScratchSet, StageFields};

/// Coefficient on the concentration *state* when building a stage's
/// temporary, against 1.0 for the velocity components.
///
/// Multi-stage integrators build concentration temporaries as
/// `0.5 * c + a * dt * k` rather than `c + a * dt * k`. This halves the
/// concentration seen by stages after the first. It is kept as-is because
/// the advected results depend on it; with a still fluid every stage
/// derivative is zero and the step is unaffected.
pub const CONCENTRATION_STAGE_BLEND: f64 = 0.5;

/// Stage offsets and combination weights of an explicit integrator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tableau {
    /// `offsets[k]` scales `dt * k_k` when building the state for stage `k + 1`.
    pub offsets: &'static [f64],
    /// Weight of each stage derivative in the final update (sums to 1).
    pub weights: &'static [f64],
}

impl Tableau {
    /// The tableau for `integrator`.
    pub fn of(integrator: Integrator) -> Self {
        match integrator {
            Integrator::ForwardEuler => Self {
                offsets: &[],
                weights: &[1.0],
            },
            Integrator::ModifiedEuler => Self {
                offsets: &[1.0],
                weights: &[0.5, 0.5],
            },
            Integrator::Rk4 => Self {
                offsets: &[0.5, 0.5, 1.0],
                weights: &[1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0],
            },
        }
    }

    /// Number of derivative evaluations.
    pub fn stages(&self) -> usize {
        self.weights.len()
    }
}

/// Advance `velocity` and `concentration` by `dt` in place.
///
/// Every stage evaluates on either the caller's fields (stage 0) or the
/// scratch temporary, so the caller's buffers are only written by the final
/// combination.
pub fn integrate(
    integrator: Integrator,
    method: AdvectionMethod,
    velocity: &mut MacVelocity,
    concentration: &mut Grid2,
    dt: f64,
    scratch: &mut ScratchSet,
) {
    let tableau = Tableau::of(integrator);
    scratch.ensure_stages(tableau.stages());
    let ScratchSet {
        stages,
        temp,
        projections,
        ..
    } = scratch;

    derivative(
        method,
        &FieldSampler::new(velocity, concentration),
        projections,
        &mut stages[0],
    );
    for (k, &offset) in tableau.offsets.iter().enumerate() {
        build_stage_state(temp, velocity, concentration, offset * dt, &stages[k]);
        derivative(
            method,
            &FieldSampler::new(&temp.velocity, &temp.concentration),
            projections,
            &mut stages[k + 1],
        );
    }

    for (&w, stage) in tableau.weights.iter().zip(stages.iter()) {
        let b = w * dt;
        velocity.u_mut().add_scaled(b, stage.velocity.u());
        velocity.v_mut().add_scaled(b, stage.velocity.v());
        concentration.add_scaled(b, &stage.concentration);
    }
}

/// `temp = state + a * k`, with the concentration state scaled by
/// [`CONCENTRATION_STAGE_BLEND`].
fn build_stage_state(
    temp: &mut StageFields,
    velocity: &MacVelocity,
    concentration: &Grid2,
    a: f64,
    k: &StageFields,
) {
    temp.velocity.u_mut().blend(1.0, velocity.u(), a, k.velocity.u());
    temp.velocity.v_mut().blend(1.0, velocity.v(), a, k.velocity.v());
    temp.concentration.blend(
        CONCENTRATION_STAGE_BLEND,
        concentration,
        a,
        &k.concentration,
    );
}
