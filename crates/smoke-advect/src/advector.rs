//! The timestep orchestrator.

use log::{trace, warn};
use smoke_core::{
    AdvectError, AdvectionMethod, Grid2, Integrator, Interpolation, MacVelocity, MethodFamily,
    Resolution,
};

use crate::config::AdvectConfig;
use crate::integrator::integrate;
use crate::sampler::FieldSampler;
use crate::scratch::{ScratchPool, ScratchSet};
use crate::semi_lagrangian::advance;

/// Drives one advection timestep over caller-owned fields.
///
/// Owns the scratch pool, so a single `Advector` must not be shared between
/// threads stepping different simulations; create one per simulation.
///
/// ```
/// use smoke_advect::Advector;
/// use smoke_core::{Grid2, MacVelocity};
///
/// let mut advector = Advector::with_defaults();
/// let mut velocity = MacVelocity::uniform(8, 0.5, 0.0);
/// let mut density = Grid2::zeros(16, 16);
/// density.set(4, 8, 1.0);
/// advector.step(&mut velocity, &mut density, 0.01).unwrap();
/// ```
#[derive(Debug)]
pub struct Advector {
    config: AdvectConfig,
    pool: ScratchPool,
}

impl Advector {
    /// Create an advector with `config`.
    pub fn new(config: AdvectConfig) -> Self {
        let pool = ScratchPool::new(config.max_cached_resolutions());
        Self { config, pool }
    }

    /// Semi-Lagrangian, bilinear, forward Euler.
    pub fn with_defaults() -> Self {
        Self::new(AdvectConfig::default())
    }

    /// Current configuration.
    pub fn config(&self) -> &AdvectConfig {
        &self.config
    }

    /// Switch the spatial method. Scratch is kept.
    pub fn set_method(&mut self, method: AdvectionMethod) {
        self.config.set_method(method);
    }

    /// Switch the interpolation kernel. Scratch is kept.
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.config.set_interpolation(interpolation);
    }

    /// Switch the time integrator. Scratch is kept.
    pub fn set_integrator(&mut self, integrator: Integrator) {
        self.config.set_integrator(integrator);
    }

    /// The scratch pool, for inspection.
    pub fn scratch(&self) -> &ScratchPool {
        &self.pool
    }

    /// Release every pooled scratch set.
    pub fn clear_scratch(&mut self) {
        self.pool.clear();
    }

    /// Advance `velocity` and `concentration` by `dt` in place.
    ///
    /// `dt` is used as given; see [`cfl_max_dt`](crate::cfl_max_dt) for a
    /// stable bound.
    ///
    /// # Errors
    ///
    /// - [`AdvectError::EmptyResolution`] or [`AdvectError::ShapeMismatch`]
    ///   if the fields are not a consistent MAC layout. Nothing is written.
    /// - [`AdvectError::NanDetected`] if `check_finite` is on and the step
    ///   produced a non-finite value. The fields hold the updated state.
    pub fn step(
        &mut self,
        velocity: &mut MacVelocity,
        concentration: &mut Grid2,
        dt: f64,
    ) -> Result<(), AdvectError> {
        let res = Resolution::new(velocity.resolution(), concentration.width());
        res.validate(velocity, concentration)?;

        let method = self.config.method();
        let interpolation = self.config.interpolation();
        let integrator = self.config.integrator();
        trace!("advect {res} dt={dt} {method}/{interpolation}/{integrator}");

        let scratch = self.pool.get_or_alloc(res);
        match method.family() {
            MethodFamily::Derivative => {
                integrate(integrator, method, velocity, concentration, dt, scratch);
            }
            MethodFamily::FullStep => {
                scratch.ensure_stages(1);
                let ScratchSet {
                    stages,
                    projections,
                    ..
                } = scratch;
                advance(
                    method,
                    interpolation,
                    &FieldSampler::new(velocity, concentration),
                    projections,
                    dt,
                    &mut stages[0],
                );
                stages[0].copy_into(velocity, concentration);
            }
        }

        if self.config.check_finite() {
            check_finite(velocity, concentration)?;
        }
        Ok(())
    }
}

impl Default for Advector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn check_finite(velocity: &MacVelocity, concentration: &Grid2) -> Result<(), AdvectError> {
    let fields = [
        ("velocity.u", velocity.u()),
        ("velocity.v", velocity.v()),
        ("concentration", concentration),
    ];
    for (field, grid) in fields {
        if let Some(idx) = grid.first_non_finite() {
            warn!("non-finite value in {field} at cell {idx} after advection step");
            return Err(AdvectError::NanDetected {
                field,
                cell_index: Some(idx),
            });
        }
    }
    Ok(())
}
