//! Benchmark profiles for smoke advection.
//!
//! - [`reference_profile`]: 64x64 velocity, 128x128 concentration
//! - [`stress_profile`]: 256x256 velocity, 512x512 concentration
//! - [`build_fields`]: deterministic swirl plus seeded density for a profile

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use smoke_advect::{cfl_max_dt, AdvectConfig, Advector};
use smoke_core::{AdvectError, AdvectionMethod, Grid2, Integrator, Interpolation, MacVelocity};
use smoke_test_utils::{gaussian_blob, swirl_velocity};

/// Grid sizes and selectors for one benchmark configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BenchProfile {
    /// Velocity resolution `n`.
    pub n: usize,
    /// Concentration resolution `cn`.
    pub cn: usize,
    /// Spatial method.
    pub method: AdvectionMethod,
    /// Interpolation kernel.
    pub interpolation: Interpolation,
    /// Time integrator.
    pub integrator: Integrator,
    /// Angular speed of the swirl.
    pub omega: f64,
    /// Courant number used to pick `dt`.
    pub courant: f64,
}

impl BenchProfile {
    /// Same grid, different selectors.
    pub fn with_selectors(
        self,
        method: AdvectionMethod,
        interpolation: Interpolation,
        integrator: Integrator,
    ) -> Self {
        Self {
            method,
            interpolation,
            integrator,
            ..self
        }
    }

    /// An advector configured for this profile.
    pub fn advector(&self) -> Result<Advector, AdvectError> {
        let config = AdvectConfig::builder()
            .method(self.method)
            .interpolation(self.interpolation)
            .integrator(self.integrator)
            .build()?;
        Ok(Advector::new(config))
    }
}

/// Reference profile: 64x64 velocity, 128x128 concentration (16K cells).
///
/// Semi-Lagrangian with bilinear sampling, the cheapest full-step setup.
pub fn reference_profile() -> BenchProfile {
    BenchProfile {
        n: 64,
        cn: 128,
        method: AdvectionMethod::SemiLagrangian,
        interpolation: Interpolation::Linear,
        integrator: Integrator::ForwardEuler,
        omega: 1.0,
        courant: 0.5,
    }
}

/// Stress profile: 256x256 velocity, 512x512 concentration (~262K cells).
///
/// Same selectors as [`reference_profile`] at 16x the concentration cells.
pub fn stress_profile() -> BenchProfile {
    BenchProfile {
        n: 256,
        cn: 512,
        ..reference_profile()
    }
}

/// Swirl velocity, Gaussian density and a CFL-limited `dt` for `profile`.
pub fn build_fields(profile: &BenchProfile) -> (MacVelocity, Grid2, f64) {
    let velocity = swirl_velocity(profile.n, profile.omega);
    let density = gaussian_blob(profile.cn, 0.5, 0.3, 0.08);
    let dt = cfl_max_dt(&velocity, profile.cn, profile.courant).unwrap_or(0.01);
    (velocity, density, dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_steps() {
        let profile = reference_profile();
        let (mut v, mut c, dt) = build_fields(&profile);
        let mut adv = profile.advector().unwrap();
        adv.step(&mut v, &mut c, dt).unwrap();
        assert!(c.first_non_finite().is_none());
    }

    #[test]
    fn stress_profile_is_larger() {
        let s = stress_profile();
        let r = reference_profile();
        assert!(s.n > r.n && s.cn > r.cn);
        assert_eq!(s.method, r.method);
    }

    #[test]
    fn dt_respects_courant() {
        let profile = reference_profile();
        let (v, _, dt) = build_fields(&profile);
        let courant = dt * v.max_abs() * profile.cn as f64;
        assert!((courant - profile.courant).abs() < 1e-12);
    }
}
