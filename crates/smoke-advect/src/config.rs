//! Advector configuration, constructed via [`AdvectConfig::builder`].

use smoke_core::{AdvectError, AdvectionMethod, Integrator, Interpolation};

/// Selectors and runtime options for an [`Advector`](crate::Advector).
///
/// ```
/// use smoke_advect::AdvectConfig;
/// use smoke_core::{AdvectionMethod, Integrator};
///
/// let config = AdvectConfig::builder()
///     .method(AdvectionMethod::Weno5)
///     .integrator(Integrator::Rk4)
///     .build()
///     .unwrap();
/// assert_eq!(config.method(), AdvectionMethod::Weno5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvectConfig {
    method: AdvectionMethod,
    interpolation: Interpolation,
    integrator: Integrator,
    max_cached_resolutions: usize,
    check_finite: bool,
}

impl AdvectConfig {
    /// Create a new builder. Every option has a default.
    pub fn builder() -> AdvectConfigBuilder {
        AdvectConfigBuilder {
            method: AdvectionMethod::default(),
            interpolation: Interpolation::default(),
            integrator: Integrator::default(),
            max_cached_resolutions: 1,
            check_finite: false,
        }
    }

    /// Spatial method.
    pub fn method(&self) -> AdvectionMethod {
        self.method
    }

    /// Interpolation kernel for the full-step methods.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Time integrator for the derivative methods.
    pub fn integrator(&self) -> Integrator {
        self.integrator
    }

    /// How many resolutions keep their scratch buffers alive.
    pub fn max_cached_resolutions(&self) -> usize {
        self.max_cached_resolutions
    }

    /// Whether each step scans its outputs for NaN or infinity.
    pub fn check_finite(&self) -> bool {
        self.check_finite
    }

    pub(crate) fn set_method(&mut self, method: AdvectionMethod) {
        self.method = method;
    }

    pub(crate) fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    pub(crate) fn set_integrator(&mut self, integrator: Integrator) {
        self.integrator = integrator;
    }
}

impl Default for AdvectConfig {
    fn default() -> Self {
        Self {
            method: AdvectionMethod::default(),
            interpolation: Interpolation::default(),
            integrator: Integrator::default(),
            max_cached_resolutions: 1,
            check_finite: false,
        }
    }
}

/// Builder for [`AdvectConfig`].
///
/// Defaults: Semi-Lagrangian, bilinear, forward Euler, one cached
/// resolution, no finite check.
#[derive(Clone, Debug)]
pub struct AdvectConfigBuilder {
    method: AdvectionMethod,
    interpolation: Interpolation,
    integrator: Integrator,
    max_cached_resolutions: usize,
    check_finite: bool,
}

impl AdvectConfigBuilder {
    /// Set the spatial method.
    pub fn method(mut self, method: AdvectionMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the interpolation kernel.
    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Set the time integrator.
    pub fn integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    /// Number of resolutions whose scratch sets stay pooled. Must be at least 1.
    pub fn max_cached_resolutions(mut self, count: usize) -> Self {
        self.max_cached_resolutions = count;
        self
    }

    /// Scan the updated fields for non-finite values after every step.
    pub fn check_finite(mut self, on: bool) -> Self {
        self.check_finite = on;
        self
    }

    /// Build the config.
    ///
    /// # Errors
    ///
    /// Returns [`AdvectError::InvalidConfig`] if `max_cached_resolutions` is 0.
    pub fn build(self) -> Result<AdvectConfig, AdvectError> {
        if self.max_cached_resolutions == 0 {
            return Err(AdvectError::InvalidConfig {
                reason: "max_cached_resolutions must be at least 1".to_string(),
            });
        }
        Ok(AdvectConfig {
            method: self.method,
            interpolation: self.interpolation,
            integrator: self.integrator,
            max_cached_resolutions: self.max_cached_resolutions,
            check_finite: self.check_finite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default() {
        let built = AdvectConfig::builder().build().unwrap();
        assert_eq!(built, AdvectConfig::default());
        assert_eq!(built.method(), AdvectionMethod::SemiLagrangian);
        assert_eq!(built.interpolation(), Interpolation::Linear);
        assert_eq!(built.integrator(), Integrator::ForwardEuler);
        assert_eq!(built.max_cached_resolutions(), 1);
        assert!(!built.check_finite());
    }

    #[test]
    fn builder_sets_every_option() {
        let c = AdvectConfig::builder()
            .method(AdvectionMethod::MacCormack)
            .interpolation(Interpolation::MonotonicCubic)
            .integrator(Integrator::ModifiedEuler)
            .max_cached_resolutions(3)
            .check_finite(true)
            .build()
            .unwrap();
        assert_eq!(c.method(), AdvectionMethod::MacCormack);
        assert_eq!(c.interpolation(), Interpolation::MonotonicCubic);
        assert_eq!(c.integrator(), Integrator::ModifiedEuler);
        assert_eq!(c.max_cached_resolutions(), 3);
        assert!(c.check_finite());
    }

    #[test]
    fn builder_rejects_zero_cache() {
        let result = AdvectConfig::builder().max_cached_resolutions(0).build();
        assert!(matches!(result, Err(AdvectError::InvalidConfig { .. })));
    }
}
