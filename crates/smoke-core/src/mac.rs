//! Staggered (MAC) velocity storage and the resolution key.

use std::fmt;

use crate::error::AdvectError;
use crate::grid::Grid2;

/// A velocity component / grid direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal (`i`, width).
    X,
    /// Vertical (`j`, height).
    Y,
}

impl Axis {
    /// Both axes, in component order.
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];
}

/// Velocity and concentration resolutions of one simulation.
///
/// Used as the key for pooled scratch storage: every buffer shape the
/// kernel needs is a function of these two numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// Velocity grid resolution `n` (cells per side).
    pub velocity: usize,
    /// Concentration grid resolution `cn` (cells per side).
    pub concentration: usize,
}

impl Resolution {
    /// Construct a resolution pair.
    pub fn new(velocity: usize, concentration: usize) -> Self {
        Self {
            velocity,
            concentration,
        }
    }

    /// Shape of the x-velocity grid: `(n + 1) x n`.
    pub fn u_dims(&self) -> (usize, usize) {
        (self.velocity + 1, self.velocity)
    }

    /// Shape of the y-velocity grid: `n x (n + 1)`.
    pub fn v_dims(&self) -> (usize, usize) {
        (self.velocity, self.velocity + 1)
    }

    /// Shape of the concentration grid: `cn x cn`.
    pub fn c_dims(&self) -> (usize, usize) {
        (self.concentration, self.concentration)
    }

    /// Check that a velocity/concentration pair matches this resolution.
    pub fn validate(
        &self,
        velocity: &MacVelocity,
        concentration: &Grid2,
    ) -> Result<(), AdvectError> {
        if self.velocity == 0 || self.concentration == 0 {
            return Err(AdvectError::EmptyResolution);
        }
        check_shape("velocity.u", self.u_dims(), velocity.u().dims())?;
        check_shape("velocity.v", self.v_dims(), velocity.v().dims())?;
        check_shape("concentration", self.c_dims(), concentration.dims())
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={} cn={}", self.velocity, self.concentration)
    }
}

fn check_shape(
    field: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<(), AdvectError> {
    if expected == actual {
        Ok(())
    } else {
        Err(AdvectError::ShapeMismatch {
            field,
            expected,
            actual,
        })
    }
}

/// MAC-grid velocity at resolution `n`.
///
/// The x-component lives on vertical cell faces (`(n + 1) x n`), the
/// y-component on horizontal faces (`n x (n + 1)`).
#[derive(Clone, Debug, PartialEq)]
pub struct MacVelocity {
    n: usize,
    u: Grid2,
    v: Grid2,
}

impl MacVelocity {
    /// A still velocity field at resolution `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            u: Grid2::zeros(n + 1, n),
            v: Grid2::zeros(n, n + 1),
        }
    }

    /// A spatially uniform velocity `(ux, uy)` on every face.
    pub fn uniform(n: usize, ux: f64, uy: f64) -> Self {
        Self {
            n,
            u: Grid2::filled(n + 1, n, ux),
            v: Grid2::filled(n, n + 1, uy),
        }
    }

    /// Assemble from existing component grids, checking their shapes.
    pub fn from_components(u: Grid2, v: Grid2) -> Result<Self, AdvectError> {
        let n = u.height();
        if n == 0 {
            return Err(AdvectError::EmptyResolution);
        }
        check_shape("velocity.u", (n + 1, n), u.dims())?;
        check_shape("velocity.v", (n, n + 1), v.dims())?;
        Ok(Self { n, u, v })
    }

    /// Resolution `n`.
    pub fn resolution(&self) -> usize {
        self.n
    }

    /// x-component on vertical faces.
    pub fn u(&self) -> &Grid2 {
        &self.u
    }

    /// y-component on horizontal faces.
    pub fn v(&self) -> &Grid2 {
        &self.v
    }

    /// Mutable x-component.
    pub fn u_mut(&mut self) -> &mut Grid2 {
        &mut self.u
    }

    /// Mutable y-component.
    pub fn v_mut(&mut self) -> &mut Grid2 {
        &mut self.v
    }

    /// The component along `axis`.
    pub fn component(&self, axis: Axis) -> &Grid2 {
        match axis {
            Axis::X => &self.u,
            Axis::Y => &self.v,
        }
    }

    /// Mutable component along `axis`.
    pub fn component_mut(&mut self, axis: Axis) -> &mut Grid2 {
        match axis {
            Axis::X => &mut self.u,
            Axis::Y => &mut self.v,
        }
    }

    /// Largest face speed along either axis.
    pub fn max_abs(&self) -> f64 {
        self.u.max_abs().max(self.v.max_abs())
    }

    /// Copy both components from `src`.
    pub fn copy_from(&mut self, src: &MacVelocity) {
        self.u.copy_from(&src.u);
        self.v.copy_from(&src.v);
    }
}
