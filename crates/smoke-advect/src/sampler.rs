//! Boundary-aware sample fetches against the active fields.
//!
//! [`FieldSampler`] is the explicit simulation context handed to every
//! scheme and projection call: it borrows the velocity and concentration
//! being read for the current stage and nothing else.

use smoke_core::{Axis, Grid2, MacVelocity};

use crate::scheme::{Stencil, STENCIL_RADIUS};

/// Read-only view of the fields a stage evaluates against.
///
/// Velocity reads clamp to the nearest face (walls); concentration reads
/// outside the grid return exactly 0 (open domain).
#[derive(Clone, Copy, Debug)]
pub struct FieldSampler<'a> {
    velocity: &'a MacVelocity,
    concentration: &'a Grid2,
}

impl<'a> FieldSampler<'a> {
    /// Borrow the fields for one stage.
    pub fn new(velocity: &'a MacVelocity, concentration: &'a Grid2) -> Self {
        Self {
            velocity,
            concentration,
        }
    }

    /// The active velocity field.
    pub fn velocity(&self) -> &'a MacVelocity {
        self.velocity
    }

    /// The active concentration field.
    pub fn concentration(&self) -> &'a Grid2 {
        self.concentration
    }

    /// Velocity resolution `n`.
    pub fn n(&self) -> usize {
        self.velocity.resolution()
    }

    /// Concentration resolution `cn`.
    pub fn cn(&self) -> usize {
        self.concentration.width()
    }

    /// Velocity component `axis` at face `(i, j)`, clamped into range.
    ///
    /// `Axis::X` clamps to `[0, n] x [0, n-1]`, `Axis::Y` to `[0, n-1] x [0, n]`.
    #[inline]
    pub fn u_ref(&self, axis: Axis, i: isize, j: isize) -> f64 {
        let n = self.velocity.resolution() as isize;
        match axis {
            Axis::X => self
                .velocity
                .u()
                .get(i.clamp(0, n) as usize, j.clamp(0, n - 1) as usize),
            Axis::Y => self
                .velocity
                .v()
                .get(i.clamp(0, n - 1) as usize, j.clamp(0, n) as usize),
        }
    }

    /// Concentration at cell `(i, j)`, or 0 outside `[0, cn-1]^2`.
    #[inline]
    pub fn c_ref(&self, i: isize, j: isize) -> f64 {
        let cn = self.cn() as isize;
        if i < 0 || j < 0 || i >= cn || j >= cn {
            0.0
        } else {
            self.concentration.get(i as usize, j as usize)
        }
    }

    /// Seven samples of velocity component `component` around `(i, j)` along `along`.
    #[inline]
    pub fn u_stencil(&self, component: Axis, i: isize, j: isize, along: Axis) -> Stencil {
        std::array::from_fn(|k| {
            let o = k as isize - STENCIL_RADIUS as isize;
            match along {
                Axis::X => self.u_ref(component, i + o, j),
                Axis::Y => self.u_ref(component, i, j + o),
            }
        })
    }

    /// Seven concentration samples around `(i, j)` along `along`.
    #[inline]
    pub fn c_stencil(&self, i: isize, j: isize, along: Axis) -> Stencil {
        std::array::from_fn(|k| {
            let o = k as isize - STENCIL_RADIUS as isize;
            match along {
                Axis::X => self.c_ref(i + o, j),
                Axis::Y => self.c_ref(i, j + o),
            }
        })
    }

    /// y-velocity averaged onto x-face `(i, j)` from its four neighbouring y-faces.
    #[inline]
    pub fn v_at_u_face(&self, i: isize, j: isize) -> f64 {
        (self.u_ref(Axis::Y, i - 1, j)
            + self.u_ref(Axis::Y, i, j)
            + self.u_ref(Axis::Y, i - 1, j + 1)
            + self.u_ref(Axis::Y, i, j + 1))
            / 4.0
    }

    /// x-velocity averaged onto y-face `(i, j)` from its four neighbouring x-faces.
    #[inline]
    pub fn u_at_v_face(&self, i: isize, j: isize) -> f64 {
        (self.u_ref(Axis::X, i, j - 1)
            + self.u_ref(Axis::X, i, j)
            + self.u_ref(Axis::X, i + 1, j)
            + self.u_ref(Axis::X, i + 1, j - 1))
            / 4.0
    }
}
