//! Method, interpolation, and integrator selectors.
//!
//! Each selector is a plain enum dispatched per call. Names and integer
//! indices match the order front ends present them in, so a UI can cycle
//! through `ALL` or parse a stored choice back with [`FromStr`] /
//! [`TryFrom<u32>`].

use std::fmt;
use std::str::FromStr;

use crate::error::AdvectError;

/// What one evaluation of an advection method produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodFamily {
    /// A time-derivative field, blended by a time integrator.
    Derivative,
    /// The fully advanced field for the whole timestep; integrators are bypassed.
    FullStep,
}

/// Spatial discretization scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AdvectionMethod {
    /// First-order upwind differencing.
    Upwind,
    /// Fifth-order WENO reconstruction.
    Weno5,
    /// Third-order QUICK.
    Quick,
    /// First-order backward trace.
    #[default]
    SemiLagrangian,
    /// Second-order backward/forward trace with neighbourhood clamp.
    MacCormack,
}

impl AdvectionMethod {
    /// Every method in selector order.
    pub const ALL: [AdvectionMethod; 5] = [
        Self::Upwind,
        Self::Weno5,
        Self::Quick,
        Self::SemiLagrangian,
        Self::MacCormack,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Upwind => "Upwind",
            Self::Weno5 => "WENO5",
            Self::Quick => "QUICK",
            Self::SemiLagrangian => "Semi-Lagrangian",
            Self::MacCormack => "MacCormack",
        }
    }

    /// Whether this method yields a derivative or a full-step result.
    pub fn family(self) -> MethodFamily {
        match self {
            Self::Upwind | Self::Weno5 | Self::Quick => MethodFamily::Derivative,
            Self::SemiLagrangian | Self::MacCormack => MethodFamily::FullStep,
        }
    }

    fn ident(self) -> &'static str {
        match self {
            Self::Upwind => "Upwind",
            Self::Weno5 => "Weno5",
            Self::Quick => "Quick",
            Self::SemiLagrangian => "SemiLagrangian",
            Self::MacCormack => "MacCormack",
        }
    }
}

/// Scalar interpolation kernel for fractional grid coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// Bilinear.
    #[default]
    Linear,
    /// Natural cubic spline clamped to the central samples.
    Spline,
    /// Slope-limited Hermite cubic.
    MonotonicCubic,
}

impl Interpolation {
    /// Every kernel in selector order.
    pub const ALL: [Interpolation; 3] = [Self::Linear, Self::Spline, Self::MonotonicCubic];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Spline => "Clamped Cubic Spline",
            Self::MonotonicCubic => "Monotonic Cubic",
        }
    }

    fn ident(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Spline => "Spline",
            Self::MonotonicCubic => "MonotonicCubic",
        }
    }
}

/// Explicit time integrator for derivative-producing methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Integrator {
    /// One stage.
    #[default]
    ForwardEuler,
    /// Two-stage Heun.
    ModifiedEuler,
    /// Classical four-stage Runge-Kutta.
    Rk4,
}

impl Integrator {
    /// Every integrator in selector order.
    pub const ALL: [Integrator; 3] = [Self::ForwardEuler, Self::ModifiedEuler, Self::Rk4];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::ForwardEuler => "1st Order Euler",
            Self::ModifiedEuler => "2nd Order Modified Euler",
            Self::Rk4 => "4th Order Runge-Kutta",
        }
    }

    /// Number of derivative evaluations per step.
    pub fn stages(self) -> usize {
        match self {
            Self::ForwardEuler => 1,
            Self::ModifiedEuler => 2,
            Self::Rk4 => 4,
        }
    }

    fn ident(self) -> &'static str {
        match self {
            Self::ForwardEuler => "ForwardEuler",
            Self::ModifiedEuler => "ModifiedEuler",
            Self::Rk4 => "Rk4",
        }
    }
}

/// Case-insensitive lookup by display name or variant identifier.
fn parse_by_name<T: Copy>(
    all: &[T],
    kind: &'static str,
    input: &str,
    name: impl Fn(T) -> &'static str,
    ident: impl Fn(T) -> &'static str,
) -> Result<T, AdvectError> {
    let needle = input.trim();
    all.iter()
        .copied()
        .find(|&v| name(v).eq_ignore_ascii_case(needle) || ident(v).eq_ignore_ascii_case(needle))
        .ok_or_else(|| AdvectError::UnknownSelector {
            kind,
            value: input.to_string(),
        })
}

fn by_index<T: Copy>(all: &[T], kind: &'static str, idx: u32) -> Result<T, AdvectError> {
    all.get(idx as usize)
        .copied()
        .ok_or_else(|| AdvectError::UnknownSelector {
            kind,
            value: idx.to_string(),
        })
}

macro_rules! selector_impls {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = AdvectError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_by_name(&<$ty>::ALL, $kind, s, <$ty>::name, <$ty>::ident)
            }
        }

        impl TryFrom<u32> for $ty {
            type Error = AdvectError;

            fn try_from(idx: u32) -> Result<Self, Self::Error> {
                by_index(&<$ty>::ALL, $kind, idx)
            }
        }
    };
}

selector_impls!(AdvectionMethod, "method");
selector_impls!(Interpolation, "interpolation");
selector_impls!(Integrator, "integrator");
