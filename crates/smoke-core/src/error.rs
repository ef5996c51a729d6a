//! Error type for the advection kernel.
//!
//! The numerical path itself never fails. Errors surface only at the edges:
//! shape validation before a step, selector parsing, configuration, and the
//! opt-in non-finite sentinel.

use std::error::Error;
use std::fmt;

/// Errors reported by configuration, selector parsing, and the
/// orchestrator's `step()` in `smoke-advect`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvectError {
    /// A field's dimensions disagree with the resolution it must have.
    ShapeMismatch {
        /// Which field was malformed (`"velocity.u"`, `"velocity.v"`, `"concentration"`).
        field: &'static str,
        /// Expected `(width, height)`.
        expected: (usize, usize),
        /// Actual `(width, height)`.
        actual: (usize, usize),
    },
    /// Velocity or concentration resolution is zero.
    EmptyResolution,
    /// A selector name or index did not match any variant.
    UnknownSelector {
        /// Selector family (`"method"`, `"interpolation"`, `"integrator"`).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
    /// A configuration value is out of range.
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// A non-finite value was found after a step (only when `check_finite` is on).
    NanDetected {
        /// The field containing the value.
        field: &'static str,
        /// Flat index of the first non-finite cell, if known.
        cell_index: Option<usize>,
    },
}

impl fmt::Display for AdvectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "field '{field}' has shape {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::EmptyResolution => write!(f, "resolution must be at least 1"),
            Self::UnknownSelector { kind, value } => {
                write!(f, "unknown {kind} selector '{value}'")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
            Self::NanDetected { field, cell_index } => {
                write!(f, "non-finite value in field '{field}'")?;
                if let Some(idx) = cell_index {
                    write!(f, " at cell {idx}")?;
                }
                Ok(())
            }
        }
    }
}

impl Error for AdvectError {}
