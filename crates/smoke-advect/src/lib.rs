//! Advection of a MAC-grid velocity field and an independently resolved
//! concentration field.
//!
//! One call to [`Advector::step`] moves both fields forward by `dt` using one
//! of five spatial methods:
//!
//! | Method | Family | Module |
//! |--------|--------|--------|
//! | Upwind, WENO5, QUICK | derivative, integrated in time | [`eulerian`], [`integrator`] |
//! | Semi-Lagrangian, MacCormack | full step, integrator bypassed | [`semi_lagrangian`] |
//!
//! Lower layers are public for callers that want to drive a single stage:
//! [`sampler`] handles boundary reads, [`scheme`] the 1D derivative
//! operators, [`interp`] the fractional-coordinate kernels, and [`projection`]
//! the staggered-to-collocated velocity resampling.
//!
//! No CFL limit is enforced; [`cfl_max_dt`] gives an advisory bound.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod advector;
pub mod cfl;
pub mod config;
pub mod eulerian;
pub mod integrator;
pub mod interp;
pub mod projection;
pub mod sampler;
pub mod scheme;
pub mod scratch;
pub mod semi_lagrangian;

pub use advector::Advector;
pub use cfl::cfl_max_dt;
pub use config::{AdvectConfig, AdvectConfigBuilder};
pub use integrator::{Tableau, CONCENTRATION_STAGE_BLEND};
pub use interp::InterpolationKernel;
pub use projection::Projections;
pub use sampler::FieldSampler;
pub use scratch::{ScratchPool, ScratchSet, StageFields};
