//! Core types for the smoke advection kernel.
//!
//! This is the leaf crate of the workspace. It defines the storage types the
//! kernel reads and writes ([`Grid2`], [`MacVelocity`]), the [`Resolution`]
//! key used to pool scratch storage, the method/kernel/integrator selectors,
//! and the shared [`AdvectError`] type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod mac;
pub mod method;

pub use error::AdvectError;
pub use grid::Grid2;
pub use mac::{Axis, MacVelocity, Resolution};
pub use method::{AdvectionMethod, Integrator, Interpolation, MethodFamily};
