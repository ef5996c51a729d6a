//! Smoke: 2D advection of a MAC-grid velocity field and a density field.
//!
//! This is the facade crate that re-exports the public API of the smoke
//! sub-crates. For most users, adding `smoke` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use smoke::prelude::*;
//!
//! let config = AdvectConfig::builder()
//!     .method(AdvectionMethod::MacCormack)
//!     .interpolation(Interpolation::MonotonicCubic)
//!     .build()
//!     .unwrap();
//! let mut advector = Advector::new(config);
//!
//! // 8x8 velocity cells, 16x16 density cells.
//! let mut velocity = MacVelocity::uniform(8, 1.0, 0.0);
//! let mut density = Grid2::zeros(16, 16);
//! density.set(4, 8, 1.0);
//!
//! let dt = cfl_max_dt(&velocity, 16, 0.5).unwrap();
//! advector.step(&mut velocity, &mut density, dt).unwrap();
//! assert!(density.get(4, 8) < 1.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `smoke-core` | `Grid2`, `MacVelocity`, `Resolution`, selectors, errors |
//! | [`advect`] | `smoke-advect` | samplers, kernels, schemes, integrators, `Advector` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Storage types, selectors and errors (`smoke-core`).
///
/// [`types::Grid2`] is the flat 2D storage every field uses;
/// [`types::MacVelocity`] pairs two of them into a staggered velocity.
pub use smoke_core as types;

/// Advection kernels and the timestep orchestrator (`smoke-advect`).
///
/// [`advect::Advector`] is the entry point; the submodules expose each
/// stage for callers composing their own step.
pub use smoke_advect as advect;

/// Common imports for typical smoke usage.
///
/// ```rust
/// use smoke::prelude::*;
/// ```
pub mod prelude {
    // Storage
    pub use smoke_core::{Grid2, MacVelocity, Resolution};

    // Selectors
    pub use smoke_core::{AdvectionMethod, Integrator, Interpolation};

    // Errors
    pub use smoke_core::AdvectError;

    // Orchestration
    pub use smoke_advect::{cfl_max_dt, AdvectConfig, Advector};
}
