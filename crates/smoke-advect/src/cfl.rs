//! Advisory timestep bound.

use smoke_core::MacVelocity;

/// Largest `dt` that keeps the Courant number at or below `courant` on the
/// finer of the two grids.
///
/// Returns `None` for a still fluid, which imposes no constraint. The
/// advector never applies this itself.
///
/// ```
/// use smoke_advect::cfl_max_dt;
/// use smoke_core::MacVelocity;
///
/// let v = MacVelocity::uniform(8, 2.0, -1.0);
/// assert_eq!(cfl_max_dt(&v, 16, 1.0), Some(1.0 / 32.0));
/// assert_eq!(cfl_max_dt(&MacVelocity::zeros(8), 16, 1.0), None);
/// ```
pub fn cfl_max_dt(
    velocity: &MacVelocity,
    concentration_resolution: usize,
    courant: f64,
) -> Option<f64> {
    let speed = velocity.max_abs();
    let res = velocity.resolution().max(concentration_resolution) as f64;
    if speed > 0.0 && res > 0.0 {
        Some(courant / (speed * res))
    } else {
        None
    }
}
