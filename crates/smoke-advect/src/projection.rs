//! Transport velocity resampled onto each target field's sample locations.
//!
//! The MAC velocity stores one component per face. Advecting a field needs
//! both components at that field's own sample points, so these buffers hold
//! `(ux, uy)` pairs on x-faces, y-faces, cell centres, and concentration
//! cells. They live in scratch storage and are overwritten every stage.

use smoke_core::{Grid2, MacVelocity, Resolution};

use crate::interp::InterpolationKernel;
use crate::sampler::FieldSampler;

/// `(ux, uy)` pairs at every sample location the kernel advects.
#[derive(Clone, Debug)]
pub struct Projections {
    u_face: [Grid2; 2],
    v_face: [Grid2; 2],
    cell: [Grid2; 2],
    concentration: [Grid2; 2],
}

impl Projections {
    /// Zeroed buffers shaped for `res`.
    pub fn zeros(res: Resolution) -> Self {
        let pair = |(w, h): (usize, usize)| [Grid2::zeros(w, h), Grid2::zeros(w, h)];
        let n = res.velocity;
        Self {
            u_face: pair(res.u_dims()),
            v_face: pair(res.v_dims()),
            cell: pair((n, n)),
            concentration: pair(res.c_dims()),
        }
    }

    /// Velocity on x-faces, `(n+1) x n`.
    pub fn u_face(&self) -> &[Grid2; 2] {
        &self.u_face
    }

    /// Velocity on y-faces, `n x (n+1)`.
    pub fn v_face(&self) -> &[Grid2; 2] {
        &self.v_face
    }

    /// Velocity at velocity-cell centres, `n x n`.
    pub fn cell(&self) -> &[Grid2; 2] {
        &self.cell
    }

    /// Velocity at concentration cells, `cn x cn`.
    pub fn concentration(&self) -> &[Grid2; 2] {
        &self.concentration
    }

    /// Face-to-face: each face keeps its own component and averages the
    /// four neighbouring faces of the other.
    pub fn fill_faces(&mut self, sampler: &FieldSampler<'_>) {
        let vel = sampler.velocity();
        let [ux, uy] = &mut self.u_face;
        ux.copy_from(vel.u());
        uy.par_fill_with(|i, j| sampler.v_at_u_face(i as isize, j as isize));

        let [vx, vy] = &mut self.v_face;
        vx.par_fill_with(|i, j| sampler.u_at_v_face(i as isize, j as isize));
        vy.copy_from(vel.v());
    }

    /// Face-to-cell: average the two faces bounding each velocity cell.
    pub fn fill_cells(&mut self, velocity: &MacVelocity) {
        let (u, v) = (velocity.u(), velocity.v());
        let [cx, cy] = &mut self.cell;
        cx.par_fill_with(|i, j| 0.5 * u.get(i, j) + 0.5 * u.get(i + 1, j));
        cy.par_fill_with(|i, j| 0.5 * v.get(i, j) + 0.5 * v.get(i, j + 1));
    }

    /// Cell-to-concentration: resample the cell-centred velocity at
    /// concentration cell `(i, j)` mapped to `(i * n / cn, j * n / cn)`.
    ///
    /// [`fill_cells`](Self::fill_cells) must run first.
    pub fn fill_concentration(&mut self, kernel: &impl InterpolationKernel) {
        let n = self.cell[0].width();
        let cn = self.concentration[0].width();
        let scale = n as f64 / cn as f64;
        let cell = &self.cell;
        for (out, src) in self.concentration.iter_mut().zip(cell.iter()) {
            out.par_fill_with(|i, j| kernel.sample(src, i as f64 * scale, j as f64 * scale));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smoke_core::Interpolation;

    #[test]
    fn shapes_follow_resolution() {
        let p = Projections::zeros(Resolution::new(4, 6));
        assert_eq!(p.u_face()[1].dims(), (5, 4));
        assert_eq!(p.v_face()[0].dims(), (4, 5));
        assert_eq!(p.cell()[0].dims(), (4, 4));
        assert_eq!(p.concentration()[1].dims(), (6, 6));
    }

    #[test]
    fn uniform_velocity_projects_everywhere() {
        let res = Resolution::new(4, 7);
        let vel = MacVelocity::uniform(4, 0.75, -1.25);
        let c = Grid2::zeros(7, 7);
        let mut p = Projections::zeros(res);

        p.fill_faces(&FieldSampler::new(&vel, &c));
        p.fill_cells(&vel);
        p.fill_concentration(&Interpolation::Spline);

        for pair in [p.u_face(), p.v_face(), p.cell(), p.concentration()] {
            assert!(pair[0].as_slice().iter().all(|&v| (v - 0.75).abs() < 1e-12));
            assert!(pair[1].as_slice().iter().all(|&v| (v + 1.25).abs() < 1e-12));
        }
    }

    #[test]
    fn cell_centres_average_bounding_faces() {
        let u = Grid2::from_fn(3, 2, |i, _| i as f64);
        let v = Grid2::from_fn(2, 3, |_, j| 10.0 * j as f64);
        let vel = MacVelocity::from_components(u, v).unwrap();
        let mut p = Projections::zeros(Resolution::new(2, 2));
        p.fill_cells(&vel);
        assert_eq!(p.cell()[0].get(1, 0), 1.5);
        assert_eq!(p.cell()[1].get(0, 1), 15.0);
    }
}
