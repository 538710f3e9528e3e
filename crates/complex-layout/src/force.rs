//! Force accumulation: centroid springs per cell and grid-filtered pairwise repulsion.
//!
//! Both passes only add into `SimulationState::forces`; clearing happens in the integrator.

use crate::grid::SpatialGrid;
use crate::model::ComplexModel;
use crate::options::{ForceProfile, LayoutOptions};
use crate::rng::XorShift64Star;
use crate::state::SimulationState;

/// Strength of the fixed repulsion used by [`ForceProfile::Simple`].
const SIMPLE_REPULSION: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ForceParams {
    pub(crate) radius: f64,
    pub(crate) attraction: f64,
    pub(crate) profile: ForceProfile,
    pub(crate) epsilon: f64,
}

impl ForceParams {
    pub(crate) fn from_options(opts: &LayoutOptions) -> Self {
        Self {
            radius: opts.radius,
            attraction: opts.attraction,
            profile: opts.profile,
            epsilon: opts.tolerances.epsilon,
        }
    }

    /// Side of the repulsion lattice, and twice the repulsion midpoint.
    pub(crate) fn repel_radius(&self) -> f64 {
        2.0 * self.radius
    }

    fn k_attract(&self) -> f64 {
        match self.profile {
            ForceProfile::Annealed => self.attraction * self.radius,
            ForceProfile::Simple => 1.0,
        }
    }

    /// Repulsion magnitude per unit displacement at distance `ds`.
    fn repulsion_scale(&self, ds: f64, temperature: f64, dimension: usize) -> f64 {
        let half = 0.5 * self.repel_radius();
        match self.profile {
            ForceProfile::Annealed => {
                let d = dimension as f64;
                let k = temperature * self.radius.powi(dimension as i32)
                    + self.radius.powf(1.0 / d);
                let sharpness = 4.0 - 3.0 * temperature;
                k / (ds * (1.0 + (sharpness * (ds - half)).exp()))
            }
            ForceProfile::Simple => SIMPLE_REPULSION / (ds * (1.0 + (ds - half).exp())),
        }
    }

    /// Whether pairs that share a cell are exempt from repulsion.
    fn excludes_star(&self) -> bool {
        matches!(self.profile, ForceProfile::Annealed)
    }

    fn jitter(&self, rng: &mut XorShift64Star) -> f64 {
        0.5 * self.radius * rng.next_f64_signed()
    }
}

/// Pulls each member of every cell towards a distance of `radius` from the cell centroid.
///
/// The spring is logarithmic: `k * ln(ds / radius)` along the centroid direction.
pub(crate) fn accumulate_attraction(
    model: &ComplexModel,
    state: &mut SimulationState,
    params: &ForceParams,
    rng: &mut XorShift64Star,
) {
    let d = state.dimension;
    let k = params.k_attract();
    let log_r = params.radius.ln();
    let mut centroid = vec![0.0; d];
    let mut dir = vec![0.0; d];

    for cell in model.cells() {
        if cell.len() <= 1 {
            continue;
        }

        centroid.fill(0.0);
        for &v in cell {
            let p = &state.positions[v * d..(v + 1) * d];
            for (c, &x) in centroid.iter_mut().zip(p) {
                *c += x;
            }
        }
        let w = 1.0 / (cell.len() as f64);
        for c in &mut centroid {
            *c *= w;
        }

        for &v in cell {
            let p = &state.positions[v * d..(v + 1) * d];
            let mut len_sq = 0.0;
            for ((out, &c), &x) in dir.iter_mut().zip(&centroid).zip(p) {
                *out = c - x;
                len_sq += *out * *out;
            }
            let ds = len_sq.sqrt();

            let f = &mut state.forces[v * d..(v + 1) * d];
            if ds > params.epsilon {
                let m = k * (ds.ln() - log_r) / ds;
                for (fj, &dj) in f.iter_mut().zip(&dir) {
                    let fd = m * dj;
                    if fd.is_finite() {
                        *fj += fd;
                    }
                }
            } else {
                for fj in f.iter_mut() {
                    *fj += params.jitter(rng);
                }
            }
        }
    }
}

/// Pushes apart every pair the grid reports, skipping pairs that share a cell when the profile
/// asks for it. Coincident pairs get equal and opposite random kicks instead.
pub(crate) fn accumulate_repulsion(
    model: &ComplexModel,
    grid: &SpatialGrid,
    state: &mut SimulationState,
    params: &ForceParams,
    rng: &mut XorShift64Star,
) {
    let d = state.dimension;
    let temperature = state.temperature;
    let skip_star = params.excludes_star();
    let positions = &state.positions;
    let forces = &mut state.forces;
    let mut dir = vec![0.0; d];

    grid.for_each_pair(|a, b| {
        if skip_star && model.connected(a, b) {
            return;
        }

        let pa = &positions[a * d..(a + 1) * d];
        let pb = &positions[b * d..(b + 1) * d];
        let mut len_sq = 0.0;
        for ((out, &x), &y) in dir.iter_mut().zip(pa).zip(pb) {
            *out = x - y;
            len_sq += *out * *out;
        }
        let ds = len_sq.sqrt();

        if ds < params.epsilon {
            for axis in 0..d {
                let j = params.jitter(rng);
                forces[a * d + axis] += j;
                forces[b * d + axis] -= j;
            }
            return;
        }

        let m = params.repulsion_scale(ds, temperature, d);
        if !m.is_finite() {
            return;
        }
        for (axis, &dj) in dir.iter().enumerate() {
            let f = m * dj;
            if f.is_finite() {
                forces[a * d + axis] += f;
                forces[b * d + axis] -= f;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(profile: ForceProfile) -> ForceParams {
        ForceParams {
            radius: 1.0,
            attraction: 1.0,
            profile,
            epsilon: 1e-4,
        }
    }

    fn state_with(positions: Vec<f64>, dimension: usize) -> SimulationState {
        let len = positions.len();
        SimulationState {
            dimension,
            positions,
            velocities: vec![0.0; len],
            forces: vec![0.0; len],
            temperature: 1.0,
            bounds: None,
        }
    }

    #[test]
    fn attraction_vanishes_at_rest_length() {
        let model = ComplexModel::new(&[vec![0, 1]], 1, None).unwrap();
        // Centroid at 0, each vertex exactly `radius` away from it.
        let mut state = state_with(vec![-1.0, 1.0], 1);
        let mut rng = XorShift64Star::new(0);
        accumulate_attraction(&model, &mut state, &params(ForceProfile::Annealed), &mut rng);
        assert!(state.forces.iter().all(|f| f.abs() < 1e-12));
    }

    #[test]
    fn attraction_pulls_far_vertices_inward_and_pushes_near_ones_out() {
        let model = ComplexModel::new(&[vec![0, 1]], 1, None).unwrap();
        let mut rng = XorShift64Star::new(0);

        let mut far = state_with(vec![-3.0, 3.0], 1);
        accumulate_attraction(&model, &mut far, &params(ForceProfile::Annealed), &mut rng);
        assert!(far.forces[0] > 0.0 && far.forces[1] < 0.0);
        assert!((far.forces[0] - 3.0f64.ln()).abs() < 1e-12);

        let mut near = state_with(vec![-0.25, 0.25], 1);
        accumulate_attraction(&model, &mut near, &params(ForceProfile::Annealed), &mut rng);
        assert!(near.forces[0] < 0.0 && near.forces[1] > 0.0);
    }

    #[test]
    fn coincident_cell_members_get_finite_jitter() {
        let model = ComplexModel::new(&[vec![0, 1]], 2, None).unwrap();
        let mut state = state_with(vec![1.0, 1.0, 1.0, 1.0], 2);
        let mut rng = XorShift64Star::new(5);
        accumulate_attraction(&model, &mut state, &params(ForceProfile::Annealed), &mut rng);
        assert!(state.forces.iter().all(|f| f.is_finite() && f.abs() <= 0.5));
        assert!(state.forces.iter().any(|&f| f != 0.0));
    }

    #[test]
    fn repulsion_is_equal_and_opposite() {
        let model = ComplexModel::new(&[vec![0], vec![1]], 2, None).unwrap();
        let mut state = state_with(vec![0.0, 0.0, 0.5, 0.2], 2);
        let p = params(ForceProfile::Annealed);
        let grid = SpatialGrid::build(&state.positions, 2, p.repel_radius());
        let mut rng = XorShift64Star::new(0);
        accumulate_repulsion(&model, &grid, &mut state, &p, &mut rng);

        assert!(state.forces[0] < 0.0 && state.forces[2] > 0.0);
        assert!((state.forces[0] + state.forces[2]).abs() < 1e-12);
        assert!((state.forces[1] + state.forces[3]).abs() < 1e-12);
    }

    #[test]
    fn connected_vertices_do_not_repel_in_annealed_profile() {
        let model = ComplexModel::new(&[vec![0, 1]], 2, None).unwrap();
        let mut state = state_with(vec![0.0, 0.0, 0.5, 0.2], 2);
        let p = params(ForceProfile::Annealed);
        let grid = SpatialGrid::build(&state.positions, 2, p.repel_radius());
        let mut rng = XorShift64Star::new(0);
        accumulate_repulsion(&model, &grid, &mut state, &p, &mut rng);
        assert!(state.forces.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn connected_vertices_repel_in_simple_profile() {
        let model = ComplexModel::new(&[vec![0, 1]], 2, None).unwrap();
        let mut state = state_with(vec![0.0, 0.0, 0.5, 0.2], 2);
        let p = params(ForceProfile::Simple);
        let grid = SpatialGrid::build(&state.positions, 2, p.repel_radius());
        let mut rng = XorShift64Star::new(0);
        accumulate_repulsion(&model, &grid, &mut state, &p, &mut rng);
        assert!(state.forces[0] < 0.0);
    }

    #[test]
    fn repulsion_weakens_with_distance_and_cooling() {
        let p = params(ForceProfile::Annealed);
        let near = p.repulsion_scale(0.5, 0.0, 2) * 0.5;
        let far = p.repulsion_scale(3.0, 0.0, 2) * 3.0;
        assert!(near > far);
        assert!(far < 0.01);

        let hot = p.repulsion_scale(0.5, 1.0, 2);
        let cold = p.repulsion_scale(0.5, 0.0, 2);
        assert!(hot > cold);
    }
}
