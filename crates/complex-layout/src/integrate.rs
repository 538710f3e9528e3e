use crate::state::SimulationState;

/// Fraction of velocity kept after each step.
pub const DAMPING: f64 = 0.9;

/// Semi-implicit Euler step with damping and bounds clamping.
///
/// Returns the largest absolute force component seen, read before forces are cleared.
/// An update that would leave a coordinate non-finite is dropped and that velocity reset.
pub(crate) fn integrate(state: &mut SimulationState, dt: f64) -> f64 {
    let mut max_force = 0.0f64;
    for ((p, v), f) in state
        .positions
        .iter_mut()
        .zip(state.velocities.iter_mut())
        .zip(state.forces.iter_mut())
    {
        if f.is_finite() {
            max_force = max_force.max(f.abs());
            *v += *f * dt;
        }
        *v *= DAMPING;
        let next = *p + *v * dt;
        if v.is_finite() && next.is_finite() {
            *p = next;
        } else {
            *v = 0.0;
        }
        *f = 0.0;
    }
    state.clamp_to_bounds();
    max_force
}

/// Linear cooling: `dt / vertex_count` per step, floored at zero.
pub(crate) fn anneal(state: &mut SimulationState, dt: f64, vertex_count: usize) {
    if vertex_count == 0 {
        return;
    }
    state.temperature = (state.temperature - dt / (vertex_count as f64)).max(0.0);
}
