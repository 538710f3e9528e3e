use crate::error::Result;
use crate::force::{self, ForceParams};
use crate::grid::SpatialGrid;
use crate::integrate;
use crate::model::ComplexModel;
use crate::options::{BoundingBox, LayoutOptions, SolverOptions};
use crate::rng::XorShift64Star;
use crate::state::SimulationState;
use complex_topology::{Cell, Star};
use std::time::{Duration, Instant};

/// Whether repulsion is still annealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Temperature above zero: repulsion is stronger and softer.
    Cooling,
    /// Temperature at zero. Only [`Layout::perturb`] leaves this phase.
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    pub iterations: usize,
    pub converged: bool,
    /// Convergence metric of the last step taken.
    pub max_force: f64,
}

#[derive(Debug, Default, Clone)]
struct StepTimings {
    attraction: Duration,
    grid: Duration,
    repulsion: Duration,
    integrate: Duration,
}

/// A force-directed layout of one simplicial complex.
///
/// Owns its topology, simulation state and random generator; independent layouts share nothing.
#[derive(Debug, Clone)]
pub struct Layout {
    model: ComplexModel,
    state: SimulationState,
    grid: SpatialGrid,
    params: ForceParams,
    solver: SolverOptions,
    rng: XorShift64Star,
}

impl Layout {
    /// Builds the topology from `cells` and places every vertex at random.
    pub fn new(cells: &[Cell], dimension: usize, options: LayoutOptions) -> Result<Self> {
        let model = ComplexModel::new(cells, dimension, options.vertex_count)?;
        options.validate(dimension, model.vertex_count())?;

        let params = ForceParams::from_options(&options);
        let mut rng = XorShift64Star::new(options.random_seed);
        let state = SimulationState::random(
            model.vertex_count(),
            dimension,
            options.radius,
            options.bounds,
            &mut rng,
        );
        let grid = SpatialGrid::new(dimension, params.repel_radius());

        Ok(Self {
            model,
            state,
            grid,
            params,
            solver: options.solver,
            rng,
        })
    }

    /// Advances the simulation by `dt` and returns the largest force component applied.
    ///
    /// A non-finite or non-positive `dt` leaves the state untouched and returns `0.0`.
    pub fn step(&mut self, dt: f64) -> f64 {
        self.step_inner(dt, None)
    }

    fn step_inner(&mut self, dt: f64, mut timings: Option<&mut StepTimings>) -> f64 {
        if !(dt.is_finite() && dt > 0.0) {
            return 0.0;
        }
        let timing_enabled = timings.is_some();

        let attraction_start = timing_enabled.then(Instant::now);
        force::accumulate_attraction(&self.model, &mut self.state, &self.params, &mut self.rng);
        if let (Some(t), Some(s)) = (timings.as_deref_mut(), attraction_start) {
            t.attraction += s.elapsed();
        }

        let grid_start = timing_enabled.then(Instant::now);
        self.grid.rebuild(&self.state.positions);
        if let (Some(t), Some(s)) = (timings.as_deref_mut(), grid_start) {
            t.grid += s.elapsed();
        }

        let repulsion_start = timing_enabled.then(Instant::now);
        force::accumulate_repulsion(
            &self.model,
            &self.grid,
            &mut self.state,
            &self.params,
            &mut self.rng,
        );
        if let (Some(t), Some(s)) = (timings.as_deref_mut(), repulsion_start) {
            t.repulsion += s.elapsed();
        }

        let integrate_start = timing_enabled.then(Instant::now);
        let max_force = integrate::integrate(&mut self.state, dt);
        integrate::anneal(&mut self.state, dt, self.model.vertex_count());
        if let (Some(t), Some(s)) = (timings.as_deref_mut(), integrate_start) {
            t.integrate += s.elapsed();
        }

        tracing::trace!(max_force, temperature = self.state.temperature, "layout step");
        max_force
    }

    /// Steps with the configured time step until the largest force drops below the convergence
    /// threshold, or `iterations_per_vertex * vertex_count` steps have run.
    pub fn solve(&mut self) -> SolveReport {
        let timing_enabled = std::env::var("COMPLEX_LAYOUT_TIMING").ok().as_deref() == Some("1");
        let mut timings = StepTimings::default();
        let total_start = timing_enabled.then(Instant::now);

        let n = self.model.vertex_count();
        let budget = self.solver.iterations_per_vertex.saturating_mul(n);
        let mut report = SolveReport {
            iterations: 0,
            converged: n == 0,
            max_force: 0.0,
        };

        for _ in 0..budget {
            let max_force = self.step_inner(
                self.solver.time_step,
                if timing_enabled {
                    Some(&mut timings)
                } else {
                    None
                },
            );
            report.iterations += 1;
            report.max_force = max_force;
            if max_force < self.solver.convergence_threshold {
                report.converged = true;
                break;
            }
        }

        if !report.converged {
            tracing::debug!(
                budget,
                max_force = report.max_force,
                "layout hit its iteration budget"
            );
        }
        tracing::debug!(
            vertices = n,
            iterations = report.iterations,
            converged = report.converged,
            max_force = report.max_force,
            temperature = self.state.temperature,
            "layout solved"
        );
        if let Some(s) = total_start {
            tracing::debug!(
                total = ?s.elapsed(),
                attraction = ?timings.attraction,
                grid = ?timings.grid,
                repulsion = ?timings.repulsion,
                integrate = ?timings.integrate,
                "layout timing"
            );
        }

        report
    }

    /// Reheats to temperature `1.0` and shifts every vertex by up to `radius` per axis.
    pub fn perturb(&mut self) {
        self.state.temperature = 1.0;
        let r = self.params.radius;
        for p in &mut self.state.positions {
            *p += r * self.rng.next_f64_signed();
        }
        self.state.clamp_to_bounds();
    }

    /// Row-major `vertex_count x dimension` coordinates.
    pub fn positions(&self) -> &[f64] {
        self.state.positions()
    }

    pub fn position(&self, v: usize) -> Option<&[f64]> {
        self.state.position(v)
    }

    /// Replaces the current positions (row-major), clamped into bounds when configured.
    pub fn set_positions(&mut self, positions: &[f64]) -> Result<()> {
        self.state.set_positions(positions)
    }

    pub fn distance(&self, a: usize, b: usize) -> Option<f64> {
        self.state.distance(a, b)
    }

    pub fn temperature(&self) -> f64 {
        self.state.temperature()
    }

    pub fn phase(&self) -> Phase {
        if self.state.temperature() > 0.0 {
            Phase::Cooling
        } else {
            Phase::Settled
        }
    }

    pub fn is_settled(&self) -> bool {
        self.phase() == Phase::Settled
    }

    pub fn dimension(&self) -> usize {
        self.model.dimension()
    }

    pub fn vertex_count(&self) -> usize {
        self.model.vertex_count()
    }

    pub fn radius(&self) -> f64 {
        self.params.radius
    }

    pub fn bounds(&self) -> Option<&BoundingBox> {
        self.state.bounds()
    }

    pub fn cells(&self) -> &[Cell] {
        self.model.cells()
    }

    pub fn star(&self, v: usize) -> Option<&Star> {
        self.model.star(v)
    }

    pub fn model(&self) -> &ComplexModel {
        &self.model
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Iteration budget of [`Layout::solve`].
    pub fn iteration_budget(&self) -> usize {
        self.solver
            .iterations_per_vertex
            .saturating_mul(self.model.vertex_count())
    }
}
