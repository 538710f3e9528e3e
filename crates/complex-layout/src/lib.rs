#![forbid(unsafe_code)]

//! Headless force-directed layout for simplicial complexes.
//!
//! Every cell pulls its vertices towards a fixed distance from the cell centroid, nearby vertices
//! that share no cell push each other apart, and a damped integrator with a linear cooling
//! schedule settles the system. Topology preprocessing lives in `complex-topology`.
//!
//! ```no_run
//! use complex_layout::{Layout, LayoutOptions};
//!
//! let cells = vec![vec![0, 1], vec![1, 2], vec![2, 3]];
//! let mut layout = Layout::new(&cells, 2, LayoutOptions::default())?;
//! layout.solve();
//! let xy = layout.positions();
//! # let _ = xy;
//! # Ok::<(), complex_layout::Error>(())
//! ```

pub mod error;
mod force;
pub mod grid;
mod integrate;
mod layout;
pub mod model;
pub mod options;
mod rng;
pub mod state;

pub use complex_topology::{Cell, Star};
pub use error::{Error, Result};
pub use grid::SpatialGrid;
pub use integrate::DAMPING;
pub use layout::{Layout, Phase, SolveReport};
pub use model::{ComplexModel, MAX_CELL_SIZE, MAX_DIMENSION};
pub use options::{BoundingBox, ForceProfile, LayoutOptions, SolverOptions, Tolerances};
pub use state::SimulationState;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Headless entry point: builds a layout, runs [`Layout::solve`] and returns the row-major
/// positions.
pub fn layout(cells: &[Cell], dimension: usize, options: LayoutOptions) -> Result<Vec<f64>> {
    let mut l = Layout::new(cells, dimension, options)?;
    l.solve();
    Ok(l.positions().to_vec())
}
