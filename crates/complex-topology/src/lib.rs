#![forbid(unsafe_code)]

//! Topology helpers for simplicial complexes.
//!
//! A complex is given as a list of cells, each cell a list of vertex indices. The functions here
//! are pure and deterministic: they canonicalize cells, enumerate faces, count vertices and build
//! per-vertex stars. `complex-layout` consumes their output once, at construction.

pub mod cells;
pub mod star;

pub use cells::{compare_cells, count_vertices, explode, normalize, normalize_cell, unique};
pub use star::{Star, stars};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A cell: a set of vertex indices. Canonical cells are sorted and free of repeats.
pub type Cell = Vec<usize>;
