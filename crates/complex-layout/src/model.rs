use crate::error::{Error, Result};
use complex_topology::{Cell, Star};

/// Largest cell (in distinct vertices) accepted at construction. Every face of every cell takes
/// part in attraction, and a cell of `k` vertices has `2^k - 1` faces.
pub const MAX_CELL_SIZE: usize = 16;

/// Largest layout dimension accepted at construction. Every vertex is filed into `2^D` grid
/// buckets per step.
pub const MAX_DIMENSION: usize = 16;

/// Immutable topology a layout runs over: canonical faces, vertex count and per-vertex stars.
#[derive(Debug, Clone)]
pub struct ComplexModel {
    dimension: usize,
    vertex_count: usize,
    cells: Vec<Cell>,
    stars: Vec<Star>,
}

impl ComplexModel {
    /// Validates `raw` and derives the canonical face list and stars.
    ///
    /// `vertex_count` defaults to one past the largest referenced index.
    pub fn new(raw: &[Cell], dimension: usize, vertex_count: Option<usize>) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::InvalidDimension);
        }
        if dimension > MAX_DIMENSION {
            return Err(Error::DimensionTooLarge {
                dimension,
                max: MAX_DIMENSION,
            });
        }

        let vertex_count = vertex_count.unwrap_or_else(|| complex_topology::count_vertices(raw));
        for (cell_idx, cell) in raw.iter().enumerate() {
            if let Some(&vertex) = cell.iter().find(|&&v| v >= vertex_count) {
                return Err(Error::VertexOutOfRange {
                    cell: cell_idx,
                    vertex,
                    vertex_count,
                });
            }
            let len = complex_topology::normalize_cell(cell).len();
            if len > MAX_CELL_SIZE {
                return Err(Error::CellTooLarge {
                    cell: cell_idx,
                    len,
                    max: MAX_CELL_SIZE,
                });
            }
        }

        let cells = complex_topology::unique(complex_topology::normalize(
            &complex_topology::explode(raw),
        ));
        let stars = complex_topology::stars(&cells, vertex_count);

        tracing::debug!(
            vertices = vertex_count,
            input_cells = raw.len(),
            faces = cells.len(),
            dimension,
            "built complex model"
        );

        Ok(Self {
            dimension,
            vertex_count,
            cells,
            stars,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Canonical faces, ordered by size and then lexicographically.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn star(&self, v: usize) -> Option<&Star> {
        self.stars.get(v)
    }

    /// Whether `a` and `b` share a cell.
    pub fn connected(&self, a: usize, b: usize) -> bool {
        self.stars.get(a).is_some_and(|s| s.contains(b))
    }
}
