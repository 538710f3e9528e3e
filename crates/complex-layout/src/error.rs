#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("layout dimension must be positive")]
    InvalidDimension,
    #[error("layout dimension {dimension} exceeds the supported maximum of {max}")]
    DimensionTooLarge { dimension: usize, max: usize },
    #[error("cell {cell} references vertex {vertex}, but the complex has {vertex_count} vertices")]
    VertexOutOfRange {
        cell: usize,
        vertex: usize,
        vertex_count: usize,
    },
    #[error("cell {cell} has {len} distinct vertices; at most {max} are supported")]
    CellTooLarge { cell: usize, len: usize, max: usize },
    #[error("radius must be finite and positive, got {0}")]
    InvalidRadius(f64),
    #[error("radius {radius} overflows the force constants of a {dimension}-dimensional layout of {vertex_count} vertices")]
    RadiusTooLarge {
        radius: f64,
        dimension: usize,
        vertex_count: usize,
    },
    #[error("attraction must be finite and non-negative, got {0}")]
    InvalidAttraction(f64),
    #[error("bounds have {lo} lower and {hi} upper values for a {expected}-dimensional layout")]
    BoundsDimensionMismatch { expected: usize, lo: usize, hi: usize },
    #[error("bounds on axis {axis} are invalid: lo={lo}, hi={hi}")]
    InvalidBounds { axis: usize, lo: f64, hi: f64 },
    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(f64),
    #[error("convergence threshold must be finite and non-negative, got {0}")]
    InvalidConvergenceThreshold(f64),
    #[error("epsilon must be finite and positive, got {0}")]
    InvalidEpsilon(f64),
    #[error("expected {expected} coordinates, got {actual}")]
    PositionsShapeMismatch { expected: usize, actual: usize },
    #[error("coordinate {index} is not finite")]
    NonFinitePosition { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
