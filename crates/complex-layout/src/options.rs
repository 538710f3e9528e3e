use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutOptions {
    /// Vertex radius. Attraction rests at this distance from a cell centroid, and repulsion
    /// reaches out to twice this distance.
    pub radius: f64,
    /// Spring strength multiplier. The attraction constant is `attraction * radius`.
    pub attraction: f64,
    /// Optional clamp box. When set, initial positions are drawn inside it.
    pub bounds: Option<BoundingBox>,
    /// Explicit vertex count, for complexes with isolated trailing vertices that appear in no
    /// cell. Defaults to one past the largest index referenced by a cell.
    pub vertex_count: Option<usize>,
    /// Seed for initial placement, singularity jitter and `perturb`.
    pub random_seed: u64,
    pub profile: ForceProfile,
    pub solver: SolverOptions,
    pub tolerances: Tolerances,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            attraction: 1.0,
            bounds: None,
            vertex_count: None,
            random_seed: 0,
            profile: ForceProfile::default(),
            solver: SolverOptions::default(),
            tolerances: Tolerances::default(),
        }
    }
}

impl LayoutOptions {
    /// `dimension` must already be within [`crate::MAX_DIMENSION`].
    pub(crate) fn validate(&self, dimension: usize, vertex_count: usize) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::InvalidRadius(self.radius));
        }
        if !(self.attraction.is_finite() && self.attraction >= 0.0) {
            return Err(Error::InvalidAttraction(self.attraction));
        }
        // Repulsion scales with radius^D and unbounded placement spreads over N * radius.
        let power = i32::try_from(dimension).unwrap_or(i32::MAX);
        let spread = (vertex_count.max(1) as f64) * self.radius;
        if !(self.radius.powi(power).is_finite()
            && spread.is_finite()
            && (self.attraction * self.radius).is_finite())
        {
            return Err(Error::RadiusTooLarge {
                radius: self.radius,
                dimension,
                vertex_count,
            });
        }
        if let Some(b) = &self.bounds {
            b.validate(dimension)?;
        }
        self.solver.validate()?;
        self.tolerances.validate()
    }
}

/// Which force laws the simulation applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ForceProfile {
    /// Radius-scaled springs, temperature-annealed repulsion, and no repulsion between vertices
    /// that share a cell.
    #[default]
    Annealed,
    /// Unit springs and a fixed-strength repulsion between every nearby pair, connected or not.
    /// Temperature still decays but does not affect the forces.
    Simple,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverOptions {
    /// Time step used by `solve`.
    pub time_step: f64,
    /// `solve` stops once a step's largest force component falls below this value.
    pub convergence_threshold: f64,
    /// `solve` runs at most `iterations_per_vertex * vertex_count` steps.
    pub iterations_per_vertex: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            time_step: 0.1,
            convergence_threshold: 1e-2,
            iterations_per_vertex: 100,
        }
    }
}

impl SolverOptions {
    fn validate(&self) -> Result<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(Error::InvalidTimeStep(self.time_step));
        }
        if !(self.convergence_threshold.is_finite() && self.convergence_threshold >= 0.0) {
            return Err(Error::InvalidConvergenceThreshold(
                self.convergence_threshold,
            ));
        }
        Ok(())
    }
}

/// Numerical guards for distance-based divisions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tolerances {
    /// Distances at or below this are treated as coincident and resolved with random jitter.
    pub epsilon: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { epsilon: 1e-4 }
    }
}

impl Tolerances {
    fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(Error::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }
}

/// Per-axis `[lo, hi]` clamp for vertex positions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    pub lo: Vec<f64>,
    pub hi: Vec<f64>,
}

impl BoundingBox {
    pub fn new(lo: Vec<f64>, hi: Vec<f64>) -> Self {
        Self { lo, hi }
    }

    /// A box spanning `[lo, hi]` on every one of `dimension` axes.
    pub fn uniform(dimension: usize, lo: f64, hi: f64) -> Self {
        Self {
            lo: vec![lo; dimension],
            hi: vec![hi; dimension],
        }
    }

    pub fn contains(&self, point: &[f64]) -> bool {
        point
            .iter()
            .zip(self.lo.iter().zip(&self.hi))
            .all(|(&p, (&lo, &hi))| p >= lo && p <= hi)
    }

    pub(crate) fn clamp_axis(&self, axis: usize, value: f64) -> f64 {
        value.clamp(self.lo[axis], self.hi[axis])
    }

    fn validate(&self, dimension: usize) -> Result<()> {
        if self.lo.len() != dimension || self.hi.len() != dimension {
            return Err(Error::BoundsDimensionMismatch {
                expected: dimension,
                lo: self.lo.len(),
                hi: self.hi.len(),
            });
        }
        for (axis, (&lo, &hi)) in self.lo.iter().zip(&self.hi).enumerate() {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(Error::InvalidBounds { axis, lo, hi });
            }
        }
        Ok(())
    }
}
