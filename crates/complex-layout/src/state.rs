use crate::error::{Error, Result};
use crate::options::BoundingBox;
use crate::rng::XorShift64Star;

/// Mutable per-vertex simulation arrays, stored row-major as `vertex_count x dimension`.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub(crate) dimension: usize,
    pub(crate) positions: Vec<f64>,
    pub(crate) velocities: Vec<f64>,
    pub(crate) forces: Vec<f64>,
    pub(crate) temperature: f64,
    pub(crate) bounds: Option<BoundingBox>,
}

impl SimulationState {
    /// Places vertices uniformly at random: inside `bounds` when given, otherwise in a cube of
    /// side `vertex_count * radius` centred on the origin.
    pub(crate) fn random(
        vertex_count: usize,
        dimension: usize,
        radius: f64,
        bounds: Option<BoundingBox>,
        rng: &mut XorShift64Star,
    ) -> Self {
        let len = vertex_count * dimension;
        let mut positions = Vec::with_capacity(len);
        let spread = (vertex_count as f64) * radius;
        for _ in 0..vertex_count {
            for axis in 0..dimension {
                let u = rng.next_f64_unit();
                let p = match &bounds {
                    Some(b) => b.clamp_axis(axis, b.lo[axis] + u * (b.hi[axis] - b.lo[axis])),
                    None => (u - 0.5) * spread,
                };
                positions.push(p);
            }
        }

        Self {
            dimension,
            positions,
            velocities: vec![0.0; len],
            forces: vec![0.0; len],
            temperature: 1.0,
            bounds,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len().checked_div(self.dimension).unwrap_or(0)
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn velocities(&self) -> &[f64] {
        &self.velocities
    }

    pub fn position(&self, v: usize) -> Option<&[f64]> {
        let start = v.checked_mul(self.dimension)?;
        self.positions.get(start..start + self.dimension)
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn bounds(&self) -> Option<&BoundingBox> {
        self.bounds.as_ref()
    }

    /// Replaces every position, clamping into the bounding box when one is configured.
    pub(crate) fn set_positions(&mut self, positions: &[f64]) -> Result<()> {
        if positions.len() != self.positions.len() {
            return Err(Error::PositionsShapeMismatch {
                expected: self.positions.len(),
                actual: positions.len(),
            });
        }
        if let Some(index) = positions.iter().position(|p| !p.is_finite()) {
            return Err(Error::NonFinitePosition { index });
        }
        self.positions.copy_from_slice(positions);
        self.clamp_to_bounds();
        Ok(())
    }

    pub(crate) fn clamp_to_bounds(&mut self) {
        let Some(b) = &self.bounds else {
            return;
        };
        let d = self.dimension;
        for (i, p) in self.positions.iter_mut().enumerate() {
            *p = b.clamp_axis(i % d, *p);
        }
    }

    /// Distance between two vertices.
    pub fn distance(&self, a: usize, b: usize) -> Option<f64> {
        let pa = self.position(a)?;
        let pb = self.position(b)?;
        Some(
            pa.iter()
                .zip(pb)
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt(),
        )
    }
}
