use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

type BucketMap = IndexMap<Box<[i64]>, Vec<usize>, FxBuildHasher>;

/// Broad-phase index for repulsion, rebuilt from scratch every step.
///
/// Space is cut into a uniform lattice of side `cell_size`. A vertex whose own lattice
/// coordinate is `c` is filed under every bucket `c + {0, 1}^D`, so two vertices closer than
/// `cell_size` always share at least one bucket. A pair that shares several buckets is reported
/// only from its owner bucket: the per-axis maximum of the two vertices' own coordinates.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    dimension: usize,
    cell_size: f64,
    /// Own lattice coordinate of each vertex, row-major.
    coords: Vec<i64>,
    buckets: BucketMap,
}

impl SpatialGrid {
    pub fn new(dimension: usize, cell_size: f64) -> Self {
        Self {
            dimension,
            cell_size,
            coords: Vec::new(),
            buckets: BucketMap::default(),
        }
    }

    pub fn build(positions: &[f64], dimension: usize, cell_size: f64) -> Self {
        let mut grid = Self::new(dimension, cell_size);
        grid.rebuild(positions);
        grid
    }

    /// Re-buckets every vertex from `positions` (row-major, `dimension` values per vertex).
    pub fn rebuild(&mut self, positions: &[f64]) {
        let d = self.dimension;
        self.coords.clear();
        self.buckets.clear();
        if d == 0 {
            return;
        }

        self.coords.extend(
            positions
                .iter()
                .map(|&p| (p / self.cell_size).floor() as i64),
        );

        let corners = 1usize << d;
        let mut key: Vec<i64> = vec![0; d];
        for (v, own) in self.coords.chunks_exact(d).enumerate() {
            for corner in 0..corners {
                for (axis, k) in key.iter_mut().enumerate() {
                    *k = own[axis].saturating_add(((corner >> axis) & 1) as i64);
                }
                match self.buckets.get_mut(key.as_slice()) {
                    Some(members) => members.push(v),
                    None => {
                        self.buckets.insert(key.clone().into_boxed_slice(), vec![v]);
                    }
                }
            }
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Own lattice coordinate of vertex `v`.
    pub fn lattice_coord(&self, v: usize) -> Option<&[i64]> {
        let start = v.checked_mul(self.dimension)?;
        self.coords.get(start..start + self.dimension)
    }

    /// Calls `visit(a, b)` with `a < b` once for every pair that shares a bucket.
    pub fn for_each_pair(&self, mut visit: impl FnMut(usize, usize)) {
        for (bucket, members) in &self.buckets {
            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    if self.owns(bucket, a, b) {
                        visit(a, b);
                    }
                }
            }
        }
    }

    fn owns(&self, bucket: &[i64], a: usize, b: usize) -> bool {
        let d = self.dimension;
        let ca = &self.coords[a * d..(a + 1) * d];
        let cb = &self.coords[b * d..(b + 1) * d];
        bucket
            .iter()
            .zip(ca.iter().zip(cb))
            .all(|(&k, (&x, &y))| k == x.max(y))
    }
}

#[cfg(test)]
mod tests {
    use super::SpatialGrid;

    fn pairs(grid: &SpatialGrid) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        grid.for_each_pair(|a, b| out.push((a, b)));
        out
    }

    #[test]
    fn each_vertex_lands_in_two_to_the_d_buckets() {
        let grid = SpatialGrid::build(&[0.5, 0.5, 0.5], 3, 2.0);
        assert_eq!(grid.bucket_count(), 8);
        assert_eq!(grid.lattice_coord(0), Some(&[0, 0, 0][..]));
    }

    #[test]
    fn negative_positions_floor_toward_negative_infinity() {
        let grid = SpatialGrid::build(&[-0.1, 3.9], 2, 2.0);
        assert_eq!(grid.lattice_coord(0), Some(&[-1, 1][..]));
    }

    #[test]
    fn pair_straddling_a_boundary_is_reported_once() {
        // 1-D: vertex 0 in lattice cell 0, vertex 1 in lattice cell 1; they share bucket 1 only.
        let grid = SpatialGrid::build(&[1.9, 2.1], 1, 2.0);
        assert_eq!(pairs(&grid), vec![(0, 1)]);
    }

    #[test]
    fn pair_in_the_same_cell_is_reported_once() {
        // Same lattice cell in 2-D: they share all four buckets.
        let grid = SpatialGrid::build(&[0.2, 0.2, 0.4, 0.3], 2, 2.0);
        assert_eq!(pairs(&grid), vec![(0, 1)]);
    }

    #[test]
    fn far_apart_vertices_are_not_paired() {
        let grid = SpatialGrid::build(&[0.0, 0.0, 10.0, 0.0], 2, 2.0);
        assert!(pairs(&grid).is_empty());
    }
}
