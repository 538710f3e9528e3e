use crate::Cell;

/// Vertices that share at least one cell with a given vertex, the vertex itself excluded.
///
/// Stored sorted and deduplicated, so membership is a binary search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Star {
    vertices: Vec<usize>,
}

impl Star {
    pub fn contains(&self, v: usize) -> bool {
        self.vertices.binary_search(&v).is_ok()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.vertices.iter().copied()
    }
}

/// Builds the star of each vertex `0..vertex_count`.
///
/// Indices at or beyond `vertex_count` are ignored; callers validate ranges first.
pub fn stars(cells: &[Cell], vertex_count: usize) -> Vec<Star> {
    let mut out: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
    for cell in cells {
        for &v in cell {
            let Some(slot) = out.get_mut(v) else {
                continue;
            };
            slot.extend(
                cell.iter()
                    .copied()
                    .filter(|&u| u != v && u < vertex_count),
            );
        }
    }
    out.into_iter()
        .map(|mut vertices| {
            vertices.sort_unstable();
            vertices.dedup();
            Star { vertices }
        })
        .collect()
}
