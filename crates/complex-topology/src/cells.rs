use crate::Cell;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

/// Sorts a cell's vertices and drops repeated indices.
pub fn normalize_cell(cell: &[usize]) -> Cell {
    let mut out = cell.to_vec();
    out.sort_unstable();
    out.dedup();
    out
}

/// Orders cells by size first, then lexicographically.
pub fn compare_cells(a: &[usize], b: &[usize]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Canonicalizes every cell, drops empty ones and sorts the list with [`compare_cells`].
///
/// Duplicates are kept; pair with [`unique`] to remove them.
pub fn normalize(cells: &[Cell]) -> Vec<Cell> {
    let mut out: Vec<Cell> = cells
        .iter()
        .map(|c| normalize_cell(c))
        .filter(|c| !c.is_empty())
        .collect();
    out.sort_by(|a, b| compare_cells(a, b));
    out
}

/// Removes duplicates from a list produced by [`normalize`].
pub fn unique(cells: Vec<Cell>) -> Vec<Cell> {
    let mut out = cells;
    out.dedup();
    out
}

/// Enumerates every non-empty face of every cell, including the cells themselves.
///
/// Faces are canonical and each face is reported once, in first-seen order.
pub fn explode(cells: &[Cell]) -> Vec<Cell> {
    let mut seen: FxHashSet<Cell> = FxHashSet::default();
    let mut out: Vec<Cell> = Vec::new();
    for cell in cells {
        let cell = normalize_cell(cell);
        // A cell of k vertices has 2^k - 1 non-empty faces.
        let k = cell.len();
        if k >= usize::BITS as usize {
            continue;
        }
        for mask in 1usize..(1usize << k) {
            let face: Cell = cell
                .iter()
                .enumerate()
                .filter(|&(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, &v)| v)
                .collect();
            if seen.insert(face.clone()) {
                out.push(face);
            }
        }
    }
    out
}

/// Number of vertices referenced by `cells`: one past the largest index.
pub fn count_vertices(cells: &[Cell]) -> usize {
    cells
        .iter()
        .flat_map(|c| c.iter().copied())
        .max()
        .map_or(0, |m| m + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_cell_sorts_and_dedups() {
        assert_eq!(normalize_cell(&[3, 1, 3, 2]), vec![1, 2, 3]);
        assert!(normalize_cell(&[]).is_empty());
    }

    #[test]
    fn compare_cells_orders_by_size_before_contents() {
        assert_eq!(compare_cells(&[5], &[0, 1]), Ordering::Less);
        assert_eq!(compare_cells(&[0, 2], &[1, 2]), Ordering::Less);
        assert_eq!(compare_cells(&[1, 2], &[1, 2]), Ordering::Equal);
    }

    #[test]
    fn explode_triangle_yields_seven_faces() {
        let faces = explode(&[vec![2, 0, 1]]);
        assert_eq!(faces.len(), 7);
        assert!(faces.contains(&vec![0, 1, 2]));
        assert!(faces.contains(&vec![0, 2]));
        assert!(faces.contains(&vec![1]));
    }
}
