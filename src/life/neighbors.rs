//! Moore neighbor-graph precomputation

use itertools::Itertools;

/// The 8 Moore-neighborhood offsets, in the fixed enumeration order used
/// for every neighbor list. Keeping the order fixed makes list contents
/// reproducible across builds.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// One-shot builder for the per-cell neighbor index lists.
///
/// Computing the in-bounds Moore neighbors once per board build is what
/// makes each generation O(1) per cell; the stepping pass never repeats
/// a bounds check.
pub struct NeighborGraph;

impl NeighborGraph {
    /// Compute the neighbor list for every cell of a `width` x `height`
    /// board, in arena order (flat index `x * height + y`).
    ///
    /// Offsets that fall outside `[0,width) x [0,height)` are skipped;
    /// there is no wraparound. Only neighbor lists are produced, cell
    /// state is untouched by construction.
    pub fn build(width: usize, height: usize) -> Vec<Vec<usize>> {
        (0..width)
            .cartesian_product(0..height)
            .map(|(x, y)| Self::neighbors_of(x, y, width, height))
            .collect()
    }

    /// In-bounds Moore neighbors of a single coordinate, as flat indices.
    pub fn neighbors_of(x: usize, y: usize, width: usize, height: usize) -> Vec<usize> {
        MOORE_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx >= 0 && nx < width as isize && ny >= 0 && ny < height as isize {
                    Some(nx as usize * height + ny as usize)
                } else {
                    None
                }
            })
            .collect()
    }
}
