//! Spatial layout of species labels on a square working grid.
//!
//! The grid is a stand-in for the planting lattice: labels are arranged on it so that
//! equal labels avoid each other, then read back row-major as a sequence.
use rand::RngCore;

pub mod decluster;
pub mod mix;

pub use decluster::{decluster, decluster_grid};
pub use mix::{best_option, generate_mix_options, MixOption};

/// Offsets of the Moore neighborhood.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Fixed-size grid of optional labels stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementGrid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<Option<T>>,
}

impl<T> PlacementGrid<T> {
    /// Create an empty `rows × cols` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        let len = rows * cols;
        let mut cells = Vec::with_capacity(len);
        cells.resize_with(len, || None);
        Self { rows, cols, cells }
    }

    /// Square grid sized `floor(sqrt(total))` on each side.
    pub fn square_for(total: usize) -> Self {
        let side = square_side(total);
        Self::new(side, side)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[self.index(row, col)].as_ref()
    }

    /// Store `value` at `(row, col)`, returning the previous occupant.
    ///
    /// # Panics
    /// Panics if the cell is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Option<T> {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        let idx = self.index(row, col);
        self.cells[idx].replace(value)
    }

    /// Number of filled cells.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// All cell coordinates in row-major order.
    pub fn positions(&self) -> Vec<(usize, usize)> {
        (0..self.rows)
            .flat_map(|r| (0..self.cols).map(move |c| (r, c)))
            .collect()
    }

    /// In-bounds Moore neighbors of `(row, col)`.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let (rows, cols) = (self.rows as isize, self.cols as isize);
        let (r0, c0) = (row as isize, col as isize);
        NEIGHBOR_OFFSETS.iter().filter_map(move |(dr, dc)| {
            let (r, c) = (r0 + dr, c0 + dc);
            (r >= 0 && r < rows && c >= 0 && c < cols).then_some((r as usize, c as usize))
        })
    }

    /// Flatten row-major, skipping empty cells.
    pub fn into_sequence(self) -> Vec<T> {
        self.cells.into_iter().flatten().collect()
    }
}

impl<T: PartialEq> PlacementGrid<T> {
    /// Count filled Moore neighbors of `(row, col)` equal to `label`.
    pub fn same_label_neighbors(&self, row: usize, col: usize, label: &T) -> usize {
        self.neighbors(row, col)
            .filter(|&(r, c)| self.get(r, c) == Some(label))
            .count()
    }

    /// Unordered pairs of Moore-adjacent cells holding equal labels.
    pub fn same_label_pairs(&self) -> usize {
        let mut pairs = 0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some(label) = self.get(row, col) {
                    pairs += self.same_label_neighbors(row, col, label);
                }
            }
        }
        pairs / 2
    }
}

/// Side length of the square working grid for `total` points.
pub fn square_side(total: usize) -> usize {
    let mut side = (total as f64).sqrt() as usize;
    // Guard against float rounding on large perfect squares.
    while side * side > total {
        side -= 1;
    }
    while (side + 1) * (side + 1) <= total {
        side += 1;
    }
    side
}

/// In-place Fisher–Yates shuffle using the provided RNG.
pub(crate) fn fisher_yates_shuffle<T>(arr: &mut [T], rng: &mut dyn RngCore) {
    let mut n = arr.len();
    while n > 1 {
        let k = (rng.next_u64() % n as u64) as usize;
        n -= 1;
        arr.swap(n, k);
    }
}
