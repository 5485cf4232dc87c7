//! Greedy declustering of labels on a [`PlacementGrid`].
//!
//! Each label, in input order, goes to the first free cell (in a shuffled scan order)
//! with the fewest equal Moore neighbors. A cell with none ends the scan early. Labels
//! beyond the grid's capacity are dropped.
use rand::RngCore;
use tracing::warn;

use crate::layout::{fisher_yates_shuffle, PlacementGrid};

/// Arrange `labels` on a `rows × cols` grid and return the filled grid.
pub fn decluster_grid<T, I>(
    labels: I,
    rows: usize,
    cols: usize,
    rng: &mut dyn RngCore,
) -> PlacementGrid<T>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    let mut grid = PlacementGrid::new(rows, cols);
    let mut pool = grid.positions();
    fisher_yates_shuffle(&mut pool, rng);

    let mut dropped = 0usize;
    for label in labels {
        if pool.is_empty() {
            dropped += 1;
            continue;
        }

        let mut best: Option<(usize, usize)> = None;
        for (i, &(row, col)) in pool.iter().enumerate() {
            let same = grid.same_label_neighbors(row, col, &label);
            if best.is_none_or(|(_, fewest)| same < fewest) {
                best = Some((i, same));
                if same == 0 {
                    break;
                }
            }
        }

        if let Some((i, _)) = best {
            let (row, col) = pool.remove(i);
            grid.set(row, col, label);
        }
    }

    if dropped > 0 {
        warn!(
            "Dropped {} label(s) that did not fit a {}x{} layout grid.",
            dropped, rows, cols
        );
    }

    grid
}

/// Arrange `labels` on a `rows × cols` grid and read them back row-major.
///
/// The result holds `min(labels, rows * cols)` labels.
pub fn decluster<T, I>(labels: I, rows: usize, cols: usize, rng: &mut dyn RngCore) -> Vec<T>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    decluster_grid(labels, rows, cols, rng).into_sequence()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    /// Always draws `value`, which makes the cell pool order predictable.
    struct FixedRng {
        value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    fn sorted(mut v: Vec<char>) -> Vec<char> {
        v.sort_unstable();
        v
    }

    fn repeated(counts: &[(char, usize)]) -> Vec<char> {
        counts.iter()
            .flat_map(|&(c, n)| std::iter::repeat_n(c, n))
            .collect()
    }

    #[test]
    fn full_grid_keeps_every_label() {
        let mut rng = StdRng::seed_from_u64(3);
        let labels = repeated(&[('A', 5), ('B', 4)]);
        let out = decluster(labels.clone(), 3, 3, &mut rng);
        assert_eq!(sorted(out), sorted(labels));
    }

    #[test]
    fn overflow_labels_are_dropped() {
        let mut rng = StdRng::seed_from_u64(5);
        let labels = repeated(&[('A', 3), ('B', 3)]);
        let out = decluster(labels, 2, 2, &mut rng);
        assert_eq!(out.len(), 4);
        // Input order is A A A B B B, so all three A are placed before the grid fills.
        assert_eq!(out.iter().filter(|&&c| c == 'A').count(), 3);
        assert_eq!(out.iter().filter(|&&c| c == 'B').count(), 1);
    }

    #[test]
    fn output_is_sub_multiset_of_input() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let labels = repeated(&[('A', 7), ('B', 6), ('C', 4)]);
            let out = decluster(labels, 4, 3, &mut rng);
            assert!(out.len() <= 12);
            for c in ['A', 'B', 'C'] {
                let limit = match c {
                    'A' => 7,
                    'B' => 6,
                    _ => 4,
                };
                assert!(out.iter().filter(|&&x| x == c).count() <= limit);
            }
            assert!(out.iter().all(|c| ['A', 'B', 'C'].contains(c)));
        }
    }

    #[test]
    fn empty_inputs_produce_empty_output() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(decluster(Vec::<char>::new(), 3, 3, &mut rng).is_empty());
        assert!(decluster(vec!['A', 'B'], 0, 0, &mut rng).is_empty());
    }

    #[test]
    fn alternating_pairs_reach_minimum_adjacency_on_two_by_two() {
        // Every cell of a 2x2 grid touches every other, so one A-A and one B-B pair is the floor.
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = decluster_grid(vec!['A', 'A', 'B', 'B'], 2, 2, &mut rng);
            assert_eq!(grid.filled(), 4);
            assert_eq!(grid.same_label_pairs(), 2, "seed {seed}");
        }
    }

    #[test]
    fn equal_labels_avoid_each_other_when_room_allows() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = decluster_grid(vec!['A', 'A'], 1, 5, &mut rng);
            assert_eq!(grid.same_label_pairs(), 0, "seed {seed}");
        }
    }

    #[test]
    fn zero_draws_rotate_the_cell_pool() {
        let mut rng = FixedRng { value: 0 };
        let mut pool = PlacementGrid::<char>::new(1, 4).positions();
        fisher_yates_shuffle(&mut pool, &mut rng);
        assert_eq!(pool, vec![(0, 1), (0, 2), (0, 3), (0, 0)]);
    }

    #[test]
    fn ties_go_to_the_first_scanned_cell() {
        // Pool order is col 1, col 2, col 0. The second A sees one equal neighbor in
        // both remaining cells and must take col 2, the earlier of the two.
        let mut rng = FixedRng { value: 0 };
        let grid = decluster_grid(vec!['A', 'A'], 1, 3, &mut rng);
        assert_eq!(grid.get(0, 1), Some(&'A'));
        assert_eq!(grid.get(0, 2), Some(&'A'));
        assert_eq!(grid.get(0, 0), None);
    }

    #[test]
    fn removal_keeps_the_remaining_pool_in_order() {
        // Pool order is col 1, col 2, col 3, col 0. After A takes col 1 the scan must
        // continue at col 2, so B lands there rather than at col 0.
        let mut rng = FixedRng { value: 0 };
        let grid = decluster_grid(vec!['A', 'B'], 1, 4, &mut rng);
        assert_eq!(grid.get(0, 1), Some(&'A'));
        assert_eq!(grid.get(0, 2), Some(&'B'));
        assert_eq!(grid.get(0, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn fewest_equal_neighbors_beats_scan_order() {
        // Pool order is col 1, col 2, col 3, col 0. After A takes col 1, col 2 touches it,
        // so the second A passes over col 2 and stops at col 3.
        let mut rng = FixedRng { value: 0 };
        let grid = decluster_grid(vec!['A', 'A'], 1, 4, &mut rng);
        assert_eq!(grid.get(0, 1), Some(&'A'));
        assert_eq!(grid.get(0, 3), Some(&'A'));
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.same_label_pairs(), 0);
    }

    #[test]
    fn declustering_beats_grouped_layout() {
        let labels = repeated(&[('A', 18), ('B', 18)]);
        let mut grouped = PlacementGrid::new(6, 6);
        for (i, &label) in labels.iter().enumerate() {
            grouped.set(i / 6, i % 6, label);
        }

        let mut rng = StdRng::seed_from_u64(11);
        let spread = decluster_grid(labels, 6, 6, &mut rng);
        assert!(spread.same_label_pairs() < grouped.same_label_pairs());
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let labels = repeated(&[('A', 10), ('B', 10), ('C', 5)]);
        let mut rng_a = StdRng::seed_from_u64(77);
        let mut rng_b = StdRng::seed_from_u64(77);
        assert_eq!(
            decluster(labels.clone(), 5, 5, &mut rng_a),
            decluster(labels, 5, 5, &mut rng_b)
        );
    }
}
