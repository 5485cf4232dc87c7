//! Alternative randomized layouts offered to a chooser before planting.
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::layout::{decluster_grid, fisher_yates_shuffle};

/// One candidate arrangement of the allocated labels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MixOption<T> {
    /// Label sequence read row-major from the layout grid.
    pub sequence: Vec<T>,
    /// Moore-adjacent pairs sharing a label in the layout grid.
    pub same_label_pairs: usize,
}

/// Build `count` layouts, each from an independently shuffled copy of `labels`.
pub fn generate_mix_options<T>(
    labels: &[T],
    count: usize,
    rows: usize,
    cols: usize,
    rng: &mut dyn RngCore,
) -> Vec<MixOption<T>>
where
    T: Clone + PartialEq,
{
    (0..count)
        .map(|_| {
            let mut order = labels.to_vec();
            fisher_yates_shuffle(&mut order, rng);
            let grid = decluster_grid(order, rows, cols, rng);
            let same_label_pairs = grid.same_label_pairs();
            MixOption {
                sequence: grid.into_sequence(),
                same_label_pairs,
            }
        })
        .collect()
}

/// Index of the option with the fewest same-label pairs; the first one wins ties.
pub fn best_option<T>(options: &[MixOption<T>]) -> Option<usize> {
    options
        .iter()
        .enumerate()
        .min_by_key(|(_, option)| option.same_label_pairs)
        .map(|(i, _)| i)
}
