mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_planter::layout::{decluster_grid, generate_mix_options, square_side};

const SIDES: [usize; 4] = [8, 16, 32, 48];
const SPECIES: [&str; 8] = ["Z", "L", "M", "R", "G", "N", "S", "J"];

fn grouped_labels(total: usize) -> Vec<&'static str> {
    let per_species = total / SPECIES.len();
    SPECIES
        .iter()
        .flat_map(|&id| std::iter::repeat_n(id, per_species))
        .collect()
}

fn layout_decluster_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/decluster");

    for &side in &SIDES {
        let labels = grouped_labels(side * side);
        group.throughput(common::elements_throughput(labels.len()));

        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, &side| {
            b.iter_batched(
                || (labels.clone(), StdRng::seed_from_u64(0x5EED ^ side as u64)),
                |(labels, mut rng)| {
                    let grid = decluster_grid(labels, side, side, &mut rng);
                    black_box(grid.filled());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn layout_mix_options_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/mix_options");

    for &count in &[1usize, 3, 8] {
        let labels = grouped_labels(1024);
        let side = square_side(labels.len());
        group.throughput(common::elements_throughput(labels.len() * count));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || StdRng::seed_from_u64(0xC0FFEE ^ count as u64),
                |mut rng| {
                    let options = generate_mix_options(&labels, count, side, side, &mut rng);
                    black_box(options.len());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = layout_decluster_benches, layout_mix_options_benches
}
criterion_main!(benches);
