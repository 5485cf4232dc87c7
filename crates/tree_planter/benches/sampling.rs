mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tree_planter::sampling::{LatticeSampling, SamplingMode};

const SPACINGS: [f64; 4] = [15.0, 9.0, 6.0, 3.0];
const FIELD_SIDE_DEGREES: f64 = 0.005;

fn sampling_lattice_benches(c: &mut Criterion) {
    let fields = [
        ("square", common::square_field(-99.2, 19.3, FIELD_SIDE_DEGREES)),
        (
            "round",
            common::round_field(-99.2, 19.3, FIELD_SIDE_DEGREES / 2.0, 64),
        ),
    ];

    for (name, field) in &fields {
        for mode in [SamplingMode::Capacity, SamplingMode::Placement] {
            let mut group = c.benchmark_group(format!("sampling/lattice/{name}/{mode:?}"));

            for &spacing in &SPACINGS {
                let Ok(lattice) = LatticeSampling::from_spacing_meters(spacing) else {
                    continue;
                };
                let expected = lattice.points(field, mode).count();
                group.throughput(common::elements_throughput(expected));

                group.bench_with_input(BenchmarkId::from_parameter(spacing), &spacing, |b, _| {
                    b.iter(|| {
                        let n = lattice.points(black_box(field), mode).count();
                        black_box(n);
                    });
                });
            }

            group.finish();
        }
    }
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = sampling_lattice_benches
}
criterion_main!(benches);
