use std::time::Duration;

use criterion::{Criterion, Throughput};
use tree_planter::boundary::Boundary;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Axis-aligned square field with its south-west corner at (`lon`, `lat`).
#[allow(dead_code)]
pub fn square_field(lon: f64, lat: f64, side_degrees: f64) -> Boundary {
    Boundary::new([
        (lon, lat),
        (lon, lat + side_degrees),
        (lon + side_degrees, lat + side_degrees),
        (lon + side_degrees, lat),
    ])
}

/// Regular polygon approximating a round field.
#[allow(dead_code)]
pub fn round_field(lon: f64, lat: f64, radius_degrees: f64, sides: usize) -> Boundary {
    Boundary::new((0..sides).map(|i| {
        let angle = i as f64 / sides as f64 * std::f64::consts::TAU;
        (
            lon + radius_degrees * angle.cos(),
            lat + radius_degrees * angle.sin(),
        )
    }))
}
