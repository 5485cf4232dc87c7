//! Lattice sampling of planting positions inside boundaries.
//!
//! Distances are converted to degrees with a flat-earth factor. Longitude steps are not
//! corrected for latitude.
pub mod lattice;

pub use lattice::{LatticePoints, LatticeSampling, SamplingMode};

/// Meters covered by one degree of latitude.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Bounding-box expansion in degrees so boundary-touching points survive rounding.
pub const EDGE_TOLERANCE: f64 = 1e-5;

/// Step multiplier applied when sampling positions that will receive trees.
pub const PLACEMENT_STEP_INFLATION: f64 = 1.1;

/// Largest coordinate magnitude a lattice walks over, in degrees.
pub const MAX_COORDINATE_DEGREES: f64 = 360.0;

/// Smallest step in degrees that still advances every coordinate up to
/// [`MAX_COORDINATE_DEGREES`] when added to it.
pub const MIN_STEP_DEGREES: f64 = MAX_COORDINATE_DEGREES * f64::EPSILON;

/// Convert a spacing in meters to degrees.
#[inline]
pub fn degrees_for_meters(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Half-open float range `[start, stop)` advanced by repeated addition.
#[derive(Debug, Clone)]
pub(crate) struct FloatSteps {
    next: f64,
    stop: f64,
    step: f64,
}

impl FloatSteps {
    pub(crate) fn new(start: f64, stop: f64, step: f64) -> Self {
        if !(step.is_finite() && step > 0.0) || !start.is_finite() || !stop.is_finite() {
            return Self::empty();
        }
        Self { next: start, stop, step }
    }

    pub(crate) fn empty() -> Self {
        Self {
            next: 0.0,
            stop: 0.0,
            step: 1.0,
        }
    }
}

impl Iterator for FloatSteps {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next < self.stop {
            let value = self.next;
            self.next += self.step;
            if self.next <= value {
                // Step lost to rounding; end here instead of repeating `value`.
                self.next = self.stop;
            }
            Some(value)
        } else {
            None
        }
    }
}
