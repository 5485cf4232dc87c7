//! Regular lattice sampling clipped to a [`Boundary`].
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::boundary::Boundary;
use crate::error::{Error, Result};
use crate::sampling::{
    degrees_for_meters, FloatSteps, EDGE_TOLERANCE, MIN_STEP_DEGREES, PLACEMENT_STEP_INFLATION,
};

/// How a lattice pass filters and spaces its candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplingMode {
    /// Sizing pass: bounding box as-is, nominal step, strict interior only.
    Capacity,
    /// Planting pass: bounding box widened by [`EDGE_TOLERANCE`], step inflated by
    /// [`PLACEMENT_STEP_INFLATION`], boundary points accepted.
    Placement,
}

/// Square lattice with independent latitude and longitude steps in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatticeSampling {
    /// Row step in degrees of latitude.
    pub delta_lat: f64,
    /// Column step in degrees of longitude.
    pub delta_lon: f64,
}

impl LatticeSampling {
    pub fn new(delta_lat: f64, delta_lon: f64) -> Self {
        Self {
            delta_lat,
            delta_lon,
        }
    }

    /// Lattice for a tree spacing in meters, using the same step on both axes.
    pub fn from_spacing_meters(spacing_meters: f64) -> Result<Self> {
        if !spacing_meters.is_finite() || spacing_meters <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "spacing must be a positive number of meters, got {spacing_meters}"
            )));
        }
        let delta = degrees_for_meters(spacing_meters);
        if delta < MIN_STEP_DEGREES {
            return Err(Error::InvalidConfig(format!(
                "spacing of {spacing_meters} m is below coordinate precision"
            )));
        }
        Ok(Self::new(delta, delta))
    }

    /// Lazily enumerate lattice points of `boundary` in row-major (latitude, then
    /// longitude) order. Calling again restarts the sequence.
    pub fn points<'a>(&self, boundary: &'a Boundary, mode: SamplingMode) -> LatticePoints<'a> {
        LatticePoints::new(boundary, *self, mode)
    }

    /// Points that will receive trees.
    pub fn placement_points<'a>(&self, boundary: &'a Boundary) -> LatticePoints<'a> {
        self.points(boundary, SamplingMode::Placement)
    }

    /// Number of strictly interior points at the nominal spacing.
    ///
    /// This is the figure species allocation is sized from. It usually differs from
    /// the number of placement points.
    pub fn capacity(&self, boundary: &Boundary) -> usize {
        self.points(boundary, SamplingMode::Capacity).count()
    }
}

/// Iterator over the lattice points of one boundary.
#[derive(Debug, Clone)]
pub struct LatticePoints<'a> {
    boundary: &'a Boundary,
    mode: SamplingMode,
    rows: FloatSteps,
    lon_start: f64,
    lon_stop: f64,
    lon_step: f64,
    row: Option<(f64, FloatSteps)>,
}

impl<'a> LatticePoints<'a> {
    fn new(boundary: &'a Boundary, lattice: LatticeSampling, mode: SamplingMode) -> Self {
        let (pad, scale) = match mode {
            SamplingMode::Capacity => (0.0, 1.0),
            SamplingMode::Placement => (EDGE_TOLERANCE, PLACEMENT_STEP_INFLATION),
        };
        let lat_step = lattice.delta_lat * scale;
        let lon_step = lattice.delta_lon * scale;

        let (rows, lon_start, lon_stop) = match boundary.bounds() {
            Some((min, max)) => (
                FloatSteps::new(min.y - pad, max.y + pad, lat_step),
                min.x - pad,
                max.x + pad,
            ),
            None => (FloatSteps::empty(), 0.0, 0.0),
        };

        Self {
            boundary,
            mode,
            rows,
            lon_start,
            lon_stop,
            lon_step,
            row: None,
        }
    }

    #[inline]
    fn accepts(&self, p: DVec2) -> bool {
        match self.mode {
            SamplingMode::Capacity => self.boundary.contains_strict(p),
            SamplingMode::Placement => self.boundary.contains_inclusive(p),
        }
    }
}

impl Iterator for LatticePoints<'_> {
    type Item = DVec2;

    fn next(&mut self) -> Option<DVec2> {
        loop {
            if self.row.is_none() {
                let lat = self.rows.next()?;
                self.row = Some((
                    lat,
                    FloatSteps::new(self.lon_start, self.lon_stop, self.lon_step),
                ));
            }
            let (lat, cols) = self.row.as_mut()?;
            let lat = *lat;
            match cols.next() {
                Some(lon) => {
                    let p = DVec2::new(lon, lat);
                    if self.accepts(p) {
                        return Some(p);
                    }
                }
                None => self.row = None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_square() -> Boundary {
        Boundary::new([(0.0, 0.0), (0.0, 0.001), (0.001, 0.001), (0.001, 0.0)])
    }

    #[test]
    fn from_spacing_rejects_non_positive_values() {
        assert!(LatticeSampling::from_spacing_meters(0.0).is_err());
        assert!(LatticeSampling::from_spacing_meters(-3.0).is_err());
        assert!(LatticeSampling::from_spacing_meters(f64::NAN).is_err());
        let lattice = LatticeSampling::from_spacing_meters(6.0).expect("valid spacing");
        assert_eq!(lattice.delta_lat, lattice.delta_lon);
    }

    #[test]
    fn from_spacing_rejects_steps_below_coordinate_precision() {
        assert!(matches!(
            LatticeSampling::from_spacing_meters(1e-10),
            Err(Error::InvalidConfig(_))
        ));
        assert!(LatticeSampling::from_spacing_meters(1e-3).is_ok());
    }

    #[test]
    fn sub_precision_steps_still_terminate() {
        // Built directly, bypassing the spacing check.
        let lattice = LatticeSampling::new(1e-16, 1e-16);
        let field = Boundary::new([(-99.2, 19.3), (-99.2, 19.4), (-99.1, 19.4), (-99.1, 19.3)]);
        assert_eq!(lattice.capacity(&field), 0);
        assert_eq!(lattice.placement_points(&field).count(), 0);
    }

    #[test]
    fn capacity_counts_strict_interior_of_square() {
        let lattice = LatticeSampling::from_spacing_meters(6.0).expect("valid spacing");
        // Row and column 0 lie on the boundary and are excluded; 18 steps fit below 0.001.
        assert_eq!(lattice.capacity(&small_square()), 18 * 18);
    }

    #[test]
    fn placement_points_use_inflated_step_and_tolerance() {
        let lattice = LatticeSampling::from_spacing_meters(6.0).expect("valid spacing");
        let points: Vec<DVec2> = lattice.placement_points(&small_square()).collect();
        assert_eq!(points.len(), 17 * 17);

        let step = lattice.delta_lat * PLACEMENT_STEP_INFLATION;
        let dx = points[1].x - points[0].x;
        assert!((dx - step).abs() < 1e-12);
    }

    #[test]
    fn placement_points_are_row_major() {
        let lattice = LatticeSampling::from_spacing_meters(6.0).expect("valid spacing");
        let points: Vec<DVec2> = lattice.placement_points(&small_square()).collect();
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(b.y > a.y || (b.y == a.y && b.x > a.x));
        }
    }

    #[test]
    fn placement_points_lie_inside_or_on_boundary() {
        let triangle = Boundary::new([(10.0, 20.0), (10.002, 20.0), (10.0, 20.003)]);
        let lattice = LatticeSampling::from_spacing_meters(9.0).expect("valid spacing");
        let points: Vec<DVec2> = lattice.placement_points(&triangle).collect();
        assert!(!points.is_empty());
        for p in points {
            assert!(triangle.contains_inclusive(p), "{p:?} escaped the boundary");
        }
    }

    #[test]
    fn capacity_drops_edges_while_placement_starts_outside() {
        // Capacity rows start exactly on the lower edge.
        let square = Boundary::new([(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0)]);
        let lattice = LatticeSampling::new(1.0, 1.0);

        let strict: Vec<DVec2> = lattice.points(&square, SamplingMode::Capacity).collect();
        assert!(strict.iter().all(|p| square.contains_strict(*p)));
        assert_eq!(strict.len(), 9);

        // Placement rows start at -1e-5, outside the ring, then step by 1.1.
        let placed: Vec<DVec2> = lattice.placement_points(&square).collect();
        assert!(placed.iter().all(|p| square.contains_inclusive(*p)));
        assert_eq!(placed.len(), 9);
    }

    #[test]
    fn sequence_restarts_when_requested_again() {
        let lattice = LatticeSampling::from_spacing_meters(6.0).expect("valid spacing");
        let square = small_square();
        let first: Vec<DVec2> = lattice.placement_points(&square).collect();
        let second: Vec<DVec2> = lattice.placement_points(&square).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn non_convex_boundary_skips_notch() {
        let u_shape = Boundary::new([
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        let lattice = LatticeSampling::new(0.25, 0.25);
        let points: Vec<DVec2> = lattice.points(&u_shape, SamplingMode::Capacity).collect();
        assert!(!points.is_empty());
        assert!(points
            .iter()
            .all(|p| !(p.x > 1.0 && p.x < 2.0 && p.y > 1.0)));
    }

    #[test]
    fn empty_boundary_yields_nothing() {
        let empty = Boundary::new(Vec::<(f64, f64)>::new());
        let lattice = LatticeSampling::new(0.1, 0.1);
        assert_eq!(lattice.capacity(&empty), 0);
        assert_eq!(lattice.placement_points(&empty).count(), 0);
    }
}
