//! Planting boundaries as simple polygons in (longitude, latitude) decimal degrees.
//!
//! A [`Boundary`] wraps a single exterior ring. The ring may be given open or closed;
//! construction closes it. Interior rings are not supported and are discarded.
use geo::{Area, BoundingRect, Contains, Coord, Intersects, LineString, Polygon};
use glam::DVec2;
use mint::Vector2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// A simple polygon used as a planting area.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Boundary {
    polygon: Polygon<f64>,
}

impl Boundary {
    /// Build a boundary from `(lon, lat)` vertices. A repeated closing vertex is optional.
    pub fn new(vertices: impl IntoIterator<Item = impl Into<Coord<f64>>>) -> Self {
        let ring: LineString<f64> = vertices.into_iter().map(Into::into).collect();
        Self {
            polygon: Polygon::new(ring, Vec::new()),
        }
    }

    /// Build a boundary from points where `x` is longitude and `y` is latitude.
    pub fn from_points<P: Into<Vector2<f64>>>(points: impl IntoIterator<Item = P>) -> Self {
        Self::new(points.into_iter().map(|p| {
            let p: Vector2<f64> = p.into();
            Coord { x: p.x, y: p.y }
        }))
    }

    /// Wrap an existing polygon, keeping only its exterior ring.
    pub fn from_polygon(polygon: Polygon<f64>) -> Self {
        if !polygon.interiors().is_empty() {
            debug!(
                "Dropping {} interior ring(s) from boundary polygon.",
                polygon.interiors().len()
            );
        }
        let (exterior, _) = polygon.into_inner();
        Self {
            polygon: Polygon::new(exterior, Vec::new()),
        }
    }

    /// The underlying polygon.
    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Ring vertices without the closing repeat.
    pub fn vertices(&self) -> Vec<DVec2> {
        let coords = &self.polygon.exterior().0;
        let open = match (coords.first(), coords.last()) {
            (Some(first), Some(last)) if coords.len() > 1 && first == last => {
                &coords[..coords.len() - 1]
            }
            _ => &coords[..],
        };
        open.iter().map(|c| DVec2::new(c.x, c.y)).collect()
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty ring.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        self.polygon.bounding_rect().map(|rect| {
            (
                DVec2::new(rect.min().x, rect.min().y),
                DVec2::new(rect.max().x, rect.max().y),
            )
        })
    }

    /// Area in square degrees.
    pub fn area(&self) -> f64 {
        self.polygon.unsigned_area()
    }

    /// True only for points strictly inside the ring.
    #[inline]
    pub fn contains_strict(&self, p: DVec2) -> bool {
        self.polygon.contains(&Coord { x: p.x, y: p.y })
    }

    /// True for points inside the ring or lying on it.
    #[inline]
    pub fn contains_inclusive(&self, p: DVec2) -> bool {
        self.polygon.intersects(&Coord { x: p.x, y: p.y })
    }

    /// Checks that the ring can hold planting points.
    pub fn validate(&self) -> Result<()> {
        let coords = &self.polygon.exterior().0;
        if coords.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(Error::InvalidBoundary(
                "vertex coordinates must be finite".into(),
            ));
        }

        let mut distinct: Vec<Coord<f64>> = coords.clone();
        distinct.dedup();
        if distinct.len() > 1 && distinct.first() == distinct.last() {
            distinct.pop();
        }
        if distinct.len() < 3 {
            return Err(Error::InvalidBoundary(format!(
                "ring needs at least 3 distinct vertices, got {}",
                distinct.len()
            )));
        }

        if self.area() <= 0.0 {
            return Err(Error::InvalidBoundary("ring has zero area".into()));
        }

        Ok(())
    }
}

impl From<Polygon<f64>> for Boundary {
    fn from(value: Polygon<f64>) -> Self {
        Boundary::from_polygon(value)
    }
}
