//! Projected map geometry
//!
//! Map points are spherical Web-Mercator coordinates scaled so the whole
//! world is `WORLD_SIZE` points wide, with `y` growing southward. Route
//! framing pads rectangles in these units.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// Latitude limit of the Web-Mercator projection
const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

/// A point on the projected 2D map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

/// Width and height of a map rectangle in map points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapSize {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned rectangle on the projected map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRect {
    pub origin: MapPoint,
    pub size: MapSize,
}

impl MapPoint {
    /// Width (and height) of the projected world in map points (2^28)
    pub const WORLD_SIZE: f64 = 268_435_456.0;

    /// Project a geographic location
    #[must_use]
    pub fn from_location(location: &GeoLocation) -> Self {
        let lat = location
            .latitude()
            .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
            .to_radians();
        let x = (location.longitude() + 180.0) / 360.0 * Self::WORLD_SIZE;
        let y = (1.0 - lat.tan().asinh() / PI) / 2.0 * Self::WORLD_SIZE;
        Self { x, y }
    }

    /// Inverse projection back to latitude/longitude
    #[must_use]
    pub fn to_location(&self) -> GeoLocation {
        let longitude = (self.x / Self::WORLD_SIZE).mul_add(360.0, -180.0);
        let n = PI * 2.0f64.mul_add(-self.y / Self::WORLD_SIZE, 1.0);
        let latitude = n.sinh().atan().to_degrees();
        GeoLocation::new_unchecked(
            latitude.clamp(-90.0, 90.0),
            longitude.clamp(-180.0, 180.0),
        )
    }
}

impl MapRect {
    /// Create a rectangle from its origin (top-left) and size
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: MapPoint { x, y },
            size: MapSize { width, height },
        }
    }

    /// Smallest rectangle enclosing all points
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyGeometry` when no points are given.
    pub fn bounding<I>(points: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = MapPoint>,
    {
        let mut points = points.into_iter();
        let first = points
            .next()
            .ok_or_else(|| DomainError::EmptyGeometry("bounding rectangle".to_string()))?;

        let (min_x, min_y, max_x, max_y) = points.fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        );

        Ok(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Smallest rectangle enclosing all projected locations
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyGeometry` when `locations` is empty.
    pub fn from_locations(locations: &[GeoLocation]) -> Result<Self, DomainError> {
        Self::bounding(locations.iter().map(MapPoint::from_location))
    }

    /// Shrink by `dx`/`dy` on each side; negative values grow the rectangle
    ///
    /// The rectangle collapses onto its center rather than turning inside out.
    #[must_use]
    pub fn inset_by(&self, dx: f64, dy: f64) -> Self {
        let center = self.center();
        let width = 2.0f64.mul_add(-dx, self.size.width).max(0.0);
        let height = 2.0f64.mul_add(-dy, self.size.height).max(0.0);
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Grow by `padding` map points on every side
    #[must_use]
    pub fn padded(&self, padding: f64) -> Self {
        self.inset_by(-padding, -padding)
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Center point of the rectangle
    #[must_use]
    pub fn center(&self) -> MapPoint {
        MapPoint {
            x: self.size.width.mul_add(0.5, self.origin.x),
            y: self.size.height.mul_add(0.5, self.origin.y),
        }
    }

    /// Whether the point lies inside or on the edge
    #[must_use]
    pub fn contains(&self, point: &MapPoint) -> bool {
        (self.min_x()..=self.max_x()).contains(&point.x)
            && (self.min_y()..=self.max_y()).contains(&point.y)
    }
}
