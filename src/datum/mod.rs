//! Datum-level geometry: ellipsoids, geodetic/Cartesian points and the
//! Helmert shift between the WGS84 and OSGB36 Cartesian frames.

pub mod cartesian;
pub mod ellipsoid;
pub mod helmert;

use crate::angle::{check_finite, check_latitude, check_longitude};
use crate::error::ConvertError;
use ellipsoid::EllipsoidTag;

/// Latitude/longitude/height on a tagged ellipsoid. Angles are in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodeticPoint {
    /// Latitude in radians, within [-π/2, π/2]
    pub latitude: f64,
    /// Longitude in radians, within (-π, π]
    pub longitude: f64,
    /// Ellipsoidal height in metres
    pub height: f64,
    pub ellipsoid: EllipsoidTag,
}

impl GeodeticPoint {
    /// Build a point from radians, rejecting out-of-range or non-finite input.
    pub fn new(
        latitude: f64,
        longitude: f64,
        height: f64,
        ellipsoid: EllipsoidTag,
    ) -> Result<Self, ConvertError> {
        check_latitude(latitude.to_degrees())?;
        check_longitude(longitude.to_degrees())?;
        check_finite("height", height)?;
        Ok(Self {
            latitude,
            longitude,
            height,
            ellipsoid,
        })
    }

    /// Build a point from decimal degrees.
    pub fn from_degrees(
        latitude: f64,
        longitude: f64,
        height: f64,
        ellipsoid: EllipsoidTag,
    ) -> Result<Self, ConvertError> {
        check_latitude(latitude)?;
        check_longitude(longitude)?;
        check_finite("height", height)?;
        Ok(Self {
            latitude: latitude.to_radians(),
            longitude: longitude.to_radians(),
            height,
            ellipsoid,
        })
    }

    /// (latitude, longitude) in decimal degrees.
    pub fn to_degrees(self) -> (f64, f64) {
        (self.latitude.to_degrees(), self.longitude.to_degrees())
    }
}

/// Earth-centred Cartesian coordinates (metres) in the frame of `ellipsoid`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub ellipsoid: EllipsoidTag,
}

impl CartesianPoint {
    pub fn new(x: f64, y: f64, z: f64, ellipsoid: EllipsoidTag) -> Self {
        Self { x, y, z, ellipsoid }
    }

    /// Distance from the polar axis.
    pub fn polar_distance(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Straight-line distance to another point, ignoring the frame tag.
    pub fn distance(&self, other: &CartesianPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
