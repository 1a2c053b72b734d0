pub mod common;
pub mod transverse_mercator;

use crate::angle::check_finite;
use crate::datum::ellipsoid::EllipsoidParameters;
use crate::datum::GeodeticPoint;
use crate::error::ConvertError;

/// Planar National Grid coordinates in metres. Always OSGB36.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPoint {
    pub easting: f64,
    pub northing: f64,
}

impl GridPoint {
    pub fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }

    /// Build a grid point, rejecting non-finite coordinates.
    pub fn checked(easting: f64, northing: f64) -> Result<Self, ConvertError> {
        Ok(Self {
            easting: check_finite("easting", easting)?,
            northing: check_finite("northing", northing)?,
        })
    }
}

/// Trait for map projections supporting forward and inverse transforms.
pub trait Projection: Send + Sync {
    /// Forward: geodetic point on the projection's ellipsoid -> grid
    fn forward(&self, point: &GeodeticPoint) -> Result<GridPoint, ConvertError>;

    /// Inverse: grid -> geodetic point on the projection's ellipsoid (height 0)
    fn inverse(&self, point: &GridPoint) -> Result<GeodeticPoint, ConvertError>;

    fn ellipsoid(&self) -> &EllipsoidParameters;
}
