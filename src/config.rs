//! The frozen constant context for WGS84 <-> OSGB36 conversion.
//!
//! Nothing here is read from the environment: the published ellipsoids,
//! Helmert parameters and grid origin are fixed. Only the iteration limits can
//! be replaced, and only on a copy.

use crate::datum::ellipsoid::{EllipsoidParameters, EllipsoidTag, AIRY_1830, WGS84};
use crate::datum::helmert::HelmertParameters;
use crate::iterate::IterationLimits;
use crate::proj::transverse_mercator::ProjectionOrigin;

/// Latitude solve: 1e-12 rad (~6 µm on the ground), at most 10 steps.
pub const LATITUDE_LIMITS: IterationLimits = IterationLimits::new(1e-12, 10);

/// Meridional arc solve: 0.01 mm, at most 10 steps.
pub const MERIDIAN_LIMITS: IterationLimits = IterationLimits::new(1e-5, 10);

/// Ellipsoidal height assigned to OSGB36 grid points when lifting them to
/// Cartesian coordinates.
pub const OSGB36_GRID_HEIGHT: f64 = 24.7;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConverterConfig {
    pub wgs84: EllipsoidParameters,
    pub airy: EllipsoidParameters,
    pub helmert: HelmertParameters,
    pub origin: ProjectionOrigin,
    pub grid_height: f64,
    pub latitude_limits: IterationLimits,
    pub meridian_limits: IterationLimits,
}

impl ConverterConfig {
    pub fn osgb36() -> Self {
        Self {
            wgs84: WGS84,
            airy: AIRY_1830,
            helmert: HelmertParameters::wgs84_to_osgb36(),
            origin: ProjectionOrigin::osgb36(),
            grid_height: OSGB36_GRID_HEIGHT,
            latitude_limits: LATITUDE_LIMITS,
            meridian_limits: MERIDIAN_LIMITS,
        }
    }

    pub fn with_latitude_limits(mut self, limits: IterationLimits) -> Self {
        self.latitude_limits = limits;
        self
    }

    pub fn with_meridian_limits(mut self, limits: IterationLimits) -> Self {
        self.meridian_limits = limits;
        self
    }

    pub fn ellipsoid(&self, tag: EllipsoidTag) -> &EllipsoidParameters {
        match tag {
            EllipsoidTag::Airy1830 => &self.airy,
            EllipsoidTag::Wgs84 => &self.wgs84,
        }
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::osgb36()
    }
}
