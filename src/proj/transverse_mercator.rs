//! Transverse Mercator projection for the OSGB36 National Grid.
//!
//! Implements the classical Ordnance Survey series: a closed-form forward
//! mapping truncated at Δλ⁶, and an inverse that first solves the meridional
//! arc for the footpoint latitude, then back-substitutes with the terms
//! VII..XIIA in (E - E0).

use std::f64::consts::FRAC_PI_2;

use crate::datum::ellipsoid::{EllipsoidParameters, AIRY_1830};
use crate::datum::GeodeticPoint;
use crate::error::ConvertError;
use crate::iterate::{fixed_point, FixedPoint, IterationLimits, Step};
use crate::proj::common::{curvature, meridional_arc};
use crate::proj::{GridPoint, Projection};

pub const MERIDIAN_SOLVE: &str = "Meridional arc latitude solve";

/// Stage reported when the inverse series lands outside the physical domain.
///
/// The VII..XIIA series is truncated at (E - E0)⁷, which stops describing the
/// projection at high latitude combined with a large longitude offset. Grid
/// points from that corner are rejected rather than returned as nonsense.
pub const SERIES_DOMAIN: &str = "Transverse Mercator inverse series";

/// Largest longitude offset from the central meridian the inverse will return.
pub const MAX_LONGITUDE_OFFSET_DEGREES: f64 = 60.0;

/// True origin and false origin of a Transverse Mercator grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionOrigin {
    /// Latitude of true origin (radians)
    pub lat0: f64,
    /// Longitude of true origin / central meridian (radians)
    pub lon0: f64,
    /// Easting of true origin (metres)
    pub false_easting: f64,
    /// Northing of true origin (metres)
    pub false_northing: f64,
}

impl ProjectionOrigin {
    /// 49°N 2°W, mapped to E = 400 000, N = -100 000.
    pub fn osgb36() -> Self {
        Self {
            lat0: 49.0_f64.to_radians(),
            lon0: (-2.0_f64).to_radians(),
            false_easting: 400_000.0,
            false_northing: -100_000.0,
        }
    }
}

pub struct NationalGrid {
    ellipsoid: EllipsoidParameters,
    origin: ProjectionOrigin,
    limits: IterationLimits,
}

impl NationalGrid {
    pub fn new(
        ellipsoid: EllipsoidParameters,
        origin: ProjectionOrigin,
        limits: IterationLimits,
    ) -> Self {
        Self {
            ellipsoid,
            origin,
            limits,
        }
    }

    /// The OSGB36 National Grid on Airy 1830.
    pub fn osgb36(limits: IterationLimits) -> Self {
        Self::new(AIRY_1830, ProjectionOrigin::osgb36(), limits)
    }

    pub fn origin(&self) -> &ProjectionOrigin {
        &self.origin
    }

    /// Solve M(φ') = N - N0 for the footpoint latitude φ'.
    /// Returns φ' and the number of steps the solve took.
    fn footpoint_latitude(&self, northing: f64) -> Result<(f64, usize), ConvertError> {
        let af0 = self.ellipsoid.a * self.ellipsoid.f0;
        let target = northing - self.origin.false_northing;
        let initial = self.origin.lat0 + target / af0;

        let solved = fixed_point(initial, self.limits.max_iterations, |phi| {
            let residual = target - meridional_arc(&self.ellipsoid, phi, self.origin.lat0);
            if residual.abs() < self.limits.tolerance {
                Step::Converged(phi)
            } else {
                Step::Continue(phi + residual / af0)
            }
        });

        match solved {
            FixedPoint::Converged { value, iterations } => {
                tracing::trace!(iterations, "meridional arc solve converged");
                Ok((value, iterations))
            }
            FixedPoint::Exhausted { last, iterations } => {
                tracing::debug!(
                    stage = MERIDIAN_SOLVE,
                    iterations,
                    last,
                    "meridional arc solve did not converge"
                );
                Err(ConvertError::Convergence {
                    stage: MERIDIAN_SOLVE,
                    iterations,
                })
            }
        }
    }
}

impl Projection for NationalGrid {
    fn forward(&self, point: &GeodeticPoint) -> Result<GridPoint, ConvertError> {
        debug_assert_eq!(point.ellipsoid, self.ellipsoid.tag);
        let phi = point.latitude;
        let dlam = point.longitude - self.origin.lon0;

        let c = curvature(&self.ellipsoid, phi);
        let m = meridional_arc(&self.ellipsoid, phi, self.origin.lat0);

        let (sin_phi, cos_phi) = phi.sin_cos();
        let cos3 = cos_phi.powi(3);
        let cos5 = cos_phi.powi(5);
        let tan2 = phi.tan().powi(2);
        let tan4 = tan2 * tan2;

        let i = m + self.origin.false_northing;
        let ii = c.nu / 2.0 * sin_phi * cos_phi;
        let iii = c.nu / 24.0 * sin_phi * cos3 * (5.0 - tan2 + 9.0 * c.eta2);
        let iiia = c.nu / 720.0 * sin_phi * cos5 * (61.0 - 58.0 * tan2 + tan4);
        let iv = c.nu * cos_phi;
        let v = c.nu / 6.0 * cos3 * (c.nu / c.rho - tan2);
        let vi = c.nu / 120.0
            * cos5
            * (5.0 - 18.0 * tan2 + tan4 + 14.0 * c.eta2 - 58.0 * tan2 * c.eta2);

        let dlam2 = dlam * dlam;
        let northing = i + dlam2 * (ii + dlam2 * (iii + dlam2 * iiia));
        let easting = self.origin.false_easting + dlam * (iv + dlam2 * (v + dlam2 * vi));

        Ok(GridPoint { easting, northing })
    }

    fn inverse(&self, point: &GridPoint) -> Result<GeodeticPoint, ConvertError> {
        let (phi_f, iterations) = self.footpoint_latitude(point.northing)?;

        let c = curvature(&self.ellipsoid, phi_f);
        let t = phi_f.tan();
        let t2 = t * t;
        let t4 = t2 * t2;
        let t6 = t4 * t2;
        let sec = 1.0 / phi_f.cos();
        let nu3 = c.nu.powi(3);
        let nu5 = c.nu.powi(5);
        let nu7 = c.nu.powi(7);

        let vii = t / (2.0 * c.rho * c.nu);
        let viii = t / (24.0 * c.rho * nu3) * (5.0 + 3.0 * t2 + c.eta2 - 9.0 * t2 * c.eta2);
        let ix = t / (720.0 * c.rho * nu5) * (61.0 + 90.0 * t2 + 45.0 * t4);
        let x = sec / c.nu;
        let xi = sec / (6.0 * nu3) * (c.nu / c.rho + 2.0 * t2);
        let xii = sec / (120.0 * nu5) * (5.0 + 28.0 * t2 + 24.0 * t4);
        let xiia = sec / (5040.0 * nu7) * (61.0 + 662.0 * t2 + 1320.0 * t4 + 720.0 * t6);

        let de = point.easting - self.origin.false_easting;
        let de2 = de * de;
        let latitude = phi_f - de2 * (vii - de2 * (viii - de2 * ix));
        let dlam = de * (x - de2 * (xi - de2 * (xii - de2 * xiia)));

        // Outside its domain the truncated series diverges instead of failing.
        if !latitude.is_finite()
            || latitude.abs() > FRAC_PI_2
            || !dlam.is_finite()
            || dlam.abs() > MAX_LONGITUDE_OFFSET_DEGREES.to_radians()
        {
            tracing::debug!(
                easting = point.easting,
                northing = point.northing,
                latitude,
                dlam,
                "grid inverse left the physical domain"
            );
            return Err(ConvertError::Convergence {
                stage: SERIES_DOMAIN,
                iterations,
            });
        }

        Ok(GeodeticPoint {
            latitude,
            longitude: self.origin.lon0 + dlam,
            height: 0.0,
            ellipsoid: self.ellipsoid.tag,
        })
    }

    fn ellipsoid(&self) -> &EllipsoidParameters {
        &self.ellipsoid
    }
}
