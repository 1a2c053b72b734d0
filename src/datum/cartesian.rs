//! Geodetic <-> Cartesian conversion on a single ellipsoid.
//!
//! The forward direction is closed form. The inverse solves for latitude with
//! a bounded fixed-point iteration; longitude and height follow directly.

use std::f64::consts::{FRAC_PI_4, PI};

use crate::datum::ellipsoid::EllipsoidParameters;
use crate::datum::{CartesianPoint, GeodeticPoint};
use crate::error::ConvertError;
use crate::iterate::{fixed_point, FixedPoint, IterationLimits, Step};

pub const LATITUDE_SOLVE: &str = "Cartesian to geodetic latitude solve";

/// Geodetic (φ, λ, H) to earth-centred (x, y, z) on `ellipsoid`.
///
/// ν here is the unscaled a / sqrt(1 - e² sin²φ); the grid scale factor F0
/// only enters the Transverse Mercator series.
pub fn geodetic_to_cartesian(
    point: &GeodeticPoint,
    ellipsoid: &EllipsoidParameters,
) -> CartesianPoint {
    let (sin_phi, cos_phi) = point.latitude.sin_cos();
    let (sin_lam, cos_lam) = point.longitude.sin_cos();
    let nu = ellipsoid.prime_vertical_radius(point.latitude);
    let h = point.height;

    CartesianPoint {
        x: (nu + h) * cos_phi * cos_lam,
        y: (nu + h) * cos_phi * sin_lam,
        z: ((1.0 - ellipsoid.e2()) * nu + h) * sin_phi,
        ellipsoid: ellipsoid.tag,
    }
}

/// Earth-centred (x, y, z) to geodetic (φ, λ, H) on `ellipsoid`.
///
/// Fails with [`ConvertError::Convergence`] if the latitude has not settled to
/// within `limits.tolerance` radians after `limits.max_iterations` steps.
pub fn cartesian_to_geodetic(
    point: &CartesianPoint,
    ellipsoid: &EllipsoidParameters,
    limits: &IterationLimits,
) -> Result<GeodeticPoint, ConvertError> {
    let e2 = ellipsoid.e2();
    let p = point.polar_distance();
    let z = point.z;

    let initial = z.atan2(p * (1.0 - e2));
    let solved = fixed_point(initial, limits.max_iterations, |phi| {
        let nu = ellipsoid.prime_vertical_radius(phi);
        let next = (z + e2 * nu * phi.sin()).atan2(p);
        if (next - phi).abs() < limits.tolerance {
            Step::Converged(next)
        } else {
            Step::Continue(next)
        }
    });

    let latitude = match solved {
        FixedPoint::Converged { value, iterations } => {
            tracing::trace!(iterations, "latitude solve converged");
            value
        }
        FixedPoint::Exhausted { last, iterations } => {
            tracing::debug!(
                stage = LATITUDE_SOLVE,
                iterations,
                last,
                "latitude solve did not converge"
            );
            return Err(ConvertError::Convergence {
                stage: LATITUDE_SOLVE,
                iterations,
            });
        }
    };

    let nu = ellipsoid.prime_vertical_radius(latitude);
    // p / cos φ loses precision towards the poles, z / sin φ towards the equator.
    let height = if latitude.abs() < FRAC_PI_4 {
        p / latitude.cos() - nu
    } else {
        z / latitude.sin() - (1.0 - e2) * nu
    };

    // atan2 gives -π for y = -0.0, x < 0; longitude is kept in (-π, π].
    let mut longitude = point.y.atan2(point.x);
    if longitude == -PI {
        longitude = PI;
    }

    Ok(GeodeticPoint {
        latitude,
        longitude,
        height,
        ellipsoid: ellipsoid.tag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::ellipsoid::{EllipsoidTag, AIRY_1830, WGS84};
    use approx::assert_relative_eq;

    const LIMITS: IterationLimits = IterationLimits::new(1e-12, 10);

    #[test]
    fn test_equator_prime_meridian() {
        let p = GeodeticPoint::from_degrees(0.0, 0.0, 0.0, EllipsoidTag::Wgs84).unwrap();
        let c = geodetic_to_cartesian(&p, &WGS84);
        assert_relative_eq!(c.x, WGS84.a, epsilon = 1e-6);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(c.z, 0.0, epsilon = 1e-6);
        assert_eq!(c.ellipsoid, EllipsoidTag::Wgs84);
    }

    #[test]
    fn test_axis_convention() {
        // 90°E lies on +y, the north pole on +z at the semi-minor axis.
        let east = GeodeticPoint::from_degrees(0.0, 90.0, 0.0, EllipsoidTag::Wgs84).unwrap();
        let c = geodetic_to_cartesian(&east, &WGS84);
        assert_relative_eq!(c.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(c.y, WGS84.a, epsilon = 1e-6);

        let pole = GeodeticPoint::from_degrees(90.0, 0.0, 0.0, EllipsoidTag::Wgs84).unwrap();
        let c = geodetic_to_cartesian(&pole, &WGS84);
        assert_relative_eq!(c.z, WGS84.b, epsilon = 1e-3);
    }

    #[test]
    fn test_known_airy_point() {
        let p = GeodeticPoint::from_degrees(52.0, -1.0, 0.0, EllipsoidTag::Airy1830).unwrap();
        let c = geodetic_to_cartesian(&p, &AIRY_1830);
        assert_relative_eq!(c.x, 3_933_978.084, epsilon = 1e-3);
        assert_relative_eq!(c.y, -68_667.843, epsilon = 1e-3);
        assert_relative_eq!(c.z, 5_002_436.308, epsilon = 1e-3);
    }

    #[test]
    fn test_roundtrip() {
        let cases: &[(f64, f64, f64)] = &[
            (52.0, -1.0, 100.0),
            (49.9, -6.3, 0.0),
            (60.8, -0.8, 1_343.0),
            (0.0, 0.0, 0.0),
            (-33.9, 151.2, 58.0),
            (89.5, 45.0, -30.0),
            (51.5, 179.9, 10_000.0),
        ];
        for &(lat, lon, h) in cases {
            let p = GeodeticPoint::from_degrees(lat, lon, h, EllipsoidTag::Wgs84).unwrap();
            let c = geodetic_to_cartesian(&p, &WGS84);
            let back = cartesian_to_geodetic(&c, &WGS84, &LIMITS).unwrap();
            assert_relative_eq!(back.latitude, p.latitude, epsilon = 1e-11);
            assert_relative_eq!(back.longitude, p.longitude, epsilon = 1e-12);
            assert_relative_eq!(back.height, h, epsilon = 1e-4);
            assert_eq!(back.ellipsoid, EllipsoidTag::Wgs84);
        }
    }

    #[test]
    fn test_pole() {
        let c = CartesianPoint::new(0.0, 0.0, WGS84.b + 10.0, EllipsoidTag::Wgs84);
        let g = cartesian_to_geodetic(&c, &WGS84, &LIMITS).unwrap();
        assert_relative_eq!(g.latitude, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(g.height, 10.0, epsilon = 1e-6);

        let c = CartesianPoint::new(0.0, 0.0, -(WGS84.b + 10.0), EllipsoidTag::Wgs84);
        let g = cartesian_to_geodetic(&c, &WGS84, &LIMITS).unwrap();
        assert_relative_eq!(g.latitude, -std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(g.height, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_antimeridian_longitude_is_positive() {
        let c = CartesianPoint::new(-WGS84.a, -0.0, 0.0, EllipsoidTag::Wgs84);
        let g = cartesian_to_geodetic(&c, &WGS84, &LIMITS).unwrap();
        assert_eq!(g.longitude, PI);
        assert!(crate::angle::check_longitude(g.longitude.to_degrees()).is_ok());
    }

    #[test]
    fn test_iteration_cap_is_enforced() {
        // With height off the ellipsoid the initial guess is not exact, so a
        // single step cannot meet the tolerance.
        let p = GeodeticPoint::from_degrees(52.0, -1.0, 5_000.0, EllipsoidTag::Wgs84).unwrap();
        let c = geodetic_to_cartesian(&p, &WGS84);
        let err = cartesian_to_geodetic(&c, &WGS84, &IterationLimits::new(1e-12, 1)).unwrap_err();
        assert_eq!(
            err,
            ConvertError::Convergence {
                stage: LATITUDE_SOLVE,
                iterations: 1
            }
        );
    }
}
