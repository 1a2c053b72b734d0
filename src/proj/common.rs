//! Shared projection helpers: scaled radii of curvature and the meridional arc.

use crate::datum::ellipsoid::EllipsoidParameters;

/// Radii of curvature at a latitude, scaled by the projection's F0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Curvature {
    /// Prime vertical radius ν = aF0 / sqrt(1 - e² sin²φ)
    pub nu: f64,
    /// Meridional radius ρ = aF0 (1 - e²) / (1 - e² sin²φ)^1.5
    pub rho: f64,
    /// η² = ν/ρ - 1
    pub eta2: f64,
}

pub fn curvature(ellipsoid: &EllipsoidParameters, phi: f64) -> Curvature {
    let e2 = ellipsoid.e2();
    let af0 = ellipsoid.a * ellipsoid.f0;
    let sin_phi = phi.sin();
    let d = 1.0 - e2 * sin_phi * sin_phi;
    let nu = af0 / d.sqrt();
    let rho = af0 * (1.0 - e2) / (d * d.sqrt());
    Curvature {
        nu,
        rho,
        eta2: nu / rho - 1.0,
    }
}

/// Meridional arc length (scaled by F0) from latitude `phi0` to `phi`.
/// Uses the four-term series in powers of n (third flattening).
pub fn meridional_arc(ellipsoid: &EllipsoidParameters, phi: f64, phi0: f64) -> f64 {
    let n = ellipsoid.n();
    let n2 = n * n;
    let n3 = n2 * n;

    let dphi = phi - phi0;
    let sphi = phi + phi0;

    let m0 = (1.0 + n + 5.0 / 4.0 * n2 + 5.0 / 4.0 * n3) * dphi;
    let m2 = (3.0 * n + 3.0 * n2 + 21.0 / 8.0 * n3) * dphi.sin() * sphi.cos();
    let m4 = (15.0 / 8.0 * n2 + 15.0 / 8.0 * n3) * (2.0 * dphi).sin() * (2.0 * sphi).cos();
    let m6 = 35.0 / 24.0 * n3 * (3.0 * dphi).sin() * (3.0 * sphi).cos();

    ellipsoid.b * ellipsoid.f0 * (m0 - m2 + m4 - m6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::ellipsoid::AIRY_1830;
    use approx::assert_relative_eq;

    #[test]
    fn test_meridional_arc_at_origin() {
        let phi0 = 49.0_f64.to_radians();
        assert_relative_eq!(meridional_arc(&AIRY_1830, phi0, phi0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_meridional_arc_one_degree() {
        // One degree of latitude around 50°N is ~111.2 km.
        let m = meridional_arc(&AIRY_1830, 50.0_f64.to_radians(), 49.0_f64.to_radians());
        assert!(m > 111_000.0 && m < 111_400.0, "arc = {m}");
    }

    #[test]
    fn test_meridional_arc_is_antisymmetric() {
        let phi0 = 49.0_f64.to_radians();
        let phi = 53.0_f64.to_radians();
        let up = meridional_arc(&AIRY_1830, phi, phi0);
        let down = meridional_arc(&AIRY_1830, phi0, phi);
        assert_relative_eq!(up, -down, epsilon = 1e-6);
    }

    #[test]
    fn test_curvature_ordering() {
        // ν ≥ ρ everywhere, equal only at the poles.
        for deg in [0.0_f64, 30.0, 52.0, 60.0] {
            let c = curvature(&AIRY_1830, deg.to_radians());
            assert!(c.nu >= c.rho);
            assert!(c.eta2 >= 0.0);
        }
        let equator = curvature(&AIRY_1830, 0.0);
        assert_relative_eq!(equator.nu, AIRY_1830.a * AIRY_1830.f0, epsilon = 1e-6);
    }
}
