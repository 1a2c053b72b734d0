//! Seven-parameter Helmert transform between earth-centred frames.
//!
//! Forward: x' = t + M·x with
//!
//! ```text
//!     | 1+s  -rz   ry |
//! M = |  rz  1+s  -rx |
//!     | -ry   rx  1+s |
//! ```
//!
//! The default inverse uses the small-angle transpose of M, which is accurate
//! to a few millimetres for the WGS84 -> OSGB36 parameters.

use crate::angle::arc_seconds_to_radians;
use crate::datum::ellipsoid::EllipsoidTag;
use crate::datum::CartesianPoint;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HelmertParameters {
    /// Translation (metres)
    pub translation: [f64; 3],
    /// Rotation about x, y, z (radians)
    pub rotation: [f64; 3],
    /// Scale stored as 1 + s
    pub scale: f64,
    /// Frame of the forward input
    pub source: EllipsoidTag,
    /// Frame of the forward output
    pub target: EllipsoidTag,
}

impl HelmertParameters {
    /// Build from the published units: metres, arc-seconds and parts per million.
    pub fn from_published(
        translation: [f64; 3],
        rotation_arc_seconds: [f64; 3],
        scale_ppm: f64,
        source: EllipsoidTag,
        target: EllipsoidTag,
    ) -> Self {
        Self {
            translation,
            rotation: rotation_arc_seconds.map(arc_seconds_to_radians),
            scale: 1.0 + scale_ppm * 1e-6,
            source,
            target,
        }
    }

    /// The WGS84 -> OSGB36 transform from the Ordnance Survey guide.
    pub fn wgs84_to_osgb36() -> Self {
        Self::from_published(
            [-446.448, 125.157, -542.060],
            [-0.1502, -0.2470, -0.8421],
            20.4894,
            EllipsoidTag::Wgs84,
            EllipsoidTag::Airy1830,
        )
    }

    fn matrix(&self) -> [[f64; 3]; 3] {
        let [rx, ry, rz] = self.rotation;
        let k = self.scale;
        [[k, -rz, ry], [rz, k, -rx], [-ry, rx, k]]
    }

    /// Source frame to target frame.
    pub fn forward(&self, point: &CartesianPoint) -> CartesianPoint {
        debug_assert_eq!(point.ellipsoid, self.source);
        let m = self.matrix();
        let [tx, ty, tz] = self.translation;
        let v = [point.x, point.y, point.z];
        CartesianPoint {
            x: tx + dot(&m[0], &v),
            y: ty + dot(&m[1], &v),
            z: tz + dot(&m[2], &v),
            ellipsoid: self.target,
        }
    }

    /// Target frame back to source frame, using the small-angle inverse
    ///
    /// ```text
    ///        | 1-s   rz  -ry |
    /// M⁻¹ ≈ | -rz  1-s   rx |
    ///        |  ry  -rx  1-s |
    /// ```
    ///
    /// applied to (x - t).
    pub fn inverse(&self, point: &CartesianPoint) -> CartesianPoint {
        debug_assert_eq!(point.ellipsoid, self.target);
        let [rx, ry, rz] = self.rotation;
        let k = 2.0 - self.scale;
        let m_inv = [[k, rz, -ry], [-rz, k, rx], [ry, -rx, k]];
        let v = self.untranslate(point);
        CartesianPoint {
            x: dot(&m_inv[0], &v),
            y: dot(&m_inv[1], &v),
            z: dot(&m_inv[2], &v),
            ellipsoid: self.source,
        }
    }

    /// Target frame back to source frame, solving M·x = (x' - t) exactly.
    pub fn inverse_exact(&self, point: &CartesianPoint) -> CartesianPoint {
        debug_assert_eq!(point.ellipsoid, self.target);
        let m = self.matrix();
        let v = self.untranslate(point);
        // Cramer's rule; M is within 1e-4 of the identity so det ≈ 1.
        let det = determinant(&m);
        let solve = |col: usize| {
            let mut mc = m;
            for (row, value) in mc.iter_mut().zip(v.iter()) {
                row[col] = *value;
            }
            determinant(&mc) / det
        };
        CartesianPoint {
            x: solve(0),
            y: solve(1),
            z: solve(2),
            ellipsoid: self.source,
        }
    }

    fn untranslate(&self, point: &CartesianPoint) -> [f64; 3] {
        let [tx, ty, tz] = self.translation;
        [point.x - tx, point.y - ty, point.z - tz]
    }
}

fn dot(row: &[f64; 3], v: &[f64; 3]) -> f64 {
    row[0] * v[0] + row[1] * v[1] + row[2] * v[2]
}

fn determinant(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}
