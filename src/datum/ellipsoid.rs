use std::fmt;
use std::str::FromStr;

use crate::error::ConvertError;

/// The two ellipsoids the converter knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EllipsoidTag {
    /// Airy 1830, the OSGB36 ellipsoid.
    Airy1830,
    Wgs84,
}

impl fmt::Display for EllipsoidTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EllipsoidTag::Airy1830 => f.write_str("Airy1830"),
            EllipsoidTag::Wgs84 => f.write_str("WGS84"),
        }
    }
}

impl FromStr for EllipsoidTag {
    type Err = ConvertError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "airy1830" | "airy" | "osgb36" => Ok(EllipsoidTag::Airy1830),
            "wgs84" | "wgs 84" => Ok(EllipsoidTag::Wgs84),
            _ => Err(ConvertError::UnknownEllipsoid(name.to_string())),
        }
    }
}

/// Reference ellipsoid parameters.
///
/// Only the axes and the projection scale factor are stored; eccentricity and
/// the third flattening are always derived from `a` and `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipsoidParameters {
    pub tag: EllipsoidTag,
    /// Semi-major axis (metres)
    pub a: f64,
    /// Semi-minor axis (metres)
    pub b: f64,
    /// Central meridian scale factor used when this ellipsoid is projected
    pub f0: f64,
}

impl EllipsoidParameters {
    /// First eccentricity squared: (a² - b²) / a²
    pub fn e2(&self) -> f64 {
        (self.a * self.a - self.b * self.b) / (self.a * self.a)
    }

    /// Third flattening: (a - b) / (a + b)
    pub fn n(&self) -> f64 {
        (self.a - self.b) / (self.a + self.b)
    }

    /// Prime vertical radius of curvature at latitude `phi`.
    pub fn prime_vertical_radius(&self, phi: f64) -> f64 {
        let sin_phi = phi.sin();
        self.a / (1.0 - self.e2() * sin_phi * sin_phi).sqrt()
    }

    /// Look up a supported ellipsoid by tag.
    pub fn for_tag(tag: EllipsoidTag) -> Self {
        match tag {
            EllipsoidTag::Airy1830 => AIRY_1830,
            EllipsoidTag::Wgs84 => WGS84,
        }
    }

    /// Look up a supported ellipsoid by name, e.g. `"Airy1830"` or `"WGS84"`.
    pub fn named(name: &str) -> Result<Self, ConvertError> {
        name.parse().map(Self::for_tag)
    }
}

pub const AIRY_1830: EllipsoidParameters = EllipsoidParameters {
    tag: EllipsoidTag::Airy1830,
    a: 6_377_563.396,
    b: 6_356_256.910,
    f0: 0.999_601_271_7,
};

pub const WGS84: EllipsoidParameters = EllipsoidParameters {
    tag: EllipsoidTag::Wgs84,
    a: 6_378_137.0,
    b: 6_356_752.314_2,
    f0: 0.9996,
};
