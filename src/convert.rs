//! CoordinateConverter: WGS84 latitude/longitude <-> OSGB36 National Grid.
//!
//! WGS84 -> grid:
//!   geodetic -> Cartesian (WGS84) -> Helmert forward -> Cartesian -> geodetic
//!   (Airy 1830) -> Transverse Mercator forward
//!
//! grid -> WGS84 runs the same chain backwards with the Helmert inverse.

use crate::config::ConverterConfig;
use crate::datum::cartesian::{cartesian_to_geodetic, geodetic_to_cartesian};
use crate::datum::ellipsoid::EllipsoidTag;
use crate::datum::{CartesianPoint, GeodeticPoint};
use crate::error::ConvertError;
use crate::proj::transverse_mercator::NationalGrid;
use crate::proj::{GridPoint, Projection};

pub struct CoordinateConverter {
    config: ConverterConfig,
    grid: NationalGrid,
}

impl CoordinateConverter {
    pub fn new(config: ConverterConfig) -> Self {
        let grid = NationalGrid::new(config.airy, config.origin, config.meridian_limits);
        Self { config, grid }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn grid(&self) -> &NationalGrid {
        &self.grid
    }

    /// WGS84 latitude/longitude (degrees) to OSGB36 easting/northing (metres).
    pub fn to_grid(&self, latitude: f64, longitude: f64) -> Result<GridPoint, ConvertError> {
        let wgs84 = GeodeticPoint::from_degrees(latitude, longitude, 0.0, EllipsoidTag::Wgs84)?;
        let osgb36 = self.shift_to_osgb36(&wgs84)?;
        self.grid.forward(&osgb36)
    }

    /// OSGB36 easting/northing (metres) to WGS84 (latitude, longitude) in degrees.
    pub fn to_latlong(&self, easting: f64, northing: f64) -> Result<(f64, f64), ConvertError> {
        let grid = GridPoint::checked(easting, northing)?;
        let mut osgb36 = self.grid.inverse(&grid)?;
        osgb36.height = self.config.grid_height;
        let wgs84 = self.shift_to_wgs84(&osgb36)?;
        Ok(wgs84.to_degrees())
    }

    /// Datum shift only: WGS84 latitude/longitude to OSGB36 latitude/longitude,
    /// both in degrees.
    pub fn wgs84_to_osgb36(&self, latitude: f64, longitude: f64) -> Result<(f64, f64), ConvertError> {
        let wgs84 = GeodeticPoint::from_degrees(latitude, longitude, 0.0, EllipsoidTag::Wgs84)?;
        Ok(self.shift_to_osgb36(&wgs84)?.to_degrees())
    }

    /// Datum shift only: OSGB36 latitude/longitude to WGS84 latitude/longitude,
    /// both in degrees.
    pub fn osgb36_to_wgs84(&self, latitude: f64, longitude: f64) -> Result<(f64, f64), ConvertError> {
        let osgb36 = GeodeticPoint::from_degrees(
            latitude,
            longitude,
            self.config.grid_height,
            EllipsoidTag::Airy1830,
        )?;
        Ok(self.shift_to_wgs84(&osgb36)?.to_degrees())
    }

    /// Geodetic to Cartesian on the point's own ellipsoid.
    pub fn geodetic_to_cartesian(&self, point: &GeodeticPoint) -> CartesianPoint {
        geodetic_to_cartesian(point, self.config.ellipsoid(point.ellipsoid))
    }

    /// Cartesian to geodetic on the point's own ellipsoid.
    pub fn cartesian_to_geodetic(&self, point: &CartesianPoint) -> Result<GeodeticPoint, ConvertError> {
        cartesian_to_geodetic(
            point,
            self.config.ellipsoid(point.ellipsoid),
            &self.config.latitude_limits,
        )
    }

    fn shift_to_osgb36(&self, point: &GeodeticPoint) -> Result<GeodeticPoint, ConvertError> {
        // Step 1: WGS84 geodetic -> WGS84 Cartesian
        let wgs84 = geodetic_to_cartesian(point, &self.config.wgs84);
        // Step 2: Helmert into the OSGB36 frame
        let osgb36 = self.config.helmert.forward(&wgs84);
        // Step 3: OSGB36 Cartesian -> Airy 1830 geodetic
        cartesian_to_geodetic(&osgb36, &self.config.airy, &self.config.latitude_limits)
    }

    fn shift_to_wgs84(&self, point: &GeodeticPoint) -> Result<GeodeticPoint, ConvertError> {
        let osgb36 = geodetic_to_cartesian(point, &self.config.airy);
        let wgs84 = self.config.helmert.inverse(&osgb36);
        cartesian_to_geodetic(&wgs84, &self.config.wgs84, &self.config.latitude_limits)
    }
}

impl Default for CoordinateConverter {
    fn default() -> Self {
        Self::new(ConverterConfig::osgb36())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Dms;
    use crate::iterate::IterationLimits;
    use approx::assert_relative_eq;

    /// Caister water tower, from the Ordnance Survey Helmert worked example.
    fn caister_wgs84() -> (f64, f64) {
        (
            Dms::new(52.0, 39.0, 28.723).to_degrees(),
            Dms::new(1.0, 42.0, 57.787).to_degrees(),
        )
    }

    const CAISTER_GRID: (f64, f64) = (651_409.903, 313_177.270);

    #[test]
    fn test_reference_point_to_grid() {
        let conv = CoordinateConverter::default();
        let (lat, lon) = caister_wgs84();
        let g = conv.to_grid(lat, lon).unwrap();
        assert_relative_eq!(g.easting, CAISTER_GRID.0, epsilon = 0.05);
        assert_relative_eq!(g.northing, CAISTER_GRID.1, epsilon = 0.05);
    }

    #[test]
    fn test_reference_point_to_latlong() {
        let conv = CoordinateConverter::default();
        let (lat, lon) = caister_wgs84();
        let (lat2, lon2) = conv.to_latlong(CAISTER_GRID.0, CAISTER_GRID.1).unwrap();
        // 1e-6° is ~0.1 m
        assert_relative_eq!(lat2, lat, epsilon = 1e-6);
        assert_relative_eq!(lon2, lon, epsilon = 1e-6);
    }

    #[test]
    fn test_reference_point_datum_shift() {
        let conv = CoordinateConverter::default();
        let (lat, lon) = caister_wgs84();
        let (os_lat, os_lon) = conv.wgs84_to_osgb36(lat, lon).unwrap();
        assert_relative_eq!(os_lat, Dms::new(52.0, 39.0, 27.2531).to_degrees(), epsilon = 1e-6);
        assert_relative_eq!(os_lon, Dms::new(1.0, 43.0, 4.5177).to_degrees(), epsilon = 1e-6);

        let (lat2, lon2) = conv.osgb36_to_wgs84(os_lat, os_lon).unwrap();
        assert_relative_eq!(lat2, lat, epsilon = 1e-7);
        assert_relative_eq!(lon2, lon, epsilon = 1e-7);
    }

    #[test]
    fn test_roundtrip_across_great_britain() {
        let conv = CoordinateConverter::default();
        let cases: &[(f64, f64)] = &[
            (51.5, -0.1),   // London
            (57.0, -5.0),   // Highlands
            (50.1, -5.5),   // Cornwall
            (58.6, -3.0),   // Thurso
            (52.2, 1.7),    // East Anglia coast
            (55.95, -3.19), // Edinburgh
            (60.15, -1.15), // Lerwick
        ];
        for &(lat, lon) in cases {
            let g = conv.to_grid(lat, lon).unwrap();
            let (lat2, lon2) = conv.to_latlong(g.easting, g.northing).unwrap();
            assert_relative_eq!(lat2, lat, epsilon = 1e-5);
            assert_relative_eq!(lon2, lon, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_grid_sanity_london() {
        let conv = CoordinateConverter::default();
        let g = conv.to_grid(51.5, -0.1276).unwrap();
        assert!(g.easting > 529_000.0 && g.easting < 531_000.0, "easting = {}", g.easting);
        assert!(g.northing > 179_000.0 && g.northing < 180_500.0, "northing = {}", g.northing);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let conv = CoordinateConverter::default();
        assert!(matches!(
            conv.to_grid(91.0, 0.0),
            Err(ConvertError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            conv.to_grid(52.0, f64::NAN),
            Err(ConvertError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            conv.to_latlong(f64::INFINITY, 0.0),
            Err(ConvertError::InvalidCoordinate(_))
        ));
        assert!(conv.osgb36_to_wgs84(-90.5, 0.0).is_err());
    }

    #[test]
    fn test_implausible_grid_is_convergence_error() {
        let conv = CoordinateConverter::default();
        assert!(matches!(
            conv.to_latlong(400_000.0, 1.0e7),
            Err(ConvertError::Convergence { .. })
        ));
        assert!(matches!(
            conv.to_latlong(8_400_000.0, 300_000.0),
            Err(ConvertError::Convergence { .. })
        ));
    }

    #[test]
    fn test_grid_follows_config() {
        let config = ConverterConfig::osgb36().with_meridian_limits(IterationLimits::new(1e-5, 1));
        let conv = CoordinateConverter::new(config);
        assert_eq!(conv.grid().origin(), &conv.config().origin);
        assert_eq!(conv.grid().ellipsoid(), &conv.config().airy);
        let err = conv
            .grid()
            .inverse(&GridPoint::new(400_000.0, 500_000.0))
            .unwrap_err();
        assert!(matches!(err, ConvertError::Convergence { iterations: 1, .. }));
    }

    #[test]
    fn test_starved_latitude_solve() {
        let config = ConverterConfig::osgb36().with_latitude_limits(IterationLimits::new(1e-12, 1));
        let conv = CoordinateConverter::new(config);
        // After the Helmert shift the point is ~50 m off the Airy ellipsoid, so
        // one step cannot settle the latitude.
        let err = conv.to_grid(52.0, -1.0).unwrap_err();
        assert!(matches!(err, ConvertError::Convergence { iterations: 1, .. }));
    }

    #[test]
    fn test_cartesian_roundtrip_uses_point_ellipsoid() {
        let conv = CoordinateConverter::default();
        let p = GeodeticPoint::from_degrees(53.0, -2.5, 120.0, EllipsoidTag::Airy1830).unwrap();
        let c = conv.geodetic_to_cartesian(&p);
        assert_eq!(c.ellipsoid, EllipsoidTag::Airy1830);
        let back = conv.cartesian_to_geodetic(&c).unwrap();
        assert_relative_eq!(back.latitude, p.latitude, epsilon = 1e-11);
        assert_relative_eq!(back.longitude, p.longitude, epsilon = 1e-12);
        assert_relative_eq!(back.height, 120.0, epsilon = 1e-4);
    }
}
