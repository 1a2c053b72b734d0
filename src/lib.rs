//! WGS84 <-> OSGB36 National Grid coordinate conversion.
//!
//! The free functions [`to_grid`] and [`to_latlong`] use a converter built
//! once from the published constants. Build a [`CoordinateConverter`]
//! directly to pass the context explicitly or to use the batch operations.

use std::sync::LazyLock;

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod angle;
pub mod batch;
pub mod config;
pub mod convert;
pub mod datum;
pub mod error;
pub mod iterate;
pub mod proj;
#[cfg(feature = "python")]
mod py;

pub use config::ConverterConfig;
pub use convert::CoordinateConverter;
pub use error::{BatchError, ConvertError};
pub use proj::GridPoint;

static DEFAULT_CONVERTER: LazyLock<CoordinateConverter> =
    LazyLock::new(CoordinateConverter::default);

/// The process-wide converter over the published OSGB36 constants.
pub fn default_converter() -> &'static CoordinateConverter {
    &DEFAULT_CONVERTER
}

/// WGS84 latitude/longitude (degrees) to OSGB36 easting/northing (metres).
pub fn to_grid(latitude: f64, longitude: f64) -> Result<GridPoint, ConvertError> {
    DEFAULT_CONVERTER.to_grid(latitude, longitude)
}

/// OSGB36 easting/northing (metres) to WGS84 (latitude, longitude) in degrees.
pub fn to_latlong(easting: f64, northing: f64) -> Result<(f64, f64), ConvertError> {
    DEFAULT_CONVERTER.to_latlong(easting, northing)
}

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
