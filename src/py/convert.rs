//! PyO3 bindings for batch WGS84 <-> National Grid conversion.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::default_converter;

type ArrayPair<'py> = (Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>);

/// Convert WGS84 latitude/longitude arrays (degrees) to OSGB36 easting/northing.
///
/// Args:
///     latitude: 1D array of latitudes.
///     longitude: 1D array of longitudes.
///
/// Returns:
///     Tuple of (easting, northing) arrays in metres.
///
/// Raises:
///     ValueError: if the arrays differ in length or any point fails to
///         convert; the message names the first failing index.
#[pyfunction]
#[pyo3(signature = (latitude, longitude))]
pub fn get_easting_northing_from_lat_long<'py>(
    py: Python<'py>,
    latitude: PyReadonlyArray1<'py, f64>,
    longitude: PyReadonlyArray1<'py, f64>,
) -> PyResult<ArrayPair<'py>> {
    let lat = latitude.as_array().to_owned();
    let lon = longitude.as_array().to_owned();

    let (eastings, northings) = py
        .allow_threads(move || default_converter().to_grid_arrays(lat.view(), lon.view()))
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok((
        PyArray1::from_owned_array(py, eastings),
        PyArray1::from_owned_array(py, northings),
    ))
}

/// Convert OSGB36 easting/northing arrays (metres) to WGS84 latitude/longitude.
///
/// Returns:
///     Tuple of (latitude, longitude) arrays in degrees.
#[pyfunction]
#[pyo3(signature = (easting, northing))]
pub fn get_lat_long_from_easting_northing<'py>(
    py: Python<'py>,
    easting: PyReadonlyArray1<'py, f64>,
    northing: PyReadonlyArray1<'py, f64>,
) -> PyResult<ArrayPair<'py>> {
    let e = easting.as_array().to_owned();
    let n = northing.as_array().to_owned();

    let (lats, lons) = py
        .allow_threads(move || default_converter().to_latlong_arrays(e.view(), n.view()))
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok((
        PyArray1::from_owned_array(py, lats),
        PyArray1::from_owned_array(py, lons),
    ))
}

/// Datum shift only: WGS84 latitude/longitude to OSGB36 latitude/longitude,
/// all in degrees.
#[pyfunction]
#[pyo3(signature = (latitude, longitude))]
pub fn wgs84_to_osgb36<'py>(
    py: Python<'py>,
    latitude: PyReadonlyArray1<'py, f64>,
    longitude: PyReadonlyArray1<'py, f64>,
) -> PyResult<ArrayPair<'py>> {
    let lat = latitude.as_array();
    let lon = longitude.as_array();
    if lat.len() != lon.len() {
        return Err(PyValueError::new_err(format!(
            "latitude and longitude must have same length, got {} and {}",
            lat.len(),
            lon.len()
        )));
    }

    let converter = default_converter();
    let (os_lat, os_lon): (Vec<f64>, Vec<f64>) = lat
        .iter()
        .zip(lon.iter())
        .enumerate()
        .map(|(i, (&la, &lo))| {
            converter
                .wgs84_to_osgb36(la, lo)
                .map_err(|e| PyValueError::new_err(format!("point {i}: {e}")))
        })
        .collect::<PyResult<Vec<_>>>()?
        .into_iter()
        .unzip();

    Ok((
        PyArray1::from_vec(py, os_lat),
        PyArray1::from_vec(py, os_lon),
    ))
}
