use pyo3::prelude::*;

mod convert;

/// Register all Python-visible functions.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(convert::get_easting_northing_from_lat_long, m)?)?;
    m.add_function(wrap_pyfunction!(convert::get_lat_long_from_easting_northing, m)?)?;
    m.add_function(wrap_pyfunction!(convert::wgs84_to_osgb36, m)?)?;
    Ok(())
}
