//! Vectorised conversion over sequences of points.
//!
//! Every batch operation applies the scalar conversion point by point and
//! preserves input order and length. Failure policy:
//!
//! - `*_batch`, `*_arrays` and `par_*` are fail-fast: the whole batch fails
//!   with a [`BatchError`] naming the lowest failing index.
//! - `*_each` reports every point individually.
//!
//! The rayon variants return exactly what the sequential ones do.

use ndarray::{Array1, ArrayView1};
use rayon::prelude::*;

use crate::convert::CoordinateConverter;
use crate::error::{BatchError, ConvertError};
use crate::proj::GridPoint;

/// Collect per-point results, failing on the lowest failing index.
fn first_failure<T, I>(results: I) -> Result<Vec<T>, BatchError>
where
    I: IntoIterator<Item = Result<T, ConvertError>>,
{
    results
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.map_err(|e| BatchError::new(i, e)))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| tracing::debug!(index = e.index, error = %e.source, "batch aborted"))
}

fn check_lengths(a: usize, b: usize, names: (&str, &str)) -> Result<(), BatchError> {
    if a != b {
        return Err(BatchError::new(
            a.min(b),
            ConvertError::Shape(format!(
                "{} and {} must have same length, got {} and {}",
                names.0, names.1, a, b
            )),
        ));
    }
    Ok(())
}

impl CoordinateConverter {
    /// Convert WGS84 (latitude, longitude) pairs in degrees to grid points.
    #[tracing::instrument(level = "debug", skip_all, fields(points = points.len()))]
    pub fn to_grid_batch(&self, points: &[(f64, f64)]) -> Result<Vec<GridPoint>, BatchError> {
        first_failure(points.iter().map(|&(lat, lon)| self.to_grid(lat, lon)))
    }

    /// Convert grid points to WGS84 (latitude, longitude) pairs in degrees.
    #[tracing::instrument(level = "debug", skip_all, fields(points = points.len()))]
    pub fn to_latlong_batch(&self, points: &[GridPoint]) -> Result<Vec<(f64, f64)>, BatchError> {
        first_failure(points.iter().map(|g| self.to_latlong(g.easting, g.northing)))
    }

    /// Like [`to_grid_batch`](Self::to_grid_batch), but one result per point.
    pub fn to_grid_each(&self, points: &[(f64, f64)]) -> Vec<Result<GridPoint, ConvertError>> {
        points
            .iter()
            .map(|&(lat, lon)| self.to_grid(lat, lon))
            .collect()
    }

    /// Like [`to_latlong_batch`](Self::to_latlong_batch), but one result per point.
    pub fn to_latlong_each(&self, points: &[GridPoint]) -> Vec<Result<(f64, f64), ConvertError>> {
        points
            .iter()
            .map(|g| self.to_latlong(g.easting, g.northing))
            .collect()
    }

    /// Parallel [`to_grid_batch`](Self::to_grid_batch) on the rayon pool.
    #[tracing::instrument(level = "debug", skip_all, fields(points = points.len()))]
    pub fn par_to_grid(&self, points: &[(f64, f64)]) -> Result<Vec<GridPoint>, BatchError> {
        let results: Vec<_> = points
            .par_iter()
            .map(|&(lat, lon)| self.to_grid(lat, lon))
            .collect();
        first_failure(results)
    }

    /// Parallel [`to_latlong_batch`](Self::to_latlong_batch) on the rayon pool.
    #[tracing::instrument(level = "debug", skip_all, fields(points = points.len()))]
    pub fn par_to_latlong(&self, points: &[GridPoint]) -> Result<Vec<(f64, f64)>, BatchError> {
        let results: Vec<_> = points
            .par_iter()
            .map(|g| self.to_latlong(g.easting, g.northing))
            .collect();
        first_failure(results)
    }

    /// Array form: separate latitude and longitude arrays in, separate
    /// easting and northing arrays out.
    #[tracing::instrument(level = "debug", skip_all, fields(points = latitude.len()))]
    pub fn to_grid_arrays(
        &self,
        latitude: ArrayView1<f64>,
        longitude: ArrayView1<f64>,
    ) -> Result<(Array1<f64>, Array1<f64>), BatchError> {
        check_lengths(latitude.len(), longitude.len(), ("latitude", "longitude"))?;
        let points = first_failure(
            latitude
                .iter()
                .zip(longitude.iter())
                .map(|(&lat, &lon)| self.to_grid(lat, lon)),
        )?;
        let (eastings, northings): (Vec<f64>, Vec<f64>) =
            points.into_iter().map(|g| (g.easting, g.northing)).unzip();
        Ok((Array1::from(eastings), Array1::from(northings)))
    }

    /// Array form of [`to_latlong_batch`](Self::to_latlong_batch).
    #[tracing::instrument(level = "debug", skip_all, fields(points = easting.len()))]
    pub fn to_latlong_arrays(
        &self,
        easting: ArrayView1<f64>,
        northing: ArrayView1<f64>,
    ) -> Result<(Array1<f64>, Array1<f64>), BatchError> {
        check_lengths(easting.len(), northing.len(), ("easting", "northing"))?;
        let points = first_failure(
            easting
                .iter()
                .zip(northing.iter())
                .map(|(&e, &n)| self.to_latlong(e, n)),
        )?;
        let (lats, lons): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        Ok((Array1::from(lats), Array1::from(lons)))
    }
}
