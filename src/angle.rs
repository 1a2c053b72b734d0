//! Angle helpers: degrees-minutes-seconds and coordinate range checks.

use crate::error::ConvertError;

/// An angle split into whole degrees, whole minutes and decimal seconds.
///
/// Negative angles carry the sign on `degrees` only, so -1.5° is
/// `Dms { degrees: -2.0, minutes: 30.0, seconds: 0.0 }` (floor semantics).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Dms {
    pub fn new(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Split decimal degrees. Seconds are rounded to 4 decimal places.
    pub fn from_degrees(value: f64) -> Self {
        let mut degrees = value.floor();
        let minutes_total = 60.0 * (value - degrees);
        let mut minutes = minutes_total.floor();
        let mut seconds = (60.0 * (minutes_total - minutes) * 1e4).round() / 1e4;
        // Rounding can push seconds up to a full minute.
        if seconds >= 60.0 {
            seconds -= 60.0;
            minutes += 1.0;
        }
        if minutes >= 60.0 {
            minutes -= 60.0;
            degrees += 1.0;
        }
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    pub fn to_degrees(self) -> f64 {
        self.degrees + self.minutes / 60.0 + self.seconds / 3600.0
    }

    pub fn to_radians(self) -> f64 {
        self.to_degrees().to_radians()
    }
}

/// Convert arc-seconds to radians.
pub fn arc_seconds_to_radians(seconds: f64) -> f64 {
    (seconds / 3600.0).to_radians()
}

/// Check a latitude in degrees: finite and within [-90, 90].
pub fn check_latitude(latitude: f64) -> Result<f64, ConvertError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(ConvertError::InvalidCoordinate(format!(
            "latitude {latitude} is outside [-90, 90]"
        )));
    }
    Ok(latitude)
}

/// Check a longitude in degrees: finite and within (-180, 180].
pub fn check_longitude(longitude: f64) -> Result<f64, ConvertError> {
    if !longitude.is_finite() || longitude <= -180.0 || longitude > 180.0 {
        return Err(ConvertError::InvalidCoordinate(format!(
            "longitude {longitude} is outside (-180, 180]"
        )));
    }
    Ok(longitude)
}

/// Check that a metric quantity (height, easting, northing) is finite.
pub fn check_finite(name: &str, value: f64) -> Result<f64, ConvertError> {
    if !value.is_finite() {
        return Err(ConvertError::InvalidCoordinate(format!(
            "{name} must be finite, got {value}"
        )));
    }
    Ok(value)
}
