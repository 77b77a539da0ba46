//! Great-circle geometry and coordinate validity.

use wildtrack_core::{Error, Result};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Check that a (latitude, longitude) pair lies within the valid degree
/// ranges [-90, 90] and [-180, 180].
///
/// NaN coordinates fail the range check and are rejected too.
pub fn validate_coordinate(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::InvalidCoordinate {
            latitude,
            longitude,
        });
    }
    Ok(())
}

/// Great-circle distance between two points in kilometers.
///
/// Haversine formula on a sphere of radius [`EARTH_RADIUS_KM`]. Inputs are
/// degrees; the conversion to radians happens internally. The result is 0
/// for identical points, symmetric in its endpoints, and satisfies the
/// spherical triangle inequality.
///
/// # Arguments
/// * `lat1`, `lon1` - First point, degrees
/// * `lat2`, `lon2` - Second point, degrees
///
/// # Returns
/// Distance in km, or [`Error::InvalidCoordinate`] if any input is out of
/// range.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64> {
    validate_coordinate(lat1, lon1)?;
    validate_coordinate(lat2, lon2)?;

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);

    Ok(2.0 * EARTH_RADIUS_KM * a.sqrt().asin())
}
