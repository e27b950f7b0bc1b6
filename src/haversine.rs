//! Great-circle distance between coordinates.
//!
//! Straight-line distance ignores roads; it is what the list shows as
//! "distance from you" and what the fallback router uses.

use crate::place::Coordinate;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
///
/// Non-finite inputs produce `NaN`; validate coordinates with
/// [`Coordinate::new`] first.
pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to one decimal place for display.
pub fn round_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

/// Convert distance in km to travel time in seconds at the given speed.
pub fn km_to_seconds(km: f64, speed_kmh: f64) -> i32 {
    let hours = km / speed_kmh;
    (hours * 3600.0).round() as i32
}
