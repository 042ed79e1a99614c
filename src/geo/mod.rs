use crate::models::courier::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Courier-to-order matching radius, applied identically at assignment time
/// and when listing available orders.
pub const MATCH_RADIUS_KM: f64 = 5.0;

pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let h = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * central_angle
}

/// Boundary-inclusive: a point exactly `radius_km` away counts as within.
pub fn is_within_radius(a: &GeoPoint, b: &GeoPoint, radius_km: f64) -> bool {
    haversine_km(a, b) <= radius_km
}
