/// Mean Earth radius (kilometers).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic coordinate in degrees.
///
/// Invariants: `lat_deg` in [-90, 90], `lng_deg` in [-180, 180]. Callers
/// with out-of-range longitudes go through [`GeoPoint::normalized`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lng_deg: f64) -> Self {
        debug_assert!((-90.0..=90.0).contains(&lat_deg), "lat out of range: {lat_deg}");
        debug_assert!(
            (-180.0..=180.0).contains(&lng_deg),
            "lng out of range: {lng_deg}"
        );
        Self { lat_deg, lng_deg }
    }

    /// Builds a point from unnormalized inputs: latitude clamped to the
    /// poles, longitude wrapped into [-180, 180].
    pub fn normalized(lat_deg: f64, lng_deg: f64) -> Self {
        Self {
            lat_deg: lat_deg.clamp(-90.0, 90.0),
            lng_deg: wrap_lng_deg(lng_deg),
        }
    }
}

/// Wraps a longitude into [-180, 180].
pub fn wrap_lng_deg(lng_deg: f64) -> f64 {
    let wrapped = (lng_deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

/// Great-circle distance between two points (haversine, kilometers).
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat_deg - a.lat_deg).to_radians();
    let d_lng = (b.lng_deg - a.lng_deg).to_radians();
    let lat1 = a.lat_deg.to_radians();
    let lat2 = b.lat_deg.to_radians();

    let sin_d_lat = (d_lat * 0.5).sin();
    let sin_d_lng = (d_lng * 0.5).sin();
    let h = sin_d_lat * sin_d_lat + lat1.cos() * lat2.cos() * sin_d_lng * sin_d_lng;
    // h can creep just past 1.0 near antipodes; clamp before the sqrt.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
