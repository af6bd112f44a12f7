use super::{GeoPoint, Vec3};

/// A zero-length vector was passed where a direction was required.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DegenerateVectorError;

impl std::fmt::Display for DegenerateVectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "zero-length vector has no direction on the sphere")
    }
}

impl std::error::Error for DegenerateVectorError {}

/// Converts a point in the sphere's local (un-rotated) frame to a
/// geographic coordinate.
///
/// Latitude is `asin(y/r)`; longitude is `atan2(z, -x)`. The longitude
/// sign convention matches the globe texture seam so that lat/lng (0, 0)
/// lands on the expected texture point; [`geo_to_unit`] is its exact
/// inverse, so nothing outside this pair depends on the convention.
///
/// Callers holding a world-space point must apply the inverse of the
/// sphere's rotation first.
pub fn sphere_to_geo(local: Vec3) -> Result<GeoPoint, DegenerateVectorError> {
    let r = local.length();
    if r <= f64::EPSILON {
        return Err(DegenerateVectorError);
    }
    let lat_deg = (local.y / r).clamp(-1.0, 1.0).asin().to_degrees();
    let lng_deg = local.z.atan2(-local.x).to_degrees();
    Ok(GeoPoint::new(lat_deg, lng_deg))
}

/// Unit direction from the sphere center toward a geographic coordinate.
/// Exact inverse of [`sphere_to_geo`].
pub fn geo_to_unit(geo: GeoPoint) -> Vec3 {
    let lat = geo.lat_deg.to_radians();
    let lng = geo.lng_deg.to_radians();
    Vec3::new(-lat.cos() * lng.cos(), lat.sin(), lat.cos() * lng.sin())
}

/// When the surface normal is this close to parallel with the reference
/// axis, the east/north basis switches to the fallback axis.
const POLAR_BASIS_GUARD: f64 = 0.99;

/// Local (east, north) tangent basis at a unit surface position.
///
/// The reference axis is the sphere's Y "up"; near the poles, where the
/// position is almost parallel to it, the X axis takes over so the cross
/// products stay well conditioned. Input must be a unit vector.
pub fn tangent_basis(unit: Vec3) -> (Vec3, Vec3) {
    let reference = if unit.y.abs() > POLAR_BASIS_GUARD {
        Vec3::new(1.0, 0.0, 0.0)
    } else {
        Vec3::new(0.0, 1.0, 0.0)
    };
    // The guard keeps the cross product comfortably away from zero.
    let east = reference
        .cross(unit)
        .normalized()
        .unwrap_or(Vec3::new(0.0, 0.0, 1.0));
    let north = unit.cross(east);
    (east, north)
}
