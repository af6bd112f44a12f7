use foundation::math::{Vec3, stable_total_cmp_f64};

use crate::city::CityId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn point_at(&self, t: f64) -> Vec3 {
        self.origin + self.dir * t
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerHit {
    pub city: CityId,
    pub distance: f64,
    pub point: Vec3,
}

/// Nearest forward intersection of a ray with a sphere, as a ray
/// parameter. `None` when the ray misses or the sphere is entirely
/// behind the origin.
pub fn ray_sphere_t(ray: Ray, center: Vec3, radius: f64) -> Option<f64> {
    let dir = ray.dir.normalized()?;
    let oc = ray.origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let near = -b - sqrt_disc;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sqrt_disc;
    if far >= 0.0 {
        return Some(far);
    }
    None
}

/// Where a ray meets the globe surface (sphere of `radius` at the
/// origin), if it does.
pub fn globe_hit_point(ray: Ray, radius: f64) -> Option<Vec3> {
    let dir = ray.dir.normalized()?;
    let t = ray_sphere_t(Ray::new(ray.origin, dir), Vec3::ZERO, radius)?;
    Some(ray.origin + dir * t)
}

/// Deterministic ray picking over marker hit-volumes.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - Hits at the same distance fall back to the lower `CityId`.
pub fn nearest_marker_hit(
    markers: &[(CityId, Vec3)],
    ray: Ray,
    hit_radius: f64,
) -> Option<MarkerHit> {
    let dir = ray.dir.normalized()?;
    let ray = Ray::new(ray.origin, dir);

    let mut best: Option<(f64, CityId)> = None;
    for &(city, center) in markers {
        let Some(t) = ray_sphere_t(ray, center, hit_radius) else {
            continue;
        };
        best = match best {
            None => Some((t, city)),
            Some((bt, bc)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| city.cmp(&bc));
                if ord.is_lt() { Some((t, city)) } else { Some((bt, bc)) }
            }
        };
    }

    let (t, city) = best?;
    Some(MarkerHit {
        city,
        distance: t,
        point: ray.point_at(t),
    })
}

#[cfg(test)]
mod tests {
    use super::{Ray, globe_hit_point, nearest_marker_hit, ray_sphere_t};
    use crate::city::CityId;
    use foundation::math::Vec3;

    fn toward_origin_from_x(x: f64) -> Ray {
        Ray::new(Vec3::new(x, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0))
    }

    #[test]
    fn ray_hits_unit_sphere_front_face() {
        let t = ray_sphere_t(toward_origin_from_x(3.0), Vec3::ZERO, 1.0).unwrap();
        assert!((t - 2.0).abs() < 1e-12);
        let point = globe_hit_point(toward_origin_from_x(3.0), 1.0).unwrap();
        assert_eq!(point, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn ray_misses_offset_sphere() {
        let ray = toward_origin_from_x(3.0);
        assert_eq!(ray_sphere_t(ray, Vec3::new(0.0, 5.0, 0.0), 1.0), None);
    }

    #[test]
    fn sphere_behind_origin_does_not_hit() {
        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray_sphere_t(ray, Vec3::ZERO, 1.0), None);
    }

    #[test]
    fn origin_inside_sphere_uses_exit_point() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let t = ray_sphere_t(ray, Vec3::ZERO, 1.0).unwrap();
        assert!((t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nearest_marker_wins() {
        let markers = vec![
            (CityId(0), Vec3::new(-1.0, 0.0, 0.0)),
            (CityId(1), Vec3::new(1.0, 0.0, 0.0)),
        ];
        let hit = nearest_marker_hit(&markers, toward_origin_from_x(3.0), 0.1).unwrap();
        assert_eq!(hit.city, CityId(1));
        assert!((hit.distance - 1.9).abs() < 1e-12);
    }

    #[test]
    fn equal_distance_breaks_ties_by_lower_id() {
        let markers = vec![
            (CityId(7), Vec3::new(1.0, 0.0, 0.0)),
            (CityId(2), Vec3::new(1.0, 0.0, 0.0)),
        ];
        let hit = nearest_marker_hit(&markers, toward_origin_from_x(3.0), 0.1).unwrap();
        assert_eq!(hit.city, CityId(2));
    }

    #[test]
    fn unnormalized_direction_is_accepted() {
        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(-10.0, 0.0, 0.0));
        let point = globe_hit_point(ray, 1.0).unwrap();
        assert_eq!(point, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn zero_direction_hits_nothing() {
        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::ZERO);
        assert_eq!(globe_hit_point(ray, 1.0), None);
        assert_eq!(nearest_marker_hit(&[], ray, 0.1), None);
    }
}
