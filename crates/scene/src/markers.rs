use foundation::DisjointSet;
use foundation::math::{GeoPoint, Vec2, Vec3, geo_to_unit, haversine_km, tangent_basis};

use crate::city::CityId;
use crate::world::{EmptyCitySetError, World};

/// Tunables for marker clustering and spread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerConfig {
    /// Cities closer than this merge into one cluster (great-circle km).
    pub cluster_threshold_km: f64,
    /// Spread radius as a multiple of the marker's visual radius.
    pub spread_multiplier: f64,
    /// Marker visual radius in world units (sphere radius = 1).
    pub marker_radius: f64,
    /// Markers float this far above the surface, matching the click
    /// targets' altitude.
    pub surface_altitude: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            cluster_threshold_km: 120.0,
            spread_multiplier: 2.0,
            marker_radius: 0.012,
            surface_altitude: 0.025,
        }
    }
}

/// Visual treatment of a marker, set by the interaction layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkerStyle {
    Normal,
    Favorite,
}

/// Where one visible city's marker goes, in the sphere's local frame.
///
/// Derived data: recomputed whenever the visible set changes, never
/// persisted. `offset` is in tangent-plane units (east, north) at
/// `base_world`; `world` is the fully resolved marker center.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPlacement {
    pub city: CityId,
    pub base_world: Vec3,
    pub offset: Vec2,
    pub world: Vec3,
    pub style: MarkerStyle,
}

/// Spreads mutually-close city markers so each stays pickable.
///
/// Clustering unions every pair of visible cities whose great-circle
/// distance is strictly below the threshold. Members of a cluster of
/// size n are sorted by `(name, country)` and member i sits at angle
/// `2π·i/n` on the local east/north tangent plane, at radius
/// `marker_radius × spread_multiplier`. Singletons get a zero offset.
///
/// Determinism contract: the output is sorted by `CityId` and depends
/// only on the input set, not its order — re-running on an unchanged
/// visible set reproduces identical placements.
pub fn declutter(
    world: &World,
    visible: &[CityId],
    config: &MarkerConfig,
) -> Result<Vec<MarkerPlacement>, EmptyCitySetError> {
    if visible.is_empty() {
        return Err(EmptyCitySetError);
    }

    let mut members: Vec<CityId> = visible.to_vec();
    members.sort();
    members.dedup();
    let cities: Vec<_> = members
        .iter()
        .filter_map(|&id| world.city(id).map(|c| (id, c)))
        .collect();

    let mut set = DisjointSet::new(cities.len());
    for i in 0..cities.len() {
        for j in (i + 1)..cities.len() {
            if haversine_km(cities[i].1.position, cities[j].1.position)
                < config.cluster_threshold_km
            {
                set.union(i, j);
            }
        }
    }

    let spread = config.marker_radius * config.spread_multiplier;
    let mut placements: Vec<MarkerPlacement> = Vec::with_capacity(cities.len());
    for group in set.groups() {
        if group.len() < 2 {
            let (id, city) = cities[group[0]];
            placements.push(place(id, city.position, Vec2::ZERO, config));
            continue;
        }

        let mut cluster: Vec<_> = group.iter().map(|&i| cities[i]).collect();
        cluster.sort_by(|(_, a), (_, b)| {
            (a.name.as_str(), a.country.as_str()).cmp(&(b.name.as_str(), b.country.as_str()))
        });

        let n = cluster.len() as f64;
        for (i, (id, city)) in cluster.into_iter().enumerate() {
            let theta = std::f64::consts::TAU * i as f64 / n;
            let offset = Vec2::new(theta.cos(), theta.sin()) * spread;
            placements.push(place(id, city.position, offset, config));
        }
    }

    placements.sort_by_key(|p| p.city);
    Ok(placements)
}

fn place(city: CityId, position: GeoPoint, offset: Vec2, config: &MarkerConfig) -> MarkerPlacement {
    let unit = geo_to_unit(position);
    let base_world = unit * (1.0 + config.surface_altitude);
    let (east, north) = tangent_basis(unit);
    let world = base_world + east * offset.x + north * offset.y;
    MarkerPlacement {
        city,
        base_world,
        offset,
        world,
        style: MarkerStyle::Normal,
    }
}
