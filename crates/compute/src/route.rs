use foundation::math::{GeoPoint, haversine_km};
use scene::World;

use crate::plan::TripPlan;

/// Route estimate tunables. The time model is deliberately crude: a
/// single cruise speed plus a fixed per-leg overhead, not real flight
/// networks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RouteConfig {
    pub cruise_speed_kmh: f64,
    pub layover_hours: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            cruise_speed_kmh: 800.0,
            layover_hours: 0.6,
        }
    }
}

/// One hop between consecutive stops.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RouteLeg {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub distance_km: f64,
}

/// Trip summary, tagged by how far along the plan is so callers can
/// distinguish "start a trip" from "pick a second stop" from a real
/// route without probing numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum TripMetrics {
    /// No stops yet.
    NotStarted,
    /// One stop; a route needs one more.
    NeedSecondStop,
    Route {
        total_distance_km: f64,
        estimated_hours: f64,
        legs: Vec<RouteLeg>,
    },
}

impl TripMetrics {
    pub fn leg_count(&self) -> usize {
        match self {
            TripMetrics::Route { legs, .. } => legs.len(),
            _ => 0,
        }
    }
}

/// Great-circle metrics over an ordered stop list.
pub fn route_metrics(stops: &[GeoPoint], config: &RouteConfig) -> TripMetrics {
    match stops {
        [] => TripMetrics::NotStarted,
        [_] => TripMetrics::NeedSecondStop,
        _ => {
            let legs: Vec<RouteLeg> = stops
                .windows(2)
                .map(|pair| RouteLeg {
                    from: pair[0],
                    to: pair[1],
                    distance_km: haversine_km(pair[0], pair[1]),
                })
                .collect();
            let total_distance_km: f64 = legs.iter().map(|l| l.distance_km).sum();
            let estimated_hours = total_distance_km / config.cruise_speed_kmh
                + legs.len() as f64 * config.layover_hours;
            TripMetrics::Route {
                total_distance_km,
                estimated_hours,
                legs,
            }
        }
    }
}

/// Metrics for a [`TripPlan`], resolving stops through the world.
/// The plan is consumed as a read-only snapshot.
pub fn plan_metrics(world: &World, plan: &TripPlan, config: &RouteConfig) -> TripMetrics {
    let stops: Vec<GeoPoint> = plan
        .stops()
        .iter()
        .filter_map(|&id| world.city(id).map(|c| c.position))
        .collect();
    route_metrics(&stops, config)
}

/// Renders an hour count the way the trip tray shows it: minutes under
/// an hour, whole hours alone, otherwise both.
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let h = total_minutes / 60;
    let m = total_minutes % 60;
    if h <= 0 {
        return format!("{m} min");
    }
    if m == 0 {
        return format!("{h} h");
    }
    format!("{h} h {m} min")
}

#[cfg(test)]
mod tests {
    use super::{RouteConfig, TripMetrics, format_hours, plan_metrics, route_metrics};
    use crate::plan::TripPlan;
    use foundation::math::GeoPoint;
    use scene::{CityRecord, World};

    fn dublin() -> GeoPoint {
        GeoPoint::new(53.3498, -6.2603)
    }

    fn athens() -> GeoPoint {
        GeoPoint::new(37.9838, 23.7275)
    }

    #[test]
    fn no_stops_is_the_start_state() {
        let metrics = route_metrics(&[], &RouteConfig::default());
        assert_eq!(metrics, TripMetrics::NotStarted);
        assert_eq!(metrics.leg_count(), 0);
    }

    #[test]
    fn one_stop_needs_a_second() {
        let metrics = route_metrics(&[dublin()], &RouteConfig::default());
        assert_eq!(metrics, TripMetrics::NeedSecondStop);
    }

    #[test]
    fn two_stops_produce_a_route() {
        let config = RouteConfig::default();
        let metrics = route_metrics(&[dublin(), athens()], &config);
        let TripMetrics::Route {
            total_distance_km,
            estimated_hours,
            legs,
        } = metrics
        else {
            panic!("expected a route");
        };
        assert_eq!(legs.len(), 1);
        // Known great-circle distance, within tolerance.
        assert!((2800.0..=2950.0).contains(&total_distance_km));
        let expected_hours = total_distance_km / config.cruise_speed_kmh + config.layover_hours;
        assert!((estimated_hours - expected_hours).abs() < 1e-12);
    }

    #[test]
    fn legs_chain_through_intermediate_stops() {
        let copenhagen = GeoPoint::new(55.6761, 12.5683);
        let metrics = route_metrics(&[dublin(), copenhagen, athens()], &RouteConfig::default());
        let TripMetrics::Route { legs, total_distance_km, .. } = metrics else {
            panic!("expected a route");
        };
        assert_eq!(legs.len(), 2);
        let sum: f64 = legs.iter().map(|l| l.distance_km).sum();
        assert!((sum - total_distance_km).abs() < 1e-9);
        assert_eq!(legs[0].to, copenhagen);
        assert_eq!(legs[1].from, copenhagen);
    }

    #[test]
    fn plan_metrics_resolves_cities() {
        let mut world = World::new();
        let a = world.add_city(CityRecord::new("Dublin", "Ireland", dublin()));
        let b = world.add_city(CityRecord::new("Athens", "Greece", athens()));
        let mut plan = TripPlan::new();
        plan.add(a);
        plan.add(b);
        let metrics = plan_metrics(&world, &plan, &RouteConfig::default());
        assert_eq!(metrics.leg_count(), 1);
    }

    #[test]
    fn format_hours_matches_the_tray() {
        assert_eq!(format_hours(0.5), "30 min");
        assert_eq!(format_hours(3.0), "3 h");
        assert_eq!(format_hours(3.34), "3 h 20 min");
        assert_eq!(format_hours(0.0), "0 min");
    }
}
