use std::env;
use std::fs;
use std::path::PathBuf;

use compute::{RouteConfig, TripMetrics, format_hours, route_metrics};
use foundation::math::GeoPoint;
use scene::markers::{MarkerConfig, declutter};
use scene::query::{CityFilter, search_cities, visible_cities};
use scene::{CityRecord, World};
use serde::Serialize;

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "locate" => cmd_locate(args),
        "route" => cmd_route(args),
        "declutter" => cmd_declutter(args),
        "search" => cmd_search(args),
        _ => Err(usage()),
    }
}

fn usage() -> String {
    "usage:\n  \
     globe locate <lat> <lng> --regions FILE [--json]\n  \
     globe route <Country|Name> <Country|Name> [...] --cities FILE [--json]\n  \
     globe declutter <COUNTRY> --cities FILE [--tag TAG] [--json]\n  \
     globe search <QUERY> --cities FILE [--json]"
        .to_string()
}

struct CommonArgs {
    positional: Vec<String>,
    regions: Option<PathBuf>,
    cities: Option<PathBuf>,
    tag: Option<String>,
    json: bool,
}

fn parse_args(args: Vec<String>) -> Result<CommonArgs, String> {
    let mut out = CommonArgs {
        positional: Vec::new(),
        regions: None,
        cities: None,
        tag: None,
        json: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--regions" => {
                i += 1;
                let value = args.get(i).ok_or("--regions requires a value")?;
                out.regions = Some(PathBuf::from(value));
            }
            "--cities" => {
                i += 1;
                let value = args.get(i).ok_or("--cities requires a value")?;
                out.cities = Some(PathBuf::from(value));
            }
            "--tag" => {
                i += 1;
                let value = args.get(i).ok_or("--tag requires a value")?;
                out.tag = Some(value.clone());
            }
            "--json" => out.json = true,
            s if s.starts_with("--") => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
            _ => out.positional.push(args[i].clone()),
        }
        i += 1;
    }

    Ok(out)
}

fn load_regions_world(path: &PathBuf) -> Result<World, String> {
    let payload = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    let mut world = World::new();
    for region in
        formats::regions_from_geojson_str(&payload).map_err(|e| format!("parse regions: {e}"))?
    {
        world.add_region(region);
    }
    Ok(world)
}

fn load_cities_world(path: &PathBuf) -> Result<World, String> {
    let payload = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    let mut world = World::new();
    for city in formats::cities_from_json_str(&payload).map_err(|e| format!("parse cities: {e}"))? {
        world.add_city(city);
    }
    Ok(world)
}

#[derive(Serialize)]
struct LocateReport {
    lat: f64,
    lng: f64,
    region: Option<String>,
}

fn cmd_locate(args: Vec<String>) -> Result<(), String> {
    let args = parse_args(args)?;
    if args.positional.len() != 2 {
        return Err(usage());
    }
    let lat: f64 = args.positional[0]
        .parse()
        .map_err(|_| format!("bad latitude: {}", args.positional[0]))?;
    let lng: f64 = args.positional[1]
        .parse()
        .map_err(|_| format!("bad longitude: {}", args.positional[1]))?;

    let path = args.regions.ok_or("locate requires --regions")?;
    let world = load_regions_world(&path)?;

    let geo = GeoPoint::normalized(lat, lng);
    let region = world
        .locate(geo)
        .map_err(|e| e.to_string())?
        .and_then(|id| world.region(id))
        .map(|r| r.name.clone());

    if args.json {
        let report = LocateReport {
            lat: geo.lat_deg,
            lng: geo.lng_deg,
            region,
        };
        println!("{}", to_json(&report)?);
    } else {
        match region {
            Some(name) => println!("{name}"),
            None => println!("no region"),
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct RouteReport {
    stops: Vec<String>,
    total_distance_km: f64,
    estimated_hours: f64,
    legs: Vec<RouteLegReport>,
}

#[derive(Serialize)]
struct RouteLegReport {
    from: String,
    to: String,
    distance_km: f64,
}

fn cmd_route(args: Vec<String>) -> Result<(), String> {
    let args = parse_args(args)?;
    let path = args.cities.clone().ok_or("route requires --cities")?;
    let world = load_cities_world(&path)?;

    let mut stops: Vec<&CityRecord> = Vec::new();
    for key in &args.positional {
        let id = resolve_city(&world, key)?;
        let record = world.city(id).ok_or("city lookup failed")?;
        stops.push(record);
    }

    let positions: Vec<GeoPoint> = stops.iter().map(|c| c.position).collect();
    let metrics = route_metrics(&positions, &RouteConfig::default());

    match metrics {
        TripMetrics::NotStarted => println!("no stops; name at least two cities"),
        TripMetrics::NeedSecondStop => println!("one stop; name at least two cities"),
        TripMetrics::Route {
            total_distance_km,
            estimated_hours,
            legs,
        } => {
            if args.json {
                let report = RouteReport {
                    stops: stops.iter().map(|c| c.key()).collect(),
                    total_distance_km,
                    estimated_hours,
                    legs: legs
                        .iter()
                        .zip(stops.windows(2))
                        .map(|(leg, pair)| RouteLegReport {
                            from: pair[0].key(),
                            to: pair[1].key(),
                            distance_km: leg.distance_km,
                        })
                        .collect(),
                };
                println!("{}", to_json(&report)?);
            } else {
                println!(
                    "{} stops · {:.0} km · ~{}",
                    stops.len(),
                    total_distance_km,
                    format_hours(estimated_hours)
                );
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct PlacementReport {
    city: String,
    east: f64,
    north: f64,
    world: [f64; 3],
}

fn cmd_declutter(args: Vec<String>) -> Result<(), String> {
    let args = parse_args(args)?;
    if args.positional.len() != 1 {
        return Err(usage());
    }
    let country = &args.positional[0];
    let path = args.cities.clone().ok_or("declutter requires --cities")?;
    let world = load_cities_world(&path)?;

    let filter = CityFilter {
        country: Some(country.clone()),
        tag: args.tag.clone(),
    };
    let visible = visible_cities(&world, &filter);
    if visible.is_empty() {
        return Err(format!("no cities match country {country:?}"));
    }

    let placements =
        declutter(&world, &visible, &MarkerConfig::default()).map_err(|e| e.to_string())?;

    if args.json {
        let reports: Vec<PlacementReport> = placements
            .iter()
            .filter_map(|p| {
                world.city(p.city).map(|c| PlacementReport {
                    city: c.key(),
                    east: p.offset.x,
                    north: p.offset.y,
                    world: [p.world.x, p.world.y, p.world.z],
                })
            })
            .collect();
        println!("{}", to_json(&reports)?);
    } else {
        for p in &placements {
            let Some(city) = world.city(p.city) else {
                continue;
            };
            println!(
                "{:<24} east {:+.4}  north {:+.4}",
                city.name, p.offset.x, p.offset.y
            );
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct SearchReport {
    matches: Vec<String>,
}

fn cmd_search(args: Vec<String>) -> Result<(), String> {
    let args = parse_args(args)?;
    if args.positional.len() != 1 {
        return Err(usage());
    }
    let path = args.cities.clone().ok_or("search requires --cities")?;
    let world = load_cities_world(&path)?;

    let ids = search_cities(&world, &args.positional[0]);
    let names: Vec<String> = ids
        .iter()
        .filter_map(|&id| world.city(id))
        .map(|c| format!("{}, {}", c.name, c.country))
        .collect();

    if args.json {
        println!("{}", to_json(&SearchReport { matches: names })?);
    } else if names.is_empty() {
        println!("no matches");
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

/// Accepts either `Country|Name` or a bare city name (which must be
/// unambiguous across countries).
fn resolve_city(world: &World, key: &str) -> Result<scene::CityId, String> {
    if let Some((country, name)) = key.split_once('|') {
        return world
            .city_by_identity(country, name)
            .ok_or_else(|| format!("unknown city: {key}"));
    }

    let matches: Vec<_> = world
        .cities()
        .filter(|(_, c)| c.name == key)
        .map(|(id, _)| id)
        .collect();
    match matches.as_slice() {
        [] => Err(format!("unknown city: {key}")),
        [id] => Ok(*id),
        _ => Err(format!("ambiguous city name {key:?}; use Country|Name")),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("json: {e}"))
}
