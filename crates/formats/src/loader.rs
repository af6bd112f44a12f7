use scene::World;

use crate::cities::{CityFormatError, cities_from_json_str};
use crate::regions::{RegionFormatError, regions_from_geojson_str};

#[derive(Debug)]
pub enum WorldLoadError {
    Regions(RegionFormatError),
    Cities(CityFormatError),
}

impl std::fmt::Display for WorldLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldLoadError::Regions(e) => write!(f, "regions: {e}"),
            WorldLoadError::Cities(e) => write!(f, "cities: {e}"),
        }
    }
}

impl std::error::Error for WorldLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorldLoadError::Regions(e) => Some(e),
            WorldLoadError::Cities(e) => Some(e),
        }
    }
}

impl From<RegionFormatError> for WorldLoadError {
    fn from(e: RegionFormatError) -> Self {
        WorldLoadError::Regions(e)
    }
}

impl From<CityFormatError> for WorldLoadError {
    fn from(e: CityFormatError) -> Self {
        WorldLoadError::Cities(e)
    }
}

/// Builds a [`World`] from the two raw payloads. Both datasets load up
/// front; the world is read-only for the rest of the session.
pub fn world_from_payloads(
    regions_geojson: &str,
    cities_json: &str,
) -> Result<World, WorldLoadError> {
    let mut world = World::new();
    for region in regions_from_geojson_str(regions_geojson)? {
        world.add_region(region);
    }
    for city in cities_from_json_str(cities_json)? {
        world.add_city(city);
    }
    Ok(world)
}
