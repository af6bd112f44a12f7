use foundation::math::GeoPoint;

use crate::city::{CityId, CityRecord};
use crate::regions::{Region, RegionId};

/// Region lookup invoked with no regions loaded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EmptyRegionSetError;

impl std::fmt::Display for EmptyRegionSetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no regions loaded")
    }
}

impl std::error::Error for EmptyRegionSetError {}

/// Declutter invoked with no cities.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EmptyCitySetError;

impl std::fmt::Display for EmptyCitySetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no cities in input set")
    }
}

impl std::error::Error for EmptyCitySetError {}

/// The world was handed to a consumer before both datasets were loaded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WorldNotLoadedError {
    NoRegions,
    NoCities,
}

impl std::fmt::Display for WorldNotLoadedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldNotLoadedError::NoRegions => write!(f, "world has no regions loaded"),
            WorldNotLoadedError::NoCities => write!(f, "world has no cities loaded"),
        }
    }
}

impl std::error::Error for WorldNotLoadedError {}

/// Owns the session-immutable datasets: the curated city list and the
/// country outlines. Handles are dense indices in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct World {
    cities: Vec<CityRecord>,
    regions: Vec<Region>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a city and returns its handle.
    ///
    /// Identity uniqueness is the loader's contract; this only asserts it
    /// in debug builds.
    pub fn add_city(&mut self, record: CityRecord) -> CityId {
        debug_assert!(
            !self.cities.iter().any(|c| c.same_identity(&record)),
            "duplicate city identity: {}",
            record.key()
        );
        let id = CityId(self.cities.len() as u32);
        self.cities.push(record);
        id
    }

    pub fn add_region(&mut self, region: Region) -> RegionId {
        let id = RegionId(self.regions.len() as u32);
        self.regions.push(region);
        id
    }

    pub fn city(&self, id: CityId) -> Option<&CityRecord> {
        self.cities.get(id.index() as usize)
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index() as usize)
    }

    pub fn cities(&self) -> impl Iterator<Item = (CityId, &CityRecord)> {
        self.cities
            .iter()
            .enumerate()
            .map(|(i, c)| (CityId(i as u32), c))
    }

    pub fn regions(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions
            .iter()
            .enumerate()
            .map(|(i, r)| (RegionId(i as u32), r))
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn city_by_identity(&self, country: &str, name: &str) -> Option<CityId> {
        self.cities
            .iter()
            .position(|c| c.country == country && c.name == name)
            .map(|i| CityId(i as u32))
    }

    pub fn region_by_name(&self, name: &str) -> Option<RegionId> {
        self.regions
            .iter()
            .position(|r| r.name == name)
            .map(|i| RegionId(i as u32))
    }

    /// Resolves a geographic point to the region containing it.
    ///
    /// Regions are probed in insertion order and the first match wins
    /// (the supported set is non-overlapping, so order only affects
    /// probe cost). `Ok(None)` is the ordinary outcome for ocean points;
    /// the error fires only when no regions were ever loaded.
    pub fn locate(&self, geo: GeoPoint) -> Result<Option<RegionId>, EmptyRegionSetError> {
        if self.regions.is_empty() {
            return Err(EmptyRegionSetError);
        }
        Ok(self
            .regions
            .iter()
            .position(|r| r.contains(geo))
            .map(|i| RegionId(i as u32)))
    }

    /// Precondition check for consumers that need both datasets.
    pub fn validate_loaded(&self) -> Result<(), WorldNotLoadedError> {
        if self.regions.is_empty() {
            return Err(WorldNotLoadedError::NoRegions);
        }
        if self.cities.is_empty() {
            return Err(WorldNotLoadedError::NoCities);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{EmptyRegionSetError, World, WorldNotLoadedError};
    use crate::city::CityRecord;
    use crate::regions::Region;
    use foundation::math::GeoPoint;

    fn ring(corners: &[(f64, f64)]) -> Vec<GeoPoint> {
        corners
            .iter()
            .map(|&(lng, lat)| GeoPoint::new(lat, lng))
            .collect()
    }

    fn two_region_world() -> World {
        let mut world = World::new();
        world.add_region(Region::new(
            "West",
            vec![vec![ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])]],
        ));
        world.add_region(Region::new(
            "East",
            vec![vec![ring(&[
                (20.0, 0.0),
                (20.0, 10.0),
                (30.0, 10.0),
                (30.0, 0.0),
            ])]],
        ));
        world.add_city(CityRecord::new("Midtown", "West", GeoPoint::new(5.0, 5.0)));
        world
    }

    #[test]
    fn locate_returns_first_containing_region() {
        let world = two_region_world();
        let west = world.region_by_name("West").unwrap();
        let east = world.region_by_name("East").unwrap();
        assert_eq!(world.locate(GeoPoint::new(5.0, 5.0)), Ok(Some(west)));
        assert_eq!(world.locate(GeoPoint::new(5.0, 25.0)), Ok(Some(east)));
    }

    #[test]
    fn ocean_click_is_a_plain_miss() {
        let world = two_region_world();
        assert_eq!(world.locate(GeoPoint::new(-40.0, -40.0)), Ok(None));
    }

    #[test]
    fn locate_without_regions_is_a_precondition_violation() {
        let world = World::new();
        assert_eq!(
            world.locate(GeoPoint::new(0.0, 0.0)),
            Err(EmptyRegionSetError)
        );
    }

    #[test]
    fn validate_loaded_names_the_missing_dataset() {
        let mut world = World::new();
        assert_eq!(world.validate_loaded(), Err(WorldNotLoadedError::NoRegions));
        world.add_region(Region::new("West", Vec::new()));
        assert_eq!(world.validate_loaded(), Err(WorldNotLoadedError::NoCities));
        world.add_city(CityRecord::new("Midtown", "West", GeoPoint::new(5.0, 5.0)));
        assert_eq!(world.validate_loaded(), Ok(()));
    }

    #[test]
    fn identity_lookup_round_trips() {
        let world = two_region_world();
        let id = world.city_by_identity("West", "Midtown").unwrap();
        assert_eq!(world.city(id).unwrap().name, "Midtown");
        assert_eq!(world.city_by_identity("West", "Uptown"), None);
    }
}
