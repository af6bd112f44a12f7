use foundation::math::GeoPoint;

/// Index handle into the loaded city list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CityId(pub u32);

impl CityId {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// A curated city, immutable once loaded.
///
/// Identity is `(country, name)`; the pair is unique within a loaded set
/// (the ingest layer rejects duplicates).
#[derive(Debug, Clone, PartialEq)]
pub struct CityRecord {
    pub name: String,
    pub country: String,
    pub position: GeoPoint,
    pub tags: Vec<String>,
    pub population: Option<String>,
    pub summary: Option<String>,
}

impl CityRecord {
    pub fn new(name: impl Into<String>, country: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            position,
            tags: Vec::new(),
            population: None,
            summary: None,
        }
    }

    /// Stable identity key, `"country|name"`.
    pub fn key(&self) -> String {
        format!("{}|{}", self.country, self.name)
    }

    pub fn same_identity(&self, other: &CityRecord) -> bool {
        self.country == other.country && self.name == other.name
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
