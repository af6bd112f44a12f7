use crate::city::CityId;
use crate::world::World;

/// Shapes the visible city set before decluttering and marker display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityFilter {
    /// Restrict to one country.
    pub country: Option<String>,
    /// Restrict to cities carrying this tag; `None` means all.
    pub tag: Option<String>,
}

impl CityFilter {
    pub fn for_country(country: impl Into<String>) -> Self {
        Self {
            country: Some(country.into()),
            tag: None,
        }
    }
}

/// Cities passing the filter, in insertion order.
pub fn visible_cities(world: &World, filter: &CityFilter) -> Vec<CityId> {
    world
        .cities()
        .filter(|(_, c)| {
            filter.country.as_deref().is_none_or(|want| c.country == want)
                && filter.tag.as_deref().is_none_or(|tag| c.has_tag(tag))
        })
        .map(|(id, _)| id)
        .collect()
}

/// Search results are capped to fit a compact dropdown.
pub const SEARCH_RESULT_CAP: usize = 8;

/// Case-insensitive substring search over `"name, country"` keys.
/// A blank query matches nothing.
pub fn search_cities(world: &World, query: &str) -> Vec<CityId> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    world
        .cities()
        .filter(|(_, c)| {
            format!("{}, {}", c.name, c.country)
                .to_lowercase()
                .contains(&needle)
        })
        .map(|(id, _)| id)
        .take(SEARCH_RESULT_CAP)
        .collect()
}
