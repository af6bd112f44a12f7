use std::collections::BTreeSet;

use compute::TripPlan;
use scene::query::CityFilter;
use scene::{CityId, RegionId};

/// What a resolved pointer event landed on. `None` at the call site
/// (ocean, empty space) is an ordinary outcome, so the miss case lives
/// in `Option`, and the two hit kinds are matched exhaustively.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HitTarget {
    City(CityId),
    Country(RegionId),
}

/// All mutable interaction state, owned by the controller.
///
/// One struct instead of scattered globals: ticks read and update it in
/// place, and tests can inspect it without any UI attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    /// Country context: while set, city markers are picked first.
    pub active_country: Option<RegionId>,
    pub selected_city: Option<CityId>,
    /// Hover feedback only; never drives selection.
    pub hovered: Option<HitTarget>,
    /// Session-local favorites (no persistence).
    pub favorites: BTreeSet<CityId>,
    pub trip: TripPlan,
    /// Content filter currently applied to the visible city set. The
    /// country half is derived from `active_country`; only `tag` is
    /// user-set.
    pub filter: CityFilter,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_favorite(&self, city: CityId) -> bool {
        self.favorites.contains(&city)
    }
}
