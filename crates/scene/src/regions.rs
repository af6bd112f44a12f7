use foundation::math::GeoPoint;

/// Index handle into the loaded region list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u32);

impl RegionId {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// A country outline: one or more polygons, each a ring list where ring 0
/// is the outer boundary and rings 1.. are holes. Loaded once, immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    /// Feature id carried through from the source dataset, if any.
    pub feature_id: Option<String>,
    pub polygons: Vec<Vec<Vec<GeoPoint>>>,
}

impl Region {
    pub fn new(name: impl Into<String>, polygons: Vec<Vec<Vec<GeoPoint>>>) -> Self {
        Self {
            name: name.into(),
            feature_id: None,
            polygons,
        }
    }

    pub fn contains(&self, geo: GeoPoint) -> bool {
        self.polygons.iter().any(|rings| polygon_contains(rings, geo))
    }

    /// Representative point used to aim camera flights: the mean vertex of
    /// the outer ring of the largest polygon (by shoelace area).
    pub fn anchor(&self) -> Option<GeoPoint> {
        let outer = self
            .polygons
            .iter()
            .filter_map(|rings| rings.first())
            .max_by(|a, b| {
                foundation::math::stable_total_cmp_f64(shoelace_area(a), shoelace_area(b))
            })?;
        if outer.is_empty() {
            return None;
        }
        let n = outer.len() as f64;
        let lat = outer.iter().map(|p| p.lat_deg).sum::<f64>() / n;
        let lng = outer.iter().map(|p| p.lng_deg).sum::<f64>() / n;
        Some(GeoPoint::normalized(lat, lng))
    }
}

/// Ray-casting parity test in lng/lat space.
///
/// Edges exactly through the probe latitude use a tiny epsilon in place of
/// a zero Δlat so the crossing comparison stays finite.
pub fn point_in_ring(geo: GeoPoint, ring: &[GeoPoint]) -> bool {
    let lat = geo.lat_deg;
    let lng = geo.lng_deg;
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].lng_deg, ring[i].lat_deg);
        let (xj, yj) = (ring[j].lng_deg, ring[j].lat_deg);
        if (yi > lat) != (yj > lat) {
            let mut d_lat = yj - yi;
            if d_lat == 0.0 {
                d_lat = 1e-12;
            }
            if lng < (xj - xi) * (lat - yi) / d_lat + xi {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Inside the outer ring and inside none of the hole rings.
pub fn polygon_contains(rings: &[Vec<GeoPoint>], geo: GeoPoint) -> bool {
    let Some(outer) = rings.first() else {
        return false;
    };
    if !point_in_ring(geo, outer) {
        return false;
    }
    !rings[1..].iter().any(|hole| point_in_ring(geo, hole))
}

fn shoelace_area(ring: &[GeoPoint]) -> f64 {
    let mut twice_area = 0.0;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        twice_area += (ring[j].lng_deg + ring[i].lng_deg) * (ring[j].lat_deg - ring[i].lat_deg);
        j = i;
    }
    (twice_area * 0.5).abs()
}
