use serde_json::Value;

use foundation::math::GeoPoint;
use scene::Region;

#[derive(Debug)]
pub enum RegionFormatError {
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for RegionFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionFormatError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            RegionFormatError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for RegionFormatError {}

/// Parses a GeoJSON FeatureCollection of country outlines.
///
/// Accepts Polygon and MultiPolygon geometries with `[lng, lat]`
/// positions (standard GeoJSON order); each feature needs a
/// `properties.name`. Longitudes are wrapped and latitudes clamped on the
/// way in, so every stored `GeoPoint` honors its range invariant.
pub fn regions_from_geojson_str(payload: &str) -> Result<Vec<Region>, RegionFormatError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| RegionFormatError::InvalidFeature {
            index: 0,
            reason: format!("JSON parse error: {e}"),
        })?;
    regions_from_geojson_value(&value)
}

pub fn regions_from_geojson_value(value: &Value) -> Result<Vec<Region>, RegionFormatError> {
    let obj = value
        .as_object()
        .ok_or(RegionFormatError::NotAFeatureCollection)?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(RegionFormatError::NotAFeatureCollection)?;
    if ty != "FeatureCollection" {
        return Err(RegionFormatError::NotAFeatureCollection);
    }

    let features = obj
        .get("features")
        .and_then(|v| v.as_array())
        .ok_or(RegionFormatError::NotAFeatureCollection)?;

    let mut regions = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        let feature = feature
            .as_object()
            .ok_or_else(|| invalid(index, "feature must be an object"))?;

        let name = feature
            .get("properties")
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str())
            .ok_or_else(|| invalid(index, "feature missing properties.name"))?;

        let feature_id = match feature.get("id") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        let geometry = feature
            .get("geometry")
            .and_then(|g| g.as_object())
            .ok_or_else(|| invalid(index, "feature missing geometry"))?;
        let geom_type = geometry
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| invalid(index, "geometry missing type"))?;
        let coordinates = geometry
            .get("coordinates")
            .ok_or_else(|| invalid(index, "geometry missing coordinates"))?;

        let polygons = match geom_type {
            "Polygon" => {
                vec![parse_rings(coordinates).map_err(|reason| invalid(index, &reason))?]
            }
            "MultiPolygon" => {
                let polys = coordinates
                    .as_array()
                    .ok_or_else(|| invalid(index, "MultiPolygon coordinates must be an array"))?;
                let mut out = Vec::with_capacity(polys.len());
                for poly in polys {
                    out.push(parse_rings(poly).map_err(|reason| invalid(index, &reason))?);
                }
                out
            }
            other => {
                return Err(invalid(index, &format!("unsupported geometry type: {other}")));
            }
        };

        let mut region = Region::new(name, polygons);
        region.feature_id = feature_id;
        regions.push(region);
    }

    Ok(regions)
}

fn invalid(index: usize, reason: &str) -> RegionFormatError {
    RegionFormatError::InvalidFeature {
        index,
        reason: reason.to_string(),
    }
}

fn parse_rings(value: &Value) -> Result<Vec<Vec<GeoPoint>>, String> {
    let rings = value
        .as_array()
        .ok_or_else(|| "Polygon coordinates must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        let positions = ring
            .as_array()
            .ok_or_else(|| "ring must be an array of positions".to_string())?;
        if positions.len() < 3 {
            return Err(format!("ring has only {} positions", positions.len()));
        }
        let mut parsed = Vec::with_capacity(positions.len());
        for position in positions {
            parsed.push(parse_position(position)?);
        }
        out.push(parsed);
    }
    if out.is_empty() {
        return Err("polygon has no rings".to_string());
    }
    Ok(out)
}

fn parse_position(value: &Value) -> Result<GeoPoint, String> {
    let pair = value
        .as_array()
        .ok_or_else(|| "position must be an array".to_string())?;
    // Extra members (altitude) are allowed and ignored.
    if pair.len() < 2 {
        return Err("position needs [lng, lat]".to_string());
    }
    let lng = pair[0]
        .as_f64()
        .ok_or_else(|| "position lng must be a number".to_string())?;
    let lat = pair[1]
        .as_f64()
        .ok_or_else(|| "position lat must be a number".to_string())?;
    Ok(GeoPoint::normalized(lat, lng))
}
