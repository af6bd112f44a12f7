use serde_json::Value;

use foundation::math::GeoPoint;
use scene::CityRecord;

#[derive(Debug)]
pub enum CityFormatError {
    NotAnArray,
    InvalidCity { index: usize, reason: String },
    DuplicateCity { index: usize, key: String },
}

impl std::fmt::Display for CityFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CityFormatError::NotAnArray => write!(f, "expected a JSON array of cities"),
            CityFormatError::InvalidCity { index, reason } => {
                write!(f, "invalid city at index {index}: {reason}")
            }
            CityFormatError::DuplicateCity { index, key } => {
                write!(f, "duplicate city at index {index}: {key}")
            }
        }
    }
}

impl std::error::Error for CityFormatError {}

/// Parses the city list payload: a JSON array of records with required
/// `country`, `name`, `lat`, `lng` and optional `tags`, `pop`,
/// `summary`. `(country, name)` pairs must be unique — a duplicate is a
/// data error, not a merge.
pub fn cities_from_json_str(payload: &str) -> Result<Vec<CityRecord>, CityFormatError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| CityFormatError::InvalidCity {
        index: 0,
        reason: format!("JSON parse error: {e}"),
    })?;
    cities_from_json_value(&value)
}

pub fn cities_from_json_value(value: &Value) -> Result<Vec<CityRecord>, CityFormatError> {
    let entries = value.as_array().ok_or(CityFormatError::NotAnArray)?;

    let mut cities: Vec<CityRecord> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let obj = entry
            .as_object()
            .ok_or_else(|| invalid(index, "city must be an object"))?;

        let name = require_str(obj, "name").map_err(|reason| invalid(index, &reason))?;
        let country = require_str(obj, "country").map_err(|reason| invalid(index, &reason))?;
        let lat = require_f64(obj, "lat").map_err(|reason| invalid(index, &reason))?;
        let lng = require_f64(obj, "lng").map_err(|reason| invalid(index, &reason))?;

        let mut record = CityRecord::new(name, country, GeoPoint::normalized(lat, lng));

        if let Some(tags) = obj.get("tags") {
            let tags = tags
                .as_array()
                .ok_or_else(|| invalid(index, "tags must be an array"))?;
            for tag in tags {
                let tag = tag
                    .as_str()
                    .ok_or_else(|| invalid(index, "tags must be strings"))?;
                record.tags.push(tag.to_string());
            }
        }
        record.population = obj.get("pop").and_then(|v| v.as_str()).map(String::from);
        record.summary = obj.get("summary").and_then(|v| v.as_str()).map(String::from);

        if cities.iter().any(|c| c.same_identity(&record)) {
            return Err(CityFormatError::DuplicateCity {
                index,
                key: record.key(),
            });
        }
        cities.push(record);
    }

    Ok(cities)
}

fn invalid(index: usize, reason: &str) -> CityFormatError {
    CityFormatError::InvalidCity {
        index,
        reason: reason.to_string(),
    }
}

fn require_str(obj: &serde_json::Map<String, Value>, key: &str) -> Result<String, String> {
    let s = obj
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing string field `{key}`"))?;
    if s.trim().is_empty() {
        return Err(format!("field `{key}` is empty"));
    }
    Ok(s.to_string())
}

fn require_f64(obj: &serde_json::Map<String, Value>, key: &str) -> Result<f64, String> {
    obj.get(key)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| format!("missing numeric field `{key}`"))
}

#[cfg(test)]
mod tests {
    use super::{CityFormatError, cities_from_json_str};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"[
        {
            "country": "Ireland",
            "name": "Dublin",
            "lat": 53.3498,
            "lng": -6.2603,
            "pop": "~1.2M",
            "summary": "A compact, walkable capital.",
            "tags": ["historical", "food", "nightlife", "nature"]
        },
        { "country": "Greece", "name": "Athens", "lat": 37.9838, "lng": 23.7275 }
    ]"#;

    #[test]
    fn parses_full_and_minimal_records() {
        let cities = cities_from_json_str(SAMPLE).unwrap();
        assert_eq!(cities.len(), 2);

        let dublin = &cities[0];
        assert_eq!(dublin.key(), "Ireland|Dublin");
        assert_eq!(dublin.tags.len(), 4);
        assert_eq!(dublin.population.as_deref(), Some("~1.2M"));

        let athens = &cities[1];
        assert!(athens.tags.is_empty());
        assert_eq!(athens.population, None);
        assert_eq!(athens.summary, None);
    }

    #[test]
    fn rejects_non_array_payload() {
        let err = cities_from_json_str(r#"{"cities": []}"#).unwrap_err();
        assert!(matches!(err, CityFormatError::NotAnArray));
    }

    #[test]
    fn rejects_missing_coordinates() {
        let err =
            cities_from_json_str(r#"[{"country": "Ireland", "name": "Dublin"}]"#).unwrap_err();
        match err {
            CityFormatError::InvalidCity { index, reason } => {
                assert_eq!(index, 0);
                assert!(reason.contains("lat"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_duplicate_identity() {
        let payload = r#"[
            { "country": "Ireland", "name": "Dublin", "lat": 53.3, "lng": -6.3 },
            { "country": "Ireland", "name": "Dublin", "lat": 53.4, "lng": -6.2 }
        ]"#;
        let err = cities_from_json_str(payload).unwrap_err();
        match err {
            CityFormatError::DuplicateCity { index, key } => {
                assert_eq!(index, 1);
                assert_eq!(key, "Ireland|Dublin");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wraps_out_of_range_longitude() {
        let payload = r#"[{ "country": "X", "name": "Seam", "lat": 0.0, "lng": 200.0 }]"#;
        let cities = cities_from_json_str(payload).unwrap();
        assert_eq!(cities[0].position.lng_deg, -160.0);
    }
}
