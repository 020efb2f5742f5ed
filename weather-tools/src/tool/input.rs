//! Declared input shapes, checked before any upstream call.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const MIN_COMPARE_CITIES: usize = 2;
pub const MAX_COMPARE_CITIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Missing, extra or mistyped field.
    #[error("Invalid input: {0}")]
    Shape(String),

    #[error("Invalid input: `city` must be a non-empty string")]
    EmptyCity,

    #[error(
        "Invalid input: `cities` must contain between {min} and {max} entries, got {0}",
        min = MIN_COMPARE_CITIES,
        max = MAX_COMPARE_CITIES
    )]
    CityCount(usize),
}

/// `{ "city": "<name>" }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CityInput {
    pub city: String,
}

impl CityInput {
    pub fn parse(input: &Value) -> Result<Self, ValidationError> {
        let parsed = Self::deserialize(input).map_err(|e| ValidationError::Shape(e.to_string()))?;

        if parsed.city.is_empty() {
            return Err(ValidationError::EmptyCity);
        }
        Ok(parsed)
    }
}

/// `{ "cities": ["<name>", ...] }` with 2..=5 entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CitiesInput {
    pub cities: Vec<String>,
}

impl CitiesInput {
    pub fn parse(input: &Value) -> Result<Self, ValidationError> {
        let parsed = Self::deserialize(input).map_err(|e| ValidationError::Shape(e.to_string()))?;

        if !(MIN_COMPARE_CITIES..=MAX_COMPARE_CITIES).contains(&parsed.cities.len()) {
            return Err(ValidationError::CityCount(parsed.cities.len()));
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cities(n: usize) -> Value {
        let names: Vec<String> = (0..n).map(|i| format!("City {i}")).collect();
        json!({ "cities": names })
    }

    #[test]
    fn city_input_accepts_a_name() {
        let input = CityInput::parse(&json!({ "city": "Oslo" })).unwrap();
        assert_eq!(input.city, "Oslo");
    }

    #[test]
    fn city_input_rejects_empty_name() {
        let err = CityInput::parse(&json!({ "city": "" })).unwrap_err();
        assert_eq!(err, ValidationError::EmptyCity);
    }

    #[test]
    fn city_input_rejects_missing_field() {
        let err = CityInput::parse(&json!({})).unwrap_err();
        assert!(matches!(err, ValidationError::Shape(ref m) if m.contains("missing field `city`")));
    }

    #[test]
    fn city_input_rejects_extra_field() {
        let err = CityInput::parse(&json!({ "city": "Oslo", "units": "imperial" })).unwrap_err();
        assert!(matches!(err, ValidationError::Shape(ref m) if m.contains("unknown field `units`")));
    }

    #[test]
    fn city_input_rejects_wrong_type() {
        assert!(matches!(
            CityInput::parse(&json!({ "city": 42 })),
            Err(ValidationError::Shape(_))
        ));
        assert!(matches!(CityInput::parse(&Value::Null), Err(ValidationError::Shape(_))));
        assert!(matches!(CityInput::parse(&json!("Oslo")), Err(ValidationError::Shape(_))));
    }

    #[test]
    fn cities_input_bounds() {
        assert_eq!(CitiesInput::parse(&cities(1)), Err(ValidationError::CityCount(1)));
        assert_eq!(CitiesInput::parse(&cities(6)), Err(ValidationError::CityCount(6)));
        assert_eq!(CitiesInput::parse(&cities(2)).unwrap().cities.len(), 2);
        assert_eq!(CitiesInput::parse(&cities(5)).unwrap().cities.len(), 5);
    }

    #[test]
    fn cities_input_rejects_non_string_entries() {
        let err = CitiesInput::parse(&json!({ "cities": ["Oslo", 7] })).unwrap_err();
        assert!(matches!(err, ValidationError::Shape(_)));
    }

    #[test]
    fn city_count_message_names_the_bounds() {
        let msg = ValidationError::CityCount(6).to_string();
        assert_eq!(
            msg,
            "Invalid input: `cities` must contain between 2 and 5 entries, got 6"
        );
    }
}
