use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// A value as the key-value table stores it. Numbers keep the backend's
/// decimal-string form until [`normalize_item`] turns them into floats.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    S(String),
    N(String),
    Bool(bool),
    Null,
    L(Vec<AttributeValue>),
    M(BTreeMap<String, AttributeValue>),
}

pub type Item = BTreeMap<String, AttributeValue>;

#[derive(Debug, Error, PartialEq)]
pub enum AttributeError {
    #[error("attribute '{path}' holds a non-numeric number value '{raw}'")]
    InvalidNumber { path: String, raw: String },

    #[error("attribute '{path}' holds a number that has no finite float form: '{raw}'")]
    NonFinite { path: String, raw: String },
}

impl AttributeValue {
    /// Keeps the submitted number's exact decimal text.
    pub fn number(value: &Number) -> Self {
        AttributeValue::N(value.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
            _ => None,
        }
    }

    fn to_json(&self, path: &str) -> Result<Value, AttributeError> {
        match self {
            AttributeValue::S(s) => Ok(Value::String(s.clone())),
            AttributeValue::N(raw) => decimal_to_float(path, raw),
            AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
            AttributeValue::Null => Ok(Value::Null),
            AttributeValue::L(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| v.to_json(&format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            AttributeValue::M(map) => map_to_json(map, Some(path)).map(Value::Object),
        }
    }
}

fn decimal_to_float(path: &str, raw: &str) -> Result<Value, AttributeError> {
    let parsed: f64 = raw.trim().parse().map_err(|_| AttributeError::InvalidNumber {
        path: path.to_string(),
        raw: raw.to_string(),
    })?;
    Number::from_f64(parsed)
        .map(Value::Number)
        .ok_or_else(|| AttributeError::NonFinite {
            path: path.to_string(),
            raw: raw.to_string(),
        })
}

fn map_to_json(
    map: &BTreeMap<String, AttributeValue>,
    parent: Option<&str>,
) -> Result<Map<String, Value>, AttributeError> {
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        let path = match parent {
            Some(p) => format!("{}.{}", p, key),
            None => key.clone(),
        };
        out.insert(key.clone(), value.to_json(&path)?);
    }
    Ok(out)
}

/// Converts a stored item to plain JSON, turning every number (at any depth
/// inside maps and lists) into a standard float.
pub fn normalize_item(item: &Item) -> Result<Value, AttributeError> {
    map_to_json(item, None).map(Value::Object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(pairs: Vec<(&str, AttributeValue)>) -> Item {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn normalize_item_converts_top_level_numbers_to_floats() {
        let stored = item(vec![
            ("id", AttributeValue::S("abc".into())),
            ("potencia", AttributeValue::N("158".into())),
            ("capacidad", AttributeValue::N("5".into())),
        ]);

        let value = normalize_item(&stored).unwrap();

        assert!(value["potencia"].is_f64());
        assert_eq!(value["potencia"].as_f64(), Some(158.0));
        assert!(value["capacidad"].is_f64());
        assert_eq!(value["id"], json!("abc"));
    }

    #[test]
    fn normalize_item_recurses_through_maps_and_lists() {
        let mut specs = BTreeMap::new();
        specs.insert("torque".to_string(), AttributeValue::N("180.5".into()));
        specs.insert(
            "gears".to_string(),
            AttributeValue::L(vec![AttributeValue::N("1".into()), AttributeValue::N("2".into())]),
        );
        let stored = item(vec![("specs", AttributeValue::M(specs))]);

        let value = normalize_item(&stored).unwrap();

        assert_eq!(value["specs"]["torque"].as_f64(), Some(180.5));
        assert!(value["specs"]["gears"][0].is_f64());
        assert!(value["specs"]["gears"][1].is_f64());
    }

    #[test]
    fn normalize_item_reports_the_path_of_an_unparseable_number() {
        let mut specs = BTreeMap::new();
        specs.insert("torque".to_string(), AttributeValue::N("lots".into()));
        let stored = item(vec![("specs", AttributeValue::M(specs))]);

        let err = normalize_item(&stored).unwrap_err();

        assert_eq!(
            err,
            AttributeError::InvalidNumber {
                path: "specs.torque".into(),
                raw: "lots".into()
            }
        );
    }
}
