use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;
use validator::Validate;

use super::attribute::{AttributeValue, Item};
use crate::constants::KEY_ATTRIBUTE;

/// The four business attributes a client submits on create and update.
/// Numbers keep the submitted JSON form; only listing turns them into floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CarFields {
    #[validate(length(min = 1))]
    pub nombre: String,
    #[validate(length(min = 1))]
    pub tipo: String,
    pub potencia: Number,
    pub capacidad: Number,
}

impl CarFields {
    /// Attributes written by an update: everything except the key.
    pub fn to_attributes(&self) -> Item {
        let mut item = Item::new();
        item.insert("nombre".to_string(), AttributeValue::S(self.nombre.clone()));
        item.insert("tipo".to_string(), AttributeValue::S(self.tipo.clone()));
        item.insert("potencia".to_string(), AttributeValue::number(&self.potencia));
        item.insert("capacidad".to_string(), AttributeValue::number(&self.capacidad));
        item
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRecord {
    pub id: String,
    #[serde(flatten)]
    pub fields: CarFields,
}

impl CarRecord {
    /// Mints a fresh id. Ids are random v4 UUIDs and the write that follows is
    /// an unconditional put.
    pub fn new(fields: CarFields) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            fields,
        }
    }

    pub fn to_item(&self) -> Item {
        let mut item = self.fields.to_attributes();
        item.insert(KEY_ATTRIBUTE.to_string(), AttributeValue::S(self.id.clone()));
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn civic() -> CarFields {
        CarFields {
            nombre: "Civic".into(),
            tipo: "sedan".into(),
            potencia: Number::from(158),
            capacidad: Number::from(5),
        }
    }

    #[test]
    fn new_records_get_distinct_ids() {
        let a = CarRecord::new(civic());
        let b = CarRecord::new(civic());

        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn record_serializes_flat() {
        let record = CarRecord {
            id: "car-1".into(),
            fields: civic(),
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"id": "car-1", "nombre": "Civic", "tipo": "sedan", "potencia": 158, "capacidad": 5})
        );
    }

    #[test]
    fn to_item_carries_the_key_and_decimal_numbers() {
        let record = CarRecord {
            id: "car-1".into(),
            fields: civic(),
        };

        let item = record.to_item();

        assert_eq!(item[KEY_ATTRIBUTE], AttributeValue::S("car-1".into()));
        assert_eq!(item["potencia"], AttributeValue::N("158".into()));
        assert_eq!(item.len(), 5);
    }

    #[test]
    fn large_integers_are_stored_without_rounding() {
        let fields: CarFields = serde_json::from_value(json!({
            "nombre": "Veyron", "tipo": "coupe", "potencia": 9007199254740993u64, "capacidad": 2.5
        }))
        .unwrap();

        let item = fields.to_attributes();

        assert_eq!(item["potencia"], AttributeValue::N("9007199254740993".into()));
        assert_eq!(item["capacidad"], AttributeValue::N("2.5".into()));
    }

    #[test]
    fn empty_names_fail_validation() {
        let fields = CarFields {
            nombre: String::new(),
            ..civic()
        };

        assert!(fields.validate().is_err());
        assert!(civic().validate().is_ok());
    }
}
