//! Records as they are generated and sent over the wire.

use std::fmt;

use rust_decimal::Decimal;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single cell of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Decimal(Decimal),
    Text(String),
}

impl FieldValue {
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Integer(_) | FieldValue::Decimal(_) => false,
        }
    }

    fn names_a_record(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Text(text) => !text.is_empty() && text != "0",
            FieldValue::Integer(n) => *n != 0,
            FieldValue::Decimal(d) => !d.is_zero(),
        }
    }

    /// Numeric view of the value. Text is parsed, so values that went over the wire still qualify.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Integer(n) => Some(Decimal::from(*n)),
            FieldValue::Decimal(d) => Some(*d),
            FieldValue::Text(text) => text.trim().parse().ok(),
            FieldValue::Null => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            FieldValue::Text(text) => text.trim().parse().ok(),
            FieldValue::Decimal(_) | FieldValue::Null => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Decimal(d) => write!(f, "{d}"),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_none(),
            FieldValue::Integer(n) => serializer.serialize_i64(*n),
            // decimals travel as strings to keep their scale
            FieldValue::Decimal(d) => serializer.serialize_str(&d.to_string()),
            FieldValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldValueVisitor;

        impl<'de> Visitor<'de> for FieldValueVisitor {
            type Value = FieldValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("null, a number or a string")
            }

            fn visit_unit<E: de::Error>(self) -> Result<FieldValue, E> {
                Ok(FieldValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<FieldValue, E> {
                Ok(FieldValue::Null)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<FieldValue, E> {
                Ok(FieldValue::Integer(i64::from(v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldValue, E> {
                Ok(FieldValue::Integer(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldValue, E> {
                Ok(i64::try_from(v)
                    .map(FieldValue::Integer)
                    .unwrap_or_else(|_| FieldValue::Text(v.to_string())))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldValue, E> {
                Decimal::try_from(v)
                    .map(FieldValue::Decimal)
                    .map_err(|_| E::custom(format!("number {v} is not representable")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldValue, E> {
                Ok(FieldValue::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<FieldValue, E> {
                Ok(FieldValue::Text(v))
            }
        }

        deserializer.deserialize_any(FieldValueVisitor)
    }
}

/// One row to import. Field order is kept as inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRecord {
    fields: Vec<(String, FieldValue)>,
}

/// The rows generated for one entity kind and sub-type, indexed by position.
pub type EntityBatch = Vec<EntityRecord>;

impl EntityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style [`EntityRecord::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a field, replacing the value (but not the position) of an existing one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// The value of `name` rendered as text, if it names a record.
    ///
    /// Blank values and zero (`0`, `"0"`) do not: such rows belong to the record above them.
    pub fn identity(&self, name: &str) -> Option<String> {
        self.get(name)
            .filter(|value| value.names_a_record())
            .map(ToString::to_string)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for EntityRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = EntityRecord::new();
        for (name, value) in iter {
            record.set(name, value);
        }
        record
    }
}

impl Serialize for EntityRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EntityRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = EntityRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<EntityRecord, A::Error> {
                let mut record = EntityRecord::new();
                while let Some((name, value)) = access.next_entry::<String, FieldValue>()? {
                    record.set(name, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}
