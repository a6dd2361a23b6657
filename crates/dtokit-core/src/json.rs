//! JSON interop for payloads.

use serde::ser::{Serialize, Serializer};

use crate::record::Record;
use crate::value::Value;

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Record(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Value {
    /// Convert to a JSON value.
    ///
    /// Objects are rendered through their plain form; objects without one
    /// become null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::json!(i),
            Value::Float(f) => serde_json::json!(f),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Record(record) => record.to_json(),
            Value::Object(instance) => instance
                .to_plain()
                .map(|plain| plain.to_json())
                .unwrap_or(serde_json::Value::Null),
        }
    }
}

impl Record {
    /// Convert to a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => serializer.collect_seq(items),
            Value::Record(record) => record.serialize(serializer),
            Value::Object(instance) => match instance.to_plain() {
                Some(plain) => plain.serialize(serializer),
                None => serializer.serialize_unit(),
            },
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({
            "id": 1,
            "ratio": 0.5,
            "tags": ["a"],
            "owner": null,
        }));
        assert_eq!(
            value,
            Value::Record(record! {
                "id" => 1,
                "ratio" => 0.5,
                "tags" => vec!["a"],
                "owner" => Value::Null,
            })
        );
    }

    #[test]
    fn test_to_json() {
        let value = Value::Record(record! { "id" => 1, "name" => "n", "flags" => vec![true] });
        assert_eq!(
            value.to_json(),
            json!({ "id": 1, "name": "n", "flags": [true] })
        );
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let record = record! { "id" => 7, "scores" => vec![1.5, 2.0] };
        let serialized = serde_json::to_value(&record).unwrap();
        assert_eq!(serialized, record.to_json());
    }
}
