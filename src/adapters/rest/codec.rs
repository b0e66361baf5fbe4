//! Field-name codec applied at the REST boundary.
//!
//! Domain records serialize with camelCase keys; the Servfarma API speaks
//! snake_case. Each feature declares the handful of fields whose wire name is
//! not a plain case conversion (`abbreviation` is stored as `short_name`, for
//! example); every other key, including keys of nested objects, goes through
//! the generic conversion.

use convert_case::{Case, Casing};
use serde_json::{Map, Value};

/// Bidirectional key mapper between domain JSON and wire JSON.
#[derive(Debug, Clone, Copy)]
pub struct FieldCodec {
    /// `(domain key, wire key)` pairs that override the generic conversion.
    renames: &'static [(&'static str, &'static str)],
}

impl FieldCodec {
    /// Codec without any explicit renames.
    pub const PLAIN: FieldCodec = FieldCodec::new(&[]);

    pub const fn new(renames: &'static [(&'static str, &'static str)]) -> Self {
        Self { renames }
    }

    /// Wire name of a top-level domain key.
    pub fn to_wire_key(&self, key: &str) -> String {
        self.renames
            .iter()
            .find(|(domain, _)| *domain == key)
            .map(|(_, wire)| (*wire).to_string())
            .unwrap_or_else(|| key.to_case(Case::Snake))
    }

    /// Domain name of a top-level wire key.
    pub fn from_wire_key(&self, key: &str) -> String {
        self.renames
            .iter()
            .find(|(_, wire)| *wire == key)
            .map(|(domain, _)| (*domain).to_string())
            .unwrap_or_else(|| key.to_case(Case::Camel))
    }

    /// Converts a serialized domain value into its wire shape.
    pub fn encode(&self, value: Value) -> Value {
        match value {
            Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (self.to_wire_key(&key), convert_nested(value, Case::Snake)))
                    .collect(),
            ),
            other => convert_nested(other, Case::Snake),
        }
    }

    /// Converts a wire value into the shape domain records deserialize from.
    pub fn decode(&self, value: Value) -> Value {
        match value {
            Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| {
                        (self.from_wire_key(&key), convert_nested(value, Case::Camel))
                    })
                    .collect(),
            ),
            Value::Array(items) => Value::Array(items.into_iter().map(|v| self.decode(v)).collect()),
            other => other,
        }
    }
}

impl Default for FieldCodec {
    fn default() -> Self {
        Self::PLAIN
    }
}

fn convert_nested(value: Value, case: Case) -> Value {
    match value {
        Value::Object(fields) => {
            let converted: Map<String, Value> = fields
                .into_iter()
                .map(|(key, value)| (key.to_case(case), convert_nested(value, case)))
                .collect();
            Value::Object(converted)
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| convert_nested(v, case)).collect())
        }
        other => other,
    }
}
