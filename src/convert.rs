//! Bridge to `serde_json::Value` for interop, diffing, and printing.

use crate::document::Document;
use crate::value::{Kind, Value};

impl Document {
    /// Converts the whole document. See [`Value::to_json_value`].
    pub fn to_json_value(&self) -> serde_json::Value {
        self.root().to_json_value()
    }
}

impl Value<'_> {
    /// Deep conversion into an owned `serde_json::Value`.
    ///
    /// Non-finite doubles have no JSON representation and become `null`.
    /// String bytes that are not valid UTF-8 (lone surrogate escapes) are
    /// converted lossily. When an object holds duplicate keys the last one
    /// wins.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self.kind() {
            Kind::Null => serde_json::Value::Null,
            Kind::False => serde_json::Value::Bool(false),
            Kind::True => serde_json::Value::Bool(true),
            Kind::Integer => {
                let value = self.as_integer().unwrap_or_default();
                serde_json::Value::Number(serde_json::Number::from(i64::from(value)))
            }
            Kind::Double => {
                let value = self.as_double().unwrap_or_default();
                serde_json::Number::from_f64(value)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
            Kind::String => {
                let bytes = self.as_bytes().unwrap_or_default();
                serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
            }
            Kind::Array => {
                let view = match self.as_array() {
                    Some(view) => view,
                    None => return serde_json::Value::Null,
                };
                serde_json::Value::Array(view.iter().map(|item| item.to_json_value()).collect())
            }
            Kind::Object => {
                let view = match self.as_object() {
                    Some(view) => view,
                    None => return serde_json::Value::Null,
                };
                let mut map = serde_json::Map::with_capacity(view.len());
                for (key, value) in view.iter() {
                    map.insert(
                        String::from_utf8_lossy(key).into_owned(),
                        value.to_json_value(),
                    );
                }
                serde_json::Value::Object(map)
            }
        }
    }
}
