//! The document tree held by a record.

use super::path::FieldPath;
use crate::error::{BlobError, Result};
use crate::types::PayloadEncoding;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;

/// A semi-structured document.
///
/// Wraps a JSON value tree. A fresh document is an empty object, but a decoded
/// payload may be any value (array, scalar, or null). Numbers keep their
/// source text, so JSON re-encoding reproduces them exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    /// Create an empty object document.
    pub fn new() -> Self {
        Document(Value::Object(Map::new()))
    }

    /// Parse a JSON payload.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes, PayloadEncoding::Json)
    }

    /// Decode a payload in the given encoding.
    ///
    /// The payload must hold exactly one value.
    pub fn decode(bytes: &[u8], encoding: PayloadEncoding) -> Result<Self> {
        let value: Value = match encoding {
            PayloadEncoding::Json => serde_json::from_slice(bytes).map_err(BlobError::parse)?,
            PayloadEncoding::MessagePack => {
                rmp_serde::from_slice(bytes).map_err(BlobError::parse)?
            }
        };
        Ok(Document(value))
    }

    /// Encode the whole tree.
    ///
    /// MessagePack has no arbitrary-precision numbers: integers must fit `i64`
    /// or `u64`, and non-integers are written as `f64`. Integers outside that
    /// range fail with [`BlobError::Encode`].
    pub fn encode(&self, encoding: PayloadEncoding) -> Result<Vec<u8>> {
        match encoding {
            PayloadEncoding::Json => serde_json::to_vec(&self.0).map_err(BlobError::encode),
            PayloadEncoding::MessagePack => {
                rmp_serde::to_vec(&Portable(&self.0)).map_err(BlobError::encode)
            }
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Look up a top-level key. Non-object documents have no keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(key))
    }

    /// Whether a top-level key is present, even if its value is `null`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Resolve a path through nested objects.
    ///
    /// Only objects are traversed; a path that runs into an array or scalar
    /// before its last segment resolves to `None`. The empty path is the root.
    pub fn get_path(&self, path: &FieldPath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(&self.0, |current, segment| current.as_object()?.get(segment))
    }

    /// Set the value at a path, creating intermediate objects.
    ///
    /// Any non-object node along the way (including the root) is replaced by an
    /// empty object. The empty path replaces the whole tree.
    pub fn set_path(&mut self, path: &FieldPath, value: Value) {
        let Some((last, parents)) = path.split_last() else {
            self.0 = value;
            return;
        };

        let mut current = ensure_object(&mut self.0);
        for segment in parents {
            let child = current
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            current = ensure_object(child);
        }
        current.insert(last.clone(), value);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Document(value)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value tree serialized with plain numbers for non-JSON encoders.
struct Portable<'a>(&'a Value);

impl Serialize for Portable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serialize_number(n, serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => serializer.collect_seq(items.iter().map(Portable)),
            Value::Object(map) => serializer.collect_map(map.iter().map(|(k, v)| (k, Portable(v)))),
        }
    }
}

fn serialize_number<S: Serializer>(n: &Number, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if let Some(u) = n.as_u64() {
        return serializer.serialize_u64(u);
    }
    if let Some(i) = n.as_i64() {
        return serializer.serialize_i64(i);
    }
    let text = n.to_string();
    let integral = !text.contains(['.', 'e', 'E']);
    match n.as_f64() {
        Some(f) if !integral => serializer.serialize_f64(f),
        _ => Err(S::Error::custom(format!(
            "number {} is out of MessagePack integer range",
            text
        ))),
    }
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced by an object"),
    }
}
