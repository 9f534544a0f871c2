//! The record type.

use super::metadata::{is_reserved, MetadataKey};
use crate::document::{Document, FieldPath};
use crate::error::{BlobError, Result};
use crate::types::{PayloadEncoding, Timestamp};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

/// Id given to a snapshot whose id path resolves to nothing (or to `null`).
pub const MISSING_SNAPSHOT_ID: &str = "";

/// Payload decoding configuration.
#[derive(Clone, Debug, Default)]
pub struct BlobConfig {
    /// Encoding of raw payloads and of encoded documents.
    pub encoding: PayloadEncoding,

    /// Reject payloads larger than this many bytes.
    pub max_payload_size: Option<usize>,
}

/// An arbitrary event payload plus the metadata needed to store it.
///
/// Ordinary fields live in the document; the kind and snapshot paths are set
/// through reserved keys (see [`MetadataKey`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
    /// Payload content.
    document: Document,

    /// Primary key in the store.
    id: String,

    /// Record kind in the store.
    kind: String,

    /// Dotted path of the snapshot id, resolved inside the snapshot document.
    snapshot_id_path: String,

    /// Top-level field of the document extracted as the snapshot.
    snapshot_field_path: String,

    /// Creation time. Defaults to construction time.
    timestamp: Timestamp,
}

impl Blob {
    /// Create an empty record for the given kind and id.
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::from_document(kind, id, Document::new())
    }

    /// Create a record owning an existing document.
    pub fn from_document(kind: impl Into<String>, id: impl Into<String>, document: Document) -> Self {
        Self {
            document,
            id: id.into(),
            kind: kind.into(),
            snapshot_id_path: String::new(),
            snapshot_field_path: String::new(),
            timestamp: Timestamp::now(),
        }
    }

    /// Create a record from a raw JSON payload.
    pub fn from_payload(kind: impl Into<String>, id: impl Into<String>, payload: &[u8]) -> Result<Self> {
        Self::from_payload_with(&BlobConfig::default(), kind, id, payload)
    }

    /// Create a record from a raw payload, honoring the encoding and size limit.
    pub fn from_payload_with(
        config: &BlobConfig,
        kind: impl Into<String>,
        id: impl Into<String>,
        payload: &[u8],
    ) -> Result<Self> {
        let kind = kind.into();
        let id = id.into();

        if let Some(limit) = config.max_payload_size {
            if payload.len() > limit {
                warn!(kind = %kind, id = %id, size = payload.len(), limit, "payload exceeds size limit");
                return Err(BlobError::PayloadTooLarge {
                    size: payload.len(),
                    limit,
                });
            }
        }

        let document = Document::decode(payload, config.encoding).map_err(|err| {
            warn!(kind = %kind, id = %id, error = %err, "failed to decode payload");
            err
        })?;
        Ok(Self::from_document(kind, id, document))
    }

    /// Replace the timestamp, e.g. with an upstream event time.
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn set_timestamp(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn snapshot_id_path(&self) -> &str {
        &self.snapshot_id_path
    }

    pub fn snapshot_field_path(&self) -> &str {
        &self.snapshot_field_path
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Whether `key` is a top-level field of the document. Not a path lookup.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.document.contains_key(key)
    }

    /// Resolve a dotted key in the document.
    pub fn get_path(&self, key: &str) -> Option<&Value> {
        self.document.get_path(&FieldPath::parse(key))
    }

    /// Set a field.
    ///
    /// Reserved keys update metadata and leave the document untouched; any
    /// other key is split on `.` and written into the document, creating
    /// intermediate objects. On error nothing is modified.
    pub fn push(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        if is_reserved(key) {
            return self.push_metadata(key, value);
        }
        trace!(id = %self.id, key, "setting document field");
        self.document.set_path(&FieldPath::parse(key), value);
        Ok(())
    }

    /// Serialize a typed value and [`push`](Self::push) it.
    pub fn push_serialize<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(BlobError::encode)?;
        self.push(key, value)
    }

    /// Encode the document as JSON. Metadata is not part of the output.
    pub fn encode(&self) -> Result<Vec<u8>> {
        self.encode_as(PayloadEncoding::Json)
    }

    pub fn encode_as(&self, encoding: PayloadEncoding) -> Result<Vec<u8>> {
        self.document.encode(encoding)
    }

    pub fn encode_with(&self, config: &BlobConfig) -> Result<Vec<u8>> {
        self.encode_as(config.encoding)
    }

    /// Derive the snapshot record, if both snapshot paths are set.
    ///
    /// The snapshot document is a copy of the top-level field named by the
    /// snapshot field path (`null` when absent). Its id is the value at the
    /// snapshot id path inside that copy, rendered by [`canonical_id`]. Kind and
    /// timestamp are inherited.
    pub fn snapshot(&self) -> Option<Blob> {
        if self.snapshot_id_path.is_empty() || self.snapshot_field_path.is_empty() {
            return None;
        }

        let document = Document::from(
            self.document
                .get(&self.snapshot_field_path)
                .cloned()
                .unwrap_or(Value::Null),
        );
        let id = document
            .get_path(&FieldPath::parse(&self.snapshot_id_path))
            .map(canonical_id)
            .unwrap_or_else(|| MISSING_SNAPSHOT_ID.to_string());

        if id.is_empty() {
            warn!(
                kind = %self.kind,
                id = %self.id,
                field = %self.snapshot_field_path,
                id_path = %self.snapshot_id_path,
                "snapshot id resolved to nothing"
            );
        } else {
            debug!(kind = %self.kind, id = %self.id, snapshot_id = %id, "derived snapshot");
        }

        Some(Blob {
            document,
            id,
            kind: self.kind.clone(),
            snapshot_id_path: String::new(),
            snapshot_field_path: String::new(),
            timestamp: self.timestamp,
        })
    }

    fn push_metadata(&mut self, key: &str, value: Value) -> Result<()> {
        let field = MetadataKey::parse(key)
            .ok_or_else(|| BlobError::UnknownMetadataKey(key.to_string()))?;
        let value = match value {
            Value::String(s) => s,
            other => {
                return Err(BlobError::InvalidMetadataValueType {
                    key: key.to_string(),
                    value: other.to_string(),
                })
            }
        };

        debug!(id = %self.id, field = %field, value = %value, "setting metadata");
        *self.metadata_slot(field) = value;
        Ok(())
    }

    fn metadata_slot(&mut self, field: MetadataKey) -> &mut String {
        match field {
            MetadataKey::Type => &mut self.kind,
            MetadataKey::SnapshotId => &mut self.snapshot_id_path,
            MetadataKey::SnapshotField => &mut self.snapshot_field_path,
        }
    }
}

/// Render a value as a record id.
///
/// Strings are used verbatim, `null` becomes [`MISSING_SNAPSHOT_ID`], and
/// everything else is its compact JSON text (`42`, `true`, `{"a":1}`).
pub fn canonical_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => MISSING_SNAPSHOT_ID.to_string(),
        other => other.to_string(),
    }
}
