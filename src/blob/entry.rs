//! What a record hands to the store.

use super::record::Blob;
use crate::error::Result;
use crate::types::{PayloadEncoding, Timestamp};

/// One document ready for indexing.
///
/// The store picks its keys from `kind` and `id`; `body` is the encoded document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pub id: String,
    pub kind: String,
    pub timestamp: Timestamp,
    pub body: Vec<u8>,
}

impl Blob {
    /// Build the index entry for this record alone.
    pub fn index_entry(&self, encoding: PayloadEncoding) -> Result<IndexEntry> {
        Ok(IndexEntry {
            id: self.id().to_string(),
            kind: self.kind().to_string(),
            timestamp: self.timestamp(),
            body: self.encode_as(encoding)?,
        })
    }

    /// Entries for this record followed by its snapshot, when one exists.
    pub fn index_entries(&self, encoding: PayloadEncoding) -> Result<Vec<IndexEntry>> {
        let mut entries = vec![self.index_entry(encoding)?];
        if let Some(snapshot) = self.snapshot() {
            entries.push(snapshot.index_entry(encoding)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entries_without_snapshot() {
        let mut blob = Blob::new("watch_event", "100");
        blob.push("action", "started").unwrap();

        let entries = blob.index_entries(PayloadEncoding::Json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "100");
        assert_eq!(entries[0].kind, "watch_event");
        assert_eq!(entries[0].body, br#"{"action":"started"}"#);
    }

    #[test]
    fn test_entries_with_snapshot() {
        let mut blob = Blob::new("issues_event", "5");
        blob.push("issue", json!({"number": 3, "title": "crash"})).unwrap();
        blob.push("_snapshot_field", "issue").unwrap();
        blob.push("_snapshot_id", "number").unwrap();

        let entries = blob.index_entries(PayloadEncoding::Json).unwrap();
        assert_eq!(entries.len(), 2);

        let snapshot = &entries[1];
        assert_eq!(snapshot.id, "3");
        assert_eq!(snapshot.kind, "issues_event");
        assert_eq!(snapshot.timestamp, entries[0].timestamp);
        let body: serde_json::Value = serde_json::from_slice(&snapshot.body).unwrap();
        assert_eq!(body, json!({"number": 3, "title": "crash"}));
    }

    #[test]
    fn test_messagepack_entry() {
        let blob = Blob::from_document("k", "1", json!({"a": [1, 2]}).into());
        let entry = blob.index_entry(PayloadEncoding::MessagePack).unwrap();
        let decoded: serde_json::Value = rmp_serde::from_slice(&entry.body).unwrap();
        assert_eq!(decoded, json!({"a": [1, 2]}));
    }
}
