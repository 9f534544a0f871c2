//! Error handling and edge case tests.

use ghollector::{Blob, BlobConfig, BlobError, MetadataKey, PayloadEncoding};
use serde_json::json;

fn populated() -> Blob {
    let mut blob = Blob::new("issues_event", "1");
    blob.push("issue.number", 12).unwrap();
    blob.push("_snapshot_field", "issue").unwrap();
    blob
}

// --- Payload Errors ---

#[test]
fn test_malformed_payload() {
    let result = Blob::from_payload("push_event", "1", b"{not json");
    assert!(matches!(result, Err(BlobError::Parse(_))));
}

#[test]
fn test_empty_payload() {
    let result = Blob::from_payload("push_event", "1", b"");
    assert!(matches!(result, Err(BlobError::Parse(_))));
}

#[test]
fn test_truncated_payload() {
    let result = Blob::from_payload("push_event", "1", br#"{"repository":{"id":42}"#);
    assert!(matches!(result, Err(BlobError::Parse(_))));
}

#[test]
fn test_json_payload_decoded_as_messagepack() {
    let config = BlobConfig {
        encoding: PayloadEncoding::MessagePack,
        ..Default::default()
    };
    let result = Blob::from_payload_with(&config, "k", "1", br#"{"a":1}"#);
    assert!(matches!(result, Err(BlobError::Parse(_))));
}

#[test]
fn test_payload_at_limit_is_accepted() {
    let config = BlobConfig {
        max_payload_size: Some(7),
        ..Default::default()
    };
    let blob = Blob::from_payload_with(&config, "k", "1", br#"{"a":1}"#).unwrap();
    assert_eq!(blob.document().as_value(), &json!({"a": 1}));
}

// --- Metadata Errors ---

#[test]
fn test_unknown_reserved_key() {
    let mut blob = populated();
    let before = blob.clone();

    let result = blob.push("_unknown", "x");
    assert!(matches!(result, Err(BlobError::UnknownMetadataKey(_))));
    assert_eq!(blob, before);
}

#[test]
fn test_bare_prefix_is_unknown() {
    let mut blob = populated();
    let result = blob.push("_", "x");
    assert!(matches!(result, Err(BlobError::UnknownMetadataKey(_))));
}

#[test]
fn test_reserved_prefix_with_dots_is_not_a_path() {
    let mut blob = populated();
    let before = blob.clone();

    let result = blob.push("_type.nested", "x");
    assert!(matches!(result, Err(BlobError::UnknownMetadataKey(_))));
    assert_eq!(blob, before);
}

#[test]
fn test_non_string_metadata_values() {
    let values = vec![json!(1), json!(true), json!(null), json!(["a"]), json!({"a": "b"})];

    for key in MetadataKey::ALL {
        for value in &values {
            let mut blob = populated();
            let before = blob.clone();

            let result = blob.push(key.as_str(), value.clone());
            assert!(
                matches!(result, Err(BlobError::InvalidMetadataValueType { .. })),
                "{} accepted {}",
                key,
                value
            );
            assert_eq!(blob, before);
        }
    }
}

#[test]
fn test_error_messages() {
    let mut blob = Blob::new("k", "1");
    let err = blob.push("_nope", "x").unwrap_err();
    assert_eq!(err.to_string(), "Invalid metadata field \"_nope\"");

    let err = blob.push("_type", 3).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Bad value 3 for \"_type\" attribute (expected string)"
    );
}

// --- Snapshot Edge Cases ---

#[test]
fn test_snapshot_of_scalar_field() {
    let mut blob = Blob::new("k", "1");
    blob.push("count", 3).unwrap();
    blob.push("_snapshot_field", "count").unwrap();
    blob.push("_snapshot_id", "id").unwrap();

    let snapshot = blob.snapshot().unwrap();
    assert_eq!(snapshot.document().as_value(), &json!(3));
    assert_eq!(snapshot.id(), "");
}

#[test]
fn test_snapshot_id_explicit_null() {
    let mut blob = Blob::new("k", "1");
    blob.push("repo.id", json!(null)).unwrap();
    blob.push("_snapshot_field", "repo").unwrap();
    blob.push("_snapshot_id", "id").unwrap();

    assert_eq!(blob.snapshot().unwrap().id(), ghollector::MISSING_SNAPSHOT_ID);
}

#[test]
fn test_snapshot_field_is_not_a_path() {
    let mut blob = Blob::new("k", "1");
    blob.push("a.b.id", 9).unwrap();
    blob.push("_snapshot_field", "a.b").unwrap();
    blob.push("_snapshot_id", "id").unwrap();

    let snapshot = blob.snapshot().unwrap();
    assert!(snapshot.document().is_null());
    assert_eq!(snapshot.id(), "");
}

#[test]
fn test_snapshot_of_non_object_document() {
    let mut blob = Blob::from_payload("k", "1", b"[1,2,3]").unwrap();
    blob.push("_snapshot_field", "0").unwrap();
    blob.push("_snapshot_id", "id").unwrap();

    let snapshot = blob.snapshot().unwrap();
    assert!(snapshot.document().is_null());
    assert!(!blob.has_attribute("0"));
}

#[test]
fn test_clearing_snapshot_path_disables_snapshot() {
    let mut blob = populated();
    blob.push("_snapshot_id", "number").unwrap();
    assert!(blob.snapshot().is_some());

    blob.push("_snapshot_id", "").unwrap();
    assert!(blob.snapshot().is_none());
}
