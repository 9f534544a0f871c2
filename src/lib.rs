//! # ghollector
//!
//! Self-describing event records headed for a document store.
//!
//! ## Core Concepts
//!
//! - **Blobs**: a JSON document plus id, kind, timestamp, and snapshot paths
//! - **Reserved keys**: `_type`, `_snapshot_id`, `_snapshot_field` set metadata
//!   instead of document fields
//! - **Snapshots**: a second record derived from a nested object of a live one
//!
//! ## Example
//!
//! ```
//! use ghollector::{Blob, PayloadEncoding};
//!
//! let mut blob = Blob::from_payload(
//!     "push_event",
//!     "1",
//!     br#"{"repository":{"id":42},"ref":"refs/heads/main"}"#,
//! )?;
//! blob.push("_snapshot_field", "repository")?;
//! blob.push("_snapshot_id", "id")?;
//!
//! let snapshot = blob.snapshot().expect("both snapshot paths are set");
//! assert_eq!(snapshot.id(), "42");
//!
//! let entries = blob.index_entries(PayloadEncoding::Json)?;
//! assert_eq!(entries.len(), 2);
//! # Ok::<(), ghollector::BlobError>(())
//! ```

pub mod blob;
pub mod document;
pub mod error;
pub mod types;

// Re-exports
pub use blob::{
    canonical_id, is_reserved, Blob, BlobConfig, IndexEntry, MetadataKey, MISSING_SNAPSHOT_ID,
    RESERVED_PREFIX,
};
pub use document::{Document, FieldPath};
pub use error::{BlobError, Result};
pub use types::*;
