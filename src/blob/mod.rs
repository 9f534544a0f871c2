//! Records: payload documents with reserved metadata and snapshot derivation.

mod entry;
mod metadata;
mod record;

pub use entry::IndexEntry;
pub use metadata::{is_reserved, MetadataKey, RESERVED_PREFIX};
pub use record::{canonical_id, Blob, BlobConfig, MISSING_SNAPSHOT_ID};
