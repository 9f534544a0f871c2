//! Reserved metadata keys.
//!
//! Keys starting with [`RESERVED_PREFIX`] never reach the document tree. The
//! set of recognized keys is closed: anything else with the prefix is rejected.

use std::fmt;

/// Prefix that routes a pushed key to metadata.
pub const RESERVED_PREFIX: char = '_';

/// A recognized metadata attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    /// `_type`: the record kind in the store.
    Type,
    /// `_snapshot_id`: dotted path, within the snapshot document, of the snapshot id.
    SnapshotId,
    /// `_snapshot_field`: top-level field of the document extracted as the snapshot.
    SnapshotField,
}

impl MetadataKey {
    pub const ALL: [MetadataKey; 3] = [
        MetadataKey::Type,
        MetadataKey::SnapshotId,
        MetadataKey::SnapshotField,
    ];

    /// The key as pushed by producers.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetadataKey::Type => "_type",
            MetadataKey::SnapshotId => "_snapshot_id",
            MetadataKey::SnapshotField => "_snapshot_field",
        }
    }

    /// Look up a reserved key in the fixed table.
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a pushed key belongs to the metadata namespace.
pub fn is_reserved(key: &str) -> bool {
    key.starts_with(RESERVED_PREFIX)
}
