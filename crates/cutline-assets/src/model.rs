//! Asset descriptors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique asset identifier.
pub type AssetId = Uuid;

/// Kind of media an asset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Video,
}

/// A stored media asset descriptor.
///
/// This is the record the persistence collaborator keeps; the editor only
/// ever reads it. The bytes behind `url` are fetched separately when a clip
/// referencing the asset is placed on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Unique asset ID
    pub id: AssetId,
    /// Display name (usually the uploaded file name)
    pub name: String,
    /// Source URL
    pub url: String,
    /// Media kind
    pub kind: MediaKind,
    /// Size in bytes as reported at upload time
    pub size_bytes: u64,
}

impl Asset {
    /// Create a new asset descriptor with a fresh id.
    pub fn new(name: impl Into<String>, url: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            url: url.into(),
            kind,
            size_bytes: 0,
        }
    }

    /// Builder-style size setter.
    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }
}

/// Fields supplied when registering a new asset with the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAsset {
    pub name: String,
    pub url: String,
    pub kind: MediaKind,
    pub size_bytes: u64,
}
