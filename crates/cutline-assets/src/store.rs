//! Asset persistence collaborator boundary.
//!
//! The editor core does not implement storage, upload chunking, or retries;
//! it calls through this trait. The identity collaborator supplies the
//! `owner_id` key, which the core treats as opaque.

use std::collections::HashMap;

use cutline_core::{CutlineError, Result};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::model::{Asset, AssetId, NewAsset};

/// Persistence boundary for media assets.
pub trait AssetStore: Send + Sync {
    /// List all assets belonging to an owner.
    fn list(&self, owner_id: &str) -> Result<Vec<Asset>>;

    /// Register a new asset for an owner.
    fn create(&self, owner_id: &str, asset: NewAsset) -> Result<Asset>;

    /// Look up a single asset by id.
    fn get(&self, owner_id: &str, id: AssetId) -> Result<Asset> {
        self.list(owner_id)?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| CutlineError::NotFound(format!("asset {id}")))
    }
}

/// In-memory asset store, keyed by owner.
///
/// Used for editor sessions and tests; a real deployment substitutes a
/// database-backed implementation behind the same trait.
#[derive(Default)]
pub struct MemoryAssetStore {
    assets: Mutex<HashMap<String, Vec<Asset>>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssetStore for MemoryAssetStore {
    fn list(&self, owner_id: &str) -> Result<Vec<Asset>> {
        Ok(self
            .assets
            .lock()
            .get(owner_id)
            .cloned()
            .unwrap_or_default())
    }

    fn create(&self, owner_id: &str, asset: NewAsset) -> Result<Asset> {
        let asset = Asset {
            id: Uuid::new_v4(),
            name: asset.name,
            url: asset.url,
            kind: asset.kind,
            size_bytes: asset.size_bytes,
        };
        self.assets
            .lock()
            .entry(owner_id.to_string())
            .or_default()
            .push(asset.clone());
        Ok(asset)
    }
}
