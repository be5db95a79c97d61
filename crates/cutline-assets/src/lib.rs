//! Cutline Assets - Media asset handling
//!
//! Implements the asset-facing boundaries of the editor:
//! - Asset descriptors (what the persistence collaborator stores)
//! - The `AssetStore` collaborator trait with an in-memory implementation
//! - Background media loading that resolves playable handles off the
//!   session thread and delivers completions as events

pub mod loader;
pub mod model;
pub mod store;

pub use loader::{LoadEvent, MediaFetcher, MediaLoader, MediaProbe, StubFetcher};
pub use model::{Asset, AssetId, MediaKind, NewAsset};
pub use store::{AssetStore, MemoryAssetStore};
