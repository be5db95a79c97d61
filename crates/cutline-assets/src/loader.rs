//! Background media loading.
//!
//! Placing a video clip on the timeline kicks off a fetch of its source so
//! playback has a local playable handle (the object-URL analogue). Fetches
//! run on a blocking pool; completions come back as `LoadEvent`s on a channel
//! that the editor session drains on its single event queue, so registry
//! mutation never happens off-thread.
//!
//! There is no cancellation of in-flight fetches: deleting a clip mid-load
//! simply means the completion finds no clip to attach to and is discarded
//! at delivery time.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use cutline_core::{CutlineError, Result, Time};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::model::Asset;

/// The resolved playable handle for a fetched media source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaProbe {
    /// Media-reported duration.
    pub duration: Time,
    /// Local URL the playback element can be pointed at.
    pub local_url: String,
}

/// Boundary for fetching asset bytes (standard HTTP GET in production).
///
/// `fetch` may block; the loader always runs it off the session thread.
pub trait MediaFetcher: Send + Sync {
    fn fetch(&self, asset: &Asset) -> Result<MediaProbe>;
}

/// A completed (or failed) fetch, addressed to the clip that requested it.
#[derive(Debug)]
pub struct LoadEvent {
    pub clip_id: Uuid,
    pub result: Result<MediaProbe>,
}

/// Spawns media fetches and funnels their completions into a channel.
pub struct MediaLoader {
    runtime: tokio::runtime::Runtime,
    fetcher: Arc<dyn MediaFetcher>,
    tx: Sender<LoadEvent>,
}

impl MediaLoader {
    /// Create a loader and the receiving end of its completion channel.
    pub fn new(fetcher: Arc<dyn MediaFetcher>) -> Result<(Self, Receiver<LoadEvent>)> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .thread_name("cutline-media")
            .build()?;
        let (tx, rx) = unbounded();
        Ok((
            Self {
                runtime,
                fetcher,
                tx,
            },
            rx,
        ))
    }

    /// Request a fetch of `asset` on behalf of `clip_id`.
    ///
    /// Returns immediately; the outcome arrives later as a `LoadEvent`.
    pub fn request(&self, clip_id: Uuid, asset: Asset) {
        debug!(%clip_id, url = %asset.url, "requesting media fetch");
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        self.runtime.spawn_blocking(move || {
            let result = fetcher.fetch(&asset);
            if let Err(err) = &result {
                warn!(%clip_id, url = %asset.url, %err, "media fetch failed");
            }
            // The session may already be gone; a dead channel is fine.
            let _ = tx.send(LoadEvent { clip_id, result });
        });
    }
}

/// Canned fetcher for tests: per-asset durations or failures, with an
/// optional artificial delay.
#[derive(Default)]
pub struct StubFetcher {
    outcomes: Mutex<std::collections::HashMap<Uuid, StubOutcome>>,
    delay: Option<Duration>,
}

enum StubOutcome {
    Duration(Time),
    Failure(String),
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every fetch sleep before completing.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fetches of this asset resolve with the given duration.
    pub fn set_duration(&self, asset_id: Uuid, duration: Time) {
        self.outcomes
            .lock()
            .insert(asset_id, StubOutcome::Duration(duration));
    }

    /// Fetches of this asset fail with the given message.
    pub fn set_failure(&self, asset_id: Uuid, message: impl Into<String>) {
        self.outcomes
            .lock()
            .insert(asset_id, StubOutcome::Failure(message.into()));
    }
}

impl MediaFetcher for StubFetcher {
    fn fetch(&self, asset: &Asset) -> Result<MediaProbe> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        match self.outcomes.lock().get(&asset.id) {
            Some(StubOutcome::Duration(duration)) => Ok(MediaProbe {
                duration: *duration,
                local_url: format!("blob:{}", asset.id),
            }),
            Some(StubOutcome::Failure(message)) => Err(CutlineError::AssetLoad(message.clone())),
            None => Err(CutlineError::AssetLoad(format!(
                "no canned outcome for asset {}",
                asset.id
            ))),
        }
    }
}
