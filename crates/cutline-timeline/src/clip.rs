//! Clip types for the timeline.

use cutline_core::{Rect, Span, Time};
use cutline_assets::{Asset, AssetId, MediaKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::layer::LayerId;

/// Unique clip identifier.
pub type ClipId = Uuid;

/// Default duration for image clips.
pub const IMAGE_DURATION: Time = Time::from_secs(5);

/// Placeholder duration for video clips until their probe resolves.
pub const VIDEO_PLACEHOLDER_DURATION: Time = Time::from_secs(10);

/// Load state of a video clip's media source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// Fetch in flight; the clip occupies its span but is not playable.
    Loading,
    /// Fetch resolved to a local playable handle.
    Ready { local_url: String },
    /// Fetch failed; the clip stays on the timeline but never plays.
    Failed { reason: String },
}

/// Kind-specific clip data.
///
/// Images have a fixed default duration and are always playable; videos
/// resolve their duration asynchronously and carry a load state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipKind {
    Image,
    Video { load: LoadState },
}

/// A placed instance of a media asset on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clip {
    /// Unique clip ID
    pub id: ClipId,
    /// Owning layer; exactly one at any time
    pub layer: LayerId,
    /// Display name (from the asset)
    pub name: String,
    /// Source asset ID
    pub asset: AssetId,
    /// Source URL (fallback until a local handle resolves)
    pub source_url: String,
    /// Kind-specific data
    pub kind: ClipKind,
    /// Start offset on the timeline
    pub start: Time,
    /// Duration on the timeline
    pub duration: Time,
    /// On-canvas frame rectangle
    pub frame: Rect,
    /// Rotation in degrees
    pub rotation_degrees: f32,
}

impl Clip {
    /// Create a clip from an asset, placed at `start` on `layer`.
    ///
    /// Video clips begin in `Loading` with a placeholder duration; image
    /// clips are immediately playable at the fixed image duration.
    pub fn from_asset(asset: &Asset, layer: LayerId, start: Time) -> Self {
        let (kind, duration) = match asset.kind {
            MediaKind::Image => (ClipKind::Image, IMAGE_DURATION),
            MediaKind::Video => (
                ClipKind::Video {
                    load: LoadState::Loading,
                },
                VIDEO_PLACEHOLDER_DURATION,
            ),
        };
        Self {
            id: Uuid::new_v4(),
            layer,
            name: asset.name.clone(),
            asset: asset.id,
            source_url: asset.url.clone(),
            kind,
            start,
            duration,
            frame: Rect::default(),
            rotation_degrees: 0.0,
        }
    }

    /// The clip's occupied `[start, start + duration)` interval.
    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.duration)
    }

    /// End time on the timeline (exclusive).
    #[inline]
    pub fn end(&self) -> Time {
        self.start + self.duration
    }

    /// Whether this clip is a video.
    pub fn is_video(&self) -> bool {
        matches!(self.kind, ClipKind::Video { .. })
    }

    /// Whether this clip's media is still loading.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.kind,
            ClipKind::Video {
                load: LoadState::Loading
            }
        )
    }

    /// Whether this clip is eligible for playback.
    ///
    /// Images always are; videos only once their source has resolved.
    /// Failed loads stay on the timeline but never play.
    pub fn playable(&self) -> bool {
        match &self.kind {
            ClipKind::Image => true,
            ClipKind::Video { load } => matches!(load, LoadState::Ready { .. }),
        }
    }

    /// The local playable URL, if the source has resolved.
    pub fn local_url(&self) -> Option<&str> {
        match &self.kind {
            ClipKind::Video {
                load: LoadState::Ready { local_url },
            } => Some(local_url),
            _ => None,
        }
    }

    /// Rotate the clip's canvas frame by 90 degrees clockwise.
    pub fn rotate_cw(&mut self) {
        self.rotation_degrees = (self.rotation_degrees + 90.0) % 360.0;
    }

    /// Debug-check the clip's own invariants.
    pub(crate) fn assert_valid(&self) {
        debug_assert!(
            !self.duration.is_zero() && !self.duration.is_negative(),
            "clip {} has non-positive duration",
            self.id
        );
        debug_assert!(
            !self.start.is_negative(),
            "clip {} starts before zero",
            self.id
        );
    }
}
