//! Canvas frame presets.
//!
//! The canvas is the on-screen surface clips are composed onto. Its pixel
//! dimensions come from a fixed preset list; the on-screen rectangle is the
//! preset's aspect ratio fitted into the available container.

use cutline_core::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Padding left around the canvas inside its container, per side.
const CANVAS_PADDING: f32 = 32.0;

/// Fixed canvas dimension presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasPreset {
    Youtube,
    InstagramReel,
    YoutubeShorts,
    Square,
}

impl CanvasPreset {
    /// All presets, in menu order.
    pub const ALL: [Self; 4] = [
        Self::Youtube,
        Self::InstagramReel,
        Self::YoutubeShorts,
        Self::Square,
    ];

    /// Output pixel dimensions.
    pub fn resolution(self) -> (u32, u32) {
        match self {
            Self::Youtube => (1920, 1080),
            Self::InstagramReel => (1080, 1920),
            Self::YoutubeShorts => (1080, 1920),
            Self::Square => (1080, 1080),
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Youtube => "YouTube Video (16:9)",
            Self::InstagramReel => "Instagram Reel (9:16)",
            Self::YoutubeShorts => "YouTube Shorts (9:16)",
            Self::Square => "Square (1:1)",
        }
    }

    /// Width / height aspect ratio.
    pub fn aspect(self) -> f32 {
        let (w, h) = self.resolution();
        w as f32 / h as f32
    }

    /// The on-screen canvas rectangle inside a container of the given size.
    pub fn fit(self, container: Vec2) -> Rect {
        Rect::aspect_fit(self.aspect(), container, CANVAS_PADDING)
    }
}

impl Default for CanvasPreset {
    fn default() -> Self {
        Self::Youtube
    }
}
