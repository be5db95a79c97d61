//! Time-to-pixel mapping for the timeline ruler, with bounded zoom.

use cutline_core::Time;
use serde::{Deserialize, Serialize};

/// Minimum zoom, in pixels per second.
pub const MIN_ZOOM: f32 = 50.0;

/// Maximum zoom, in pixels per second.
pub const MAX_ZOOM: f32 = 200.0;

/// Multiplicative step for zoom in/out.
const ZOOM_STEP: f32 = 1.2;

/// Seconds between major ruler marks.
const MAJOR_MARK_INTERVAL: i64 = 5;

/// A tick mark on the timeline ruler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RulerMark {
    /// Horizontal position in content pixels.
    pub px: f32,
    /// Whole-second label.
    pub seconds: i64,
    /// Major marks get a taller tick and a label.
    pub major: bool,
}

/// The visible window onto the timeline.
///
/// The scroll offset is stored in pixels, so changing zoom keeps the pixel
/// offset fixed and the instant under the cursor may shift on screen. That
/// matches the editor's scroll contract; preserving time-under-cursor would
/// be a different product decision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pixels_per_second: f32,
    /// Horizontal scroll offset in pixels.
    pub scroll_px: f32,
}

impl Viewport {
    /// Create a viewport at the default zoom.
    pub fn new() -> Self {
        Self {
            pixels_per_second: 100.0,
            scroll_px: 0.0,
        }
    }

    /// Current zoom factor in pixels per second.
    #[inline]
    pub fn pixels_per_second(&self) -> f32 {
        self.pixels_per_second
    }

    /// Set the zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    ///
    /// Idempotent at the bounds: setting an out-of-range value twice leaves
    /// the same clamped zoom.
    pub fn set_zoom(&mut self, pixels_per_second: f32) {
        self.pixels_per_second = pixels_per_second.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Zoom in by one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.pixels_per_second * ZOOM_STEP);
    }

    /// Zoom out by one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.pixels_per_second / ZOOM_STEP);
    }

    /// Map a time to a content-pixel position.
    #[inline]
    pub fn time_to_px(&self, time: Time) -> f32 {
        time.to_seconds_f64() as f32 * self.pixels_per_second
    }

    /// Map a content-pixel position to a time.
    ///
    /// The division happens in f64 so whole-pixel positions at whole-number
    /// zoom levels convert exactly; f32 would leak rounding noise into the
    /// rational clock.
    #[inline]
    pub fn px_to_time(&self, px: f32) -> Time {
        Time::from_seconds_f64(px as f64 / self.pixels_per_second as f64)
    }

    /// Time addressed by a click at `px` in the ruler's viewport coordinates
    /// (scroll offset applied).
    pub fn time_at_click(&self, px: f32) -> Time {
        self.px_to_time(px + self.scroll_px)
    }

    /// Total content width for the given timeline extent.
    pub fn content_width(&self, extent: Time) -> f32 {
        self.time_to_px(extent)
    }

    /// Tick marks covering `[0, extent]`, one per second, a major mark every
    /// five seconds.
    pub fn ruler_marks(&self, extent: Time) -> Vec<RulerMark> {
        let last = extent.to_seconds_f64().ceil() as i64;
        (0..=last)
            .map(|seconds| RulerMark {
                px: seconds as f32 * self.pixels_per_second,
                seconds,
                major: seconds % MAJOR_MARK_INTERVAL == 0,
            })
            .collect()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
