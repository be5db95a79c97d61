//! Snapping engine for timeline drags.
//!
//! While a clip is dragged, its candidate position is pulled to the end edge
//! of the nearest neighboring clip in the same layer when it comes within
//! the snap threshold. The raw cursor position wins otherwise.

use smallvec::SmallVec;

use crate::clip::ClipId;
use crate::layer::LayerId;
use crate::registry::ClipRegistry;
use crate::viewport::Viewport;

/// Default snap distance in pixels.
pub const SNAP_THRESHOLD_PX: f32 = 20.0;

/// Engine for computing snapped drag positions.
#[derive(Debug, Clone, Copy)]
pub struct SnapEngine {
    pub enabled: bool,
    /// Snap distance in pixels.
    pub threshold_px: f32,
}

impl SnapEngine {
    pub fn new() -> Self {
        Self {
            enabled: true,
            threshold_px: SNAP_THRESHOLD_PX,
        }
    }

    /// Collect the snap candidates for a drag: the end edges of every other
    /// clip in the layer, in content pixels.
    fn neighbor_ends(
        &self,
        registry: &ClipRegistry,
        viewport: &Viewport,
        layer: LayerId,
        exclude: ClipId,
    ) -> SmallVec<[f32; 8]> {
        registry
            .clips_in_layer(layer)
            .filter(|c| c.id != exclude)
            .map(|c| viewport.time_to_px(c.end()))
            .collect()
    }

    /// Snap a dragged clip's candidate left-edge position.
    ///
    /// Returns the neighbor end edge minimizing the distance to
    /// `candidate_px` when that distance is strictly below the threshold;
    /// otherwise the candidate is returned uncorrected.
    pub fn snap_drag(
        &self,
        candidate_px: f32,
        dragged: ClipId,
        layer: LayerId,
        registry: &ClipRegistry,
        viewport: &Viewport,
    ) -> f32 {
        if !self.enabled {
            return candidate_px;
        }

        let mut best: Option<(f32, f32)> = None; // (edge_px, distance)
        for edge in self.neighbor_ends(registry, viewport, layer, dragged) {
            let distance = (candidate_px - edge).abs();
            if distance < self.threshold_px && best.map_or(true, |(_, d)| distance < d) {
                best = Some((edge, distance));
            }
        }
        best.map_or(candidate_px, |(edge, _)| edge)
    }
}

impl Default for SnapEngine {
    fn default() -> Self {
        Self::new()
    }
}
