//! The clip registry: single source of truth for placed media.
//!
//! Every mutation funnels through `ClipRegistry::apply`, which enforces the
//! layer non-overlap invariant and reports an explicit `EditOutcome` instead
//! of failing silently. Derived views (ruler, canvas, compositor) only read.

use cutline_assets::{Asset, MediaProbe};
use cutline_core::{Rect, Result, Span, Time};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clip::{Clip, ClipId, ClipKind, LoadState};
use crate::layer::{LayerId, LayerStack};

/// Minimum clip duration after a resize.
pub const MIN_CLIP_DURATION: Time = Time::from_secs(1);

/// The timeline extent is never shorter than this.
pub const BASE_EXTENT: Time = Time::from_secs(60);

/// Which clip edge a resize gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    Left,
    Right,
}

/// Why an edit was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The candidate span overlaps another clip in the target layer.
    Overlap,
    /// Left-edge resize is only available on video clips.
    ImageLeftResize,
    /// No clip with that id exists.
    UnknownClip,
    /// No layer with that id exists.
    UnknownLayer,
}

/// Result of applying a `ClipEdit`.
///
/// Rejections leave the registry completely unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Committed,
    Rejected(RejectReason),
}

impl EditOutcome {
    pub fn is_committed(self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// A mutation of clip placement or presentation.
#[derive(Debug, Clone)]
pub enum ClipEdit {
    /// Move a clip to a (possibly different) layer at a new start time.
    /// This is both the drag-drop commit and `moveClipToLayer`.
    Move {
        id: ClipId,
        layer: LayerId,
        start: Time,
    },
    /// Change a clip's duration by dragging one of its edges.
    Resize {
        id: ClipId,
        edge: ResizeEdge,
        duration: Time,
    },
    /// Reposition/resize the clip's frame on the canvas.
    SetFrame { id: ClipId, frame: Rect },
    /// Set an absolute rotation in degrees.
    SetRotation { id: ClipId, degrees: f32 },
    /// Rotate the canvas frame 90 degrees clockwise.
    Rotate { id: ClipId },
    /// Remove a clip. Deleting an absent id is a no-op.
    Delete { id: ClipId },
}

/// In-memory collection of placed clips and the layer stack that owns them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipRegistry {
    layers: LayerStack,
    /// Insertion order is preserved; all tie-breaks are by this order.
    clips: Vec<Clip>,
}

impl ClipRegistry {
    /// Create an empty registry with the default layer.
    pub fn new() -> Self {
        Self {
            layers: LayerStack::new(),
            clips: Vec::new(),
        }
    }

    // ── Layers ──────────────────────────────────────────────────

    /// The layer stack.
    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// Append a new empty layer.
    pub fn add_layer(&mut self) -> LayerId {
        let id = self.layers.add_layer();
        info!(%id, "added layer");
        id
    }

    // ── Clip lifecycle ──────────────────────────────────────────

    /// Place a new clip for `asset` on the default layer, immediately after
    /// the rightmost occupied span.
    ///
    /// Video clips start in `Loading`; the caller is responsible for
    /// requesting the media fetch and feeding the completion back through
    /// `resolve_load`.
    pub fn add_clip(&mut self, asset: &Asset) -> ClipId {
        let layer = self.layers.default_layer();
        let start = self.rightmost_end(layer);
        let clip = Clip::from_asset(asset, layer, start);
        let id = clip.id;
        clip.assert_valid();
        info!(clip = %id, %layer, start = %start, "added clip");
        self.clips.push(clip);
        self.debug_assert_invariants();
        id
    }

    /// Attach a finished media fetch to its clip.
    ///
    /// If the clip was deleted while the fetch was in flight, the result is
    /// discarded; a late-arriving load never revives a deleted clip.
    pub fn resolve_load(&mut self, id: ClipId, result: Result<MediaProbe>) {
        let Some(clip) = self.clips.iter_mut().find(|c| c.id == id) else {
            debug!(clip = %id, "discarding load result for deleted clip");
            return;
        };
        let ClipKind::Video { load } = &mut clip.kind else {
            debug!(clip = %id, "ignoring load result for image clip");
            return;
        };
        match result {
            Ok(probe) => {
                *load = LoadState::Ready {
                    local_url: probe.local_url,
                };
                clip.duration = probe.duration;
                clip.assert_valid();
                info!(clip = %id, duration = %probe.duration, "media ready");
            }
            Err(err) => {
                *load = LoadState::Failed {
                    reason: err.to_string(),
                };
                info!(clip = %id, %err, "media load failed");
            }
        }
    }

    // ── Edits ───────────────────────────────────────────────────

    /// Apply an edit, enforcing placement constraints.
    ///
    /// Candidate positions are always checked against the registry's current
    /// state at commit time, never against a gesture-start snapshot.
    pub fn apply(&mut self, edit: ClipEdit) -> EditOutcome {
        let outcome = self.apply_inner(edit);
        if outcome.is_committed() {
            self.debug_assert_invariants();
        }
        outcome
    }

    fn apply_inner(&mut self, edit: ClipEdit) -> EditOutcome {
        match edit {
            ClipEdit::Move { id, layer, start } => self.move_clip(id, layer, start),
            ClipEdit::Resize { id, edge, duration } => self.resize_clip(id, edge, duration),
            ClipEdit::SetFrame { id, frame } => self.with_clip(id, |clip| clip.frame = frame),
            ClipEdit::SetRotation { id, degrees } => {
                self.with_clip(id, |clip| clip.rotation_degrees = degrees.rem_euclid(360.0))
            }
            ClipEdit::Rotate { id } => self.with_clip(id, Clip::rotate_cw),
            ClipEdit::Delete { id } => {
                let before = self.clips.len();
                self.clips.retain(|c| c.id != id);
                if self.clips.len() < before {
                    info!(clip = %id, "deleted clip");
                }
                EditOutcome::Committed
            }
        }
    }

    fn move_clip(&mut self, id: ClipId, layer: LayerId, start: Time) -> EditOutcome {
        if !self.layers.contains(layer) {
            return EditOutcome::Rejected(RejectReason::UnknownLayer);
        }
        let Some(clip) = self.clips.iter().find(|c| c.id == id) else {
            return EditOutcome::Rejected(RejectReason::UnknownClip);
        };

        let start = start.max(Time::ZERO);
        let candidate = Span::new(start, clip.duration);
        if self.overlaps_any(candidate, layer, id) {
            debug!(clip = %id, %layer, start = %start, "move rejected: overlap");
            return EditOutcome::Rejected(RejectReason::Overlap);
        }

        let clip = self
            .clips
            .iter_mut()
            .find(|c| c.id == id)
            .expect("clip existence checked above");
        clip.layer = layer;
        clip.start = start;
        debug!(clip = %id, %layer, start = %start, "moved clip");
        EditOutcome::Committed
    }

    fn resize_clip(&mut self, id: ClipId, edge: ResizeEdge, duration: Time) -> EditOutcome {
        let Some(clip) = self.clips.iter().find(|c| c.id == id) else {
            return EditOutcome::Rejected(RejectReason::UnknownClip);
        };
        if edge == ResizeEdge::Left && !clip.is_video() {
            return EditOutcome::Rejected(RejectReason::ImageLeftResize);
        }

        let duration = duration.max(MIN_CLIP_DURATION);
        let candidate = match edge {
            ResizeEdge::Right => Span::new(clip.start, duration),
            ResizeEdge::Left => {
                // The right edge stays put; a duration longer than the span
                // reaching back to zero is clamped at zero.
                let end = clip.end();
                let start = (end - duration).max(Time::ZERO);
                Span::from_start_end(start, end)
            }
        };
        if self.overlaps_any(candidate, clip.layer, id) {
            debug!(clip = %id, "resize rejected: overlap");
            return EditOutcome::Rejected(RejectReason::Overlap);
        }

        let clip = self
            .clips
            .iter_mut()
            .find(|c| c.id == id)
            .expect("clip existence checked above");
        clip.start = candidate.start;
        clip.duration = candidate.duration;
        clip.assert_valid();
        debug!(clip = %id, start = %clip.start, duration = %clip.duration, "resized clip");
        EditOutcome::Committed
    }

    fn with_clip(&mut self, id: ClipId, f: impl FnOnce(&mut Clip)) -> EditOutcome {
        match self.clips.iter_mut().find(|c| c.id == id) {
            Some(clip) => {
                f(clip);
                EditOutcome::Committed
            }
            None => EditOutcome::Rejected(RejectReason::UnknownClip),
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Look up a clip by id.
    pub fn get(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// All clips in insertion order.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Clips in a layer, in insertion order.
    pub fn clips_in_layer(&self, layer: LayerId) -> impl Iterator<Item = &Clip> {
        self.clips.iter().filter(move |c| c.layer == layer)
    }

    /// End of the rightmost occupied span in a layer (zero when empty).
    ///
    /// The latest end time wins; ties resolve to the first clip in insertion
    /// order, which is deterministic.
    pub fn rightmost_end(&self, layer: LayerId) -> Time {
        self.clips_in_layer(layer)
            .map(|c| c.end())
            .fold(Time::ZERO, Time::max)
    }

    /// Maximum playback extent: at least `BASE_EXTENT`, or the latest clip
    /// end if that is later.
    pub fn max_extent(&self) -> Time {
        self.clips
            .iter()
            .map(|c| c.end())
            .fold(BASE_EXTENT, Time::max)
    }

    /// Whether any clip's media is still loading.
    pub fn any_loading(&self) -> bool {
        self.clips.iter().any(Clip::is_loading)
    }

    /// Number of clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    fn overlaps_any(&self, candidate: Span, layer: LayerId, exclude: ClipId) -> bool {
        self.clips_in_layer(layer)
            .any(|other| other.id != exclude && candidate.overlaps(other.span()))
    }

    fn debug_assert_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            for (i, a) in self.clips.iter().enumerate() {
                a.assert_valid();
                debug_assert!(
                    self.layers.contains(a.layer),
                    "clip {} references unknown {}",
                    a.id,
                    a.layer
                );
                for b in &self.clips[i + 1..] {
                    debug_assert!(a.id != b.id, "duplicate clip id {}", a.id);
                    debug_assert!(
                        a.layer != b.layer || !a.span().overlaps(b.span()),
                        "clips {} and {} overlap in {}",
                        a.id,
                        b.id,
                        a.layer
                    );
                }
            }
        }
    }
}

impl Default for ClipRegistry {
    fn default() -> Self {
        Self::new()
    }
}
