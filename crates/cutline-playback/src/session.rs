//! The editor session: single-threaded owner of all mutable editor state.
//!
//! User input callbacks, transport ticks, and asset-load completions all
//! funnel through this type on one sequential queue, so no two mutations
//! ever interleave mid-step. Gestures are resolved against the registry's
//! current state at commit time, never against a snapshot taken when the
//! gesture started.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use cutline_assets::{Asset, LoadEvent, MediaFetcher, MediaKind, MediaLoader};
use cutline_core::{Rect, Result, Time, Vec2};
use cutline_timeline::{
    CanvasPreset, ClipEdit, ClipId, ClipRegistry, EditOutcome, LayerId, ResizeEdge, SnapEngine,
    Viewport,
};
use tracing::debug;

use crate::compositor::{compose, CompositorFrame};
use crate::transport::{Transport, TransportError};

/// An editing session over one timeline.
pub struct EditorSession {
    registry: ClipRegistry,
    viewport: Viewport,
    transport: Transport,
    snap: SnapEngine,
    canvas: CanvasPreset,
    loader: MediaLoader,
    load_events: Receiver<LoadEvent>,
}

impl EditorSession {
    /// Create a session fetching media through the given boundary.
    pub fn new(fetcher: Arc<dyn MediaFetcher>) -> Result<Self> {
        let (loader, load_events) = MediaLoader::new(fetcher)?;
        Ok(Self {
            registry: ClipRegistry::new(),
            viewport: Viewport::new(),
            transport: Transport::new(),
            snap: SnapEngine::new(),
            canvas: CanvasPreset::default(),
            loader,
            load_events,
        })
    }

    // ── State access ────────────────────────────────────────────

    pub fn registry(&self) -> &ClipRegistry {
        &self.registry
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn snap_mut(&mut self) -> &mut SnapEngine {
        &mut self.snap
    }

    pub fn canvas_preset(&self) -> CanvasPreset {
        self.canvas
    }

    pub fn set_canvas_preset(&mut self, preset: CanvasPreset) {
        self.canvas = preset;
    }

    /// On-screen canvas rectangle for the given container size.
    pub fn canvas_rect(&self, container: Vec2) -> Rect {
        self.canvas.fit(container)
    }

    // ── Arrangement ─────────────────────────────────────────────

    /// Place a clip for an asset; video sources start fetching immediately.
    pub fn add_asset(&mut self, asset: &Asset) -> ClipId {
        let id = self.registry.add_clip(asset);
        if asset.kind == MediaKind::Video {
            self.loader.request(id, asset.clone());
        }
        id
    }

    /// Append a new layer.
    pub fn add_layer(&mut self) -> LayerId {
        self.registry.add_layer()
    }

    /// Apply any clip edit.
    pub fn edit(&mut self, edit: ClipEdit) -> EditOutcome {
        self.commit(edit)
    }

    /// Apply an edit and keep the playhead inside the timeline.
    ///
    /// Deleting or shrinking the clip that defines the extent can pull the
    /// extent back past a stopped playhead; re-seeking to the current time
    /// clamps it.
    fn commit(&mut self, edit: ClipEdit) -> EditOutcome {
        let outcome = self.registry.apply(edit);
        if outcome.is_committed() && self.transport.current_time() > self.registry.max_extent() {
            self.transport
                .seek(self.transport.current_time(), &self.registry);
        }
        outcome
    }

    /// Commit a drag: snap the candidate position against the clip's own
    /// layer, then move to the drop layer under the overlap check.
    pub fn drop_clip(
        &mut self,
        id: ClipId,
        candidate_px: f32,
        target_layer: LayerId,
    ) -> EditOutcome {
        let Some(clip) = self.registry.get(id) else {
            return self.commit(ClipEdit::Move {
                id,
                layer: target_layer,
                start: Time::ZERO,
            });
        };
        let snapped = self.snap.snap_drag(
            candidate_px,
            id,
            clip.layer,
            &self.registry,
            &self.viewport,
        );
        let start = self.viewport.px_to_time(snapped.max(0.0));
        self.commit(ClipEdit::Move {
            id,
            layer: target_layer,
            start,
        })
    }

    /// Commit a resize gesture from the new track width in pixels.
    pub fn resize_clip(&mut self, id: ClipId, edge: ResizeEdge, width_px: f32) -> EditOutcome {
        let duration = self.viewport.px_to_time(width_px);
        self.commit(ClipEdit::Resize { id, edge, duration })
    }

    // ── Transport ───────────────────────────────────────────────

    pub fn play(&mut self) -> std::result::Result<(), TransportError> {
        self.transport.play(&self.registry)
    }

    pub fn pause(&mut self) {
        self.transport.pause();
    }

    /// Seek from a ruler click at viewport-pixel `px`.
    pub fn click_ruler(&mut self, px: f32) {
        let time = self.viewport.time_at_click(px);
        self.transport.seek(time, &self.registry);
    }

    // ── Event queue ─────────────────────────────────────────────

    /// Drain pending load completions into the registry.
    ///
    /// Completions addressed to deleted clips are discarded inside
    /// `resolve_load`. Returns the number of events drained.
    pub fn pump_events(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.load_events.try_recv() {
            self.registry.resolve_load(event.clip_id, event.result);
            drained += 1;
        }
        if drained > 0 {
            debug!(drained, "drained load events");
        }
        drained
    }

    /// Block until every pending load has settled or the timeout elapses.
    ///
    /// Returns whether all loads settled. Intended for tests and batch
    /// import flows; interactive callers use `pump_events` from their tick.
    pub fn await_loads(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.registry.any_loading() {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return false;
            };
            match self.load_events.recv_timeout(remaining) {
                Ok(event) => self.registry.resolve_load(event.clip_id, event.result),
                Err(_) => return false,
            }
        }
        true
    }

    /// One step of the simulation: drain events, advance the clock one tick,
    /// and compose the frame.
    pub fn tick(&mut self) -> CompositorFrame {
        self.pump_events();
        self.transport.tick(&self.registry);
        compose(&self.registry, &self.transport)
    }

    /// Compose the current state without advancing time.
    pub fn current_frame(&self) -> CompositorFrame {
        compose(&self.registry, &self.transport)
    }
}
