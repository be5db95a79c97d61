//! Per-tick compositor: visibility and media synchronization directives.
//!
//! On every tick the compositor reads one consistent snapshot of the clip
//! registry and the transport and emits, per clip, what the presentation
//! layer should do with its media element. The compositor never mutates
//! state; it is a pure projection.

use cutline_core::{Rect, Time};
use cutline_timeline::{Clip, ClipId, ClipKind, ClipRegistry};

use crate::transport::Transport;

/// What a clip's media element should do this tick.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaDirective {
    /// Not visible at the current time. Video elements must pause,
    /// regardless of the global transport state.
    Hidden,
    /// Visible image; nothing to synchronize.
    Image,
    /// Visible video: set the local playback head and play or pause in sync
    /// with the transport.
    Video {
        /// Position within the clip's own media (`current_time - start`).
        head: Time,
        /// Whether the element should be playing.
        play: bool,
    },
}

/// One clip's slot in the composed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSlot {
    pub clip: ClipId,
    /// Stacking position, ascending (0 = bottom).
    pub z: usize,
    /// On-canvas frame rectangle.
    pub frame: Rect,
    pub rotation_degrees: f32,
    pub directive: MediaDirective,
}

/// The composed state of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositorFrame {
    pub time: Time,
    pub playing: bool,
    /// Slots in stacking order, bottom first.
    pub slots: Vec<ClipSlot>,
}

impl CompositorFrame {
    /// Find a slot by clip id.
    pub fn slot(&self, clip: ClipId) -> Option<&ClipSlot> {
        self.slots.iter().find(|s| s.clip == clip)
    }
}

fn directive_for(clip: &Clip, time: Time, playing: bool) -> MediaDirective {
    let visible = clip.span().contains(time);
    match &clip.kind {
        ClipKind::Image if visible => MediaDirective::Image,
        ClipKind::Video { .. } if visible => MediaDirective::Video {
            head: time - clip.start,
            play: playing && clip.playable(),
        },
        _ => MediaDirective::Hidden,
    }
}

/// Compose the current tick: every clip, in stacking order, with its
/// visibility and synchronization directive.
pub fn compose(registry: &ClipRegistry, transport: &Transport) -> CompositorFrame {
    let time = transport.current_time();
    let playing = transport.is_playing();

    let mut slots = Vec::with_capacity(registry.len());
    for layer in registry.layers().iter() {
        let z = registry
            .layers()
            .z_index(layer.id)
            .expect("layer from the stack always has a z-index");
        for clip in registry.clips_in_layer(layer.id) {
            slots.push(ClipSlot {
                clip: clip.id,
                z,
                frame: clip.frame,
                rotation_degrees: clip.rotation_degrees,
                directive: directive_for(clip, time, playing),
            });
        }
    }

    CompositorFrame {
        time,
        playing,
        slots,
    }
}
