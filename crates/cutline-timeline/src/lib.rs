//! Cutline Timeline - Timeline data model
//!
//! Implements the arrangement layer of the editor:
//! - The clip registry, single source of truth for placed media
//! - The layer stack (z-order lanes with non-overlap within a lane)
//! - The drag/resize/snap engine
//! - Time-to-pixel viewport mapping with bounded zoom
//! - Canvas frame presets

pub mod canvas;
pub mod clip;
pub mod layer;
pub mod registry;
pub mod snapping;
pub mod viewport;

pub use canvas::CanvasPreset;
pub use clip::{Clip, ClipId, ClipKind, LoadState};
pub use layer::{Layer, LayerId, LayerStack};
pub use registry::{ClipEdit, ClipRegistry, EditOutcome, RejectReason, ResizeEdge};
pub use snapping::SnapEngine;
pub use viewport::{RulerMark, Viewport, MAX_ZOOM, MIN_ZOOM};
