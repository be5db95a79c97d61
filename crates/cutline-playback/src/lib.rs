//! Cutline Playback - the simulated transport and compositor
//!
//! Drives playback over the clip registry:
//! - A logical clock with play/pause/seek and tick-based advancement
//! - The per-tick compositor computing clip visibility and media directives
//! - The editor session wiring registry, viewport, transport, and the
//!   asset loader behind a single event queue

pub mod compositor;
pub mod session;
pub mod transport;

pub use compositor::{compose, ClipSlot, CompositorFrame, MediaDirective};
pub use session::EditorSession;
pub use transport::{Transport, TransportError, TransportState, TICK_MILLIS};
