//! The playback clock: a simulated transport over the clip registry.
//!
//! The clock is logical, not wall-time: `advance` is a pure state step the
//! caller drives, which keeps playback deterministic in tests. At the
//! nominal rate a tick is 100 ms of timeline time.

use cutline_core::Time;
use cutline_timeline::ClipRegistry;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Nominal tick period in milliseconds.
pub const TICK_MILLIS: i64 = 100;

/// One tick of timeline time (0.1 s).
fn tick_step() -> Time {
    Time::new(TICK_MILLIS, 1000)
}

/// Why a play request was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Playback is refused (not queued) while any clip is still loading.
    #[error("playback unavailable while media is loading")]
    MediaLoading,
}

/// Transport state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    Stopped,
    Playing,
}

/// The playback clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transport {
    current_time: Time,
    state: TransportState,
}

impl Transport {
    /// Create a stopped transport at time zero.
    pub fn new() -> Self {
        Self {
            current_time: Time::ZERO,
            state: TransportState::Stopped,
        }
    }

    /// Current playhead position.
    #[inline]
    pub fn current_time(&self) -> Time {
        self.current_time
    }

    /// Current transport state.
    #[inline]
    pub fn state(&self) -> TransportState {
        self.state
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    /// Start playback.
    ///
    /// Refused while any clip's media is still loading; the request is not
    /// queued, the caller may retry once loads settle.
    pub fn play(&mut self, registry: &ClipRegistry) -> Result<(), TransportError> {
        if registry.any_loading() {
            debug!("play refused: clips still loading");
            return Err(TransportError::MediaLoading);
        }
        self.state = TransportState::Playing;
        info!(time = %self.current_time, "playback started");
        Ok(())
    }

    /// Stop playback, leaving the playhead in place.
    pub fn pause(&mut self) {
        if self.state == TransportState::Playing {
            info!(time = %self.current_time, "playback paused");
        }
        self.state = TransportState::Stopped;
    }

    /// Move the playhead, clamped to `[0, max_extent]`.
    pub fn seek(&mut self, time: Time, registry: &ClipRegistry) {
        self.current_time = time.clamp(Time::ZERO, registry.max_extent());
        debug!(time = %self.current_time, "seeked");
    }

    /// Advance the clock by `dt` of timeline time.
    ///
    /// No-op while stopped. Reaching or exceeding the registry's maximum
    /// extent pins the playhead at the extent and stops the transport.
    pub fn advance(&mut self, dt: Time, registry: &ClipRegistry) {
        if self.state != TransportState::Playing {
            return;
        }
        let extent = registry.max_extent();
        let next = self.current_time + dt;
        if next >= extent {
            self.current_time = extent;
            self.state = TransportState::Stopped;
            info!(time = %extent, "playback reached end");
        } else {
            self.current_time = next;
        }
    }

    /// Advance by one nominal tick (0.1 s).
    pub fn tick(&mut self, registry: &ClipRegistry) {
        self.advance(tick_step(), registry);
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}
