//! Cutline Core - Foundation types for the timeline compositor
//!
//! This crate provides the fundamental types used throughout Cutline:
//! - Time representation (Time, Span)
//! - Geometric primitives for canvas placement
//! - Error types

pub mod error;
pub mod geometry;
pub mod time;

pub use error::{CutlineError, Result};
pub use geometry::{Rect, Vec2};
pub use time::{Span, Time};
