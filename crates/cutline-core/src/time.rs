//! Time representation for the timeline
//!
//! Uses rational numbers to avoid floating-point accumulation errors in the
//! playback clock. All time values are seconds as numerator/denominator pairs.

use num_rational::Rational64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// A point in time on the timeline, in rational seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Time {
    value: Rational64,
}

impl Time {
    /// Create a time of `numerator / denominator` seconds.
    #[inline]
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            value: Rational64::new(numerator, denominator),
        }
    }

    /// Create a time from whole seconds.
    #[inline]
    pub const fn from_secs(seconds: i64) -> Self {
        Self {
            value: Rational64::new_raw(seconds, 1),
        }
    }

    /// Create a time from seconds as a float.
    /// Note: May introduce small precision errors.
    pub fn from_seconds_f64(seconds: f64) -> Self {
        const PRECISION: i64 = 1_000_000;
        Self {
            value: Rational64::new((seconds * PRECISION as f64).round() as i64, PRECISION),
        }
    }

    /// Convert to seconds as f64.
    #[inline]
    pub fn to_seconds_f64(self) -> f64 {
        *self.value.numer() as f64 / *self.value.denom() as f64
    }

    /// Zero time constant.
    pub const ZERO: Self = Self {
        value: Rational64::new_raw(0, 1),
    };

    /// Check if this time is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        *self.value.numer() == 0
    }

    /// Check if this time is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        *self.value.numer() < 0
    }

    /// The larger of two times.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if self > other {
            self
        } else {
            other
        }
    }

    /// The smaller of two times.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if self < other {
            self
        } else {
            other
        }
    }

    /// Clamp this time to the inclusive range `[lo, hi]`.
    #[inline]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    /// Absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        if self.is_negative() {
            Self { value: -self.value }
        } else {
            self
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Time {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
        }
    }
}

impl Sub for Time {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            value: self.value - rhs.value,
        }
    }
}

impl Mul<i64> for Time {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        Self {
            value: self.value * rhs,
        }
    }
}

impl Div<i64> for Time {
    type Output = Self;
    fn div(self, rhs: i64) -> Self {
        Self {
            value: self.value / rhs,
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.to_seconds_f64())
    }
}

/// A clip's occupied interval: inclusive start, exclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start time (inclusive)
    pub start: Time,
    /// Duration of the span
    pub duration: Time,
}

impl Span {
    /// Create a span from start and duration.
    #[inline]
    pub fn new(start: Time, duration: Time) -> Self {
        Self { start, duration }
    }

    /// Create a span from start and end times.
    #[inline]
    pub fn from_start_end(start: Time, end: Time) -> Self {
        Self {
            start,
            duration: end - start,
        }
    }

    /// End time (exclusive).
    #[inline]
    pub fn end(self) -> Time {
        self.start + self.duration
    }

    /// Check if a time falls within `[start, end)`.
    #[inline]
    pub fn contains(self, time: Time) -> bool {
        time >= self.start && time < self.end()
    }

    /// Check if two half-open spans overlap.
    ///
    /// Adjacent spans (one ending exactly where the other starts) do not
    /// overlap.
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Empty span at zero.
    pub const EMPTY: Self = Self {
        start: Time::ZERO,
        duration: Time::ZERO,
    };
}

impl Default for Span {
    fn default() -> Self {
        Self::EMPTY
    }
}
