//! Time points, signed spans and clocks used by the sleep functions.

use crate::platform::{DefaultPlatform, Platform};
use core::ops::{Add, Neg, Sub};

const NANOS_PER_MICRO: i64 = 1_000;
const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SEC: i64 = 1_000_000_000;

/// A signed span of time with nanosecond resolution.
///
/// Spans can be negative, e.g. the distance to a deadline that has already
/// passed. Arithmetic saturates at the representable range (about 292 years
/// either way).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl Duration {
    /// The empty span.
    pub const ZERO: Duration = Duration(0);

    /// Create a duration from nanoseconds.
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Create a duration from microseconds.
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros.saturating_mul(NANOS_PER_MICRO))
    }

    /// Create a duration from milliseconds.
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(NANOS_PER_MILLI))
    }

    /// Create a duration from seconds.
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(NANOS_PER_SEC))
    }

    /// Nanoseconds in this duration.
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Whole milliseconds, truncated toward zero.
    pub const fn as_millis(self) -> i64 {
        self.0 / NANOS_PER_MILLI
    }

    /// Milliseconds needed to wait out this span: rounded up, and `0` for
    /// spans that are zero or negative.
    pub const fn wait_millis(self) -> u64 {
        if self.0 <= 0 {
            return 0;
        }
        let whole = (self.0 / NANOS_PER_MILLI) as u64;
        if self.0 % NANOS_PER_MILLI == 0 {
            whole
        } else {
            whole + 1
        }
    }

    /// `true` for spans strictly greater than zero.
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Duration {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl From<core::time::Duration> for Duration {
    fn from(d: core::time::Duration) -> Self {
        Self(i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
    }
}

/// A point on some clock, in nanoseconds since that clock's epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(u64);

impl Instant {
    /// Create a new instant from nanoseconds since epoch.
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Get nanoseconds since epoch.
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// Current time on the monotonic clock.
    pub fn now() -> Self {
        MonotonicClock::now()
    }

    /// Signed span from `earlier` to `self`; negative if `earlier` is later.
    pub fn duration_since(self, earlier: Instant) -> Duration {
        let nanos = i128::from(self.0) - i128::from(earlier.0);
        Duration(i64::try_from(nanos).unwrap_or(if nanos < 0 { i64::MIN } else { i64::MAX }))
    }

    /// Span from now until `self` on the monotonic clock.
    pub fn remaining(self) -> Duration {
        self.duration_since(Instant::now())
    }
}

impl Add<Duration> for Instant {
    type Output = Self;

    fn add(self, duration: Duration) -> Self {
        Self(self.0.saturating_add_signed(duration.0))
    }
}

impl Sub<Duration> for Instant {
    type Output = Self;

    fn sub(self, duration: Duration) -> Self {
        self + (-duration)
    }
}

/// Source of [`Instant`]s.
pub trait Clock {
    /// Current time on this clock.
    fn now() -> Instant;
}

/// The platform's monotonic clock. It never goes backwards.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now() -> Instant {
        Instant(DefaultPlatform::monotonic_nanos())
    }
}
